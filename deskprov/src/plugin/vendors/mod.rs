//! Built-in vendor plugins.

pub mod cisco;
pub mod gigaset;
pub mod grandstream;
pub mod snom;
pub mod yealink;
