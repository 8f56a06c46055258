//! Capability association: how well a plugin supports a fingerprint.

mod associator;
mod score;

pub use associator::{Associator, AssociatorPolicy, ModelSupport};
pub use score::SupportScore;
