//! Plugin lifecycle façade.
//!
//! A [`Provisioner`] binds one plugin definition to the host's output
//! directory, template engine and sync service, and exposes the operations
//! the host drives devices through.

mod builder;
mod generic;
mod outcome;

pub use builder::ProvisionerBuilder;
pub use generic::Provisioner;
pub use outcome::SyncOutcome;
