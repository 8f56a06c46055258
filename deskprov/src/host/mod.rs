//! Collaborators provided by the host provisioning framework.
//!
//! The crate never renders templates, serves files or talks SIP itself.
//! These traits are the narrow seams it uses instead.

mod capabilities;
mod config;
mod notify;
mod renderer;
mod store;

pub use capabilities::{HostCapabilities, PhonebookUrlProvider};
pub use config::ProvisioningConfig;
pub use notify::{CHECK_SYNC_EVENT, SyncAction, SyncNotifier};
pub use renderer::{JsonRenderer, RenderRequest, TemplateRenderer};
pub use store::{FileStore, FsStore};
