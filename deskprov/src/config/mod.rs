//! Vendor-neutral configuration record.

mod record;

pub use record::{CallManager, ConfigKey, ConfigRecord, FuncKey, FuncKeyType, SipLine};
