//! Local, table-driven signals about an address. None of these perform I/O;
//! they all expect the lower-cased local part or domain produced by the
//! syntax gate.

mod canonical;
mod disposable;
mod pattern;
mod provider;
mod role;
mod typo;

pub use canonical::{base_local, canonicalize, plus_tag};
pub use disposable::is_disposable;
pub use pattern::{PatternSeverity, pattern_severity};
pub use provider::detect_provider;
pub use role::is_role_address;
pub use typo::{suggest_address, suggest_domain};
