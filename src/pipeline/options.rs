use std::time::Duration;

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

use crate::cache::{DEFAULT_MAX_ENTRIES, DEFAULT_TTL};
use crate::catchall::CatchAllOptions;
use crate::dns::DnsOptions;
use crate::scoring::ScoringOptions;
use crate::smtp::SmtpOptions;

/// Sizing of the DNS cache. Validations sharing the same sizing share the
/// same cache instance.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "with-serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheOptions {
    pub dns_ttl_ms: u64,
    pub max_entries: usize,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            dns_ttl_ms: DEFAULT_TTL.as_millis() as u64,
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

impl CacheOptions {
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.dns_ttl_ms)
    }
}

/// Everything [`Validator::validate`](super::Validator::validate) can be told.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "with-serde", serde(default))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidateOptions {
    pub dns: DnsOptions,
    pub smtp: SmtpOptions,
    pub catch_all: CatchAllOptions,
    pub cache: CacheOptions,
    pub scoring: ScoringOptions,
    /// Assemble intelligence, risks and score breakdown. Also enables provider
    /// detection.
    pub detailed: bool,
    /// Record a per-step trace.
    pub trace: bool,
}
