use std::time::Duration;

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "with-serde", serde(default))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatchAllOptions {
    pub enabled: bool,
    /// Conversation budget per MX host.
    pub timeout_ms: u64,
}

impl Default for CatchAllOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            timeout_ms: 5_000,
        }
    }
}

impl CatchAllOptions {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
