use std::time::Duration;

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

use super::machine::{Conversation, RcptRule};

/// Configuration knobs for [`probe_smtp`](super::probe_smtp) and
/// [`connect_and_probe`](super::connect_and_probe).
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "with-serde", serde(default))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpOptions {
    pub enabled: bool,
    /// Whole-conversation budget per host, connect included.
    pub timeout_ms: u64,
    pub max_connections_per_domain_per_minute: usize,
    pub port: u16,
    pub helo_name: String,
    pub mail_from: String,
}

impl Default for SmtpOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            timeout_ms: 5_000,
            max_connections_per_domain_per_minute: 10,
            port: 25,
            helo_name: "localhost".to_string(),
            mail_from: "probe@localhost".to_string(),
        }
    }
}

impl SmtpOptions {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub(crate) fn conversation<'a>(&'a self, recipient: &'a str, rule: RcptRule) -> Conversation<'a> {
        let helo = if self.helo_name.trim().is_empty() {
            "localhost"
        } else {
            self.helo_name.as_str()
        };
        Conversation {
            helo,
            mail_from: self.mail_from.as_str(),
            recipient,
            rule,
        }
    }
}
