use std::time::Duration;

/// Which lookups [`check_dns`](crate::dns::check_dns) issues, and how long
/// each one may take. A and AAAA are always queried since they feed the
/// domain-existence signal.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(default))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsOptions {
    /// Also feeds the domain-existence signal: with MX disabled, a domain
    /// publishing only MX records is reported as non-existent.
    pub mx: bool,
    pub spf: bool,
    pub dmarc: bool,
    pub timeout_ms: u64,
}

impl Default for DnsOptions {
    fn default() -> Self {
        Self {
            mx: true,
            spf: true,
            dmarc: true,
            timeout_ms: 4_000,
        }
    }
}

impl DnsOptions {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
