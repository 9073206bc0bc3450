use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MxRecord {
    pub preference: u16,
    pub exchange: String,
}

impl MxRecord {
    pub fn new(preference: u16, exchange: impl Into<String>) -> Self {
        Self {
            preference,
            exchange: exchange.into(),
        }
    }
}

/// Records returned by one successful lookup. An empty list is a valid,
/// cacheable negative answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSet {
    Mx(Vec<MxRecord>),
    Txt(Vec<String>),
    A(Vec<Ipv4Addr>),
    Aaaa(Vec<Ipv6Addr>),
}

impl RecordSet {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Mx(records) => records.is_empty(),
            Self::Txt(records) => records.is_empty(),
            Self::A(records) => records.is_empty(),
            Self::Aaaa(records) => records.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupFailure {
    Timeout,
    Resolver(String),
}

impl fmt::Display for LookupFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => f.write_str("timed out"),
            Self::Resolver(message) => f.write_str(message),
        }
    }
}

/// What the cache stores per lookup: the records, or why there are none.
/// Failures are cached too, so a repeated check does not re-query.
pub type LookupEnvelope = Result<RecordSet, LookupFailure>;

/// DNS posture of a domain. `None` means the corresponding lookup was not
/// requested.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsOutcome {
    pub domain: String,
    /// Any of the lookups that ran returned records. `_dmarc` does not count.
    pub domain_exists: bool,
    pub mx: Option<bool>,
    pub spf: Option<bool>,
    pub dmarc: Option<bool>,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub mx_hosts: Option<Vec<String>>,
}
