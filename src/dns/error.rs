use thiserror::Error;
use trust_dns_resolver::error::ResolveError;

use crate::cache::QueryKind;

/// Errors raised while querying DNS. They are absorbed into negative
/// signals by [`check_dns`](crate::dns::check_dns) and never reach the
/// pipeline caller.
#[derive(Debug, Error)]
pub enum DnsError {
    #[error("domain is empty")]
    EmptyDomain,
    #[error("resolver initialization failed: {source}")]
    ResolverInit {
        #[source]
        source: ResolveError,
    },
    #[error("{kind} lookup failed for {name}: {source}")]
    Lookup {
        kind: QueryKind,
        name: String,
        #[source]
        source: ResolveError,
    },
    #[error("TXT record {name} contains invalid UTF-8 data: {source}")]
    TxtDataUtf8 {
        name: String,
        #[source]
        source: std::str::Utf8Error,
    },
}

impl DnsError {
    pub(crate) fn resolver_init(source: ResolveError) -> Self {
        Self::ResolverInit { source }
    }

    pub fn lookup(kind: QueryKind, name: impl Into<String>, source: ResolveError) -> Self {
        Self::Lookup {
            kind,
            name: name.into(),
            source,
        }
    }

    pub(crate) fn txt_data_utf8(name: impl Into<String>, source: std::str::Utf8Error) -> Self {
        Self::TxtDataUtf8 {
            name: name.into(),
            source,
        }
    }
}
