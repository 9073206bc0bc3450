use std::net::{Ipv4Addr, Ipv6Addr};

use async_trait::async_trait;
use trust_dns_resolver::{
    TokioAsyncResolver,
    error::{ResolveError, ResolveErrorKind},
    lookup::TxtLookup,
};

use super::{DnsError, MxRecord};
use crate::cache::QueryKind;

/// The four record lookups the crate needs. Implemented by [`TokioResolver`]
/// for real traffic and by stubs in tests.
///
/// A name without records of the requested type yields `Ok` with an empty
/// list; `Err` is reserved for resolver failures.
#[async_trait]
pub trait DnsLookup: Send + Sync {
    async fn lookup_mx(&self, name: &str) -> Result<Vec<MxRecord>, DnsError>;
    async fn lookup_txt(&self, name: &str) -> Result<Vec<String>, DnsError>;
    async fn lookup_a(&self, name: &str) -> Result<Vec<Ipv4Addr>, DnsError>;
    async fn lookup_aaaa(&self, name: &str) -> Result<Vec<Ipv6Addr>, DnsError>;
}

/// [`DnsLookup`] backed by the host's configured resolver.
#[derive(Clone)]
pub struct TokioResolver {
    inner: TokioAsyncResolver,
}

impl TokioResolver {
    pub fn from_system_conf() -> Result<Self, DnsError> {
        let inner = TokioAsyncResolver::tokio_from_system_conf().map_err(DnsError::resolver_init)?;
        Ok(Self { inner })
    }

    pub fn from_resolver(inner: TokioAsyncResolver) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl DnsLookup for TokioResolver {
    async fn lookup_mx(&self, name: &str) -> Result<Vec<MxRecord>, DnsError> {
        let lookup = match self.inner.mx_lookup(name).await {
            Ok(lookup) => lookup,
            Err(err) => return empty_or_error(QueryKind::Mx, name, err),
        };
        let mut records = Vec::new();
        for mx in lookup.iter() {
            let exchange = normalize_exchange(mx.exchange().to_utf8());
            records.push(MxRecord::new(mx.preference(), exchange));
        }
        Ok(records)
    }

    async fn lookup_txt(&self, name: &str) -> Result<Vec<String>, DnsError> {
        match self.inner.txt_lookup(name).await {
            Ok(lookup) => collect_txt_records(name, &lookup),
            Err(err) => empty_or_error(QueryKind::Txt, name, err),
        }
    }

    async fn lookup_a(&self, name: &str) -> Result<Vec<Ipv4Addr>, DnsError> {
        match self.inner.ipv4_lookup(name).await {
            Ok(lookup) => Ok(lookup.iter().map(|a| a.0).collect()),
            Err(err) => empty_or_error(QueryKind::A, name, err),
        }
    }

    async fn lookup_aaaa(&self, name: &str) -> Result<Vec<Ipv6Addr>, DnsError> {
        match self.inner.ipv6_lookup(name).await {
            Ok(lookup) => Ok(lookup.iter().map(|aaaa| aaaa.0).collect()),
            Err(err) => empty_or_error(QueryKind::Aaaa, name, err),
        }
    }
}

fn empty_or_error<T>(kind: QueryKind, name: &str, err: ResolveError) -> Result<Vec<T>, DnsError> {
    if matches!(err.kind(), ResolveErrorKind::NoRecordsFound { .. }) {
        Ok(Vec::new())
    } else {
        Err(DnsError::lookup(kind, name, err))
    }
}

fn collect_txt_records(name: &str, lookup: &TxtLookup) -> Result<Vec<String>, DnsError> {
    let mut records = Vec::new();
    for txt in lookup.iter() {
        let mut record = String::new();
        for piece in txt.txt_data().iter() {
            let segment = std::str::from_utf8(piece.as_ref())
                .map_err(|err| DnsError::txt_data_utf8(name, err))?;
            record.push_str(segment);
        }
        records.push(record);
    }
    Ok(records)
}

pub(crate) fn normalize_exchange(exchange: String) -> String {
    let trimmed = exchange.trim_end_matches('.');
    trimmed.to_ascii_lowercase()
}

pub(crate) fn fqdn(label: &str, domain: &str) -> String {
    let trimmed = label.trim().trim_end_matches('.');
    if trimmed.is_empty() {
        domain.to_string()
    } else {
        format!("{}.{}", trimmed.to_ascii_lowercase(), domain)
    }
}
