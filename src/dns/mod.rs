//! DNS posture checks with caching.
//!
//! [`check_dns`] issues the MX, root TXT (SPF), `_dmarc` TXT, A and AAAA
//! lookups concurrently. Each lookup is bounded by its own timeout and is
//! cached on its own, so one slow or failing query never blocks or poisons
//! the others: it simply turns into an absent signal.

mod error;
mod options;
mod resolver;
mod types;

pub use error::DnsError;
pub use options::DnsOptions;
pub use resolver::{DnsLookup, TokioResolver};
pub use types::{DnsOutcome, LookupEnvelope, LookupFailure, MxRecord, RecordSet};

use std::time::Duration;

use tracing::{debug, instrument, trace};

use crate::cache::{CacheKey, QueryKind, ResolverCache};
use resolver::fqdn;

/// Cache holding one [`LookupEnvelope`] per query.
pub type DnsCache = ResolverCache<LookupEnvelope>;

/// Resolver and cache used together by every DNS-consuming step.
#[derive(Clone, Copy)]
pub struct DnsContext<'a> {
    pub lookup: &'a dyn DnsLookup,
    pub cache: &'a DnsCache,
}

impl<'a> DnsContext<'a> {
    pub fn new(lookup: &'a dyn DnsLookup, cache: &'a DnsCache) -> Self {
        Self { lookup, cache }
    }
}

#[instrument(skip_all, fields(domain = %domain))]
pub async fn check_dns(domain: &str, options: &DnsOptions, ctx: &DnsContext<'_>) -> DnsOutcome {
    let timeout = options.timeout();
    let dmarc_name = fqdn("_dmarc", domain);

    let mx = async {
        if options.mx {
            Some(resolve(ctx, CacheKey::new(QueryKind::Mx, domain), timeout).await)
        } else {
            None
        }
    };
    let root_txt = async {
        if options.spf {
            Some(resolve(ctx, CacheKey::new(QueryKind::Txt, domain), timeout).await)
        } else {
            None
        }
    };
    let dmarc_txt = async {
        if options.dmarc {
            Some(resolve(ctx, CacheKey::new(QueryKind::Txt, &dmarc_name), timeout).await)
        } else {
            None
        }
    };
    let a = resolve(ctx, CacheKey::new(QueryKind::A, domain), timeout);
    let aaaa = resolve(ctx, CacheKey::new(QueryKind::Aaaa, domain), timeout);

    let (mx, root_txt, dmarc_txt, a, aaaa) = tokio::join!(mx, root_txt, dmarc_txt, a, aaaa);

    let hosts = mx.as_ref().map(exchanges_of).unwrap_or_default();
    let has_mx = !hosts.is_empty();
    let has_root_txt = root_txt.as_ref().is_some_and(has_records);
    let domain_exists = has_mx || has_root_txt || has_records(&a) || has_records(&aaaa);

    let outcome = DnsOutcome {
        domain: domain.to_string(),
        domain_exists,
        mx: mx.as_ref().map(|_| has_mx),
        spf: root_txt.as_ref().map(|env| has_policy(env, "v=spf1")),
        dmarc: dmarc_txt.as_ref().map(|env| has_policy(env, "v=dmarc1")),
        mx_hosts: has_mx.then_some(hosts),
    };
    debug!(
        exists = outcome.domain_exists,
        mx = ?outcome.mx,
        spf = ?outcome.spf,
        dmarc = ?outcome.dmarc,
        "dns posture resolved"
    );
    outcome
}

/// MX-only resolution used by the SMTP probe and the catch-all detector.
/// Hosts come back ordered by preference; failures yield an empty list.
pub async fn mx_hosts(domain: &str, timeout: Duration, ctx: &DnsContext<'_>) -> Vec<String> {
    let envelope = resolve(ctx, CacheKey::new(QueryKind::Mx, domain), timeout).await;
    exchanges_of(&envelope)
}

pub(crate) async fn resolve(
    ctx: &DnsContext<'_>,
    key: CacheKey,
    timeout: Duration,
) -> LookupEnvelope {
    if let Some(hit) = ctx.cache.get(&key) {
        trace!(%key, "dns cache hit");
        return hit;
    }

    let envelope = match tokio::time::timeout(timeout, query(ctx.lookup, &key)).await {
        Ok(Ok(records)) => Ok(records),
        Ok(Err(err)) => {
            debug!(%key, error = %err, "dns lookup failed");
            Err(LookupFailure::Resolver(err.to_string()))
        }
        Err(_) => {
            debug!(%key, timeout_ms = timeout.as_millis() as u64, "dns lookup timed out");
            Err(LookupFailure::Timeout)
        }
    };
    ctx.cache.insert(key, envelope.clone());
    envelope
}

async fn query(lookup: &dyn DnsLookup, key: &CacheKey) -> Result<RecordSet, DnsError> {
    if key.name.is_empty() {
        return Err(DnsError::EmptyDomain);
    }
    match key.kind {
        QueryKind::Mx => lookup.lookup_mx(&key.name).await.map(RecordSet::Mx),
        QueryKind::Txt => lookup.lookup_txt(&key.name).await.map(RecordSet::Txt),
        QueryKind::A => lookup.lookup_a(&key.name).await.map(RecordSet::A),
        QueryKind::Aaaa => lookup.lookup_aaaa(&key.name).await.map(RecordSet::Aaaa),
    }
}

fn has_records(envelope: &LookupEnvelope) -> bool {
    envelope.as_ref().is_ok_and(|records| !records.is_empty())
}

fn exchanges_of(envelope: &LookupEnvelope) -> Vec<String> {
    let Ok(RecordSet::Mx(records)) = envelope else {
        return Vec::new();
    };
    let mut records: Vec<&MxRecord> = records
        .iter()
        .filter(|record| !record.exchange.is_empty())
        .collect();
    records.sort();
    let mut hosts: Vec<String> = Vec::with_capacity(records.len());
    for record in records {
        if !hosts.contains(&record.exchange) {
            hosts.push(record.exchange.clone());
        }
    }
    hosts
}

fn has_policy(envelope: &LookupEnvelope, prefix: &str) -> bool {
    let Ok(RecordSet::Txt(records)) = envelope else {
        return false;
    };
    records
        .iter()
        .any(|record| starts_with_ignore_ascii_case(record.trim(), prefix))
}

fn starts_with_ignore_ascii_case(input: &str, prefix: &str) -> bool {
    input
        .get(..prefix.len())
        .map(|head| head.eq_ignore_ascii_case(prefix))
        .unwrap_or(false)
}
