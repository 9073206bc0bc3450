use std::time::Duration;

use tracing::{debug, instrument, warn};

use crate::dns::{DnsContext, mx_hosts};
use crate::ratelimit::RateLimiter;

use super::machine::RcptRule;
use super::options::SmtpOptions;
use super::session::converse;
use super::types::{ProbeCode, ProbeOutcome};

/// Probes `address` on a single mail host.
pub async fn connect_and_probe(host: &str, address: &str, options: &SmtpOptions) -> ProbeOutcome {
    let conv = options.conversation(address, RcptRule::Mailbox);
    converse(host, options.port, &conv, options.timeout()).await
}

/// Probes `address` against the MX hosts of `domain`, one host at a time in
/// preference order.
///
/// The limiter is consulted once per call; a denial returns `unknown` with
/// [`ProbeCode::RateLimited`] before any DNS or SMTP traffic. The first
/// conclusive host answer wins; otherwise the last inconclusive one is
/// returned.
#[instrument(skip_all, fields(domain = %domain))]
pub async fn probe_smtp(
    domain: &str,
    address: &str,
    options: &SmtpOptions,
    limiter: &RateLimiter,
    dns: &DnsContext<'_>,
    dns_timeout: Duration,
) -> ProbeOutcome {
    if !limiter.allow(domain) {
        warn!(limit = limiter.limit(), "smtp probe denied by rate limiter");
        return ProbeOutcome::unknown(ProbeCode::RateLimited);
    }

    let hosts = mx_hosts(domain, dns_timeout, dns).await;
    if hosts.is_empty() {
        debug!("no MX host to probe");
        return ProbeOutcome::unknown(ProbeCode::NoMxHosts);
    }

    let mut last = None;
    for host in &hosts {
        let outcome = connect_and_probe(host, address, options).await;
        if outcome.status.is_conclusive() {
            return outcome;
        }
        debug!(%host, code = ?outcome.code, "inconclusive, trying next host");
        last = Some(outcome);
    }
    last.unwrap_or_else(|| ProbeOutcome::unknown(ProbeCode::NoMxHosts))
}
