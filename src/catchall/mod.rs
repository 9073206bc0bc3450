//! Catch-all detection: does the domain accept mail for a recipient that
//! cannot exist?

mod options;
mod types;

pub use options::CatchAllOptions;
pub use types::{CatchAllMethod, CatchAllOutcome, Confidence};

use std::time::Duration;

use tracing::{debug, instrument};

use crate::dns::{DnsContext, mx_hosts};
use crate::smtp::{ProbeStatus, RcptRule, SmtpOptions, converse, random_local_part};

const RANDOM_LOCAL_LEN: usize = 24;

/// Asks each MX host of `domain`, in order, about one freshly generated
/// random recipient. The first host that accepts or refuses it decides with
/// high confidence; hosts that time out or drop the connection are skipped.
///
/// `smtp` supplies the port and envelope identity, `options` the per-host
/// budget. The SMTP rate limiter is not consulted.
#[instrument(skip_all, fields(domain = %domain))]
pub async fn check_catch_all(
    domain: &str,
    options: &CatchAllOptions,
    smtp: &SmtpOptions,
    dns: &DnsContext<'_>,
    dns_timeout: Duration,
) -> CatchAllOutcome {
    let hosts = mx_hosts(domain, dns_timeout, dns).await;
    if hosts.is_empty() {
        return CatchAllOutcome::new(
            false,
            Confidence::Low,
            CatchAllMethod::Unknown,
            "no MX host".to_string(),
        );
    }

    let recipient = format!("{}@{}", random_local_part(RANDOM_LOCAL_LEN), domain);
    let conv = smtp.conversation(&recipient, RcptRule::CatchAll);

    for host in &hosts {
        let outcome = converse(host, smtp.port, &conv, options.timeout()).await;
        match outcome.status {
            ProbeStatus::Valid => {
                debug!(%host, "random recipient accepted");
                return CatchAllOutcome::new(
                    true,
                    Confidence::High,
                    CatchAllMethod::SmtpProbe,
                    format!("{host} accepted a random recipient"),
                );
            }
            ProbeStatus::Invalid => {
                debug!(%host, "random recipient refused");
                return CatchAllOutcome::new(
                    false,
                    Confidence::High,
                    CatchAllMethod::SmtpProbe,
                    format!("{host} refused a random recipient"),
                );
            }
            ProbeStatus::Unknown => {
                debug!(%host, code = ?outcome.code, "catch-all probe inconclusive");
            }
        }
    }

    CatchAllOutcome::new(
        false,
        Confidence::Low,
        CatchAllMethod::SmtpProbe,
        format!("{} host(s) inconclusive", hosts.len()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns::tests::StubResolver;
    use crate::dns::{DnsCache, MxRecord};
    use crate::smtp::tests::MockSmtp;

    fn options() -> CatchAllOptions {
        CatchAllOptions {
            enabled: true,
            timeout_ms: 1_000,
        }
    }

    #[tokio::test]
    async fn accepting_host_marks_domain_catch_all() {
        let mut mock = MockSmtp::start(&["220 mock", "250 hi", "250 ok", "250 sure"]).await;
        let stub = StubResolver::well_configured("example.com", &["127.0.0.1"]);
        let cache = DnsCache::default();
        let ctx = DnsContext::new(&stub, &cache);

        let outcome = check_catch_all(
            "example.com",
            &options(),
            &mock.options(1_000),
            &ctx,
            Duration::from_secs(1),
        )
        .await;
        assert!(outcome.is_catch_all);
        assert_eq!(outcome.confidence, Confidence::High);
        assert_eq!(outcome.method, CatchAllMethod::SmtpProbe);

        let received = mock.next_session().await;
        let rcpt = received
            .iter()
            .find(|line| line.starts_with("RCPT TO:<"))
            .expect("rcpt sent");
        assert!(rcpt.ends_with("@example.com>"));
        assert_eq!(rcpt.len(), "RCPT TO:<".len() + RANDOM_LOCAL_LEN + "@example.com>".len());
    }

    #[tokio::test]
    async fn any_permanent_refusal_means_not_catch_all() {
        let mut mock = MockSmtp::start(&["220 mock", "250 hi", "250 ok", "554 denied"]).await;
        let stub = StubResolver::well_configured("example.com", &["127.0.0.1"]);
        let cache = DnsCache::default();
        let ctx = DnsContext::new(&stub, &cache);

        let outcome = check_catch_all(
            "example.com",
            &options(),
            &mock.options(1_000),
            &ctx,
            Duration::from_secs(1),
        )
        .await;
        assert!(!outcome.is_catch_all);
        assert_eq!(outcome.confidence, Confidence::High);
        mock.next_session().await;
    }

    #[tokio::test]
    async fn no_mx_is_low_confidence_unknown_method() {
        let stub = StubResolver::new();
        let cache = DnsCache::default();
        let ctx = DnsContext::new(&stub, &cache);

        let outcome = check_catch_all(
            "example.com",
            &options(),
            &SmtpOptions::default(),
            &ctx,
            Duration::from_secs(1),
        )
        .await;
        assert!(!outcome.is_catch_all);
        assert_eq!(outcome.confidence, Confidence::Low);
        assert_eq!(outcome.method, CatchAllMethod::Unknown);
    }

    #[tokio::test]
    async fn unreachable_then_accepting_host_still_concludes() {
        let mut mock = MockSmtp::start(&["220 mock", "250 hi", "250 ok", "250 sure"]).await;
        let stub = StubResolver::new().with_mx(
            "example.com",
            vec![MxRecord::new(1, "127.0.0.2"), MxRecord::new(2, "127.0.0.1")],
        );
        let cache = DnsCache::default();
        let ctx = DnsContext::new(&stub, &cache);

        let outcome = check_catch_all(
            "example.com",
            &options(),
            &mock.options(1_000),
            &ctx,
            Duration::from_secs(1),
        )
        .await;
        assert!(outcome.is_catch_all);
        assert_eq!(outcome.confidence, Confidence::High);
        mock.next_session().await;
    }

    #[tokio::test]
    async fn all_hosts_inconclusive_is_low_confidence() {
        let mut mock = MockSmtp::start(&["220 mock", "250 hi", "250 ok", "452 too busy"]).await;
        let stub = StubResolver::well_configured("example.com", &["127.0.0.1"]);
        let cache = DnsCache::default();
        let ctx = DnsContext::new(&stub, &cache);

        let outcome = check_catch_all(
            "example.com",
            &options(),
            &mock.options(1_000),
            &ctx,
            Duration::from_secs(1),
        )
        .await;
        assert!(!outcome.is_catch_all);
        assert_eq!(outcome.confidence, Confidence::Low);
        assert_eq!(outcome.method, CatchAllMethod::SmtpProbe);
        mock.next_session().await;
    }

    #[test]
    fn methods_render_snake_case() {
        assert_eq!(CatchAllMethod::SmtpProbe.to_string(), "smtp_probe");
        assert_eq!(CatchAllMethod::Heuristic.to_string(), "heuristic");
        assert_eq!(CatchAllMethod::Unknown.to_string(), "unknown");
    }
}
