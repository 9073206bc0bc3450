use std::sync::Arc;

use super::*;
use crate::catchall::CatchAllOptions;
use crate::dns::tests::StubResolver;
use crate::dns::{DnsOptions, MxRecord};
use crate::scoring::ScoreWeights;
use crate::smtp::tests::MockSmtp;
use crate::smtp::{ProbeCode, ProbeStatus};

/// MX-less domain that still publishes SPF and DMARC.
fn no_mx_stub() -> StubResolver {
    StubResolver::new()
        .with_txt("example.com", &["v=spf1 -all"])
        .with_txt("_dmarc.example.com", &["v=DMARC1; p=reject"])
}

fn validator(stub: StubResolver) -> (Validator, Arc<StubResolver>) {
    let stub = Arc::new(stub);
    let lookup: Arc<dyn DnsLookup> = stub.clone();
    (Validator::new(lookup), stub)
}

#[tokio::test]
async fn malformed_input_is_invalid_without_any_lookup() {
    let (validator, stub) = validator(StubResolver::well_configured("example.com", &["mx.test"]));
    let options = ValidateOptions {
        detailed: true,
        ..ValidateOptions::default()
    };

    for input in ["no-at-sign", "@example.com", "alice@", "  "] {
        let result = validator.validate(input, &options).await;
        assert_eq!(result.verdict, Verdict::Invalid, "{input:?}");
        assert_eq!(result.confidence, 0, "{input:?}");
        assert!(!result.reasons.is_empty());
        assert!(!result.checks.syntax);
        assert!(result.checks.dns.is_none());
    }
    assert_eq!(stub.calls(), 0);
    assert_eq!(validator.registry().cache_count(), 0);
}

#[tokio::test]
async fn missing_mx_costs_exactly_the_no_mx_weight() {
    let (validator, _) = validator(no_mx_stub());
    let result = validator
        .validate("Alice@Example.com", &ValidateOptions::default())
        .await;

    assert_eq!(result.email, "alice@example.com");
    assert_eq!(result.confidence, 100 - ScoreWeights::default().no_mx as u8);
    assert_eq!(result.verdict, Verdict::Unknown);
    assert_eq!(result.reasons, vec!["no MX records".to_string()]);
    let dns = result.checks.dns.expect("dns ran");
    assert_eq!(dns.mx, Some(false));
    assert!(result.checks.smtp.is_none());
}

#[tokio::test]
async fn smtp_rejection_drives_verdict_to_invalid() {
    let mut mock =
        MockSmtp::start(&["220 mock ESMTP", "250 hello", "250 sender ok", "550 unknown user"]).await;
    let (validator, _) = validator(StubResolver::well_configured("example.com", &["127.0.0.1"]));
    let options = ValidateOptions {
        smtp: mock.options(2_000),
        detailed: true,
        ..ValidateOptions::default()
    };

    let result = validator.validate("ghost@example.com", &options).await;
    let smtp = result.checks.smtp.clone().expect("smtp ran");
    assert_eq!(smtp.status, ProbeStatus::Invalid);
    assert_eq!(smtp.code, Some(ProbeCode::Reply(550)));
    assert_eq!(result.confidence, 100 - ScoreWeights::default().smtp_invalid as u8);
    assert_eq!(result.verdict, Verdict::Invalid);

    let breakdown = result.score_breakdown.expect("detailed");
    let smtp_item = breakdown
        .iter()
        .find(|item| item.check == "smtp")
        .expect("smtp in breakdown");
    assert_eq!(smtp_item.impact, -80);
    assert_eq!(smtp_item.note.as_deref(), Some("550"));
    assert_eq!(result.risks, Some(vec!["smtp_invalid".to_string()]));

    assert_eq!(mock.next_session().await.len(), 4);
}

#[tokio::test]
async fn clean_address_is_valid_and_lean_by_default() {
    let (validator, _) = validator(StubResolver::well_configured("example.com", &["mx.example.com"]));
    let result = validator
        .validate("jean.dupont@example.com", &ValidateOptions::default())
        .await;

    assert_eq!(result.confidence, 100);
    assert_eq!(result.verdict, Verdict::Valid);
    assert!(result.reasons.is_empty());
    assert!(result.intelligence.is_none());
    assert!(result.risks.is_none());
    assert!(result.score_breakdown.is_none());
    assert!(result.trace.is_none());
}

#[tokio::test]
async fn deductions_stack_and_clamp_at_zero() {
    let (validator, _) = validator(StubResolver::new());
    let result = validator
        .validate("test+promo@mailinator.com", &ValidateOptions {
            detailed: true,
            ..ValidateOptions::default()
        })
        .await;

    assert_eq!(result.confidence, 0);
    assert_eq!(result.verdict, Verdict::Invalid);
    assert!(result.checks.disposable);
    assert!(result.checks.plus_addressing);
    assert_eq!(result.checks.pattern, PatternSeverity::High);

    let breakdown = result.score_breakdown.expect("detailed");
    let raw: i32 = 100 + breakdown.iter().map(|item| item.impact).sum::<i32>();
    assert!(raw < 0, "raw score {raw} keeps the full deduction");
    let exists = breakdown
        .iter()
        .find(|item| item.check == "domain_exists")
        .expect("informational entry");
    assert!(!exists.passed);
    assert_eq!(exists.impact, 0);
}

#[tokio::test]
async fn detailed_result_carries_intelligence() {
    let stub = StubResolver::well_configured("gmail.com", &["gmail-smtp-in.l.google.com"]);
    let (validator, _) = validator(stub);
    let options = ValidateOptions {
        detailed: true,
        ..ValidateOptions::default()
    };

    let result = validator.validate("J.Doe+news@gmail.com", &options).await;
    let intelligence = result.intelligence.expect("detailed");
    assert_eq!(intelligence.provider.as_deref(), Some("Gmail"));
    assert_eq!(intelligence.canonical.as_deref(), Some("jdoe@gmail.com"));
    assert_eq!(intelligence.suggestion, None);
    assert_eq!(result.risks, Some(vec!["plus_addressing".to_string()]));
    assert_eq!(result.confidence, 95);
}

#[tokio::test]
async fn typo_domain_gets_a_suggestion() {
    let (validator, _) = validator(StubResolver::new());
    let result = validator
        .validate("alice@gmial.com", &ValidateOptions::default())
        .await;
    assert_eq!(
        result.checks.typo_suggestion.as_deref(),
        Some("alice@gmail.com")
    );
    assert!(result.reasons.iter().any(|r| r.contains("alice@gmail.com")));
}

#[tokio::test]
async fn disabled_dns_toggles_do_not_score() {
    let (validator, _) = validator(StubResolver::new().with_a("example.com", [192, 0, 2, 1].into()));
    let options = ValidateOptions {
        dns: DnsOptions {
            mx: false,
            spf: false,
            dmarc: false,
            ..DnsOptions::default()
        },
        ..ValidateOptions::default()
    };
    let result = validator.validate("alice@example.com", &options).await;
    assert_eq!(result.confidence, 100);
}

#[tokio::test]
async fn unchecked_mx_is_named_in_the_missing_domain_reason() {
    let stub = StubResolver::new().with_mx("example.com", vec![MxRecord::new(10, "mx.example.com")]);
    let (validator, _) = validator(stub);
    let options = ValidateOptions {
        dns: DnsOptions {
            mx: false,
            ..DnsOptions::default()
        },
        ..ValidateOptions::default()
    };

    let result = validator.validate("alice@example.com", &options).await;
    assert!(
        result
            .reasons
            .contains(&"domain has no A/AAAA/TXT records (MX not checked)".to_string())
    );
    assert!(!result.reasons.iter().any(|r| r == "domain has no DNS records"));
    assert!(!result.reasons.iter().any(|r| r == "no MX records"));
}

#[tokio::test]
async fn trace_lists_steps_in_pipeline_order() {
    let mut mock = MockSmtp::start(&["220 mock", "250 hi", "250 ok", "250 yes"]).await;
    let (validator, _) = validator(StubResolver::well_configured("example.com", &["127.0.0.1"]));
    let options = ValidateOptions {
        smtp: mock.options(2_000),
        catch_all: CatchAllOptions {
            enabled: true,
            timeout_ms: 2_000,
        },
        detailed: true,
        trace: true,
        ..ValidateOptions::default()
    };

    let result = validator.validate("alice@example.com", &options).await;
    let steps: Vec<String> = result
        .trace
        .expect("trace on")
        .into_iter()
        .map(|step| step.step)
        .collect();
    assert_eq!(
        steps,
        [
            "normalize",
            "syntax",
            "dns",
            "provider",
            "canonical",
            "role",
            "pattern",
            "plus_addressing",
            "typo",
            "disposable",
            "dns_penalties",
            "smtp",
            "catch_all",
            "score",
        ]
    );
    // the mock accepts everything, so the random recipient is accepted too
    assert_eq!(result.checks.catch_all.map(|c| c.is_catch_all), Some(true));
    assert_eq!(result.confidence, 100 - ScoreWeights::default().catch_all as u8);
    mock.next_session().await;
    mock.next_session().await;
}

#[tokio::test]
async fn registry_shares_state_by_configuration() {
    let stub = Arc::new(StubResolver::well_configured("example.com", &["mx.example.com"]));
    let lookup: Arc<dyn DnsLookup> = stub.clone();
    let registry = Arc::new(ResourceRegistry::new());
    let first = Validator::with_registry(Arc::clone(&lookup), Arc::clone(&registry));
    let second = Validator::with_registry(lookup, Arc::clone(&registry));

    first
        .validate("alice@example.com", &ValidateOptions::default())
        .await;
    let calls = stub.calls();
    second
        .validate("bob@example.com", &ValidateOptions::default())
        .await;
    assert_eq!(stub.calls(), calls, "same cache sizing reuses cached answers");
    assert_eq!(registry.cache_count(), 1);

    let isolated = ValidateOptions {
        cache: CacheOptions {
            dns_ttl_ms: 1_000,
            max_entries: 10,
        },
        ..ValidateOptions::default()
    };
    second.validate("bob@example.com", &isolated).await;
    assert!(stub.calls() > calls);
    assert_eq!(registry.cache_count(), 2);

    assert!(Arc::ptr_eq(&registry.limiter(10), &registry.limiter(10)));
    assert!(!Arc::ptr_eq(&registry.limiter(10), &registry.limiter(3)));
}

#[tokio::test]
async fn unreachable_mail_host_only_lowers_confidence() {
    let stub = StubResolver::new()
        .with_mx("example.com", vec![MxRecord::new(10, "127.0.0.2")])
        .with_txt("example.com", &["v=spf1 -all"])
        .with_txt("_dmarc.example.com", &["v=DMARC1; p=none"]);
    let (validator, _) = validator(stub);
    let options = ValidateOptions {
        smtp: crate::smtp::SmtpOptions {
            enabled: true,
            timeout_ms: 500,
            port: 1,
            ..Default::default()
        },
        ..ValidateOptions::default()
    };

    let result = validator.validate("alice@example.com", &options).await;
    let smtp = result.checks.smtp.expect("smtp ran");
    assert_eq!(smtp.status, ProbeStatus::Unknown);
    assert_eq!(result.confidence, 100 - ScoreWeights::default().smtp_unknown as u8);
    assert_eq!(result.verdict, Verdict::Valid);
}
