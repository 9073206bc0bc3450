//! Orchestration of one validation request.
//!
//! Steps always run in the same order:
//! normalize, syntax gate, DNS, provider (detailed only), canonicalization,
//! role, pattern, plus-addressing, typo, disposable, DNS penalties, SMTP probe
//! (optional), catch-all (optional), score.
//!
//! Only the syntax gate can end a validation early. Every later failure is
//! absorbed into a lower score.

mod options;
mod registry;
mod types;

pub use options::{CacheOptions, ValidateOptions};
pub use registry::ResourceRegistry;
pub use types::{Checks, Intelligence, TraceStep, ValidationResult};

use std::sync::Arc;

use tokio::time::Instant;
use tracing::{debug, info, instrument};

use crate::catchall::check_catch_all;
use crate::dns::{DnsContext, DnsError, DnsLookup, TokioResolver, check_dns};
use crate::scoring::{STARTING_SCORE, ScoreWeights, Scorecard, Verdict};
use crate::signals::{
    PatternSeverity, canonicalize, detect_provider, is_disposable, is_role_address,
    pattern_severity, plus_tag, suggest_address,
};
use crate::smtp::{ProbeStatus, probe_smtp};
use crate::validator::{check_syntax, normalize};

/// Entry point of the crate: validates addresses against a resolver and a
/// shared [`ResourceRegistry`]. Cheap to clone.
#[derive(Clone)]
pub struct Validator {
    lookup: Arc<dyn DnsLookup>,
    registry: Arc<ResourceRegistry>,
}

impl Validator {
    pub fn new(lookup: Arc<dyn DnsLookup>) -> Self {
        Self::with_registry(lookup, Arc::new(ResourceRegistry::new()))
    }

    pub fn with_registry(lookup: Arc<dyn DnsLookup>, registry: Arc<ResourceRegistry>) -> Self {
        Self { lookup, registry }
    }

    /// Validator backed by the host's resolver configuration.
    pub fn from_system_conf() -> Result<Self, DnsError> {
        let resolver = TokioResolver::from_system_conf()?;
        Ok(Self::new(Arc::new(resolver)))
    }

    pub fn registry(&self) -> &Arc<ResourceRegistry> {
        &self.registry
    }

    #[instrument(skip_all, fields(email = %email.trim()))]
    pub async fn validate(&self, email: &str, options: &ValidateOptions) -> ValidationResult {
        let weights = &options.scoring.weights;
        let mut trace = Tracer::new(options.trace);
        let mut card = Scorecard::new();
        let mut checks = Checks::default();
        let mut reasons = Vec::new();
        let mut risks = Vec::new();

        let normalized = normalize(email);
        trace.step("normalize", || normalized.clone());

        let syntax = check_syntax(&normalized);
        trace.step("syntax", || {
            if syntax.valid {
                "ok".to_string()
            } else {
                syntax.reasons.join("; ")
            }
        });
        if !syntax.valid {
            debug!(reasons = ?syntax.reasons, "rejected by syntax gate");
            card.record(
                "syntax",
                false,
                STARTING_SCORE as u32,
                syntax.reasons.first().cloned(),
            );
            let summary = card.finish(&options.scoring.thresholds);
            return ValidationResult {
                email: normalized,
                verdict: Verdict::Invalid,
                confidence: 0,
                reasons: syntax.reasons,
                checks,
                intelligence: options.detailed.then(Intelligence::default),
                risks: options.detailed.then(|| vec!["syntax".to_string()]),
                score_breakdown: options.detailed.then_some(summary.breakdown),
                trace: trace.finish(),
            };
        }
        checks.syntax = true;

        let local = syntax.local.as_str();
        let domain = syntax.ascii_domain.as_str();
        let address = format!("{local}@{domain}");

        let cache = self.registry.dns_cache(&options.cache);
        let dns = DnsContext::new(self.lookup.as_ref(), &cache);
        let dns_outcome = check_dns(domain, &options.dns, &dns).await;
        trace.step("dns", || {
            format!(
                "exists={} mx={:?} spf={:?} dmarc={:?}",
                dns_outcome.domain_exists, dns_outcome.mx, dns_outcome.spf, dns_outcome.dmarc
            )
        });

        let provider = if options.detailed {
            let hosts = dns_outcome.mx_hosts.as_deref().unwrap_or_default();
            let provider = detect_provider(domain, hosts);
            trace.step("provider", || provider.unwrap_or("-").to_string());
            provider
        } else {
            None
        };

        let canonical = canonicalize(local, domain);
        trace.step("canonical", || canonical.clone());

        checks.role = is_role_address(local);
        card.record("role_address", !checks.role, weights.role_address, None);
        if checks.role {
            reasons.push("role-based address".to_string());
            risks.push("role_address".to_string());
        }
        trace.step("role", || checks.role.to_string());

        checks.pattern = pattern_severity(local);
        let pattern_weight = pattern_weight(checks.pattern, weights);
        card.record(
            "pattern",
            checks.pattern == PatternSeverity::None,
            pattern_weight,
            Some(checks.pattern.to_string()),
        );
        if checks.pattern != PatternSeverity::None {
            reasons.push(format!("suspicious local part ({})", checks.pattern));
            risks.push("suspicious_pattern".to_string());
        }
        trace.step("pattern", || checks.pattern.to_string());

        let tag = plus_tag(local);
        checks.plus_addressing = tag.is_some();
        card.record(
            "plus_addressing",
            !checks.plus_addressing,
            weights.plus_addressing,
            tag.map(str::to_string),
        );
        if checks.plus_addressing {
            risks.push("plus_addressing".to_string());
        }
        trace.step("plus_addressing", || tag.unwrap_or("-").to_string());

        checks.typo_suggestion = suggest_address(local, domain);
        card.record(
            "typo",
            checks.typo_suggestion.is_none(),
            weights.typo_suggested,
            checks.typo_suggestion.clone(),
        );
        if let Some(suggestion) = &checks.typo_suggestion {
            reasons.push(format!("possible typo, did you mean {suggestion}"));
            risks.push("typo".to_string());
        }
        trace.step("typo", || {
            checks.typo_suggestion.clone().unwrap_or_else(|| "-".to_string())
        });

        checks.disposable = is_disposable(domain);
        card.record("disposable", !checks.disposable, weights.disposable, None);
        if checks.disposable {
            reasons.push("disposable email domain".to_string());
            risks.push("disposable".to_string());
        }
        trace.step("disposable", || checks.disposable.to_string());

        card.inform("domain_exists", dns_outcome.domain_exists, None);
        if !dns_outcome.domain_exists {
            let reason = if dns_outcome.mx.is_some() {
                "domain has no DNS records"
            } else {
                "domain has no A/AAAA/TXT records (MX not checked)"
            };
            reasons.push(reason.to_string());
            risks.push("domain_not_found".to_string());
        }
        let penalties = [
            ("mx", dns_outcome.mx, weights.no_mx, "no MX records", "no_mx"),
            ("spf", dns_outcome.spf, weights.no_spf, "no SPF record", "no_spf"),
            ("dmarc", dns_outcome.dmarc, weights.no_dmarc, "no DMARC record", "no_dmarc"),
        ];
        for (check, present, weight, reason, risk) in penalties {
            let Some(present) = present else { continue };
            card.record(check, present, weight, None);
            if !present {
                reasons.push(reason.to_string());
                risks.push(risk.to_string());
            }
        }
        trace.step("dns_penalties", || card.raw_score().to_string());
        checks.dns = Some(dns_outcome);

        if options.smtp.enabled {
            let limiter = self
                .registry
                .limiter(options.smtp.max_connections_per_domain_per_minute);
            let outcome = probe_smtp(
                domain,
                &address,
                &options.smtp,
                &limiter,
                &dns,
                options.dns.timeout(),
            )
            .await;
            let code = outcome.code.map(|code| code.to_string());
            match outcome.status {
                ProbeStatus::Valid => {
                    card.record("smtp", true, weights.smtp_invalid, code);
                }
                ProbeStatus::Invalid => {
                    card.record("smtp", false, weights.smtp_invalid, code.clone());
                    reasons.push(format!(
                        "mailbox rejected by server ({})",
                        code.as_deref().unwrap_or("?")
                    ));
                    risks.push("smtp_invalid".to_string());
                }
                ProbeStatus::Unknown => {
                    card.record("smtp", false, weights.smtp_unknown, code.clone());
                    reasons.push(format!(
                        "mailbox could not be verified ({})",
                        code.as_deref().unwrap_or("?")
                    ));
                    risks.push("smtp_unknown".to_string());
                }
            }
            trace.step("smtp", || {
                format!(
                    "{} {}",
                    outcome.status,
                    outcome.code.map(|c| c.to_string()).unwrap_or_default()
                )
            });
            checks.smtp = Some(outcome);
        }

        if options.catch_all.enabled {
            let outcome = check_catch_all(
                domain,
                &options.catch_all,
                &options.smtp,
                &dns,
                options.dns.timeout(),
            )
            .await;
            card.record(
                "catch_all",
                !outcome.is_catch_all,
                weights.catch_all,
                outcome.details.clone(),
            );
            if outcome.is_catch_all {
                reasons.push("domain accepts any recipient".to_string());
                risks.push("catch_all".to_string());
            }
            trace.step("catch_all", || {
                format!("{} ({})", outcome.is_catch_all, outcome.confidence)
            });
            checks.catch_all = Some(outcome);
        }

        let summary = card.finish(&options.scoring.thresholds);
        trace.step("score", || format!("raw={} confidence={}", summary.raw, summary.confidence));
        info!(verdict = %summary.verdict, confidence = summary.confidence, "validation done");

        let intelligence = options.detailed.then(|| Intelligence {
            provider: provider.map(str::to_string),
            canonical: Some(canonical),
            suggestion: checks.typo_suggestion.clone(),
        });

        ValidationResult {
            email: normalized,
            verdict: summary.verdict,
            confidence: summary.confidence,
            reasons,
            checks,
            intelligence,
            risks: options.detailed.then_some(risks),
            score_breakdown: options.detailed.then_some(summary.breakdown),
            trace: trace.finish(),
        }
    }
}

fn pattern_weight(severity: PatternSeverity, weights: &ScoreWeights) -> u32 {
    match severity {
        PatternSeverity::None => 0,
        PatternSeverity::Low => weights.pattern_low,
        PatternSeverity::Medium => weights.pattern_medium,
        PatternSeverity::High => weights.pattern_high,
    }
}

struct Tracer {
    steps: Option<Vec<TraceStep>>,
    last: Instant,
}

impl Tracer {
    fn new(enabled: bool) -> Self {
        Self {
            steps: enabled.then(Vec::new),
            last: Instant::now(),
        }
    }

    /// Records `step` with the time spent since the previous one. `detail`
    /// is only evaluated when tracing is on.
    fn step(&mut self, step: &str, detail: impl FnOnce() -> String) {
        let Some(steps) = self.steps.as_mut() else {
            return;
        };
        let now = Instant::now();
        steps.push(TraceStep {
            step: step.to_string(),
            elapsed_ms: now.duration_since(self.last).as_millis() as u64,
            detail: detail(),
        });
        self.last = now;
    }

    fn finish(self) -> Option<Vec<TraceStep>> {
        self.steps
    }
}

#[cfg(test)]
mod tests;
