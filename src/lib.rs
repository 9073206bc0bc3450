#![forbid(unsafe_code)]
//! mailprobe_lib: estimation de délivrabilité d'une adresse e-mail sans
//! envoyer de message: posture DNS, sonde SMTP partielle, détection
//! catch-all et heuristiques locales, réduites à un score 0..=100 et un
//! verdict.
//!
//! ```no_run
//! # async fn run() -> Result<(), mailprobe_lib::DnsError> {
//! use mailprobe_lib::{ValidateOptions, Validator};
//!
//! let validator = Validator::from_system_conf()?;
//! let result = validator
//!     .validate("alice@example.com", &ValidateOptions::default())
//!     .await;
//! println!("{} ({})", result.verdict, result.confidence);
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod catchall;
pub mod dns;
pub mod pipeline;
pub mod ratelimit;
pub mod scoring;
pub mod signals;
pub mod smtp;
pub mod validator;

pub use cache::{CacheKey, QueryKind, ResolverCache};
pub use catchall::{CatchAllMethod, CatchAllOptions, CatchAllOutcome, Confidence, check_catch_all};
pub use dns::{DnsCache, DnsContext, DnsError, DnsLookup, DnsOptions, DnsOutcome, TokioResolver, check_dns};
pub use pipeline::{
    CacheOptions, Checks, Intelligence, ResourceRegistry, TraceStep, ValidateOptions,
    ValidationResult, Validator,
};
pub use ratelimit::RateLimiter;
pub use scoring::{
    ScoreBreakdownItem, ScoreWeights, Scorecard, ScoringOptions, Thresholds, Verdict, clamp_score,
    compute_verdict,
};
pub use signals::PatternSeverity;
pub use smtp::{
    ProbeCode, ProbeOutcome, ProbeStage, ProbeStatus, SmtpOptions, connect_and_probe, probe_smtp,
};
pub use validator::{SyntaxReport, check_syntax};
