#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

use crate::catchall::CatchAllOutcome;
use crate::dns::DnsOutcome;
use crate::scoring::{ScoreBreakdownItem, Verdict};
use crate::signals::PatternSeverity;
use crate::smtp::ProbeOutcome;

/// Raw signals gathered for one address. Stages that did not run stay at
/// their default (`None`/`false`).
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Checks {
    pub syntax: bool,
    pub dns: Option<DnsOutcome>,
    pub role: bool,
    pub pattern: PatternSeverity,
    pub plus_addressing: bool,
    pub typo_suggestion: Option<String>,
    pub disposable: bool,
    pub smtp: Option<ProbeOutcome>,
    pub catch_all: Option<CatchAllOutcome>,
}

#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Intelligence {
    pub provider: Option<String>,
    pub canonical: Option<String>,
    pub suggestion: Option<String>,
}

#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceStep {
    pub step: String,
    pub elapsed_ms: u64,
    pub detail: String,
}

/// Final answer for one address.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// Normalized address.
    pub email: String,
    pub verdict: Verdict,
    /// Score in `0..=100`.
    pub confidence: u8,
    pub reasons: Vec<String>,
    pub checks: Checks,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub intelligence: Option<Intelligence>,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub risks: Option<Vec<String>>,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub score_breakdown: Option<Vec<ScoreBreakdownItem>>,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub trace: Option<Vec<TraceStep>>,
}
