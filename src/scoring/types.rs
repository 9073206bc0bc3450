use std::fmt;

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

/// Verdict tiers, ordered from worst to best.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Verdict {
    Invalid,
    Unknown,
    Risky,
    Valid,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Invalid => "invalid",
            Self::Unknown => "unknown",
            Self::Risky => "risky",
            Self::Valid => "valid",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One evaluated signal and what it cost.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreBreakdownItem {
    pub check: String,
    pub passed: bool,
    pub impact: i32,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub note: Option<String>,
}

impl fmt::Display for ScoreBreakdownItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.passed { "pass" } else { "fail" };
        write!(f, "{} {} {:+}", self.check, status, self.impact)?;
        if let Some(note) = &self.note {
            write!(f, " ({note})")?;
        }
        Ok(())
    }
}

/// Result of [`Scorecard::finish`](super::Scorecard::finish).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreSummary {
    /// Unclamped total, may be negative.
    pub raw: i32,
    pub confidence: u8,
    pub verdict: Verdict,
    pub breakdown: Vec<ScoreBreakdownItem>,
}
