use std::fmt;

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Confidence {
    High,
    Low,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::High => "high",
            Self::Low => "low",
        })
    }
}

#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatchAllMethod {
    SmtpProbe,
    /// Reserved for detection without an SMTP conversation; not produced yet.
    Heuristic,
    Unknown,
}

impl fmt::Display for CatchAllMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SmtpProbe => "smtp_probe",
            Self::Heuristic => "heuristic",
            Self::Unknown => "unknown",
        })
    }
}

#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatchAllOutcome {
    pub is_catch_all: bool,
    pub confidence: Confidence,
    pub method: CatchAllMethod,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub details: Option<String>,
}

impl CatchAllOutcome {
    pub(crate) fn new(
        is_catch_all: bool,
        confidence: Confidence,
        method: CatchAllMethod,
        details: impl Into<Option<String>>,
    ) -> Self {
        Self {
            is_catch_all,
            confidence,
            method,
            details: details.into(),
        }
    }
}
