#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

/// Points removed from the starting score of 100 when a check fails.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "with-serde", serde(default))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreWeights {
    pub disposable: u32,
    pub no_mx: u32,
    pub no_spf: u32,
    pub no_dmarc: u32,
    pub smtp_invalid: u32,
    pub smtp_unknown: u32,
    pub catch_all: u32,
    pub role_address: u32,
    pub pattern_low: u32,
    pub pattern_medium: u32,
    pub pattern_high: u32,
    pub plus_addressing: u32,
    pub typo_suggested: u32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            disposable: 60,
            no_mx: 50,
            no_spf: 10,
            no_dmarc: 10,
            smtp_invalid: 80,
            smtp_unknown: 10,
            catch_all: 20,
            role_address: 15,
            pattern_low: 5,
            pattern_medium: 15,
            pattern_high: 30,
            plus_addressing: 5,
            typo_suggested: 20,
        }
    }
}

/// Lower bounds of each verdict tier, checked from `valid` downwards.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "with-serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub valid: u8,
    pub risky: u8,
    pub unknown: u8,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            valid: 85,
            risky: 60,
            unknown: 30,
        }
    }
}

#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "with-serde", serde(default))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoringOptions {
    pub weights: ScoreWeights,
    pub thresholds: Thresholds,
}
