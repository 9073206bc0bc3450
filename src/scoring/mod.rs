//! Reduces the signals of one validation run to a confidence score and a
//! verdict.
//!
//! A [`Scorecard`] starts at 100 and only ever receives deductions. The
//! running total is left unbounded while signals are recorded, and is
//! rounded and clamped to `0..=100` once, in [`Scorecard::finish`].

mod options;
mod types;

pub use options::{ScoreWeights, ScoringOptions, Thresholds};
pub use types::{ScoreBreakdownItem, ScoreSummary, Verdict};

pub const STARTING_SCORE: i32 = 100;

#[derive(Debug, Clone)]
pub struct Scorecard {
    score: i32,
    items: Vec<ScoreBreakdownItem>,
}

impl Scorecard {
    pub fn new() -> Self {
        Self {
            score: STARTING_SCORE,
            items: Vec::new(),
        }
    }

    /// Records `check`; a failed check deducts `weight`. Returns the impact.
    pub fn record(&mut self, check: &str, passed: bool, weight: u32, note: Option<String>) -> i32 {
        let impact = if passed {
            0
        } else {
            -i32::try_from(weight).unwrap_or(i32::MAX)
        };
        self.score = self.score.saturating_add(impact);
        self.items.push(ScoreBreakdownItem {
            check: check.to_string(),
            passed,
            impact,
            note,
        });
        impact
    }

    /// Records an informational signal that never moves the score.
    pub fn inform(&mut self, check: &str, passed: bool, note: Option<String>) {
        self.record(check, passed, 0, note);
    }

    pub fn raw_score(&self) -> i32 {
        self.score
    }

    pub fn items(&self) -> &[ScoreBreakdownItem] {
        &self.items
    }

    pub fn finish(self, thresholds: &Thresholds) -> ScoreSummary {
        let confidence = clamp_score(f64::from(self.score));
        ScoreSummary {
            raw: self.score,
            confidence,
            verdict: compute_verdict(confidence, thresholds),
            breakdown: self.items,
        }
    }
}

impl Default for Scorecard {
    fn default() -> Self {
        Self::new()
    }
}

/// Rounds to the nearest integer and clamps to `0..=100`. NaN maps to 0.
pub fn clamp_score(score: f64) -> u8 {
    if score.is_nan() {
        return 0;
    }
    score.round().clamp(0.0, 100.0) as u8
}

pub fn compute_verdict(score: u8, thresholds: &Thresholds) -> Verdict {
    if score >= thresholds.valid {
        Verdict::Valid
    } else if score >= thresholds.risky {
        Verdict::Risky
    } else if score >= thresholds.unknown {
        Verdict::Unknown
    } else {
        Verdict::Invalid
    }
}

#[cfg(test)]
mod tests;
