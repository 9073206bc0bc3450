use proptest::prelude::*;

use super::*;

#[test]
fn default_thresholds_map_tiers() {
    let t = Thresholds::default();
    assert_eq!(compute_verdict(100, &t), Verdict::Valid);
    assert_eq!(compute_verdict(85, &t), Verdict::Valid);
    assert_eq!(compute_verdict(84, &t), Verdict::Risky);
    assert_eq!(compute_verdict(60, &t), Verdict::Risky);
    assert_eq!(compute_verdict(59, &t), Verdict::Unknown);
    assert_eq!(compute_verdict(30, &t), Verdict::Unknown);
    assert_eq!(compute_verdict(29, &t), Verdict::Invalid);
    assert_eq!(compute_verdict(0, &t), Verdict::Invalid);
}

#[test]
fn clamp_rounds_and_bounds() {
    assert_eq!(clamp_score(-130.0), 0);
    assert_eq!(clamp_score(250.0), 100);
    assert_eq!(clamp_score(49.5), 50);
    assert_eq!(clamp_score(49.4), 49);
    assert_eq!(clamp_score(f64::NAN), 0);
}

#[test]
fn deductions_accumulate_below_zero_before_clamping() {
    let weights = ScoreWeights::default();
    let mut card = Scorecard::new();
    card.record("disposable", false, weights.disposable, None);
    card.record("mx", false, weights.no_mx, None);
    card.record("smtp", false, weights.smtp_invalid, None);
    assert_eq!(card.raw_score(), 100 - 60 - 50 - 80);

    let summary = card.finish(&Thresholds::default());
    assert_eq!(summary.raw, -90);
    assert_eq!(summary.confidence, 0);
    assert_eq!(summary.verdict, Verdict::Invalid);
    assert_eq!(summary.breakdown.len(), 3);
}

#[test]
fn passed_and_informational_checks_cost_nothing() {
    let mut card = Scorecard::new();
    assert_eq!(card.record("spf", true, 10, None), 0);
    card.inform("domain_exists", false, Some("no records".into()));
    let summary = card.finish(&Thresholds::default());
    assert_eq!(summary.confidence, 100);
    assert!(summary.breakdown.iter().all(|item| item.impact == 0));
}

#[test]
fn breakdown_renders_one_line_per_check() {
    let weights = ScoreWeights::default();
    let mut card = Scorecard::new();
    card.record(
        "disposable",
        false,
        weights.disposable,
        Some("mailinator.com".into()),
    );
    card.record("mx", true, weights.no_mx, None);
    card.record("smtp", false, weights.smtp_unknown, Some("451".into()));
    let rendered = card
        .items()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");
    insta::assert_snapshot!(rendered, @r"
    disposable fail -60 (mailinator.com)
    mx pass +0
    smtp fail -10 (451)
    ");
}

#[test]
fn verdicts_order_worst_to_best() {
    assert!(Verdict::Invalid < Verdict::Unknown);
    assert!(Verdict::Unknown < Verdict::Risky);
    assert!(Verdict::Risky < Verdict::Valid);
    assert_eq!(Verdict::Risky.to_string(), "risky");
}

proptest! {
    #[test]
    fn verdict_is_monotonic(
        a in 0u8..=100,
        b in 0u8..=100,
        valid in 0u8..=100,
        risky in 0u8..=100,
        unknown in 0u8..=100,
    ) {
        let t = Thresholds { valid, risky, unknown };
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(compute_verdict(low, &t) <= compute_verdict(high, &t));
    }

    #[test]
    fn clamp_stays_in_range(score in proptest::num::f64::ANY) {
        let clamped = clamp_score(score);
        prop_assert!(clamped <= 100);
    }

    #[test]
    fn clamp_keeps_in_range_integers(score in 0i32..=100) {
        prop_assert_eq!(i32::from(clamp_score(f64::from(score))), score);
    }
}
