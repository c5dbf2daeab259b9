use super::*;
use yare::parameterized;

#[parameterized(
    all_zero_but_completion = { Metrics { completion: 0.5, quality: 0.0, efficiency: 0.0, overall: 0.0, ..Default::default() }, 0.5 },
    distinct_quality_and_efficiency = { Metrics { completion: 0.8, quality: 0.6, efficiency: 0.4, overall: 0.0, ..Default::default() }, 0.4 * 0.8 + 0.3 * 0.6 + 0.3 * 0.4 },
    overall_already_set_is_preserved = { Metrics { completion: 0.1, quality: 0.1, efficiency: 0.1, overall: 0.99, ..Default::default() }, 0.99 },
)]
fn computed_overall_matches_formula(metrics: Metrics, expected: f64) {
    assert!((metrics.computed_overall() - expected).abs() < 1e-9);
}
