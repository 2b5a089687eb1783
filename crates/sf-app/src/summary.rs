//! Before/after comparison figures.

use serde::{Deserialize, Serialize};
use sf_core::round1;
use sf_model::LaneMetrics;

/// Headline comparison of two evaluations of the same lanes. Percentages
/// are rounded to one decimal; a zero baseline reports zero change.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub before_wait_s: f64,
    pub after_wait_s: f64,
    pub wait_improvement_pct: f64,
    pub before_congestion_pct: f64,
    pub after_congestion_pct: f64,
    pub congestion_reduction_pct: f64,
    pub before_throughput: f64,
    pub after_throughput: f64,
    pub throughput_gain_pct: f64,
}

impl ComparisonSummary {
    pub fn compare(before: &[LaneMetrics], after: &[LaneMetrics]) -> Self {
        let before_wait_s = mean(before.iter().map(|m| m.average_delay_s));
        let after_wait_s = mean(after.iter().map(|m| m.average_delay_s));
        let before_congestion_pct = mean(before.iter().map(|m| f64::from(m.congestion_pct)));
        let after_congestion_pct = mean(after.iter().map(|m| f64::from(m.congestion_pct)));
        let before_throughput: f64 = before.iter().map(|m| m.throughput).sum();
        let after_throughput: f64 = after.iter().map(|m| m.throughput).sum();

        Self {
            before_wait_s,
            after_wait_s,
            wait_improvement_pct: reduction_pct(before_wait_s, after_wait_s),
            before_congestion_pct,
            after_congestion_pct,
            congestion_reduction_pct: reduction_pct(before_congestion_pct, after_congestion_pct),
            before_throughput,
            after_throughput,
            throughput_gain_pct: gain_pct(before_throughput, after_throughput),
        }
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 { 0.0 } else { sum / n as f64 }
}

fn reduction_pct(before: f64, after: f64) -> f64 {
    if before <= 0.0 {
        return 0.0;
    }
    round1((before - after) / before * 100.0)
}

fn gain_pct(before: f64, after: f64) -> f64 {
    if before <= 0.0 {
        return 0.0;
    }
    round1((after - before) / before * 100.0)
}
