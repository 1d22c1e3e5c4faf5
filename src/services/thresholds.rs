use crate::domain::models::{Metrics, MetricsThresholds, Severity, Verdict, Violation};

/// Compares each severity against its configured limit.
///
/// A count equal to its limit passes. All violations are collected, in
/// critical, high, medium, low, unassigned order.
pub fn evaluate(metrics: &Metrics, thresholds: &MetricsThresholds) -> Verdict {
    let violations: Vec<Violation> = Severity::ALL
        .iter()
        .filter_map(|&severity| {
            let limit = thresholds.limit(severity)?;
            let actual = metrics.count(severity);
            (actual > limit).then_some(Violation {
                severity,
                actual,
                limit,
            })
        })
        .collect();

    if violations.is_empty() {
        Verdict::Pass
    } else {
        for v in &violations {
            tracing::warn!(severity = %v.severity, actual = v.actual, limit = v.limit, "threshold exceeded");
        }
        Verdict::Fail(violations)
    }
}
