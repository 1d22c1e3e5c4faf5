use crate::domain::models::{JsonOut, MetricsOrigin, MetricsReport, Severity};
use serde::Serialize;

pub fn print_one<T: Serialize>(
    json: bool,
    ok: bool,
    data: T,
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&JsonOut { ok, data })?);
    } else {
        println!("{}", row(&data));
    }
    Ok(())
}

#[derive(Serialize)]
pub struct ErrorOut {
    pub kind: &'static str,
    pub message: String,
}

pub fn metrics_report_text(r: &MetricsReport) -> String {
    let mut lines = vec![
        format!("project: {} {} ({})", r.project, r.version, r.uuid),
        format!("metrics: {}", origin_label(r)),
    ];
    for s in Severity::ALL {
        let limit = r
            .thresholds
            .limit(s)
            .map(|l| format!(" (limit {l})"))
            .unwrap_or_default();
        lines.push(format!("  {:<11}{}{}", s.as_str(), r.metrics.count(s), limit));
    }
    let m = &r.metrics;
    if let Some(score) = m.inherited_risk_score {
        lines.push(format!("  inherited risk score: {score}"));
    }
    let extras = [
        ("components", m.components),
        ("vulnerable components", m.vulnerable_components),
        ("vulnerabilities", m.vulnerabilities),
        ("findings total", m.findings_total),
        ("findings audited", m.findings_audited),
        ("suppressed", m.suppressed),
    ];
    for (label, value) in extras {
        if let Some(v) = value {
            lines.push(format!("  {label}: {v}"));
        }
    }
    if r.passed {
        lines.push("gate: passed".to_string());
    } else {
        let list: Vec<String> = r.violations.iter().map(|v| v.to_string()).collect();
        lines.push(format!("gate: failed ({})", list.join(", ")));
    }
    lines.join("\n")
}

fn origin_label(r: &MetricsReport) -> &'static str {
    match r.origin {
        MetricsOrigin::Embedded => "embedded in catalog",
        MetricsOrigin::Fetched => "fetched from metrics endpoint",
    }
}
