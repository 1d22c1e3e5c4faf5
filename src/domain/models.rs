use crate::domain::constants::{DEFAULT_POLLING_ATTEMPTS, DEFAULT_POLLING_INTERVAL_SECONDS};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Unassigned,
}

impl Severity {
    /// Reporting order for violations and printed counts.
    pub const ALL: [Severity; 5] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
        Severity::Unassigned,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
            Severity::Unassigned => "unassigned",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Finding counts by severity at a point in time.
///
/// Counts are unsigned, so a negative value in a payload is rejected as malformed
/// during deserialization. The optional aggregates are informational only and never
/// take part in gate evaluation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    #[serde(default)]
    pub critical: u64,
    #[serde(default)]
    pub high: u64,
    #[serde(default)]
    pub medium: u64,
    #[serde(default)]
    pub low: u64,
    #[serde(default)]
    pub unassigned: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inherited_risk_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vulnerable_components: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vulnerabilities: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub findings_total: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub findings_audited: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suppressed: Option<u64>,
}

impl Metrics {
    #[cfg(test)]
    pub fn from_counts(critical: u64, high: u64, medium: u64, low: u64, unassigned: u64) -> Self {
        Self {
            critical,
            high,
            medium,
            low,
            unassigned,
            ..Self::default()
        }
    }

    pub fn count(&self, severity: Severity) -> u64 {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
            Severity::Unassigned => self.unassigned,
        }
    }
}

/// One catalog entry as returned by the project listing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub metrics: Option<Metrics>,
}

/// Where a resolved project's metrics come from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricsSource<'a> {
    Embedded(&'a Metrics),
    NeedsFetch { uuid: &'a str },
}

impl Project {
    #[cfg(test)]
    pub fn new(uuid: &str, name: &str, version: &str, metrics: Option<Metrics>) -> Self {
        Self {
            uuid: uuid.to_string(),
            name: name.to_string(),
            version: Some(version.to_string()),
            metrics,
        }
    }

    pub fn metrics_source(&self) -> MetricsSource<'_> {
        match &self.metrics {
            Some(m) => MetricsSource::Embedded(m),
            None => MetricsSource::NeedsFetch { uuid: &self.uuid },
        }
    }
}

/// Retry budget for fetching metrics that the catalog did not embed.
///
/// When `enabled` is false exactly one attempt is made and `attempts` /
/// `interval_seconds` are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollingConfig {
    pub enabled: bool,
    pub attempts: u32,
    pub interval_seconds: u64,
}

impl PollingConfig {
    pub const DISABLED: PollingConfig = PollingConfig {
        enabled: false,
        attempts: 1,
        interval_seconds: 0,
    };

    pub fn new(enabled: bool, attempts: u32, interval_seconds: u64) -> Self {
        Self {
            enabled,
            attempts,
            interval_seconds,
        }
    }

    pub fn disabled() -> Self {
        Self::DISABLED
    }

    /// Number of attempts actually made; at least one.
    pub fn budget(&self) -> u32 {
        if self.enabled {
            self.attempts.max(1)
        } else {
            1
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds)
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self::new(
            true,
            DEFAULT_POLLING_ATTEMPTS,
            DEFAULT_POLLING_INTERVAL_SECONDS,
        )
    }
}

/// Optional per-severity upper limits. `None` means no constraint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct MetricsThresholds {
    #[serde(default)]
    pub critical: Option<u64>,
    #[serde(default)]
    pub high: Option<u64>,
    #[serde(default)]
    pub medium: Option<u64>,
    #[serde(default)]
    pub low: Option<u64>,
    #[serde(default)]
    pub unassigned: Option<u64>,
}

impl MetricsThresholds {
    #[cfg(test)]
    pub fn new(critical: u64, high: u64, medium: u64, low: u64, unassigned: u64) -> Self {
        Self {
            critical: Some(critical),
            high: Some(high),
            medium: Some(medium),
            low: Some(low),
            unassigned: Some(unassigned),
        }
    }

    pub fn limit(&self, severity: Severity) -> Option<u64> {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
            Severity::Unassigned => self.unassigned,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub severity: Severity,
    pub actual: u64,
    pub limit: u64,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} (limit {})", self.severity, self.actual, self.limit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail(Vec<Violation>),
}

impl Verdict {
    pub fn passed(&self) -> bool {
        matches!(self, Verdict::Pass)
    }

    pub fn violations(&self) -> &[Violation] {
        match self {
            Verdict::Pass => &[],
            Verdict::Fail(v) => v,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricsOrigin {
    Embedded,
    Fetched,
}

/// Everything the `metrics` command prints, for pass and fail alike.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsReport {
    pub project: String,
    pub version: String,
    pub uuid: String,
    pub origin: MetricsOrigin,
    pub metrics: Metrics,
    pub thresholds: MetricsThresholds,
    pub passed: bool,
    pub violations: Vec<Violation>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectSummary {
    pub uuid: String,
    pub name: String,
    pub version: Option<String>,
    pub metrics_embedded: bool,
}
