use crate::domain::models::{MetricsReport, MetricsThresholds, PollingConfig, Verdict};
use crate::remote::{Catalog, RemoteError};
use crate::services::metrics::obtain_metrics;
use crate::services::polling::PollError;
use crate::services::resolver::{resolve_project, ProjectNotFound};
use crate::services::thresholds::evaluate;
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct GateRequest {
    pub skip: bool,
    pub name: String,
    pub version: String,
    pub polling: PollingConfig,
    pub thresholds: MetricsThresholds,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GateOutcome {
    Skipped,
    Passed(MetricsReport),
}

/// The gate could not complete its job.
#[derive(thiserror::Error, Debug)]
pub enum ExecutionError {
    #[error(transparent)]
    ProjectNotFound(#[from] ProjectNotFound),
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error("metrics for {project} unavailable after {attempts} attempts")]
    PollExhausted {
        project: String,
        attempts: u32,
        #[source]
        source: RemoteError,
    },
}

/// Metrics were obtained but exceed one or more thresholds.
#[derive(Debug)]
pub struct GateFailure {
    pub report: MetricsReport,
}

impl fmt::Display for GateFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let list: Vec<String> = self.report.violations.iter().map(|v| v.to_string()).collect();
        write!(
            f,
            "{} {} failed the metrics gate: {}",
            self.report.project,
            self.report.version,
            list.join(", ")
        )
    }
}

impl std::error::Error for GateFailure {}

#[derive(thiserror::Error, Debug)]
pub enum GateError {
    #[error(transparent)]
    Execution(#[from] ExecutionError),
    #[error(transparent)]
    Failure(#[from] GateFailure),
}

impl GateError {
    pub fn is_failure(&self) -> bool {
        matches!(self, GateError::Failure(_))
    }

    /// True when the server refused or was never sent an API key.
    pub fn is_auth(&self) -> bool {
        match self {
            GateError::Execution(ExecutionError::Remote(e))
            | GateError::Execution(ExecutionError::PollExhausted { source: e, .. }) => e.is_auth(),
            _ => false,
        }
    }
}

/// Catalog lookup, resolution, metrics retrieval and evaluation for one project.
///
/// With `skip` set nothing is requested from `catalog`.
pub fn run_gate<C, S>(catalog: &C, req: &GateRequest, sleep: S) -> Result<GateOutcome, GateError>
where
    C: Catalog + ?Sized,
    S: FnMut(Duration),
{
    if req.skip {
        tracing::info!("metrics gate skipped");
        return Ok(GateOutcome::Skipped);
    }

    let projects = catalog.list_projects().map_err(ExecutionError::from)?;
    let project =
        resolve_project(projects, &req.name, &req.version).map_err(ExecutionError::from)?;
    tracing::info!(name = %project.name, uuid = %project.uuid, "project resolved");

    let (metrics, origin) = obtain_metrics(&project, &req.polling, sleep, |uuid| {
        catalog.fetch_metrics(uuid)
    })
    .map_err(|e| match e {
        PollError::Attempt(source) => ExecutionError::Remote(source),
        PollError::Exhausted { attempts, last } => ExecutionError::PollExhausted {
            project: project.name.clone(),
            attempts,
            source: last,
        },
    })?;

    let verdict = evaluate(&metrics, &req.thresholds);
    let report = MetricsReport {
        project: project.name.clone(),
        version: req.version.clone(),
        uuid: project.uuid.clone(),
        origin,
        metrics,
        thresholds: req.thresholds,
        passed: verdict.passed(),
        violations: verdict.violations().to_vec(),
    };

    match verdict {
        Verdict::Pass => Ok(GateOutcome::Passed(report)),
        Verdict::Fail(_) => Err(GateFailure { report }.into()),
    }
}
