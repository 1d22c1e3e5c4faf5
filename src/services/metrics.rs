use crate::domain::models::{Metrics, MetricsOrigin, MetricsSource, PollingConfig, Project};
use crate::services::polling::{poll, PollError};
use std::fmt;
use std::time::Duration;

/// Returns the project's metrics, fetching them only when the catalog did not embed them.
///
/// `fetch` receives the project uuid and is driven by the polling engine.
pub fn obtain_metrics<E, F, S>(
    project: &Project,
    polling: &PollingConfig,
    sleep: S,
    mut fetch: F,
) -> Result<(Metrics, MetricsOrigin), PollError<E>>
where
    F: FnMut(&str) -> Result<Metrics, E>,
    S: FnMut(Duration),
    E: fmt::Display,
{
    match project.metrics_source() {
        MetricsSource::Embedded(m) => {
            tracing::debug!(project = %project.name, "using metrics embedded in catalog");
            Ok((m.clone(), MetricsOrigin::Embedded))
        }
        MetricsSource::NeedsFetch { uuid } => {
            tracing::info!(
                project = %project.name,
                %uuid,
                enabled = polling.enabled,
                attempts = polling.budget(),
                "metrics not embedded, fetching"
            );
            let metrics = poll(polling, sleep, || fetch(uuid))?;
            Ok((metrics, MetricsOrigin::Fetched))
        }
    }
}
