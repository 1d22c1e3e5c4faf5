use crate::*;

fn build_client(cli: &Cli, file: &FileConfig) -> anyhow::Result<DependencyTrackClient> {
    let server = server_settings(cli, file);
    DependencyTrackClient::new(
        server.url.as_deref(),
        server.api_key.as_deref(),
        server.timeout_ms,
    )
}

pub fn handle_metrics_command(cli: &Cli, file: &FileConfig) -> anyhow::Result<bool> {
    let Commands::Metrics {
        target,
        skip,
        polling,
        thresholds: threshold_args,
    } = &cli.command
    else {
        return Ok(false);
    };

    let skip = *skip || file.skip;
    let request = if skip {
        let (name, version) = project_target(target, file).unwrap_or_default();
        GateRequest {
            skip,
            name,
            version,
            polling: PollingConfig::disabled(),
            thresholds: MetricsThresholds::default(),
        }
    } else {
        let (name, version) = project_target(target, file)?;
        GateRequest {
            skip,
            name,
            version,
            polling: polling_config(polling, &file.polling)?,
            thresholds: thresholds(threshold_args, &file.thresholds),
        }
    };
    let client = build_client(cli, file)?;

    match run_gate(&client, &request, thread_sleep) {
        Ok(GateOutcome::Passed(report)) => {
            print_one(cli.json, true, report, metrics_report_text)?;
        }
        Ok(GateOutcome::Skipped) => {
            print_one(cli.json, true, "skipped", |_| "metrics gate skipped".to_string())?;
        }
        Err(GateError::Failure(failure)) => {
            print_one(cli.json, false, &failure.report, |r| metrics_report_text(r))?;
            return Err(GateError::Failure(failure).into());
        }
        Err(e) => return Err(e.into()),
    }
    Ok(true)
}

pub fn handle_project_command(cli: &Cli, file: &FileConfig) -> anyhow::Result<bool> {
    let Commands::Project { target } = &cli.command else {
        return Ok(false);
    };

    let (name, version) = project_target(target, file)?;
    let client = build_client(cli, file)?;
    let projects = client
        .list_projects()
        .map_err(|e| GateError::from(ExecutionError::from(e)))?;
    let project = resolve_project(projects, &name, &version)
        .map_err(|e| GateError::from(ExecutionError::from(e)))?;
    tracing::info!(uuid = %project.uuid, "project resolved");

    let summary = ProjectSummary {
        metrics_embedded: project.metrics.is_some(),
        uuid: project.uuid,
        name: project.name,
        version: project.version,
    };
    print_one(cli.json, true, summary, |s| {
        format!(
            "{}\t{}\t{}\tmetrics_embedded={}",
            s.uuid,
            s.name,
            s.version.as_deref().unwrap_or("n/a"),
            s.metrics_embedded
        )
    })?;
    Ok(true)
}
