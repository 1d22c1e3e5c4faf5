use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod domain;
mod remote;
mod services;

pub use cli::{Cli, Commands};
pub use commands::{handle_metrics_command, handle_project_command};
pub use domain::constants::{EXIT_EXECUTION_ERROR, EXIT_GATE_FAILURE};
pub use domain::models::{MetricsThresholds, PollingConfig, ProjectSummary};
pub use remote::{Catalog, DependencyTrackClient};
pub use services::config::{
    load_config, polling_config, project_target, server_settings, thresholds, FileConfig,
};
pub use services::gate::{run_gate, ExecutionError, GateError, GateOutcome, GateRequest};
pub use services::output::{metrics_report_text, print_one, ErrorOut};
pub use services::polling::thread_sleep;
pub use services::resolver::resolve_project;

fn init_tracing(directive: &str) {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let file = load_config(cli.config.as_deref())?;

    if handle_metrics_command(cli, &file)? {
        return Ok(());
    }
    if handle_project_command(cli, &file)? {
        return Ok(());
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let Err(err) = run(&cli) else {
        return ExitCode::SUCCESS;
    };

    let gate_err = err.downcast_ref::<GateError>();
    let gate_failure = gate_err.is_some_and(GateError::is_failure);
    if gate_failure {
        eprintln!("{err}");
        return ExitCode::from(EXIT_GATE_FAILURE);
    }

    if cli.json {
        let out = ErrorOut {
            kind: "execution",
            message: format!("{err:#}"),
        };
        if let Err(e) = print_one(true, false, out, |_| String::new()) {
            eprintln!("error: {e}");
        }
    }
    eprintln!("error: {err:#}");
    if gate_err.is_some_and(GateError::is_auth) {
        eprintln!("hint: check --api-key / DTRACK_API_KEY");
    }
    ExitCode::from(EXIT_EXECUTION_ERROR)
}
