use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "dtrack-gate",
    version,
    about = "Fail a build when Dependency-Track metrics exceed thresholds"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        help = "TOML config file (default: ./dtrack-gate.toml when present)"
    )]
    pub config: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        default_value = "warn",
        help = "Log filter directive, e.g. info or dtrack_gate=debug"
    )]
    pub log_level: String,
    #[arg(long, global = true, env = "DTRACK_URL", help = "Dependency-Track base URL")]
    pub url: Option<String>,
    #[arg(
        long,
        global = true,
        env = "DTRACK_API_KEY",
        hide_env_values = true,
        help = "API key sent as X-Api-Key"
    )]
    pub api_key: Option<String>,
    #[arg(long, global = true, help = "HTTP timeout per request in milliseconds")]
    pub timeout_ms: Option<u64>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate project metrics against thresholds
    Metrics {
        #[command(flatten)]
        target: ProjectArgs,
        #[arg(long, default_value_t = false, help = "Bypass the gate without contacting the server")]
        skip: bool,
        #[command(flatten)]
        polling: PollingArgs,
        #[command(flatten)]
        thresholds: ThresholdArgs,
    },
    /// Resolve a project in the catalog and show its identity
    Project {
        #[command(flatten)]
        target: ProjectArgs,
    },
}

#[derive(Args, Debug, Default, Clone)]
pub struct ProjectArgs {
    #[arg(long)]
    pub project_name: Option<String>,
    #[arg(long)]
    pub project_version: Option<String>,
}

#[derive(Args, Debug, Default, Clone)]
pub struct PollingArgs {
    #[arg(long, default_value_t = false, help = "Fetch metrics once without retrying")]
    pub no_polling: bool,
    #[arg(
        long,
        default_value_t = false,
        conflicts_with = "no_polling",
        help = "Retry metrics fetches even if the config file disables polling"
    )]
    pub polling: bool,
    #[arg(long, conflicts_with = "no_polling")]
    pub polling_attempts: Option<u32>,
    #[arg(long, conflicts_with = "no_polling", help = "Seconds between attempts")]
    pub polling_interval: Option<u64>,
}

#[derive(Args, Debug, Default, Clone)]
pub struct ThresholdArgs {
    #[arg(long)]
    pub max_critical: Option<u64>,
    #[arg(long)]
    pub max_high: Option<u64>,
    #[arg(long)]
    pub max_medium: Option<u64>,
    #[arg(long)]
    pub max_low: Option<u64>,
    #[arg(long)]
    pub max_unassigned: Option<u64>,
}
