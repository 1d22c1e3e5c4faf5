use crate::cli::{Cli, PollingArgs, ProjectArgs, ThresholdArgs};
use crate::domain::constants::{DEFAULT_CONFIG_FILE, DEFAULT_TIMEOUT_MS};
use crate::domain::models::{MetricsThresholds, PollingConfig};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub skip: bool,
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub project: ProjectSection,
    #[serde(default)]
    pub polling: PollingSection,
    #[serde(default)]
    pub thresholds: MetricsThresholds,
}

#[derive(Debug, Deserialize, Default)]
pub struct ServerSection {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ProjectSection {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct PollingSection {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub attempts: Option<u32>,
    #[serde(default)]
    pub interval_seconds: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub timeout_ms: u64,
}

/// Loads the config file. An explicit path must exist; the default one may be absent.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<FileConfig> {
    let path = match explicit {
        Some(p) => {
            if !p.exists() {
                anyhow::bail!("config file not found: {}", p.display());
            }
            p.to_path_buf()
        }
        None => {
            let p = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !p.exists() {
                return Ok(FileConfig::default());
            }
            p
        }
    };
    tracing::debug!(path = %path.display(), "loading config");
    let raw = std::fs::read_to_string(&path)?;
    toml::from_str(&raw)
        .map_err(|e| anyhow::anyhow!("invalid config {}: {}", path.display(), e))
}

/// CLI and environment win over the file. A missing URL or key is reported by the
/// client on first request, so a skipped gate needs neither.
pub fn server_settings(cli: &Cli, file: &FileConfig) -> ServerSettings {
    ServerSettings {
        url: cli.url.clone().or_else(|| file.server.url.clone()),
        api_key: cli.api_key.clone().or_else(|| file.server.api_key.clone()),
        timeout_ms: cli
            .timeout_ms
            .or(file.server.timeout_ms)
            .unwrap_or(DEFAULT_TIMEOUT_MS),
    }
}

pub fn project_target(args: &ProjectArgs, file: &FileConfig) -> anyhow::Result<(String, String)> {
    let name = args
        .project_name
        .clone()
        .or_else(|| file.project.name.clone())
        .ok_or_else(|| anyhow::anyhow!("no project name configured (use --project-name)"))?;
    let version = args
        .project_version
        .clone()
        .or_else(|| file.project.version.clone())
        .ok_or_else(|| anyhow::anyhow!("no project version configured (use --project-version)"))?;
    Ok((name, version))
}

pub fn polling_config(args: &PollingArgs, file: &PollingSection) -> anyhow::Result<PollingConfig> {
    let defaults = PollingConfig::default();
    let cli_budget = args.polling_attempts.is_some() || args.polling_interval.is_some();
    let enabled = if args.no_polling {
        false
    } else if args.polling || cli_budget {
        true
    } else {
        file.enabled.unwrap_or(defaults.enabled)
    };
    if !enabled {
        return Ok(PollingConfig::disabled());
    }
    let config = PollingConfig::new(
        true,
        args.polling_attempts
            .or(file.attempts)
            .unwrap_or(defaults.attempts),
        args.polling_interval
            .or(file.interval_seconds)
            .unwrap_or(defaults.interval_seconds),
    );
    if config.attempts == 0 {
        anyhow::bail!("polling attempts must be at least 1");
    }
    if config.interval_seconds == 0 {
        anyhow::bail!("polling interval must be at least 1 second");
    }
    Ok(config)
}

pub fn thresholds(args: &ThresholdArgs, file: &MetricsThresholds) -> MetricsThresholds {
    MetricsThresholds {
        critical: args.max_critical.or(file.critical),
        high: args.max_high.or(file.high),
        medium: args.max_medium.or(file.medium),
        low: args.max_low.or(file.low),
        unassigned: args.max_unassigned.or(file.unassigned),
    }
}
