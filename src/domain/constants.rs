pub const API_KEY_HEADER: &str = "X-Api-Key";

pub const PROJECT_PATH: &str = "/api/v1/project";

/// Metrics resource for one project; `{uuid}` is replaced verbatim.
pub const PROJECT_METRICS_PATH: &str = "/api/v1/metrics/project/{uuid}/current";

pub const DEFAULT_CONFIG_FILE: &str = "dtrack-gate.toml";

pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

pub const DEFAULT_POLLING_ATTEMPTS: u32 = 20;

pub const DEFAULT_POLLING_INTERVAL_SECONDS: u64 = 1;

pub const EXIT_GATE_FAILURE: u8 = 1;

/// Kept apart from clap usage errors, which exit 2.
pub const EXIT_EXECUTION_ERROR: u8 = 3;
