//! Service layer: the metrics gate and its side-effect helpers.
//!
//! ## Service map
//! - `resolver.rs` — exact name+version lookup in the project catalog.
//! - `polling.rs` — bounded retry loop with an injectable wait.
//! - `metrics.rs` — embedded-or-fetch metrics access.
//! - `thresholds.rs` — per-severity threshold evaluation.
//! - `gate.rs` — orchestration, skip switch, error taxonomy.
//! - `config.rs` — TOML config loading and CLI override merge.
//! - `output.rs` — JSON/text output helpers.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Network access goes through `remote::Catalog` only.
//! - Keep command handlers thin; delegate to services.

pub mod config;
pub mod gate;
pub mod metrics;
pub mod output;
pub mod polling;
pub mod resolver;
pub mod thresholds;
