//! Command handler layer.
//!
//! ## Files
//! - `gate.rs` — `metrics` (the quality gate) and `project` (catalog lookup).
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate business logic to `services/*`.
//! - Keep behavior and output schema stable.

pub mod gate;

pub use gate::{handle_metrics_command, handle_project_command};
