//! Shared data model layer (structs/constants only).
//!
//! ## Files
//! - `models.rs` — catalog payloads, polling/threshold configuration, verdict and report structs.
//! - `constants.rs` — stable constants (API paths, auth header, defaults).
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem/network side effects.
//!
//! ## Compatibility note
//! Changes in the report structs affect `--json` output.
//! Keep schema-impacting changes synchronized with `docs/contracts/*`.

pub mod constants;
pub mod models;
