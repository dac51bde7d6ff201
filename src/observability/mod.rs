//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (counters and gauges via `metrics`)
//! ```
//!
//! Metrics are recorded through the `metrics` facade; they are no-ops until
//! the embedding application installs a recorder.

pub mod logging;
pub mod metrics;
