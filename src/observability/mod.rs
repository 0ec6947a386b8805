//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing, config watcher produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, gauges)
//!
//! Consumers:
//!     → stderr (pretty or JSON)
//!     → whatever `metrics` recorder the host installs
//! ```
//!
//! # Design Decisions
//! - Structured logging via `tracing`
//! - Metrics are cheap facade calls and can be disabled per resolver

pub mod logging;
pub mod metrics;
