//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming location (path, or URL with query/fragment)
//!     → router.rs (normalize, scan table)
//!     → pattern.rs (split path, capture parameters)
//!     → Return: MatchResult (catch-all when nothing else matches)
//!
//! Table Compilation (at startup or reload):
//!     RouteConfig[] or builtin.rs variant
//!     → pattern.rs (parse patterns)
//!     → table.rs (unique names, terminal catch-all)
//!     → Freeze as immutable Resolver
//! ```
//!
//! # Design Decisions
//! - Tables compiled once, immutable at runtime
//! - No regex: literal, `:param` and trailing wildcard segments only
//! - Deterministic: same input always matches same route
//! - First match wins (table order)

pub mod builtin;
pub mod pattern;
pub mod router;
pub mod table;

pub use builtin::TableVariant;
pub use pattern::{HrefError, Params, PathPattern, PatternError, WILDCARD_PARAM};
pub use router::{MatchResult, Resolver, RouterOptions, SharedResolver};
pub use table::{RouteEntry, RouteTable, TableError};
