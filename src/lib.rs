//! Client-side route resolution for the asset management front-end.
//!
//! Maps navigation paths to symbolic view names and captured parameters.
//! Tables are validated once and immutable afterwards; every path resolves,
//! falling back to the terminal catch-all route.

pub mod config;
pub mod observability;
pub mod routing;

pub use config::ViewRouterConfig;
pub use routing::{MatchResult, Resolver, RouteTable, SharedResolver, TableVariant};
