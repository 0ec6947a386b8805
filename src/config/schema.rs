//! Configuration schema definitions.
//!
//! This module defines the configuration structure for the router.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::routing::{Resolver, RouteTable, RouterOptions, TableError, TableVariant};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ViewRouterConfig {
    /// Resolution settings and built-in table selection.
    pub router: RouterSettings,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Route definitions. When empty, the built-in table for
    /// `router.variant` is used.
    pub routes: Vec<RouteConfig>,
}

impl ViewRouterConfig {
    pub fn router_options(&self) -> RouterOptions {
        RouterOptions {
            case_sensitive: self.router.case_sensitive,
            metrics_enabled: self.observability.metrics_enabled,
        }
    }

    /// Build the route table described by this config.
    pub fn table(&self) -> Result<RouteTable<String>, TableError> {
        if self.routes.is_empty() {
            return self.router.variant.table();
        }
        self.routes
            .iter()
            .fold(RouteTable::builder(), |b, r| {
                b.route(&r.path, r.name.as_str(), r.view.clone())
            })
            .build()
    }

    /// Build a resolver over this config's table.
    pub fn build_resolver(&self) -> Result<Resolver<String>, TableError> {
        Ok(Resolver::with_options(self.table()?, self.router_options()))
    }
}

/// Resolution settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterSettings {
    /// Built-in table used when no routes are configured.
    pub variant: TableVariant,

    /// Compare literal segments exactly (default) or ignoring ASCII case.
    pub case_sensitive: bool,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            variant: TableVariant::Full,
            case_sensitive: true,
        }
    }
}

/// One route mapping a path pattern to a view.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Path pattern, e.g. `/assets/:ticker` or `/*`.
    pub path: String,

    /// Unique symbolic name.
    pub name: String,

    /// View handle handed back to the caller untouched.
    pub view: String,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    pub log_format: LogFormat,

    /// Emit resolution counters.
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: true,
        }
    }
}
