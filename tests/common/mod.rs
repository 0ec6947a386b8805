//! Shared helpers for integration tests.

use std::fs;
use std::path::PathBuf;

use view_router::routing::{Resolver, TableVariant};

/// Resolver over a built-in table with metrics off.
pub fn builtin(variant: TableVariant) -> Resolver<String> {
    let mut config = view_router::ViewRouterConfig::default();
    config.router.variant = variant;
    config.observability.metrics_enabled = false;
    config.build_resolver().unwrap()
}

/// Write `content` to a per-process temp file and return its path.
#[allow(dead_code)]
pub fn write_config(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "view-router-it-{}-{}",
        std::process::id(),
        name
    ));
    fs::write(&path, content).unwrap();
    path
}

/// A small config with one parameterized route and a catch-all.
#[allow(dead_code)]
pub const MINIMAL_CONFIG: &str = r#"
[router]
case_sensitive = true

[observability]
metrics_enabled = false

[[routes]]
path = "/"
name = "home"
view = "HomeView"

[[routes]]
path = "/assets/:ticker"
name = "SpecificAsset"
view = "user/SpecificAsset"

[[routes]]
path = "/*"
name = "NotFound"
view = "NotFound"
"#;
