//! Config loading and table replacement.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use view_router::config::{load_config, ConfigError, TableWatcher};
use view_router::routing::{SharedResolver, TableError, TableVariant};
use view_router::config::ValidationError;

mod common;

#[test]
fn test_load_minimal_config() {
    let path = common::write_config("minimal.toml", common::MINIMAL_CONFIG);
    let config = load_config(&path).unwrap();
    let resolver = config.build_resolver().unwrap();

    assert_eq!(resolver.len(), 3);
    assert_eq!(resolver.resolve("/assets/BTC").param("ticker"), Some("BTC"));
    assert_eq!(resolver.resolve("/login").name, "NotFound");
    let _ = fs::remove_file(path);
}

#[test]
fn test_duplicate_names_rejected() {
    let content = common::MINIMAL_CONFIG.replace("name = \"SpecificAsset\"", "name = \"home\"");
    let path = common::write_config("dupes.toml", &content);

    match load_config(&path) {
        Err(ConfigError::Validation(errors)) => {
            assert_eq!(
                errors,
                vec![ValidationError::Table(TableError::DuplicateName("home".into()))]
            );
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    let _ = fs::remove_file(path);
}

#[tokio::test]
async fn test_reload_swaps_table() {
    let path = common::write_config("reload.toml", common::MINIMAL_CONFIG);
    let shared = Arc::new(SharedResolver::new(common::builtin(TableVariant::Full)));
    let snapshot = shared.load();
    assert_eq!(snapshot.resolve("/login").name, "login");

    let (watcher, _updates) = TableWatcher::new(&path);
    let reader = {
        let shared = shared.clone();
        tokio::spawn(async move {
            // Every observed table is complete: a path resolves either way.
            for _ in 0..100 {
                let name = shared.load().resolve("/login").name.to_string();
                assert!(name == "login" || name == "NotFound");
                tokio::task::yield_now().await;
            }
        })
    };

    shared.store(watcher.reload().unwrap());
    reader.await.unwrap();

    assert_eq!(shared.load().resolve("/login").name, "NotFound");
    assert_eq!(snapshot.resolve("/login").name, "login");
    let _ = fs::remove_file(path);
}

#[test]
fn test_invalid_reload_keeps_current_table() {
    let path = common::write_config("broken.toml", "[[routes]]\npath = \"/*\"\n");
    let shared = SharedResolver::new(common::builtin(TableVariant::Basic));

    let (watcher, _updates) = TableWatcher::new(&path);
    if let Some(resolver) = watcher.reload() {
        shared.store(resolver);
    }

    assert_eq!(shared.load().len(), 8);
    let _ = fs::remove_file(path);
}

/// Replace `path` the way editors do: write a sibling, then rename over it.
fn save_by_rename(path: &Path, content: &str) {
    let tmp = path.with_extension("toml.swp");
    fs::write(&tmp, content).unwrap();
    fs::rename(&tmp, path).unwrap();
}

#[tokio::test]
async fn test_watcher_applies_saved_changes() {
    let dir = std::env::temp_dir().join(format!("view-router-watch-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("routes.toml");
    fs::write(&path, common::MINIMAL_CONFIG).unwrap();

    let (watcher, mut updates) = TableWatcher::new(&path);
    let _guard = watcher.metrics(false).run().unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;

    // Missing catch-all: rejected, nothing is sent.
    save_by_rename(&path, "[[routes]]\npath = \"/\"\nname = \"home\"\nview = \"HomeView\"\n");
    save_by_rename(
        &path,
        "[router]\nvariant = \"basic\"\n\n[observability]\nmetrics_enabled = false\n",
    );

    let resolver = tokio::time::timeout(Duration::from_secs(10), updates.recv())
        .await
        .expect("no reload within 10s")
        .expect("watcher channel closed");
    assert_eq!(resolver.len(), 8);
    assert_eq!(resolver.resolve("/login").name, "login");
    assert_eq!(resolver.resolve("/portfolio").name, "NotFound");

    let _ = fs::remove_dir_all(dir);
}
