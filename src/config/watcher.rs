//! Route table file watcher for hot reload.
//!
//! The parent directory is watched rather than the file itself so saves that
//! rename a new file over the old one keep producing events. Events for other
//! files in that directory are ignored.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::{parse_config, ConfigError};
use crate::observability::metrics;
use crate::routing::Resolver;

/// Watches a config file and emits a freshly compiled resolver on every
/// valid change.
pub struct TableWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<Resolver<String>>,
    /// Gates reload metrics for files that fail to compile. Applied reloads
    /// follow the new config's own `metrics_enabled`.
    metrics_enabled: bool,
}

impl TableWatcher {
    /// Create a new TableWatcher.
    ///
    /// Returns the watcher and a receiver for compiled resolvers.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<Resolver<String>>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                update_tx,
                metrics_enabled: true,
            },
            update_rx,
        )
    }

    /// Set whether rejected reloads are counted.
    pub fn metrics(mut self, enabled: bool) -> Self {
        self.metrics_enabled = enabled;
        self
    }

    /// Load, validate and compile the watched file once.
    ///
    /// Invalid or empty files are logged and dropped so the current table
    /// stays active.
    pub fn reload(&self) -> Option<Resolver<String>> {
        match compile(&self.path) {
            Ok(resolver) => {
                if resolver.options().metrics_enabled {
                    metrics::record_reload("applied");
                }
                Some(resolver)
            }
            Err(e) => {
                tracing::error!(path = ?self.path, error = %e, "Failed to reload route table. Keeping current table.");
                if self.metrics_enabled {
                    metrics::record_reload("rejected");
                }
                None
            }
        }
    }

    fn is_target(&self, event: &Event) -> bool {
        let name = self.path.file_name();
        event.paths.iter().any(|p| p.file_name() == name)
    }

    /// Start watching the file in a background thread.
    ///
    /// The returned watcher must be kept alive for events to keep flowing.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let path = self.path.clone();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if (event.kind.is_modify() || event.kind.is_create()) && self.is_target(&event) {
                        tracing::info!("Route table change detected, reloading...");
                        if let Some(resolver) = self.reload() {
                            let _ = self.update_tx.send(resolver);
                        }
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?path, dir = ?dir, "Route table watcher started");
        Ok(watcher)
    }
}

fn compile(path: &Path) -> Result<Resolver<String>, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    // Editors truncate before writing; an empty file mid-save must not fall
    // back to the built-in table.
    if content.trim().is_empty() {
        return Err(ConfigError::Empty {
            path: path.to_path_buf(),
        });
    }
    let config = parse_config(&content)?;
    config
        .build_resolver()
        .map_err(|e| ConfigError::Validation(vec![e.into()]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use ::metrics::{Counter, Gauge, Histogram, Key, KeyName, Metadata, Recorder, SharedString, Unit};

    /// Records the name of every counter registered through it.
    #[derive(Default)]
    struct CounterNames(Mutex<Vec<String>>);

    impl CounterNames {
        fn count(&self, name: &str) -> usize {
            self.0.lock().unwrap().iter().filter(|n| *n == name).count()
        }
    }

    impl Recorder for CounterNames {
        fn describe_counter(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_gauge(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_histogram(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}

        fn register_counter(&self, key: &Key, _: &Metadata<'_>) -> Counter {
            self.0.lock().unwrap().push(key.name().to_string());
            Counter::noop()
        }

        fn register_gauge(&self, _: &Key, _: &Metadata<'_>) -> Gauge {
            Gauge::noop()
        }

        fn register_histogram(&self, _: &Key, _: &Metadata<'_>) -> Histogram {
            Histogram::noop()
        }
    }

    fn temp_file(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("view-router-{}-{name}", std::process::id()));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_reload_valid_file() {
        let path = temp_file("valid.toml", "[router]\nvariant = \"basic\"\n");
        let (watcher, _rx) = TableWatcher::new(&path);

        let resolver = watcher.reload().unwrap();
        assert_eq!(resolver.resolve("/portfolio").name, "NotFound");
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_reload_invalid_file_is_rejected() {
        let path = temp_file(
            "invalid.toml",
            "[[routes]]\npath = \"/\"\nname = \"home\"\nview = \"HomeView\"\n",
        );
        let (watcher, _rx) = TableWatcher::new(&path);

        assert!(watcher.reload().is_none());
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_reload_empty_file_is_rejected() {
        for (name, content) in [("empty.toml", ""), ("blank.toml", "  \n\t\n")] {
            let path = temp_file(name, content);
            let (watcher, _rx) = TableWatcher::new(&path);

            assert!(watcher.reload().is_none(), "{name} should be rejected");
            assert!(matches!(compile(&path), Err(ConfigError::Empty { .. })));
            let _ = fs::remove_file(path);
        }
    }

    #[test]
    fn test_reload_metrics_follow_setting() {
        const RELOADS: &str = "router_table_reloads_total";
        let disabled = temp_file(
            "metrics-off.toml",
            "[router]\nvariant = \"basic\"\n[observability]\nmetrics_enabled = false\n",
        );
        let rejected = temp_file("metrics-rejected.toml", "");

        let recorder = CounterNames::default();
        ::metrics::with_local_recorder(&recorder, || {
            let (watcher, _rx) = TableWatcher::new(&disabled);
            assert!(watcher.reload().is_some());

            let (watcher, _rx) = TableWatcher::new(&rejected);
            assert!(watcher.metrics(false).reload().is_none());
        });
        assert_eq!(recorder.count(RELOADS), 0);

        let enabled = temp_file("metrics-on.toml", "[router]\nvariant = \"basic\"\n");
        let recorder = CounterNames::default();
        ::metrics::with_local_recorder(&recorder, || {
            let (watcher, _rx) = TableWatcher::new(&enabled);
            assert!(watcher.reload().is_some());

            let (watcher, _rx) = TableWatcher::new(&rejected);
            assert!(watcher.reload().is_none());
        });
        assert_eq!(recorder.count(RELOADS), 2);

        for path in [disabled, rejected, enabled] {
            let _ = fs::remove_file(path);
        }
    }
}
