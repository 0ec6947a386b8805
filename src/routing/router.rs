//! Path resolution and reverse lookup.
//!
//! # Responsibilities
//! - Resolve a path to exactly one route and its captured parameters
//! - Render a named route back into a path
//! - Share the current resolver across tasks with atomic replacement
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) pattern scan in table order, first match wins
//! - O(1) name lookup via HashMap for `href`
//! - Unmatched paths land on the catch-all, never an error

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::Serialize;

use crate::observability::metrics;
use crate::routing::pattern::{split_path, HrefError, Params};
use crate::routing::table::{RouteEntry, RouteTable};

/// Resolution options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouterOptions {
    /// Compare literal segments exactly. When false, ASCII case is ignored.
    pub case_sensitive: bool,
    /// Emit resolution counters through the `metrics` facade.
    pub metrics_enabled: bool,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            metrics_enabled: true,
        }
    }
}

/// Outcome of resolving one path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult<'a, V> {
    /// Symbolic name of the matched route.
    pub name: &'a str,
    /// View handle registered for the route.
    pub view: &'a V,
    /// Captured parameters, keyed by name.
    pub params: Params,
    /// True when the catch-all entry was selected.
    pub fallback: bool,
}

impl<V> MatchResult<'_, V> {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// Resolves paths against an immutable route table.
#[derive(Debug, Clone)]
pub struct Resolver<V> {
    table: RouteTable<V>,
    by_name: HashMap<String, usize>,
    options: RouterOptions,
}

impl<V> Resolver<V> {
    pub fn new(table: RouteTable<V>) -> Self {
        Self::with_options(table, RouterOptions::default())
    }

    pub fn with_options(table: RouteTable<V>, options: RouterOptions) -> Self {
        let by_name = table
            .entries()
            .enumerate()
            .map(|(i, e)| (e.name().to_string(), i))
            .collect();

        tracing::info!(
            routes = table.len(),
            fallback = table.fallback().name(),
            case_sensitive = options.case_sensitive,
            "Route table compiled"
        );

        Self {
            table,
            by_name,
            options,
        }
    }

    pub fn options(&self) -> RouterOptions {
        self.options
    }

    pub fn table(&self) -> &RouteTable<V> {
        &self.table
    }

    /// Entries in evaluation order.
    pub fn entries(&self) -> impl Iterator<Item = &RouteEntry<V>> {
        self.table.entries()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Look up an entry by symbolic name.
    pub fn get(&self, name: &str) -> Option<&RouteEntry<V>> {
        let index = *self.by_name.get(name)?;
        let routes = self.table.routes();
        Some(routes.get(index).unwrap_or(self.table.fallback()))
    }

    /// Resolve a normalized path (no query string, no fragment).
    pub fn resolve(&self, path: &str) -> MatchResult<'_, V> {
        let segments = split_path(path);
        let case_sensitive = self.options.case_sensitive;

        let hit = self.table.routes().iter().find_map(|entry| {
            entry
                .pattern()
                .captures(&segments, case_sensitive)
                .map(|params| (entry, params))
        });

        let (entry, params, fallback) = match hit {
            Some((entry, params)) => (entry, params, false),
            None => {
                let entry = self.table.fallback();
                // A lone wildcard matches every split path.
                let params = entry
                    .pattern()
                    .captures(&segments, case_sensitive)
                    .unwrap_or_default();
                (entry, params, true)
            }
        };

        tracing::debug!(path = %path, route = entry.name(), fallback, "Resolved path");
        if self.options.metrics_enabled {
            metrics::record_resolution(entry.name(), fallback);
        }

        MatchResult {
            name: entry.name(),
            view: entry.view(),
            params,
            fallback,
        }
    }

    /// Resolve a raw location: a path that may carry `?query` / `#fragment`,
    /// or an absolute URL.
    pub fn resolve_location(&self, location: &str) -> MatchResult<'_, V> {
        self.resolve(normalize_location(location))
    }

    /// Render the named route with the given parameters.
    ///
    /// Parameters the route does not bind are ignored.
    pub fn href(&self, name: &str, params: &Params) -> Result<String, HrefError> {
        let entry = self
            .get(name)
            .ok_or_else(|| HrefError::UnknownRoute(name.to_string()))?;
        entry.pattern().render(entry.name(), params)
    }
}

/// Reduce a location to the path the resolver expects.
///
/// Absolute URLs are recognised with `url`, but the path is taken from the raw
/// input so a URL and a bare path for the same location normalize identically
/// (no percent-encoding, no dot-segment removal).
pub fn normalize_location(location: &str) -> &str {
    let path = match url::Url::parse(location) {
        Ok(url) if !url.cannot_be_a_base() => strip_authority(location),
        _ => location,
    };

    let end = path.find(['?', '#']).unwrap_or(path.len());
    match &path[..end] {
        "" => "/",
        path => path,
    }
}

/// Drop `scheme://authority` from an absolute URL, keeping path, query and fragment.
fn strip_authority(location: &str) -> &str {
    let after_scheme = location
        .find("://")
        .map(|i| &location[i + 3..])
        .unwrap_or(location);
    let start = after_scheme
        .find(['/', '?', '#'])
        .unwrap_or(after_scheme.len());
    &after_scheme[start..]
}

/// A resolver shared across tasks that can be swapped atomically on reload.
///
/// Readers always observe a complete, validated table.
#[derive(Debug)]
pub struct SharedResolver<V> {
    inner: ArcSwap<Resolver<V>>,
}

impl<V> SharedResolver<V> {
    pub fn new(resolver: Resolver<V>) -> Self {
        if resolver.options.metrics_enabled {
            metrics::record_table_size(resolver.len());
        }
        Self {
            inner: ArcSwap::from_pointee(resolver),
        }
    }

    /// Current resolver snapshot.
    pub fn load(&self) -> Arc<Resolver<V>> {
        self.inner.load_full()
    }

    /// Replace the current resolver.
    pub fn store(&self, resolver: Resolver<V>) {
        tracing::info!(routes = resolver.len(), "Route table replaced");
        if resolver.options.metrics_enabled {
            metrics::record_table_size(resolver.len());
        }
        self.inner.store(Arc::new(resolver));
    }
}
