//! Route entries and the validated route table.
//!
//! # Responsibilities
//! - Pair each path pattern with a unique symbolic name and an opaque view handle
//! - Enforce table invariants once, at construction
//!
//! # Invariants
//! - At least one entry
//! - Symbolic names are unique
//! - Exactly one catch-all entry, and it is the final entry
//!
//! A table is immutable once built. Replacing it means building a new one.

use std::collections::HashSet;

use thiserror::Error;

use crate::routing::pattern::{PathPattern, PatternError};

/// Errors raised when building a route table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("route table is empty")]
    Empty,

    #[error("route name `{0}` is registered more than once")]
    DuplicateName(String),

    #[error("route table has no terminal catch-all entry")]
    MissingCatchAll,

    #[error("catch-all route `{0}` must be the final entry")]
    CatchAllNotLast(String),

    #[error("route `{name}`: {source}")]
    Pattern {
        name: String,
        #[source]
        source: PatternError,
    },
}

/// A single pattern-to-view mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry<V> {
    pattern: PathPattern,
    name: String,
    view: V,
}

impl<V> RouteEntry<V> {
    pub fn new(pattern: PathPattern, name: impl Into<String>, view: V) -> Self {
        Self {
            pattern,
            name: name.into(),
            view,
        }
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn view(&self) -> &V {
        &self.view
    }
}

/// Ordered, validated collection of route entries.
///
/// The catch-all entry is held apart from the ordinary routes so lookups
/// always have a result without an unwrap.
#[derive(Debug, Clone)]
pub struct RouteTable<V> {
    routes: Vec<RouteEntry<V>>,
    fallback: RouteEntry<V>,
}

impl<V> RouteTable<V> {
    /// Start building a table from raw pattern strings.
    pub fn builder() -> RouteTableBuilder<V> {
        RouteTableBuilder::default()
    }

    /// Validate an ordered list of entries.
    pub fn new(mut entries: Vec<RouteEntry<V>>) -> Result<Self, TableError> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.name.as_str()) {
                return Err(TableError::DuplicateName(entry.name.clone()));
            }
        }

        let fallback = match entries.pop() {
            None => return Err(TableError::Empty),
            Some(last) if last.pattern.is_catch_all() => last,
            Some(_) => {
                return Err(match entries.iter().find(|e| e.pattern.is_catch_all()) {
                    Some(early) => TableError::CatchAllNotLast(early.name.clone()),
                    None => TableError::MissingCatchAll,
                })
            }
        };

        if let Some(early) = entries.iter().find(|e| e.pattern.is_catch_all()) {
            return Err(TableError::CatchAllNotLast(early.name.clone()));
        }

        Ok(Self {
            routes: entries,
            fallback,
        })
    }

    /// Ordinary routes in evaluation order, without the catch-all.
    pub fn routes(&self) -> &[RouteEntry<V>] {
        &self.routes
    }

    /// The terminal catch-all entry.
    pub fn fallback(&self) -> &RouteEntry<V> {
        &self.fallback
    }

    /// All entries in table order, catch-all last.
    pub fn entries(&self) -> impl Iterator<Item = &RouteEntry<V>> {
        self.routes.iter().chain(std::iter::once(&self.fallback))
    }

    pub fn len(&self) -> usize {
        self.routes.len() + 1
    }

    /// Always false: a valid table holds at least its catch-all.
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Collects `(pattern, name, view)` triples and validates them on `build`.
///
/// Pattern errors are deferred to `build` so a table is either fully valid or
/// rejected as a whole.
#[derive(Debug)]
pub struct RouteTableBuilder<V> {
    entries: Vec<RouteEntry<V>>,
    error: Option<TableError>,
}

impl<V> Default for RouteTableBuilder<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            error: None,
        }
    }
}

impl<V> RouteTableBuilder<V> {
    pub fn route(mut self, pattern: &str, name: impl Into<String>, view: V) -> Self {
        let name = name.into();
        if self.error.is_none() {
            match PathPattern::parse(pattern) {
                Ok(pattern) => self.entries.push(RouteEntry::new(pattern, name, view)),
                Err(source) => self.error = Some(TableError::Pattern { name, source }),
            }
        }
        self
    }

    pub fn build(self) -> Result<RouteTable<V>, TableError> {
        match self.error {
            Some(err) => Err(err),
            None => RouteTable::new(self.entries),
        }
    }
}
