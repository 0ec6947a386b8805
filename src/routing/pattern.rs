//! Path pattern parsing and matching.
//!
//! # Responsibilities
//! - Parse pattern strings into literal / parameter / wildcard segments
//! - Match a split request path against a pattern, capturing parameters
//! - Render a pattern back into a path from a parameter map
//!
//! # Design Decisions
//! - Patterns are parsed once at table construction, never at lookup time
//! - `:name` captures exactly one non-empty segment
//! - A wildcard is only legal as the final segment
//! - No regex: matching is a single linear walk over the segments

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// Parameter name bound by an anonymous wildcard (`/*`).
pub const WILDCARD_PARAM: &str = "pathMatch";

/// Captured path parameters, ordered by name.
pub type Params = BTreeMap<String, String>;

/// Errors produced while parsing a pattern string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("pattern `{0}` must start with '/'")]
    MissingLeadingSlash(String),

    #[error("pattern `{0}` contains an empty segment")]
    EmptySegment(String),

    #[error("pattern `{pattern}` has an invalid parameter name `{name}`")]
    InvalidParamName { pattern: String, name: String },

    #[error("pattern `{pattern}` binds parameter `{name}` more than once")]
    DuplicateParam { pattern: String, name: String },

    #[error("pattern `{0}` has a wildcard before its last segment")]
    WildcardNotLast(String),
}

/// Errors produced while rendering a pattern into a path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HrefError {
    #[error("no route named `{0}`")]
    UnknownRoute(String),

    #[error("route `{route}` requires parameter `{param}`")]
    MissingParam { route: String, param: String },

    #[error("parameter `{param}` of route `{route}` must not be empty")]
    EmptyParam { route: String, param: String },

    #[error("parameter `{param}` of route `{route}` must not contain '/'")]
    SlashInParam { route: String, param: String },
}

/// One segment of a parsed pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Param(String),
    Wildcard(String),
}

/// A parsed path pattern such as `/assets/:ticker`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parse a pattern string.
    pub fn parse(raw: &str) -> Result<Self, PatternError> {
        let body = raw
            .strip_prefix('/')
            .ok_or_else(|| PatternError::MissingLeadingSlash(raw.to_string()))?;

        let mut segments = Vec::new();
        if !body.is_empty() {
            let parts: Vec<&str> = body.split('/').collect();
            let last = parts.len() - 1;

            for (i, part) in parts.into_iter().enumerate() {
                if part.is_empty() {
                    return Err(PatternError::EmptySegment(raw.to_string()));
                }
                let segment = parse_segment(raw, part)?;
                if matches!(segment, Segment::Wildcard(_)) && i != last {
                    return Err(PatternError::WildcardNotLast(raw.to_string()));
                }
                if let Some(name) = segment_param(&segment) {
                    if segments.iter().any(|s| segment_param(s) == Some(name)) {
                        return Err(PatternError::DuplicateParam {
                            pattern: raw.to_string(),
                            name: name.to_string(),
                        });
                    }
                }
                segments.push(segment);
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// True if the pattern is a lone wildcard and therefore matches every path.
    pub fn is_catch_all(&self) -> bool {
        matches!(self.segments.as_slice(), [Segment::Wildcard(_)])
    }

    /// Names of all parameters this pattern binds, in segment order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(segment_param)
    }

    /// Match already-split path segments against this pattern.
    ///
    /// Returns the captured parameters on a full match.
    pub fn captures(&self, path: &[&str], case_sensitive: bool) -> Option<Params> {
        let mut params = Params::new();

        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Wildcard(name) => {
                    let rest = path.get(i..).unwrap_or_default().join("/");
                    params.insert(name.clone(), rest);
                    return Some(params);
                }
                Segment::Param(name) => {
                    let value = path.get(i).filter(|v| !v.is_empty())?;
                    params.insert(name.clone(), (*value).to_string());
                }
                Segment::Literal(expected) => {
                    let actual = path.get(i)?;
                    let equal = if case_sensitive {
                        expected == actual
                    } else {
                        expected.eq_ignore_ascii_case(actual)
                    };
                    if !equal {
                        return None;
                    }
                }
            }
        }

        (path.len() == self.segments.len()).then_some(params)
    }

    /// Render this pattern into a concrete path.
    ///
    /// `route` is only used to label errors.
    pub fn render(&self, route: &str, params: &Params) -> Result<String, HrefError> {
        if self.segments.is_empty() {
            return Ok("/".to_string());
        }

        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => {
                    out.push('/');
                    out.push_str(text);
                }
                Segment::Param(name) => {
                    let value = lookup(route, name, params)?;
                    if value.is_empty() {
                        return Err(HrefError::EmptyParam {
                            route: route.to_string(),
                            param: name.clone(),
                        });
                    }
                    if value.contains('/') {
                        return Err(HrefError::SlashInParam {
                            route: route.to_string(),
                            param: name.clone(),
                        });
                    }
                    out.push('/');
                    out.push_str(value);
                }
                Segment::Wildcard(name) => {
                    // An empty remainder adds no separator: `/files/*rest` with
                    // `rest = ""` renders as `/files`.
                    let value = lookup(route, name, params)?;
                    if !value.is_empty() || out.is_empty() {
                        out.push('/');
                    }
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl std::str::FromStr for PathPattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Split a normalized request path into segments.
///
/// The leading slash is dropped and an empty remainder is the root. Empty
/// segments are kept, so `/assets/` yields `["assets", ""]`.
pub fn split_path(path: &str) -> Vec<&str> {
    let body = path.strip_prefix('/').unwrap_or(path);
    if body.is_empty() {
        Vec::new()
    } else {
        body.split('/').collect()
    }
}

fn parse_segment(raw: &str, part: &str) -> Result<Segment, PatternError> {
    if let Some(rest) = part.strip_prefix('*') {
        let name = if rest.is_empty() { WILDCARD_PARAM } else { rest };
        return Ok(Segment::Wildcard(checked_name(raw, name)?));
    }

    if let Some(rest) = part.strip_prefix(':') {
        // `:name(.*)*` is the history-router spelling of a catch-all.
        if let Some(name) = rest
            .strip_suffix("(.*)*")
            .or_else(|| rest.strip_suffix("(.*)"))
        {
            return Ok(Segment::Wildcard(checked_name(raw, name)?));
        }
        return Ok(Segment::Param(checked_name(raw, rest)?));
    }

    Ok(Segment::Literal(part.to_string()))
}

fn checked_name(raw: &str, name: &str) -> Result<String, PatternError> {
    let valid = !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(name.to_string())
    } else {
        Err(PatternError::InvalidParamName {
            pattern: raw.to_string(),
            name: name.to_string(),
        })
    }
}

fn segment_param(segment: &Segment) -> Option<&str> {
    match segment {
        Segment::Param(name) | Segment::Wildcard(name) => Some(name),
        Segment::Literal(_) => None,
    }
}

fn lookup<'p>(route: &str, name: &str, params: &'p Params) -> Result<&'p str, HrefError> {
    params
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| HrefError::MissingParam {
            route: route.to_string(),
            param: name.to_string(),
        })
}
