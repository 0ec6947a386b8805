//! Resolution metrics.
//!
//! # Metrics
//! - `router_resolutions_total` (counter): resolutions by route
//! - `router_fallbacks_total` (counter): resolutions that hit the catch-all
//! - `router_table_reloads_total` (counter): hot reloads by outcome
//! - `router_table_routes` (gauge): entries in the active table
//!
//! Recorded through the `metrics` facade. Installing an exporter is left to
//! the embedding application; without one these calls are no-ops.

/// Record one resolution.
pub fn record_resolution(route: &str, fallback: bool) {
    ::metrics::counter!("router_resolutions_total", "route" => route.to_string()).increment(1);
    if fallback {
        ::metrics::counter!("router_fallbacks_total").increment(1);
    }
}

/// Record a table reload attempt. `outcome` is `"applied"` or `"rejected"`.
pub fn record_reload(outcome: &'static str) {
    ::metrics::counter!("router_table_reloads_total", "outcome" => outcome).increment(1);
}

/// Record the size of the active table.
pub fn record_table_size(routes: usize) {
    ::metrics::gauge!("router_table_routes").set(routes as f64);
}
