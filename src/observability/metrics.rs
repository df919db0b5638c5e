//! Metrics collection.
//!
//! # Metrics
//! - `router_navigations_total` (counter): navigations by outcome
//!   (`dispatched`, `not_found`)
//! - `view_loads_total` (counter): view loads by outcome (`ok`, `error`, `stale`)
//! - `scripts_executed_total` (counter): scripts run after injection

use metrics::counter;

pub fn record_navigation(outcome: &'static str) {
    counter!("router_navigations_total", "outcome" => outcome).increment(1);
}

pub fn record_view_load(outcome: &'static str) {
    counter!("view_loads_total", "outcome" => outcome).increment(1);
}

pub fn record_script_executed() {
    counter!("scripts_executed_total").increment(1);
}
