//! Output formatting for CLI display.

use std::fmt::Write;

use jiff::civil::DateTime;

use crate::model::PortCall;
use crate::time;
use crate::validate::ValidationReport;

/// Format a chain as a fixed-width table, one row per port call.
pub(super) fn format_chain(chain: &[PortCall]) -> String {
    if chain.is_empty() {
        return "No port calls".to_string();
    }

    let mut out = format!(
        "{:>3}  {:<16} {:<14} {:<19}  {:<19}  {:>8} {:>6} {:>6} {:>6}",
        "#", "PORT", "ACTIVITY", "ARRIVAL", "DEPARTURE", "NM", "KN", "STEAM", "PORT"
    );
    for call in chain {
        // Writing to a String cannot fail.
        let _ = write!(
            out,
            "\n{:>3}  {:<16} {:<14} {:<19}  {:<19}  {:>8.0} {:>6.2} {:>6.2} {:>6.2}",
            call.sequence_order,
            truncate(&call.port_name, 16),
            truncate(call.activity.label(), 14),
            format_timestamp(call.arrival),
            format_timestamp(call.departure),
            call.distance,
            call.speed,
            call.steam_days,
            call.port_days,
        );
    }
    out
}

/// Format a validation report: a verdict line, then one line per error.
pub(super) fn format_report(report: &ValidationReport) -> String {
    if report.is_valid {
        return "Chain is valid".to_string();
    }

    let mut out = format!("Chain has {} error(s)", report.errors.len());
    for error in &report.errors {
        let id = error
            .port_call_id
            .map_or_else(|| "-".to_string(), |id| id.to_string());
        let _ = write!(out, "\n  [{id}] {}: {}", error.field, error.message);
    }
    out
}

fn format_timestamp(dt: Option<DateTime>) -> String {
    dt.map_or_else(|| "-".to_string(), time::format)
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut cut: String = s.chars().take(max - 1).collect();
        cut.push('…');
        cut
    }
}
