//! Port-call physics: distance, speed, and time at sea or in port.
//!
//! Distances are nautical miles, speeds are knots, durations are
//! fractional days.

use jiff::civil::DateTime;

use crate::time;

/// Stay applied when a port call declares no positive port-days.
pub const DEFAULT_PORT_DAYS: f64 = 1.0;

/// Days spent steaming to cover `distance` at `speed`. Zero when `speed` is not positive.
pub fn steam_days(distance: f64, speed: f64) -> f64 {
    if speed > 0.0 {
        distance / (speed * 24.0)
    } else {
        0.0
    }
}

/// Arrival reached by leaving at `previous_departure` and steaming `distance` at `speed`.
pub fn arrival_from_previous_departure(
    previous_departure: DateTime,
    distance: f64,
    speed: f64,
) -> DateTime {
    time::add_hours(previous_departure, steam_days(distance, speed) * 24.0)
}

/// Departure after a stay of `port_days`, or [`DEFAULT_PORT_DAYS`] when that is not positive.
pub fn departure_from_arrival(arrival: DateTime, port_days: f64) -> DateTime {
    let stay = if port_days > 0.0 {
        port_days
    } else {
        DEFAULT_PORT_DAYS
    };
    time::add_days(arrival, stay)
}

/// Days between arrival and departure. Negative when misordered.
pub fn port_days_from_dates(arrival: DateTime, departure: DateTime) -> f64 {
    time::days_between(arrival, departure)
}

/// Speed implied by covering `distance` in `days`, if the leg has positive length and duration.
pub fn speed_from_transit(distance: f64, days: f64) -> Option<f64> {
    (distance > 0.0 && days > 0.0).then(|| distance / days / 24.0)
}
