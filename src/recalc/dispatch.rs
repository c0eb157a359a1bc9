//! Change-type dispatchers: one authority rule per kind of edit.
//!
//! Each dispatcher applies its edit to the call at `index`, decides which
//! quantities are authoritative and which are derived, then hands the rest
//! of the chain to [`recalc_following_ports_from`]. The departure edit is
//! the exception: later calls move by a rigid time shift instead.
//!
//! Missing or out-of-range inputs return the chain unchanged.

use jiff::{SignedDuration, civil::DateTime};
use tracing::debug;

use crate::model::PortCall;
use crate::{physics, time};

use super::{departure_of, recalc_following_ports_from};

/// A single authoritative edit to one port call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Edit {
    Speed(f64),
    PortDays(f64),
    Arrival(DateTime),
    Departure(DateTime),
    Distance(f64),
}

/// Route an edit to its dispatcher.
pub fn apply_edit(list: &[PortCall], index: usize, edit: Edit) -> Vec<PortCall> {
    match edit {
        Edit::Speed(speed) => recalc_after_speed_change(list, index, speed),
        Edit::PortDays(days) => recalc_after_port_days_change(list, index, days),
        Edit::Arrival(arrival) => recalc_after_arrival_change(list, index, arrival),
        Edit::Departure(departure) => recalc_after_departure_change(list, index, departure),
        Edit::Distance(distance) => recalc_after_distance_change(list, index, distance),
    }
}

/// Speed is authoritative for the edited call.
///
/// With a predecessor, arrival is re-derived by steaming at the new speed
/// and departure follows. The anchor keeps its timing.
pub fn recalc_after_speed_change(list: &[PortCall], index: usize, speed: f64) -> Vec<PortCall> {
    if index >= list.len() || !is_positive(speed) {
        debug!(index, speed, "speed change ignored");
        return list.to_vec();
    }

    let mut chain = list.to_vec();
    let previous_departure = predecessor_departure(&chain, index);
    let call = &mut chain[index];
    call.speed = speed;
    steam_from(call, previous_departure);

    recalc_following_ports_from(&chain, index)
}

/// Port-days are authoritative: only the edited call's departure moves.
///
/// Zero is an explicit same-day turnaround here, not the one-day default.
pub fn recalc_after_port_days_change(
    list: &[PortCall],
    index: usize,
    port_days: f64,
) -> Vec<PortCall> {
    let Some(arrival) = list.get(index).and_then(|call| call.arrival) else {
        debug!(index, "port-days change ignored: no arrival");
        return list.to_vec();
    };
    if port_days.is_nan() || port_days < 0.0 {
        debug!(index, port_days, "port-days change ignored");
        return list.to_vec();
    }

    let mut chain = list.to_vec();
    let call = &mut chain[index];
    call.port_days = port_days;
    call.departure = Some(time::add_days(arrival, port_days));

    recalc_following_ports_from(&chain, index)
}

/// Arrival is authoritative.
///
/// The predecessor's speed is back-solved from the time it now takes to
/// reach the new arrival. The predecessor's timestamps are left alone.
///
/// An arrival earlier than the predecessor's departure is still applied,
/// with the predecessor's speed unchanged. The resulting overlap is left
/// for [`validate_port_call_sequence`](crate::validate::validate_port_call_sequence)
/// to report.
pub fn recalc_after_arrival_change(
    list: &[PortCall],
    index: usize,
    arrival: DateTime,
) -> Vec<PortCall> {
    if index >= list.len() {
        debug!(index, "arrival change ignored: index out of range");
        return list.to_vec();
    }

    let mut chain = list.to_vec();
    if index > 0 {
        let distance = chain[index].distance;
        let previous = &mut chain[index - 1];
        let transit = time::days_between(departure_of(previous), arrival);
        if let Some(speed) = physics::speed_from_transit(distance, transit) {
            debug!(index, speed, "back-solved predecessor speed");
            previous.speed = speed;
            previous.steam_days = physics::steam_days(previous.distance, speed);
        }
    }

    let call = &mut chain[index];
    call.arrival = Some(arrival);
    call.departure = Some(physics::departure_from_arrival(arrival, call.port_days));

    recalc_following_ports_from(&chain, index)
}

/// Departure is authoritative.
///
/// The edited call's port-days are re-derived. Every later call shifts by
/// the same delta as the edited departure, with no physics applied.
pub fn recalc_after_departure_change(
    list: &[PortCall],
    index: usize,
    departure: DateTime,
) -> Vec<PortCall> {
    if index >= list.len() {
        debug!(index, "departure change ignored: index out of range");
        return list.to_vec();
    }

    let mut chain = list.to_vec();
    let call = &mut chain[index];
    let delta = call
        .departure
        .map_or(SignedDuration::ZERO, |original| departure.duration_since(original));
    let arrival = time::resolve(call.arrival, Some(departure)).value();
    call.port_days = physics::port_days_from_dates(arrival, departure);
    call.departure = Some(departure);

    for later in &mut chain[index + 1..] {
        later.arrival = later.arrival.map(|dt| time::shift(dt, delta));
        later.departure = later.departure.map(|dt| time::shift(dt, delta));
    }
    debug!(index, shift_secs = delta.as_secs(), "shifted later calls");
    chain
}

/// Distance is authoritative.
///
/// With a predecessor, arrival is re-derived at the existing speed and the
/// one-day minimum stay applies to the new departure.
pub fn recalc_after_distance_change(
    list: &[PortCall],
    index: usize,
    distance: f64,
) -> Vec<PortCall> {
    if index >= list.len() || !is_positive(distance) {
        debug!(index, distance, "distance change ignored");
        return list.to_vec();
    }

    let mut chain = list.to_vec();
    let previous_departure = predecessor_departure(&chain, index);
    let call = &mut chain[index];
    call.distance = distance;
    steam_from(call, previous_departure);

    recalc_following_ports_from(&chain, index)
}

/// Re-sort by `sequence_order` and re-steam every call after the first at its own speed.
pub fn recalc_after_sequence_change(list: &[PortCall]) -> Vec<PortCall> {
    let mut chain = list.to_vec();
    chain.sort_by_key(|call| call.sequence_order);

    for i in 1..chain.len() {
        let previous_departure = departure_of(&chain[i - 1]);
        steam_from(&mut chain[i], Some(previous_departure));
    }
    debug!(len = chain.len(), "recalculated after sequence change");
    chain
}

fn predecessor_departure(chain: &[PortCall], index: usize) -> Option<DateTime> {
    index
        .checked_sub(1)
        .and_then(|i| chain.get(i))
        .map(departure_of)
}

/// Re-derive arrival and departure from the predecessor at the call's own speed.
///
/// Without a predecessor only `steam_days` is refreshed.
fn steam_from(call: &mut PortCall, previous_departure: Option<DateTime>) {
    call.steam_days = physics::steam_days(call.distance, call.speed);
    let Some(previous_departure) = previous_departure else {
        return;
    };

    let arrival =
        physics::arrival_from_previous_departure(previous_departure, call.distance, call.speed);
    call.arrival = Some(arrival);
    call.departure = Some(physics::departure_from_arrival(arrival, call.port_days));
}

// False for NaN.
fn is_positive(value: f64) -> bool {
    value > 0.0
}
