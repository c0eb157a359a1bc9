//! Port-call service: the façade a voyage editor calls into.
//!
//! Structural edits (add, remove, reorder) resequence the chain and then
//! recalculate it. Field edits route through the dispatch table in
//! [`crate::recalc`], or fall back to a plain field set for fields that
//! carry no timing. [`Debouncer`] defers field edits while the user types.

mod debounce;

pub use debounce::{DEFAULT_DELAY, Debouncer, EditKey};

use tracing::{debug, info};

use crate::model::{Activity, EditKind, PortCall, PortCallField};
use crate::recalc::{self, Edit, departure_of};
use crate::{physics, time};

/// Speed seeded into the first port call of a voyage.
pub const DEFAULT_SPEED_KNOTS: f64 = 12.0;

/// Distance seeded into the first port call of a voyage.
pub const DEFAULT_DISTANCE_NM: f64 = 100.0;

/// Build a port call that follows `previous`, or starts a voyage.
///
/// Speed and distance are inherited from the predecessor when positive.
/// Arrival steams from the predecessor's departure (or is now, for a first
/// call), and the stay is one day. The result has no id.
pub fn create_default_port_call(voyage_id: i64, previous: Option<&PortCall>) -> PortCall {
    let speed = previous
        .map(|p| p.speed)
        .filter(|s| *s > 0.0)
        .unwrap_or(DEFAULT_SPEED_KNOTS);
    let distance = previous
        .map(|p| p.distance)
        .filter(|d| *d > 0.0)
        .unwrap_or(DEFAULT_DISTANCE_NM);
    let arrival = match previous {
        Some(previous) => {
            physics::arrival_from_previous_departure(departure_of(previous), distance, speed)
        }
        None => time::now(),
    };

    PortCall {
        id: None,
        voyage_id,
        sequence_order: previous.map_or(1, |p| p.sequence_order.saturating_add(1)),
        activity: Activity::default(),
        arrival: Some(arrival),
        departure: Some(physics::departure_from_arrival(arrival, 1.0)),
        distance,
        speed,
        port_days: 1.0,
        steam_days: physics::steam_days(distance, speed),
        ..PortCall::default()
    }
}

/// Append a default port call after the last one and recalculate the chain.
///
/// The new row gets a temporary negative id until it is persisted.
pub fn add_port_call(list: &[PortCall], voyage_id: i64) -> Vec<PortCall> {
    let mut chain = list.to_vec();
    chain.sort_by_key(|call| call.sequence_order);

    let mut call = create_default_port_call(voyage_id, chain.last());
    call.id = Some(next_temporary_id(&chain));
    info!(voyage_id, id = call.id, "added port call");
    chain.push(call);

    recalc::recalc_following_ports_from(&resequence(&chain), 0)
}

/// Remove the port call with `id`, resequence, and recalculate.
///
/// An unknown id returns the chain unchanged.
pub fn remove_port_call(list: &[PortCall], id: i64) -> Vec<PortCall> {
    let mut chain = list.to_vec();
    chain.sort_by_key(|call| call.sequence_order);
    let before = chain.len();
    chain.retain(|call| call.id != Some(id));
    if chain.len() == before {
        debug!(id, "remove ignored: no such port call");
        return list.to_vec();
    }

    info!(id, remaining = chain.len(), "removed port call");
    recalc::recalc_following_ports_from(&resequence(&chain), 0)
}

/// Move the call at position `from` to position `to`, resequence, and recalculate.
///
/// Positions are in sequence order. Ballast rows are pinned: moving one,
/// or moving onto one, is refused. Out-of-range positions are ignored.
pub fn reorder_port_calls(list: &[PortCall], from: usize, to: usize) -> Vec<PortCall> {
    let mut chain = list.to_vec();
    chain.sort_by_key(|call| call.sequence_order);

    if from >= chain.len() || to >= chain.len() || from == to {
        debug!(from, to, "reorder ignored");
        return list.to_vec();
    }
    if chain[from].activity.is_pinned() || chain[to].activity.is_pinned() {
        debug!(from, to, "reorder refused: ballast rows are pinned");
        return list.to_vec();
    }

    let call = chain.remove(from);
    chain.insert(to, call);
    info!(from, to, "reordered port calls");
    recalc::recalc_after_sequence_change(&resequence(&chain))
}

/// Renumber `sequence_order` as 1..N by list position.
pub fn resequence(list: &[PortCall]) -> Vec<PortCall> {
    list.iter()
        .zip(1..)
        .map(|(call, order)| PortCall {
            sequence_order: order,
            ..call.clone()
        })
        .collect()
}

/// Set one field from user input, with no recalculation.
///
/// Numeric fields coerce their input; empty or unparseable input becomes 0
/// (or no port id). Timestamps that do not parse become missing.
pub fn update_port_call_field(
    list: &[PortCall],
    index: usize,
    field: PortCallField,
    value: &str,
) -> Vec<PortCall> {
    let mut chain = list.to_vec();
    if index >= chain.len() {
        debug!(index, %field, "field update ignored: index out of range");
        return chain;
    }

    let call = &mut chain[index];
    match field {
        PortCallField::PortName => call.port_name = value.to_string(),
        PortCallField::PortId => call.port_id = value.trim().parse().ok(),
        PortCallField::Activity => call.activity = Activity::from(value.trim().to_string()),
        PortCallField::Arrival => call.arrival = parse_timestamp(value),
        PortCallField::Departure => call.departure = parse_timestamp(value),
        PortCallField::Distance => call.distance = coerce_number(value),
        PortCallField::Speed => call.speed = coerce_number(value),
        PortCallField::PortDays => call.port_days = coerce_number(value),
        PortCallField::PortCost => call.port_cost = coerce_number(value),
        PortCallField::CargoCost => call.cargo_cost = coerce_number(value),
    }
    chain
}

/// Apply a user edit, routing physics fields to their dispatcher.
///
/// Fields without an [`EditKind`] are set as-is. A timestamp edit that does
/// not parse is ignored.
pub fn recalculate_after_field_change(
    list: &[PortCall],
    index: usize,
    field: PortCallField,
    value: &str,
) -> Vec<PortCall> {
    let Some(kind) = field.edit_kind() else {
        return update_port_call_field(list, index, field, value);
    };

    match edit_from_input(kind, value) {
        Some(edit) => recalc::apply_edit(list, index, edit),
        None => {
            debug!(index, %field, value, "edit ignored: unparseable timestamp");
            list.to_vec()
        }
    }
}

fn edit_from_input(kind: EditKind, value: &str) -> Option<Edit> {
    let edit = match kind {
        EditKind::Speed => Edit::Speed(coerce_number(value)),
        EditKind::PortDays => Edit::PortDays(coerce_number(value)),
        EditKind::Distance => Edit::Distance(coerce_number(value)),
        EditKind::Arrival => Edit::Arrival(parse_timestamp(value)?),
        EditKind::Departure => Edit::Departure(parse_timestamp(value)?),
    };
    Some(edit)
}

fn parse_timestamp(value: &str) -> Option<jiff::civil::DateTime> {
    match time::safe_parse(Some(value), None) {
        time::Parsed::Exact(dt) => Some(dt),
        time::Parsed::Defaulted(_) => None,
    }
}

fn coerce_number(value: &str) -> f64 {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

/// One below the lowest id, or -1. Ids already at `i64::MIN` fall back to -1.
fn next_temporary_id(chain: &[PortCall]) -> i64 {
    chain
        .iter()
        .filter_map(|call| call.id)
        .min()
        .and_then(|lowest| lowest.min(0).checked_sub(1))
        .unwrap_or(-1)
}
