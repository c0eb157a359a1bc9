//! Port-call recalculation: keep a chain's timing consistent after an edit.
//!
//! [`recalc_port`] corrects one port call against its predecessor.
//! [`recalc_following_ports_from`] applies it to every call after a
//! changed index, in order, so an edit ripples forward exactly once.
//! The per-edit policies live in [`dispatch`].
//!
//! Every entry point is total: it takes a slice and returns a new chain,
//! never fails, and never reaches backwards past the edited call (the
//! arrival edit's predecessor speed is the one exception).

pub mod dispatch;

use jiff::civil::DateTime;
use tracing::debug;

use crate::model::PortCall;
use crate::{physics, time};

pub use dispatch::{
    Edit, apply_edit, recalc_after_arrival_change, recalc_after_departure_change,
    recalc_after_distance_change, recalc_after_port_days_change, recalc_after_sequence_change,
    recalc_after_speed_change,
};

/// Recalculate one port call against its predecessor.
///
/// With a predecessor, arrival is re-derived by steaming from the
/// predecessor's departure, then speed is back-solved from the resulting
/// transit time. Without one, the call's own arrival (or `original_arrival`)
/// stands. Departure follows from arrival and port-days, with a one-day
/// minimum stay. Only `arrival`, `departure`, `speed`, and `steam_days` change.
pub fn recalc_port(
    previous: Option<&PortCall>,
    current: &PortCall,
    original_arrival: Option<DateTime>,
) -> PortCall {
    let mut next = current.clone();
    let mut arrival = time::resolve(original_arrival.or(current.arrival), None).value();

    if let Some(previous) = previous {
        let previous_departure = departure_of(previous);
        arrival = physics::arrival_from_previous_departure(
            previous_departure,
            current.distance,
            current.speed,
        );
        let transit = time::days_between(previous_departure, arrival);
        if let Some(speed) = physics::speed_from_transit(current.distance, transit) {
            next.speed = speed;
        }
    }

    next.arrival = Some(arrival);
    next.departure = Some(physics::departure_from_arrival(arrival, current.port_days));
    next.steam_days = physics::steam_days(next.distance, next.speed);
    next
}

/// Recalculate every port call after `changed_index` against its predecessor.
///
/// An out-of-range index returns the chain unchanged.
pub fn recalc_following_ports_from(list: &[PortCall], changed_index: usize) -> Vec<PortCall> {
    let mut chain = list.to_vec();
    if changed_index >= chain.len() {
        debug!(
            changed_index,
            len = chain.len(),
            "propagation skipped: index out of range"
        );
        return chain;
    }

    for i in changed_index + 1..chain.len() {
        chain[i] = recalc_port(Some(&chain[i - 1]), &chain[i], None);
    }
    debug!(
        changed_index,
        updated = chain.len() - changed_index - 1,
        "propagated"
    );
    chain
}

/// The departure a successor steams from.
///
/// Falls back to the call's arrival, then to now, when departure is missing.
pub(crate) fn departure_of(call: &PortCall) -> DateTime {
    time::resolve(call.departure, call.arrival).value()
}
