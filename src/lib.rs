//! Voyage port-call recalculation engine.
//!
//! Keeps arrival, departure, steaming time, and speed consistent across a
//! chain of port calls whenever one field is edited, a call is added or
//! removed, or the chain is reordered. Every entry point is a synchronous,
//! total function over an in-memory chain.

pub mod cli;
pub mod config;
pub mod model;
pub mod physics;
pub mod recalc;
pub mod service;
pub mod storage;
pub mod time;
pub mod validate;

#[cfg(test)]
mod fixtures;

pub use model::{Activity, EditKind, PortCall, PortCallField};
pub use recalc::{
    Edit, apply_edit, recalc_after_arrival_change, recalc_after_departure_change,
    recalc_after_distance_change, recalc_after_port_days_change, recalc_after_sequence_change,
    recalc_after_speed_change, recalc_following_ports_from, recalc_port,
};
pub use service::{
    Debouncer, EditKey, add_port_call, create_default_port_call, recalculate_after_field_change,
    remove_port_call, reorder_port_calls, resequence, update_port_call_field,
};
pub use validate::{ValidationError, ValidationReport, validate_port_call_sequence};
