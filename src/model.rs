//! Core data model for voyage port calls.
//!
//! A voyage is a chain of port calls ordered by `sequence_order`.
//! Each port call carries its own timing, the leg that reached it,
//! and cost fields the engine never touches.

mod activity;
mod field;
mod port_call;

pub use activity::Activity;
pub use field::{EditKind, PortCallField};
pub use port_call::PortCall;
