//! Shared test fixtures: the Oslo–Rotterdam–Singapore sample voyage.

use jiff::civil::datetime;

use crate::model::{Activity, PortCall};

pub fn sample_chain() -> Vec<PortCall> {
    vec![
        PortCall {
            id: Some(1),
            voyage_id: 42,
            sequence_order: 1,
            port_name: "OSLO".into(),
            activity: Activity::Ballast,
            arrival: Some(datetime(2025, 10, 1, 10, 0, 0, 0)),
            departure: Some(datetime(2025, 10, 1, 10, 0, 0, 0)),
            distance: 0.0,
            speed: 12.0,
            ..PortCall::default()
        },
        PortCall {
            id: Some(2),
            voyage_id: 42,
            sequence_order: 2,
            port_name: "ROTTERDAM".into(),
            activity: Activity::Load,
            arrival: Some(datetime(2025, 10, 3, 4, 23, 0, 0)),
            departure: Some(datetime(2025, 10, 3, 16, 23, 0, 0)),
            distance: 551.0,
            speed: 13.0,
            port_days: 0.5,
            steam_days: 551.0 / (13.0 * 24.0),
            port_cost: 18_500.0,
            ..PortCall::default()
        },
        PortCall {
            id: Some(3),
            voyage_id: 42,
            sequence_order: 3,
            port_name: "SINGAPORE".into(),
            activity: Activity::Discharge,
            arrival: Some(datetime(2025, 11, 4, 14, 0, 0, 0)),
            departure: Some(datetime(2025, 11, 6, 2, 0, 0, 0)),
            distance: 8422.0,
            speed: 11.0,
            port_days: 1.5,
            steam_days: 8422.0 / (11.0 * 24.0),
            cargo_cost: 240_000.0,
            ..PortCall::default()
        },
    ]
}
