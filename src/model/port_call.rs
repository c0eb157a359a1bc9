//! Port call: one stop or transit leg in a voyage.

use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

use super::Activity;

/// One stop in a voyage chain.
///
/// `distance`, `speed`, and `steam_days` describe the leg that reaches
/// this call from the previous one. The first call in a chain is the
/// anchor: its leg fields carry no timing weight.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortCall {
    /// Unique within a voyage. Negative for rows not yet persisted, absent for fresh rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(default)]
    pub voyage_id: i64,

    /// 1-based rank in the chain.
    #[serde(default)]
    pub sequence_order: u32,

    #[serde(default)]
    pub port_name: String,

    #[serde(default)]
    pub port_id: Option<i64>,

    #[serde(default)]
    pub activity: Activity,

    #[serde(default, with = "crate::time::wall_clock")]
    pub arrival: Option<DateTime>,

    #[serde(default, with = "crate::time::wall_clock")]
    pub departure: Option<DateTime>,

    /// Nautical miles from the previous call.
    #[serde(default)]
    pub distance: f64,

    /// Knots over the leg.
    #[serde(default)]
    pub speed: f64,

    #[serde(default)]
    pub port_days: f64,

    #[serde(default)]
    pub steam_days: f64,

    #[serde(default)]
    pub port_cost: f64,

    #[serde(default)]
    pub cargo_cost: f64,
}
