//! Editable port-call fields and the edit kinds they trigger.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A field a user can edit on a port call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PortCallField {
    PortName,
    PortId,
    Activity,
    Arrival,
    Departure,
    Distance,
    Speed,
    PortDays,
    PortCost,
    CargoCost,
}

/// Edits that move time or speed and must propagate down the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    Speed,
    PortDays,
    Arrival,
    Departure,
    Distance,
}

impl PortCallField {
    pub const ALL: [Self; 10] = [
        Self::PortName,
        Self::PortId,
        Self::Activity,
        Self::Arrival,
        Self::Departure,
        Self::Distance,
        Self::Speed,
        Self::PortDays,
        Self::PortCost,
        Self::CargoCost,
    ];

    /// The recalculation policy this field triggers, if any.
    ///
    /// `None` means the edit is a plain field set with no propagation.
    pub fn edit_kind(self) -> Option<EditKind> {
        match self {
            Self::Speed => Some(EditKind::Speed),
            Self::PortDays => Some(EditKind::PortDays),
            Self::Arrival => Some(EditKind::Arrival),
            Self::Departure => Some(EditKind::Departure),
            Self::Distance => Some(EditKind::Distance),
            Self::PortName | Self::PortId | Self::Activity | Self::PortCost | Self::CargoCost => {
                None
            }
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::PortId
                | Self::Distance
                | Self::Speed
                | Self::PortDays
                | Self::PortCost
                | Self::CargoCost
        )
    }

    /// The camelCase name used on the wire.
    pub fn name(self) -> &'static str {
        match self {
            Self::PortName => "portName",
            Self::PortId => "portId",
            Self::Activity => "activity",
            Self::Arrival => "arrival",
            Self::Departure => "departure",
            Self::Distance => "distance",
            Self::Speed => "speed",
            Self::PortDays => "portDays",
            Self::PortCost => "portCost",
            Self::CargoCost => "cargoCost",
        }
    }
}

impl fmt::Display for PortCallField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts the wire name or its kebab/snake form (`portDays`, `port-days`, `port_days`).
impl FromStr for PortCallField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        Self::ALL
            .into_iter()
            .find(|field| field.name().to_lowercase() == normalized)
            .ok_or_else(|| format!("unknown port-call field: {s}"))
    }
}
