//! Activity labels for a port call.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What the vessel does at a port call.
///
/// An open set: unrecognized labels round-trip through `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Activity {
    /// Non-cargo-carrying leg. Pinned in sequence.
    Ballast,
    #[default]
    Load,
    Discharge,
    Canal,
    Bunker,
    OwnersAffairs,
    Other(String),
}

impl Activity {
    /// Ballast rows are excluded from manual reordering.
    pub fn is_pinned(&self) -> bool {
        matches!(self, Self::Ballast)
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Ballast => "Ballast",
            Self::Load => "Load",
            Self::Discharge => "Discharge",
            Self::Canal => "Canal",
            Self::Bunker => "Bunker",
            Self::OwnersAffairs => "Owners Affairs",
            Self::Other(label) => label,
        }
    }
}

impl From<String> for Activity {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Ballast" => Self::Ballast,
            "Load" => Self::Load,
            "Discharge" => Self::Discharge,
            "Canal" => Self::Canal,
            "Bunker" => Self::Bunker,
            "Owners Affairs" => Self::OwnersAffairs,
            _ => Self::Other(label),
        }
    }
}

impl From<Activity> for String {
    fn from(activity: Activity) -> Self {
        match activity {
            Activity::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_labels_map_to_variants() {
        assert_eq!(Activity::from("Ballast".to_string()), Activity::Ballast);
        assert_eq!(
            Activity::from("Owners Affairs".to_string()),
            Activity::OwnersAffairs
        );
    }

    #[test]
    fn unknown_labels_are_kept() {
        let activity = Activity::from("Crew Change".to_string());
        assert_eq!(activity, Activity::Other("Crew Change".to_string()));
        assert_eq!(String::from(activity), "Crew Change");
    }

    #[test]
    fn only_ballast_is_pinned() {
        assert!(Activity::Ballast.is_pinned());
        assert!(!Activity::Load.is_pinned());
        assert!(!Activity::Other("ballast".to_string()).is_pinned());
    }

    #[test]
    fn serializes_as_label() {
        let json = serde_json::to_string(&Activity::OwnersAffairs).unwrap();
        assert_eq!(json, "\"Owners Affairs\"");
        let back: Activity = serde_json::from_str("\"Canal\"").unwrap();
        assert_eq!(back, Activity::Canal);
    }
}
