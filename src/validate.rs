//! Sequence validation: report ordering and range violations as data.
//!
//! Validation never mutates and never blocks recalculation. Callers decide
//! what to do with the report (typically refusing to save while invalid).

use serde::Serialize;

use crate::model::{PortCall, PortCallField};
use crate::recalc::departure_of;

/// Upper bound on a plausible leg speed, in knots.
pub const MAX_SPEED_KNOTS: f64 = 50.0;

/// One violation found in a chain.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    pub field: PortCallField,
    pub message: String,
    pub port_call_id: Option<i64>,
}

/// The outcome of validating a chain.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

/// Scan a chain in `sequence_order` and collect every violation.
///
/// Missing timestamps are not reported; they are recalculation inputs, not errors.
pub fn validate_port_call_sequence(list: &[PortCall]) -> ValidationReport {
    let mut ordered: Vec<&PortCall> = list.iter().collect();
    ordered.sort_by_key(|call| call.sequence_order);

    let mut errors = Vec::new();
    let mut previous: Option<&PortCall> = None;

    for call in ordered {
        let mut report = |field, message: String| {
            errors.push(ValidationError {
                field,
                message,
                port_call_id: call.id,
            });
        };

        if let (Some(arrival), Some(departure)) = (call.arrival, call.departure)
            && departure < arrival
        {
            report(
                PortCallField::Departure,
                format!("{}: departure is before arrival", call.port_name),
            );
        }

        if let Some(previous) = previous
            && let Some(arrival) = call.arrival
            && (previous.departure.is_some() || previous.arrival.is_some())
            && arrival < departure_of(previous)
        {
            report(
                PortCallField::Arrival,
                format!(
                    "{}: arrival is before departure from {}",
                    call.port_name, previous.port_name
                ),
            );
        }

        if call.port_days < 0.0 {
            report(
                PortCallField::PortDays,
                format!("{}: port days cannot be negative", call.port_name),
            );
        }

        if !(call.speed > 0.0 && call.speed <= MAX_SPEED_KNOTS) {
            report(
                PortCallField::Speed,
                format!(
                    "{}: speed must be greater than 0 and at most {MAX_SPEED_KNOTS} knots",
                    call.port_name
                ),
            );
        }

        if call.distance < 0.0 {
            report(
                PortCallField::Distance,
                format!("{}: distance cannot be negative", call.port_name),
            );
        }

        previous = Some(call);
    }

    ValidationReport {
        is_valid: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::civil::datetime;

    use crate::fixtures::sample_chain;
    use crate::recalc::recalc_following_ports_from;

    #[test]
    fn recalculated_sample_is_valid() {
        let chain = recalc_following_ports_from(&sample_chain(), 0);
        let report = validate_port_call_sequence(&chain);

        assert!(report.is_valid, "{:?}", report.errors);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn departure_before_arrival_is_reported() {
        let mut chain = sample_chain();
        chain[1].departure = Some(datetime(2025, 10, 2, 0, 0, 0, 0));
        let report = validate_port_call_sequence(&chain);

        assert!(!report.is_valid);
        let error = report
            .errors
            .iter()
            .find(|e| e.field == PortCallField::Departure)
            .unwrap();
        assert_eq!(error.port_call_id, Some(2));
    }

    #[test]
    fn arrival_before_previous_departure_is_reported() {
        let mut chain = sample_chain();
        chain[2].arrival = Some(datetime(2025, 10, 3, 12, 0, 0, 0));
        let report = validate_port_call_sequence(&chain);

        assert!(
            report
                .errors
                .iter()
                .any(|e| e.field == PortCallField::Arrival && e.port_call_id == Some(3))
        );
    }

    #[test]
    fn speed_out_of_bounds_is_reported() {
        let mut chain = sample_chain();
        chain[1].speed = 60.0;
        let report = validate_port_call_sequence(&chain);

        let error = report
            .errors
            .iter()
            .find(|e| e.field == PortCallField::Speed)
            .unwrap();
        assert!(error.message.contains("50"));
        assert_eq!(error.port_call_id, Some(2));
    }

    #[test]
    fn zero_speed_is_reported() {
        let mut chain = sample_chain();
        chain[2].speed = 0.0;
        let report = validate_port_call_sequence(&chain);

        assert!(report.errors.iter().any(|e| e.field == PortCallField::Speed));
    }

    #[test]
    fn negative_port_days_and_distance_are_reported() {
        let mut chain = sample_chain();
        chain[1].port_days = -0.5;
        chain[2].distance = -1.0;
        let report = validate_port_call_sequence(&chain);

        let fields: Vec<PortCallField> = report.errors.iter().map(|e| e.field).collect();
        assert!(fields.contains(&PortCallField::PortDays));
        assert!(fields.contains(&PortCallField::Distance));
    }

    #[test]
    fn validates_in_sequence_order_and_does_not_mutate() {
        let mut chain = sample_chain();
        chain.reverse();
        let before = chain.clone();
        let report = validate_port_call_sequence(&chain);

        assert!(
            !report
                .errors
                .iter()
                .any(|e| e.field == PortCallField::Arrival)
        );
        assert_eq!(chain, before);
    }

    #[test]
    fn report_serializes_camel_case() {
        let mut chain = sample_chain();
        chain[0].speed = 0.0;
        let value = serde_json::to_value(validate_port_call_sequence(&chain)).unwrap();

        assert_eq!(value["isValid"], false);
        assert_eq!(value["errors"][0]["field"], "speed");
        assert_eq!(value["errors"][0]["portCallId"], 1);
    }
}
