//! Wall-clock arithmetic for port-call timestamps.
//!
//! All timestamps are local wall-clock values without a timezone.
//! Parsing never fails: malformed or missing input falls back to a
//! caller-supplied value or the current local time, and [`Parsed`]
//! records which path was taken.

use jiff::{
    SignedDuration, Timestamp, Zoned,
    civil::{Date, DateTime},
    tz::Offset,
};

/// The canonical wire format: `yyyy-MM-ddTHH:mm:ss`, no offset.
pub const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const MILLIS_PER_HOUR: f64 = 3_600_000.0;
const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// The outcome of a lenient parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parsed {
    /// The input was a valid date-like value.
    Exact(DateTime),

    /// The input was missing or malformed; this is the fallback.
    Defaulted(DateTime),
}

impl Parsed {
    /// The resulting wall-clock value, whichever path produced it.
    pub fn value(self) -> DateTime {
        match self {
            Self::Exact(dt) | Self::Defaulted(dt) => dt,
        }
    }

    pub fn is_defaulted(self) -> bool {
        matches!(self, Self::Defaulted(_))
    }
}

/// Parse a date-like string, falling back when it is missing or invalid.
///
/// Accepts civil ISO-8601 datetimes and dates (any offset is ignored and
/// the wall clock kept) as well as RFC 3339 instants in `Z` form, whose
/// UTC wall clock is kept.
pub fn safe_parse(input: Option<&str>, fallback: Option<DateTime>) -> Parsed {
    match input.map(str::trim).filter(|s| !s.is_empty()).and_then(parse_wall_clock) {
        Some(dt) => Parsed::Exact(dt),
        None => Parsed::Defaulted(fallback.unwrap_or_else(now)),
    }
}

/// Resolve an already-typed value, falling back when it is missing.
pub fn resolve(value: Option<DateTime>, fallback: Option<DateTime>) -> Parsed {
    match value {
        Some(dt) => Parsed::Exact(dt),
        None => Parsed::Defaulted(fallback.unwrap_or_else(now)),
    }
}

/// The current local wall-clock time.
pub fn now() -> DateTime {
    Zoned::now().datetime()
}

/// Render a wall-clock value in the canonical wire format.
pub fn format(dt: DateTime) -> String {
    dt.strftime(WIRE_FORMAT).to_string()
}

pub fn add_days(dt: DateTime, days: f64) -> DateTime {
    add_millis(dt, days * MILLIS_PER_DAY)
}

pub fn add_hours(dt: DateTime, hours: f64) -> DateTime {
    add_millis(dt, hours * MILLIS_PER_HOUR)
}

/// Shift by an exact signed duration. Out-of-range results leave `dt` unchanged.
pub fn shift(dt: DateTime, delta: SignedDuration) -> DateTime {
    dt.checked_add(delta).unwrap_or(dt)
}

/// Fractional days from `start` to `end`. Negative when `end` precedes `start`.
pub fn days_between(start: DateTime, end: DateTime) -> f64 {
    end.duration_since(start).as_secs_f64() / 86_400.0
}

fn parse_wall_clock(s: &str) -> Option<DateTime> {
    if let Ok(dt) = s.parse::<DateTime>() {
        return Some(dt);
    }
    if let Ok(date) = s.parse::<Date>() {
        return Some(date.at(0, 0, 0, 0));
    }
    s.parse::<Timestamp>()
        .ok()
        .map(|ts| Offset::UTC.to_datetime(ts))
}

// Finite values saturate at the i64 bounds.
#[allow(clippy::cast_possible_truncation)]
fn add_millis(dt: DateTime, millis: f64) -> DateTime {
    if !millis.is_finite() {
        return dt;
    }
    shift(dt, SignedDuration::from_millis(millis.round() as i64))
}

/// Serde adapter for optional wall-clock fields.
///
/// Serializes as the canonical string or `null`. Deserializes leniently:
/// a string that does not parse becomes `None`.
pub mod wall_clock {
    use jiff::civil::DateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::ref_option)] // Signature fixed by `#[serde(with)]`.
    pub fn serialize<S: Serializer>(value: &Option<DateTime>, ser: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => ser.serialize_str(&super::format(*dt)),
            None => ser.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Option<DateTime>, D::Error> {
        let raw = Option::<String>::deserialize(de)?;
        Ok(raw
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .and_then(super::parse_wall_clock))
    }
}
