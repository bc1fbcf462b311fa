//! Temporal literals: dates, timestamps, and intervals.
//!
//! Timestamps are always UTC; the text encoding requires the trailing
//! `Z` and renders six fractional digits whether or not they are zero.

use crate::{Error, FunctionRef, PropertyRef};
use jiff::{civil, tz::TimeZone, Timestamp};
use serde::Serialize;

/// A `DATE('YYYY-MM-DD')` literal, `{"date": …}` in JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateLiteral {
    /// The calendar date.
    pub date: civil::Date,
}

/// A `TIMESTAMP(…)` literal, `{"timestamp": …}` in JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimestampLiteral {
    /// The UTC instant.
    pub timestamp: Timestamp,
}

/// A temporal instant: a date or a timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum InstantLiteral {
    /// A calendar date.
    Date(DateLiteral),

    /// A UTC instant.
    Timestamp(TimestampLiteral),
}

/// One side of an interval.
///
/// `Open` is the literal `".."`, the unbounded side.
#[derive(Debug, Clone, PartialEq)]
pub enum IntervalEndpoint {
    /// A UTC instant.
    Timestamp(Timestamp),

    /// A calendar date.
    Date(civil::Date),

    /// The open marker `".."`.
    Open,

    /// A property reference.
    Property(PropertyRef),

    /// A function call.
    Function(FunctionRef),
}

/// An `INTERVAL(…, …)` literal, `{"interval": […, …]}` in JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntervalLiteral {
    /// Start and end endpoints.
    pub interval: (IntervalEndpoint, IntervalEndpoint),
}

/// Parses a strict `YYYY-MM-DD` date.
pub(crate) fn parse_date(s: &str) -> Result<civil::Date, Error> {
    if s.len() != 10 {
        return Err(Error::InvalidInstant {
            kind: "date",
            value: s.to_string(),
        });
    }
    civil::Date::strptime("%Y-%m-%d", s).map_err(Error::from)
}

/// Parses an ISO 8601 timestamp, which must be UTC (trailing `Z`).
pub(crate) fn parse_timestamp(s: &str) -> Result<Timestamp, Error> {
    if !(s.ends_with('Z') || s.ends_with('z')) {
        return Err(Error::InvalidInstant {
            kind: "timestamp",
            value: s.to_string(),
        });
    }
    s.parse().map_err(Error::from)
}

/// Classifies an interval endpoint string: `".."`, a timestamp (has a
/// time designator), or a date.
pub(crate) fn parse_endpoint(s: &str) -> Result<IntervalEndpoint, Error> {
    if s == ".." {
        Ok(IntervalEndpoint::Open)
    } else if s.contains('T') || s.contains('t') {
        parse_timestamp(s).map(IntervalEndpoint::Timestamp)
    } else {
        parse_date(s).map(IntervalEndpoint::Date)
    }
}

/// Renders a timestamp as `YYYY-MM-DDTHH:MM:SS.ffffffZ`, microseconds
/// always included.
pub(crate) fn format_timestamp(timestamp: &Timestamp) -> String {
    let dt = TimeZone::UTC.to_datetime(*timestamp);
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:06}Z",
        dt.year(),
        dt.month(),
        dt.day(),
        dt.hour(),
        dt.minute(),
        dt.second(),
        dt.subsec_nanosecond() / 1_000
    )
}

impl DateLiteral {
    pub(crate) fn to_text(&self) -> String {
        format!("DATE('{}')", self.date)
    }
}

impl TimestampLiteral {
    pub(crate) fn to_text(&self) -> String {
        format!("TIMESTAMP('{}')", format_timestamp(&self.timestamp))
    }
}

impl InstantLiteral {
    pub(crate) fn to_text(&self) -> String {
        match self {
            InstantLiteral::Date(date) => date.to_text(),
            InstantLiteral::Timestamp(timestamp) => timestamp.to_text(),
        }
    }
}

impl IntervalEndpoint {
    pub(crate) fn to_text(&self) -> Result<String, Error> {
        Ok(match self {
            IntervalEndpoint::Timestamp(timestamp) => {
                format!("'{}'", format_timestamp(timestamp))
            }
            IntervalEndpoint::Date(date) => format!("'{date}'"),
            IntervalEndpoint::Open => "'..'".to_string(),
            IntervalEndpoint::Property(property) => property.to_text(),
            IntervalEndpoint::Function(function) => function.to_text()?,
        })
    }
}

impl IntervalLiteral {
    pub(crate) fn to_text(&self) -> Result<String, Error> {
        Ok(format!(
            "INTERVAL({}, {})",
            self.interval.0.to_text()?,
            self.interval.1.to_text()?
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::{format_timestamp, parse_date, parse_endpoint, parse_timestamp, IntervalEndpoint};

    #[test]
    fn timestamps_require_utc() {
        assert!(parse_timestamp("2020-01-01T00:00:00Z").is_ok());
        assert!(parse_timestamp("2020-01-01T00:00:00+01:00").is_err());
        assert!(parse_timestamp("2020-01-01T00:00:00").is_err());
    }

    #[test]
    fn dates_are_strict() {
        assert!(parse_date("2020-02-18").is_ok());
        assert!(parse_date("2020-2-18").is_err());
        assert!(parse_date("2020-01-01T00:00:00Z").is_err());
    }

    #[test]
    fn microseconds_always_rendered() {
        let timestamp = parse_timestamp("2020-01-01T00:00:00Z").unwrap();
        assert_eq!(format_timestamp(&timestamp), "2020-01-01T00:00:00.000000Z");
        let timestamp = parse_timestamp("2020-01-01T00:00:00.123Z").unwrap();
        assert_eq!(format_timestamp(&timestamp), "2020-01-01T00:00:00.123000Z");
    }

    #[test]
    fn endpoint_classification() {
        assert_eq!(parse_endpoint("..").unwrap(), IntervalEndpoint::Open);
        assert!(matches!(
            parse_endpoint("2020-01-01").unwrap(),
            IntervalEndpoint::Date(_)
        ));
        assert!(matches!(
            parse_endpoint("2020-01-01T00:00:00Z").unwrap(),
            IntervalEndpoint::Timestamp(_)
        ));
        assert!(parse_endpoint("next tuesday").is_err());
    }
}
