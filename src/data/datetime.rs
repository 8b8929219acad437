// src/data/datetime.rs

//! Functions and regular expression fragments to transform the datetime
//! substring of a log-prefix into a numeric UTC timestamp.
//!
//! The most relevant documents to understand this file are:
//! - `chrono` crate [`strftime`] format.
//! - `regex` crate [Regular Expression syntax].
//!
//! [`strftime`]: https://docs.rs/chrono/0.4.40/chrono/format/strftime/index.html
//! [Regular Expression syntax]: https://docs.rs/regex/1.11.1/regex/index.html#syntax

#![allow(non_camel_case_types)]

#[cfg(any(debug_assertions, test))]
use crate::debug::printers::str_to_String_noraw;

use std::fmt;

#[doc(hidden)]
pub use ::chrono::{
    DateTime,
    NaiveDateTime,
    ParseError,
    TimeZone,
    Utc,
};
use ::const_format::concatcp;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// DateTime Regex Matching and strftime parsing
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Crate `chrono` [`strftime`] formatting pattern, passed to chrono
/// [`NaiveDateTime::parse_from_str`].
///
/// [`strftime`]: https://docs.rs/chrono/0.4.40/chrono/format/strftime/index.html
/// [`NaiveDateTime::parse_from_str`]: https://docs.rs/chrono/0.4.40/chrono/naive/struct.NaiveDateTime.html#method.parse_from_str
pub type DateTimePattern_str = str;

/// Regular expression fragment matching a datetime substring.
pub type DateTimeRegex_str = str;

/// Seconds since the Unix epoch in UTC, with sub-second precision when the
/// log line carried it.
pub type Timestamp = f64;

/// Date and time of day, `2020-01-02 03:04:05`.
pub const CGP_DATETIME_SECONDS: &DateTimeRegex_str =
    r"[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2}";

/// Fixed-width fractional seconds, `.123456`.
pub const CGP_FRACTIONAL6: &DateTimeRegex_str = r"\.[0-9]{6}";

/// Date and time of day with optional fractional seconds,
/// `2020-01-02 03:04:05` or `2020-01-02 03:04:05.123456`.
pub const CGP_DATETIME_MICROS: &DateTimeRegex_str = concatcp!(CGP_DATETIME_SECONDS, "(?:", CGP_FRACTIONAL6, ")?");

/// How precise the log-prefix datetime of an event kind may be.
///
/// Lines written by the blockchain nodes carry microseconds
/// (`-logtimemicros`); lines written by the simulation driver do not.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum DateTimePrecision {
    /// Whole seconds only.
    Seconds,
    /// Whole seconds with an optional 6-digit fraction.
    Micros,
}

impl DateTimePrecision {
    /// The regular expression fragment for this precision.
    pub const fn regex_pattern(&self) -> &'static DateTimeRegex_str {
        match self {
            DateTimePrecision::Seconds => CGP_DATETIME_SECONDS,
            DateTimePrecision::Micros => CGP_DATETIME_MICROS,
        }
    }
}

impl fmt::Display for DateTimePrecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateTimePrecision::Seconds => write!(f, "seconds"),
            DateTimePrecision::Micros => write!(f, "microseconds"),
        }
    }
}

/// Parse `data` with chrono `pattern` as a UTC wall-clock time.
pub fn datetime_parse_from_str(
    data: &str,
    pattern: &DateTimePattern_str,
) -> Result<DateTime<Utc>, ParseError> {
    defn!("(pattern {:?}, data {:?})", pattern, str_to_String_noraw(data));
    let dt_naive = match NaiveDateTime::parse_from_str(data, pattern) {
        Ok(val) => val,
        Err(err) => {
            defx!("NaiveDateTime::parse_from_str failed ParseError: {}", err);
            return Err(err);
        }
    };
    let dt = Utc.from_utc_datetime(&dt_naive);
    defx!("return {:?}", dt);

    Ok(dt)
}

/// Convert a UTC `DateTime` to seconds since the Unix epoch, keeping the
/// sub-second part.
pub fn datetime_to_timestamp(dt: &DateTime<Utc>) -> Timestamp {
    dt.timestamp() as Timestamp + dt.timestamp_subsec_nanos() as Timestamp / 1_000_000_000.0
}

/// Parse `data` with chrono `pattern` and return the epoch timestamp.
pub fn datetime_str_to_timestamp(
    data: &str,
    pattern: &DateTimePattern_str,
) -> Result<Timestamp, ParseError> {
    let dt = datetime_parse_from_str(data, pattern)?;

    Ok(datetime_to_timestamp(&dt))
}
