// src/readers/linematcher.rs

//! Implements a [`LineMatcher`], the driver of deciding whether one log line
//! was produced by one specific [`EventKind`], and if so decoding it to an
//! [`EventRecord`].
//!
//! There are three outcomes, see [`ResultMatch`]:
//! - the line does not belong to the kind (by far the most common outcome)
//! - the line matched and decoded
//! - the line matched the kind's regex but a captured value is bad, e.g.
//!   `2020-13-45 00:00:00`. This is a [`DecodeError`]; the caller must not
//!   continue as if the line was merely skipped.
//!
//! [`EventKind`]: crate::data::eventkind::EventKind
//! [`EventRecord`]: crate::data::event::EventRecord

#![allow(non_camel_case_types)]

use crate::common::{LineNumber, ResultMatch, CGN_DATETIME, CGN_NODE};
use crate::data::datetime::{datetime_str_to_timestamp, DateTimePattern_str, ParseError};
use crate::data::event::EventRecord;
use crate::data::eventkind::{EventKind, FieldDecodeError, LinePrelude};
#[cfg(any(debug_assertions, test))]
use crate::debug::printers::str_to_String_noraw;
use crate::readers::helpers::trim_line_end;

use std::fmt;

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Why a structurally matching line could not be decoded.
#[derive(Clone, Debug, PartialEq)]
pub enum DecodeReason {
    /// The captured log-prefix datetime is not a valid datetime.
    DateTime {
        value: String,
        err: ParseError,
    },
    /// A kind-specific captured value did not convert.
    Field(FieldDecodeError),
}

impl fmt::Display for DecodeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeReason::DateTime { value, err } => write!(f, "bad datetime {:?}: {}", value, err),
            DecodeReason::Field(err) => write!(f, "{}", err),
        }
    }
}

/// A line matched an [`EventKind`] but could not be decoded. Fatal to that
/// kind's scan.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodeError {
    /// name of the event kind being scanned
    pub kind: &'static str,
    pub line_num: LineNumber,
    /// the offending line, without line ending
    pub line: String,
    pub reason: DecodeReason,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} failed to decode line {}: {}; line {:?}",
            self.kind, self.line_num, self.reason, self.line,
        )
    }
}

impl std::error::Error for DecodeError {}

/// Return type of [`LineMatcher::match_line`].
pub type ResultMatch_Line = ResultMatch<EventRecord, DecodeError>;

/// Matches lines against one [`EventKind`].
///
/// Cheap to create; holds only references.
#[derive(Clone, Copy, Debug)]
pub struct LineMatcher<'a> {
    kind: &'a EventKind,
    /// chrono pattern for the log-prefix datetime
    datetime_format: &'a DateTimePattern_str,
}

impl<'a> LineMatcher<'a> {
    pub fn new(
        kind: &'a EventKind,
        datetime_format: &'a DateTimePattern_str,
    ) -> LineMatcher<'a> {
        LineMatcher {
            kind,
            datetime_format,
        }
    }

    pub const fn kind(&self) -> &'a EventKind {
        self.kind
    }

    /// Try to decode `line` as this matcher's kind. `line` may or may not
    /// end with `"\n"` or `"\r\n"`.
    ///
    /// `line_num` is only used for the [`DecodeError`].
    pub fn match_line(
        &self,
        line: &str,
        line_num: LineNumber,
    ) -> ResultMatch_Line {
        let line = trim_line_end(line);
        let captures = match self.kind.regex().captures(line) {
            Some(val) => val,
            None => return ResultMatch::NoMatch,
        };
        defn!("{} matched line {} {:?}", self.kind, line_num, str_to_String_noraw(line));

        let decode_error = |reason: DecodeReason| -> ResultMatch_Line {
            ResultMatch::Err(DecodeError {
                kind: self.kind.name(),
                line_num,
                line: String::from(line),
                reason,
            })
        };

        let datetime_s: &str = match captures.name(CGN_DATETIME) {
            Some(m) => m.as_str(),
            None => {
                defx!("no capture group {:?}", CGN_DATETIME);
                return decode_error(DecodeReason::Field(FieldDecodeError {
                    field: CGN_DATETIME,
                    value: String::new(),
                    reason: String::from("capture group did not participate in the match"),
                }));
            }
        };
        let timestamp = match datetime_str_to_timestamp(datetime_s, self.datetime_format) {
            Ok(val) => val,
            Err(err) => {
                defx!("datetime_str_to_timestamp({:?}) failed {}", datetime_s, err);
                return decode_error(DecodeReason::DateTime {
                    value: String::from(datetime_s),
                    err,
                });
            }
        };
        let node: &str = captures
            .name(CGN_NODE)
            .map_or("", |m| m.as_str());
        let prelude = LinePrelude { timestamp, node };

        match self.kind.decode(&captures, &prelude) {
            Ok(record) => {
                defx!("return Found({:?})", record);

                ResultMatch::Found(record)
            }
            Err(err) => {
                defx!("decode failed {}", err);

                decode_error(DecodeReason::Field(err))
            }
        }
    }
}
