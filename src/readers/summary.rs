// src/readers/summary.rs

//! Implements `SummaryScan` statistics tracking struct.

use crate::common::{Count, FPath};

use std::fmt;
use std::time::Duration;

/// Accumulated statistics about one scan of the aggregated log for one
/// event kind.
///
/// For CLI option `--summary`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SummaryScan {
    /// name of the scanned event kind
    pub kind: &'static str,
    /// the scanned file
    pub path: FPath,
    /// the written output file, if writing was reached
    pub path_out: Option<FPath>,
    /// count of lines read
    pub lines: Count,
    /// count of bytes read
    pub bytes: Count,
    /// count of decoded records
    pub events: Count,
    /// wall-clock time of the scan including writing
    pub elapsed: Duration,
}

impl SummaryScan {
    pub fn new(
        kind: &'static str,
        path: FPath,
    ) -> SummaryScan {
        SummaryScan {
            kind,
            path,
            ..Default::default()
        }
    }
}

impl fmt::Display for SummaryScan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<20} events {:>9} lines {:>10} bytes {:>12} elapsed {:.3?} output {}",
            self.kind,
            self.events,
            self.lines,
            self.bytes,
            self.elapsed,
            self.path_out.as_deref().unwrap_or("(none)"),
        )
    }
}
