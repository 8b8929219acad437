// src/readers/logscanner.rs

//! Implements a [`LogScanner`], one complete read-only pass over the
//! aggregated log file for one [`EventKind`].
//!
//! Each scan opens its own file handle so any number of scans may read the
//! same file at once. Lines are read as bytes and converted lossily to UTF-8;
//! a stray invalid byte never stops a scan.
//!
//! [`EventKind`]: crate::data::eventkind::EventKind

use crate::common::{Count, FPath, FileOpenOptions, LineNumber, ParserConfig, ResultMatch};
use crate::data::event::EventRecords;
use crate::data::eventkind::EventKind;
use crate::debug::printers::{de_wrn, e_inf};
use crate::printer::csvwriter::{csv_path, write_csv_fpath};
use crate::readers::helpers::{basename, path_to_fpath};
use crate::readers::linematcher::{DecodeError, LineMatcher};
use crate::readers::summary::SummaryScan;

use std::borrow::Cow;
use std::fmt;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Read buffer capacity of one scan.
pub const SCAN_BUFFER_SZ: usize = 0x10000;

/// Why one kind's scan failed.
#[derive(Debug)]
pub enum ScanError {
    /// A matching line did not decode. Only this kind is affected.
    Decode(DecodeError),
    /// The log could not be read or the output could not be written.
    Io(std::io::Error),
    /// The scan ended without reporting, e.g. the worker thread panicked.
    Abandoned(&'static str),
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::Decode(err) => write!(f, "{}", err),
            ScanError::Io(err) => write!(f, "{}", err),
            ScanError::Abandoned(kind) => write!(f, "{} scan ended abnormally", kind),
        }
    }
}

impl std::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScanError::Decode(err) => Some(err),
            ScanError::Io(err) => Some(err),
            ScanError::Abandoned(_) => None,
        }
    }
}

impl From<std::io::Error> for ScanError {
    fn from(err: std::io::Error) -> Self {
        ScanError::Io(err)
    }
}

impl From<DecodeError> for ScanError {
    fn from(err: DecodeError) -> Self {
        ScanError::Decode(err)
    }
}

/// Result of one complete scan task.
pub type ScanResult = Result<SummaryScan, ScanError>;

/// One pass over the aggregated log collecting the records of one kind.
pub struct LogScanner<'a> {
    path: &'a Path,
    matcher: LineMatcher<'a>,
    /// log a progress marker every this many lines
    progress_interval: Option<Count>,
}

impl fmt::Debug for LogScanner<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogScanner")
            .field("path", &self.path)
            .field("kind", &self.matcher.kind().name())
            .field("progress_interval", &self.progress_interval)
            .finish()
    }
}

impl<'a> LogScanner<'a> {
    pub fn new(
        path: &'a Path,
        kind: &'a EventKind,
        config: &'a ParserConfig,
    ) -> LogScanner<'a> {
        LogScanner {
            path,
            matcher: LineMatcher::new(kind, &config.datetime_format),
            progress_interval: config
                .progress_interval
                .filter(|interval| *interval > 0),
        }
    }

    pub fn kind(&self) -> &'a EventKind {
        self.matcher.kind()
    }

    /// Read the entire file, returning the decoded records in file order.
    ///
    /// Stops at the first [`DecodeError`].
    pub fn scan(&self) -> Result<(EventRecords, SummaryScan), ScanError> {
        defn!("({:?}) kind {}", self.path, self.kind());
        let fpath: FPath = path_to_fpath(self.path);
        let mut summary = SummaryScan::new(self.kind().name(), fpath.clone());
        let file = FileOpenOptions::new()
            .read(true)
            .open(self.path)?;
        let filesz: Count = file.metadata()?.len();
        let mut reader = BufReader::with_capacity(SCAN_BUFFER_SZ, file);

        let mut records = EventRecords::new();
        let mut buffer: Vec<u8> = Vec::with_capacity(1024);
        let mut line_num: LineNumber = 0;
        loop {
            buffer.clear();
            let read = reader.read_until(b'\n', &mut buffer)?;
            if read == 0 {
                break;
            }
            line_num += 1;
            summary.bytes += read as Count;
            let line = String::from_utf8_lossy(&buffer);
            if let Cow::Owned(_) = line {
                de_wrn!("line {} of {:?} is not valid UTF-8", line_num, fpath);
            }
            match self.matcher.match_line(&line, line_num) {
                ResultMatch::Found(record) => records.push(record),
                ResultMatch::NoMatch => {}
                ResultMatch::Err(err) => {
                    defx!("line {} decode error {}", line_num, err);
                    return Err(ScanError::Decode(err));
                }
            }
            if let Some(interval) = self.progress_interval {
                if line_num % interval == 0 {
                    e_inf!(
                        "{} parser parsed {} lines ({} of {} bytes) of {}",
                        self.kind(),
                        line_num,
                        summary.bytes,
                        filesz,
                        basename(&fpath),
                    );
                }
            }
        }
        summary.lines = line_num;
        summary.events = records.len() as Count;
        defx!("{} events from {} lines", summary.events, summary.lines);

        Ok((records, summary))
    }
}

/// The whole task of one event kind: scan `path`, then write the records to
/// the kind's file in `dir_out`, tagged with `tag`.
///
/// Nothing is written if the scan fails.
pub fn scan_and_write(
    path: &Path,
    kind: &EventKind,
    config: &ParserConfig,
    dir_out: &Path,
    tag: &str,
) -> ScanResult {
    defn!("({:?}, {}, {:?}, {:?})", path, kind, dir_out, tag);
    let start = Instant::now();
    let scanner = LogScanner::new(path, kind, config);
    let (records, mut summary) = scanner.scan()?;
    let path_out = csv_path(dir_out, kind.file_name(), tag);
    let (fpath_out, _count) = write_csv_fpath(&path_out, kind.columns(), &records)?;
    summary.path_out = Some(fpath_out);
    summary.elapsed = start.elapsed();
    e_inf!(
        "{} parser parsed {} events out of {} lines from {} into file {}",
        kind,
        summary.events,
        summary.lines,
        summary.path,
        summary.path_out.as_deref().unwrap_or(""),
    );
    defx!();

    Ok(summary)
}
