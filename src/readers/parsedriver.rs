// src/readers/parsedriver.rs

//! Implements the [`ParseDriver`], which runs one independent scan of the
//! aggregated log per [`EventKind`] on a [`WorkerPool`].
//!
//! Every scan re-reads the whole file. The kinds share nothing but the
//! read-only source file and the output directory (each kind writes its own
//! file), so a failed kind cannot disturb its siblings.
//!
//! Processing stages of [`ParseDriver::run`]:
//! 1. preflight: the source must be a readable file, the output directory a
//!    writable directory. Failure here aborts the run before any scan.
//! 2. dispatch: one job per kind is submitted to a new `WorkerPool`, then the
//!    pool is closed.
//! 3. collect: each job sends its [`ScanResult`] back over a channel. A job
//!    that never reports (panicked) is recorded as [`ScanError::Abandoned`].
//! 4. the pool is joined. Any kind that failed with an I/O error makes the
//!    run fail.
//!
//! [`EventKind`]: crate::data::eventkind::EventKind

use crate::common::{Count, FPath, FileOpenOptions, ParserConfig};
use crate::data::eventkind::{EventKindId, EventKindRegistry};
use crate::debug::printers::{e_err, e_inf, e_wrn};
use crate::readers::helpers::path_to_fpath;
use crate::readers::logscanner::{scan_and_write, ScanError, ScanResult};
use crate::readers::summary::SummaryScan;
use crate::readers::workerpool::WorkerPool;

use std::fmt;
use std::io::{Error, ErrorKind, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ::crossbeam_channel;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Index of an event kind within the driver's registry.
type KindIndex = usize;

type ChanDatum = (KindIndex, ScanResult);
type ChanSendDatum = crossbeam_channel::Sender<ChanDatum>;
type ChanRecvDatum = crossbeam_channel::Receiver<ChanDatum>;

/// The outcome of one event kind's scan.
#[derive(Debug)]
pub struct KindOutcome {
    pub id: EventKindId,
    pub kind: &'static str,
    pub result: ScanResult,
}

impl KindOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    pub fn summary(&self) -> Option<&SummaryScan> {
        self.result.as_ref().ok()
    }
}

/// Per-kind outcomes of one [`ParseDriver::run`], in registry order.
#[derive(Debug, Default)]
pub struct ParseReport {
    pub path: FPath,
    pub outcomes: Vec<KindOutcome>,
}

impl ParseReport {
    /// `true` if every kind succeeded.
    pub fn is_ok(&self) -> bool {
        self.outcomes.iter().all(KindOutcome::is_ok)
    }

    pub fn failures(&self) -> impl Iterator<Item = &KindOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.is_ok())
    }

    pub fn get(
        &self,
        id: EventKindId,
    ) -> Option<&KindOutcome> {
        self.outcomes.iter().find(|outcome| outcome.id == id)
    }

    /// Total records written over all successful kinds.
    pub fn events(&self) -> Count {
        self.outcomes
            .iter()
            .filter_map(KindOutcome::summary)
            .map(|summary| summary.events)
            .sum()
    }
}

impl fmt::Display for ParseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for outcome in self.outcomes.iter() {
            match &outcome.result {
                Ok(summary) => writeln!(f, "{}", summary)?,
                Err(err) => writeln!(f, "{:<20} FAILED {}", outcome.kind, err)?,
            }
        }
        Ok(())
    }
}

/// Verify the source file can be read and the output directory written
/// before starting any scan.
pub fn preflight(
    path: &Path,
    dir_out: &Path,
) -> Result<()> {
    defn!("({:?}, {:?})", path, dir_out);
    let metadata = std::fs::metadata(path).map_err(|err| {
        Error::new(err.kind(), format!("cannot access log file {:?}: {}", path, err))
    })?;
    if !metadata.is_file() {
        defx!("not a file");
        return Err(Error::new(
            ErrorKind::InvalidInput,
            format!("log path {:?} is not a file", path),
        ));
    }
    FileOpenOptions::new()
        .read(true)
        .open(path)
        .map_err(|err| Error::new(err.kind(), format!("cannot open log file {:?}: {}", path, err)))?;
    if metadata.len() == 0 {
        e_wrn!("log file {:?} is empty", path);
    }

    let metadata = std::fs::metadata(dir_out).map_err(|err| {
        Error::new(err.kind(), format!("cannot access output directory {:?}: {}", dir_out, err))
    })?;
    if !metadata.is_dir() {
        defx!("not a directory");
        return Err(Error::new(
            ErrorKind::InvalidInput,
            format!("output path {:?} is not a directory", dir_out),
        ));
    }
    // a probe file proves the directory is writable; removed on drop
    ::tempfile::Builder::new()
        .prefix(".sx-probe-")
        .tempfile_in(dir_out)
        .map_err(|err| {
            Error::new(err.kind(), format!("cannot write to output directory {:?}: {}", dir_out, err))
        })?;
    defx!();

    Ok(())
}

/// Runs every kind of an [`EventKindRegistry`] over one aggregated log.
#[derive(Debug)]
pub struct ParseDriver {
    registry: Arc<EventKindRegistry>,
    config: Arc<ParserConfig>,
}

impl ParseDriver {
    pub fn new(
        registry: EventKindRegistry,
        config: ParserConfig,
    ) -> ParseDriver {
        e_inf!("Created parser with {} log parsers", registry.len());

        ParseDriver {
            registry: Arc::new(registry),
            config: Arc::new(config),
        }
    }

    pub fn registry(&self) -> &EventKindRegistry {
        &self.registry
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Scan `path` once per event kind, writing each kind's table into
    /// `dir_out` with run tag `tag`.
    ///
    /// Returns `Err` if preflight fails, if the worker pool cannot start, or
    /// if any kind failed with an I/O error. Decode errors of a kind are only
    /// reported in the returned [`ParseReport`].
    pub fn run(
        &self,
        path: &Path,
        dir_out: &Path,
        tag: &str,
    ) -> Result<ParseReport> {
        defn!("({:?}, {:?}, {:?})", path, dir_out, tag);
        preflight(path, dir_out)?;

        let kinds_len = self.registry.len();
        let mut pool = WorkerPool::new(self.config.pool_size.min(kinds_len))?;
        defo!("pool size {}", pool.size());
        let (chan_send, chan_recv): (ChanSendDatum, ChanRecvDatum) = crossbeam_channel::unbounded();

        let path_buf: Arc<PathBuf> = Arc::new(path.to_path_buf());
        let dir_out_buf: Arc<PathBuf> = Arc::new(dir_out.to_path_buf());
        let tag: Arc<String> = Arc::new(String::from(tag));
        for index in 0..kinds_len {
            let registry = Arc::clone(&self.registry);
            let config = Arc::clone(&self.config);
            let path_ = Arc::clone(&path_buf);
            let dir_out_ = Arc::clone(&dir_out_buf);
            let tag_ = Arc::clone(&tag);
            let chan_send_ = chan_send.clone();
            pool.submit(move || {
                let kind = match registry.iter().nth(index) {
                    Some(val) => val,
                    None => return,
                };
                let result = scan_and_write(&path_, kind, &config, &dir_out_, &tag_);
                // the receiver outlives every job
                _ = chan_send_.send((index, result));
            })?;
        }
        pool.close();
        // only the jobs hold senders now; the channel disconnects when the
        // last job finishes or is dropped
        drop(chan_send);

        let mut results: Vec<Option<ScanResult>> = (0..kinds_len).map(|_| None).collect();
        while let Ok((index, result)) = chan_recv.recv() {
            defo!("received result for kind index {}", index);
            results[index] = Some(result);
        }
        let panicked = pool.join();
        if panicked != 0 {
            e_err!("{} parser tasks ended abnormally", panicked);
        }

        let mut report = ParseReport {
            path: path_to_fpath(path),
            outcomes: Vec::with_capacity(kinds_len),
        };
        for (kind, result) in self.registry.iter().zip(results.into_iter()) {
            let result = result.unwrap_or(Err(ScanError::Abandoned(kind.name())));
            if let Err(err) = &result {
                e_err!("{} parser failed: {}", kind, err);
            }
            report.outcomes.push(KindOutcome {
                id: kind.id(),
                kind: kind.name(),
                result,
            });
        }
        e_inf!("Finished parsing aggregated log={}", report.path);

        for outcome in report.outcomes.iter() {
            if let Err(ScanError::Io(err)) = &outcome.result {
                defx!("kind {} I/O error {}", outcome.kind, err);
                return Err(Error::new(err.kind(), format!("{} parser: {}", outcome.kind, err)));
            }
        }
        defx!("{} events", report.events());

        Ok(report)
    }
}
