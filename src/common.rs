// src/common.rs

//! Common imports, type aliases, and other globals for _sxlib_.

use std::fmt;
use std::num::NonZeroUsize;

use ::const_format::concatcp;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// file-handling
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// `F`ile `Path` as passed around by the _sxlib_ functions.
pub type FPath = String;
pub type FileOpenOptions = std::fs::OpenOptions;

/// A general-purpose counting type.
pub type Count = u64;

/// 1-based line number within the aggregated log file.
pub type LineNumber = u64;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// custom Result enum for line matching
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// `Result` Extended for line matching functions.
///
/// A line that does not belong to an event kind is the common case and is
/// not an error, so it gets its own variant.
#[derive(Clone, Debug, PartialEq)]
pub enum ResultMatch<T, E> {
    /// The line matched and decoded.
    Found(T),
    /// The line does not belong to the event kind.
    NoMatch,
    /// The line matched structurally but a captured value failed to decode.
    Err(E),
}

impl<T, E> ResultMatch<T, E> {
    /// Returns `true` if the result is [`Found`].
    ///
    /// [`Found`]: ResultMatch::Found
    #[inline(always)]
    pub const fn is_found(&self) -> bool {
        matches!(*self, ResultMatch::Found(_))
    }

    /// Returns `true` if the result is [`NoMatch`].
    ///
    /// [`NoMatch`]: ResultMatch::NoMatch
    #[inline(always)]
    pub const fn is_nomatch(&self) -> bool {
        matches!(*self, ResultMatch::NoMatch)
    }
}

impl<T, E> fmt::Display for ResultMatch<T, E>
where
    E: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultMatch::Found(_) => write!(f, "ResultMatch::Found"),
            ResultMatch::NoMatch => write!(f, "ResultMatch::NoMatch"),
            ResultMatch::Err(err) => write!(f, "ResultMatch::Err({})", err),
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// configuration defaults
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Placeholder within a log-prefix template. It is replaced by the
/// per-kind datetime regex wrapped in capture group [`CGN_DATETIME`].
pub const DATETIME_PLACEHOLDER: &str = "{datetime}";

/// Capture group name of the log-prefix datetime.
pub const CGN_DATETIME: &str = "datetime";

/// Capture group name of the log-prefix node identifier.
pub const CGN_NODE: &str = "node";

/// Node identifier token, e.g. `node-1`, `simcoin.2`.
pub const CGP_NODE_TOKEN: &str = r"[a-zA-Z0-9\-.]+";

/// Default log-prefix template shared by every recognized line, e.g.
///
/// ```text
/// LOG 2020-01-01 00:00:00.123456 [node-1]
/// ```
pub const LOG_PREFIX_DEFAULT: &str = concatcp!(
    r"^LOG ",
    DATETIME_PLACEHOLDER,
    r" \[(?P<",
    CGN_NODE,
    r">",
    CGP_NODE_TOKEN,
    r")\] ",
);

/// Default chrono [`strftime`] pattern for the log-prefix datetime.
/// `%.f` accepts an absent fractional part.
///
/// [`strftime`]: https://docs.rs/chrono/0.4.40/chrono/format/strftime/index.html
pub const DATETIME_FORMAT_DEFAULT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Log a progress marker after this many lines of one scan.
pub const PROGRESS_INTERVAL_DEFAULT: Count = 100_000;

/// Output field delimiter.
pub const CSV_DELIMITER: &str = ";";

/// Output line terminator.
pub const CSV_LINE_END: &str = "\r\n";

/// Number of worker threads when the user does not choose.
pub fn pool_size_default() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Settings consumed by the parsing pipeline. Supplied by the caller
/// (in practice the `sx` command-line).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParserConfig {
    /// Regex template of the preamble common to all recognized lines.
    /// Must contain [`DATETIME_PLACEHOLDER`] and a named group [`CGN_NODE`].
    pub log_prefix: String,
    /// chrono pattern used to parse the captured datetime.
    pub datetime_format: String,
    /// Worker threads; `0` is treated as `1`.
    pub pool_size: usize,
    /// Lines between progress markers; `None` disables progress markers.
    pub progress_interval: Option<Count>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            log_prefix: String::from(LOG_PREFIX_DEFAULT),
            datetime_format: String::from(DATETIME_FORMAT_DEFAULT),
            pool_size: pool_size_default(),
            progress_interval: Some(PROGRESS_INTERVAL_DEFAULT),
        }
    }
}
