// src/bin/sx.rs

//! Driver program _sx_ drives the [_sxlib_].
//!
//! Processes user-passed command-line arguments into a [`ParserConfig`] and
//! an [`EventKindRegistry`], checks the log path and output directory, then
//! hands both to a [`ParseDriver`]. The `ParseDriver` scans the log once per
//! event kind, each scan on a worker thread, and writes one table per kind.
//!
//! If passed CLI option `--summary`, a [`SummaryScan`] line about each kind
//! is printed to STDOUT after all kinds finish.
//!
//! The exit code is success only if every selected kind succeeded.
//!
//! [_sxlib_]: sxlib
//! [`ParserConfig`]: sxlib::common::ParserConfig
//! [`EventKindRegistry`]: sxlib::data::eventkind::EventKindRegistry
//! [`ParseDriver`]: sxlib::readers::parsedriver::ParseDriver
//! [`SummaryScan`]: sxlib::readers::summary::SummaryScan

#![allow(non_camel_case_types)]

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use ::anyhow::{self, Context};
use ::clap::Parser;
use ::const_format::concatcp;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

use ::sxlib::common::{
    pool_size_default,
    Count,
    ParserConfig,
    DATETIME_FORMAT_DEFAULT,
    LOG_PREFIX_DEFAULT,
    PROGRESS_INTERVAL_DEFAULT,
};
use ::sxlib::data::eventkind::EventKindRegistry;
use ::sxlib::debug::printers::{e_err, e_inf};
use ::sxlib::readers::parsedriver::ParseDriver;

const CLI_HELP_AFTER: &str = concatcp!(
    r#"
Every line of LOG_PATH is tested against every event kind. Matching lines are
decoded and written to one table per kind in OUTPUT_DIR. Tables are ";"
delimited with CRLF line endings and begin with a header row.

LOG_PREFIX is a regular expression template common to all recognized lines.
It must contain the placeholder "{datetime}" and a named capture group
"(?P<node>...)". The default LOG_PREFIX is:
  "#, LOG_PREFIX_DEFAULT, r#"

DATETIME_FORMAT is a chrono strftime pattern, described at
https://docs.rs/chrono/latest/chrono/format/strftime/
Datetimes are read as UTC and written as seconds since the Unix epoch.

Use --list-kinds to see the event kinds, their output files and columns.

---

Version: "#, env!("CARGO_PKG_VERSION"), r#"
MSRV: "#, env!("CARGO_PKG_RUST_VERSION"), r#"
License: "#, env!("CARGO_PKG_LICENSE"), r#"
Author: "#, env!("CARGO_PKG_AUTHORS"), r#"
"#,
);

/// clap command-line arguments build-time definitions.
//
// Note:
// * the `about` is taken from `Cargo.toml:[package]:description`.
#[derive(Parser, Debug)]
#[clap(
    about = env!("CARGO_PKG_DESCRIPTION"),
    author = env!("CARGO_PKG_AUTHORS"),
    name = "sx",
    version = concatcp!(
        "Version: ",
        env!("CARGO_PKG_VERSION_MAJOR"), ".",
        env!("CARGO_PKG_VERSION_MINOR"), ".",
        env!("CARGO_PKG_VERSION_PATCH"), "\n",
        "MSRV: ", env!("CARGO_PKG_RUST_VERSION"), "\n",
        "License: ", env!("CARGO_PKG_LICENSE"), "\n",
        "Author: ", env!("CARGO_PKG_AUTHORS"), "\n",
    ),
    after_help = CLI_HELP_AFTER,
    verbatim_doc_comment,
)]
struct CLI_Args {
    /// Path of the aggregated log file.
    #[clap(
        required_unless_present = "list_kinds",
        verbatim_doc_comment,
    )]
    log_path: Option<String>,

    /// Directory for the output tables. Must exist.
    #[clap(
        short = 'o',
        long,
        verbatim_doc_comment,
        default_value = ".",
    )]
    output_dir: String,

    /// Run tag inserted into each output file name before the extension,
    /// e.g. tag "run1" writes "blocks_create_run1.csv".
    #[clap(
        short = 't',
        long,
        verbatim_doc_comment,
    )]
    tag: Option<String>,

    /// Count of worker threads. Defaults to the available parallelism.
    #[clap(
        short = 'p',
        long,
        verbatim_doc_comment,
    )]
    pool_size: Option<usize>,

    /// Regular expression template for the preamble of every line.
    #[clap(
        long,
        verbatim_doc_comment,
        default_value = LOG_PREFIX_DEFAULT,
        hide_default_value = true,
    )]
    log_prefix: String,

    /// chrono strftime pattern of the datetime in the preamble.
    #[clap(
        long,
        verbatim_doc_comment,
        default_value = DATETIME_FORMAT_DEFAULT,
    )]
    datetime_format: String,

    /// Print a progress message every this many lines. 0 disables.
    #[clap(
        long,
        verbatim_doc_comment,
        default_value_t = PROGRESS_INTERVAL_DEFAULT,
    )]
    progress_interval: Count,

    /// Only extract this event kind. May be passed more than once.
    #[clap(
        short = 'k',
        long = "kind",
        verbatim_doc_comment,
    )]
    kinds: Vec<String>,

    /// Print the event kinds then exit.
    #[clap(
        long,
        verbatim_doc_comment,
    )]
    list_kinds: bool,

    /// Print a summary line about each event kind after processing.
    #[clap(
        short = 's',
        long,
        verbatim_doc_comment,
    )]
    summary: bool,
}

/// Map the CLI options onto the library settings.
fn cli_process_args(args: &CLI_Args) -> ParserConfig {
    ParserConfig {
        log_prefix: args.log_prefix.clone(),
        datetime_format: args.datetime_format.clone(),
        pool_size: args.pool_size.unwrap_or_else(pool_size_default),
        progress_interval: match args.progress_interval {
            0 => None,
            val => Some(val),
        },
    }
}

/// Print the name, output file and columns of each event kind.
fn print_kinds(registry: &EventKindRegistry) {
    for kind in registry.iter() {
        println!("{:<20} {:<28} {}", kind.name(), kind.file_name(), kind.columns().join(";"));
    }
}

/// Returns `Ok(true)` if every selected kind succeeded.
fn run(args: CLI_Args) -> anyhow::Result<bool> {
    defn!();
    let config = cli_process_args(&args);
    defo!("config {:?}", config);

    let mut registry = EventKindRegistry::new(&config).context("invalid --log-prefix")?;
    if !args.kinds.is_empty() {
        registry = registry
            .select(&args.kinds)
            .map_err(|name| anyhow::anyhow!("unknown event kind {:?}, see --list-kinds", name))?;
    }
    if args.list_kinds {
        print_kinds(&registry);
        defx!("list kinds");
        return Ok(true);
    }

    let log_path: PathBuf = match args.log_path.as_ref() {
        Some(val) => PathBuf::from(val),
        None => anyhow::bail!("missing LOG_PATH"),
    };
    let dir_out = PathBuf::from(&args.output_dir);

    let driver = ParseDriver::new(registry, config);
    let report = driver
        .run(&log_path, &dir_out, args.tag.as_deref().unwrap_or(""))
        .with_context(|| format!("parsing {:?} failed", log_path))?;

    if args.summary {
        print!("{}", report);
    }
    let ok = report.is_ok();
    for outcome in report.failures() {
        e_err!("event kind {} produced no output", outcome.kind);
    }
    defx!("ok {}", ok);

    Ok(ok)
}

pub fn main() -> ExitCode {
    let start_time = Instant::now();
    let args = CLI_Args::parse();
    defo!("args {:?}", args);

    let exitcode = match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            e_err!("{:#}", err);
            ExitCode::FAILURE
        }
    };
    e_inf!("elapsed {:.3?}", start_time.elapsed());

    exitcode
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
