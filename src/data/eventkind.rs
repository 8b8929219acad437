// src/data/eventkind.rs

//! The Event Type Registry: one [`EventKindDef`] per recognized log-line
//! format, compiled at run-time into an [`EventKind`] per descriptor.
//!
//! A full recognition regex is
//!
//! ```text
//! ^ <log-prefix template with {datetime} substituted> <kind pattern> $
//! ```
//!
//! The log-prefix template is configuration ([`ParserConfig::log_prefix`]).
//! It must hold a named capture group `node` and the placeholder
//! [`DATETIME_PLACEHOLDER`]. The placeholder becomes a named capture group
//! `datetime` whose regex depends on the kind's [`DateTimePrecision`].
//!
//! Adding a new log format means adding one [`EKD!`] declaration to
//! [`EVENT_KIND_DEFS`] and its [`EventRecord`] variant.
//!
//! [`ParserConfig::log_prefix`]: crate::common::ParserConfig
//! [`DATETIME_PLACEHOLDER`]: crate::common::DATETIME_PLACEHOLDER
//! [`EKD!`]: crate::EKD

#![allow(non_camel_case_types)]

use crate::common::{
    ParserConfig,
    CGN_DATETIME,
    CGN_NODE,
    CGP_NODE_TOKEN,
    DATETIME_PLACEHOLDER,
};
use crate::data::datetime::{DateTimePrecision, Timestamp};
use crate::data::event::{
    BlockCreate,
    EventRecord,
    MempoolSnapshot,
    NodeException,
    ObjectSeen,
    RpcException,
    Tick,
    UpdateTip,
};

use std::fmt;

use ::const_format::concatcp;
use ::regex::{Captures, Regex};
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// identifiers and errors
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Identifies one event kind. Order matches [`EVENT_KIND_DEFS`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum EventKindId {
    BlockCreate,
    BlockReceived,
    BlockReconstruct,
    BlockException,
    UpdateTip,
    PeerLogicValidation,
    Tx,
    TxReceived,
    TxException,
    MempoolSnapshot,
    RpcException,
    Tick,
}

/// Regular expression pattern of the kind-specific part of a log line.
pub type RegexPattern = str;

/// Regular expression capture group name.
pub type CaptureGroupName = str;

/// Number of entries in [`EVENT_KIND_DEFS`].
pub const EVENT_KIND_COUNT: usize = 12;

/// A captured value that could not be converted to its field type.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldDecodeError {
    /// capture group name
    pub field: &'static CaptureGroupName,
    /// captured text, empty if the group did not participate
    pub value: String,
    pub reason: String,
}

impl fmt::Display for FieldDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field {} value {:?}: {}", self.field, self.value, self.reason)
    }
}

impl std::error::Error for FieldDecodeError {}

/// A log-prefix template that cannot be turned into recognition regexes.
#[derive(Debug)]
pub enum ConfigError {
    /// the template has no [`DATETIME_PLACEHOLDER`]
    ///
    /// [`DATETIME_PLACEHOLDER`]: crate::common::DATETIME_PLACEHOLDER
    MissingDatetimePlaceholder(String),
    /// the template has no named group `node`
    MissingNodeGroup(String),
    /// the assembled regex does not compile
    Regex {
        kind: &'static str,
        err: regex::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingDatetimePlaceholder(prefix) => {
                write!(f, "log prefix {:?} is missing placeholder {:?}", prefix, DATETIME_PLACEHOLDER)
            }
            ConfigError::MissingNodeGroup(prefix) => {
                write!(f, "log prefix {:?} is missing named capture group {:?}", prefix, CGN_NODE)
            }
            ConfigError::Regex { kind, err } => {
                write!(f, "event kind {} regex failed to compile: {}", kind, err)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Regex { err, .. } => Some(err),
            _ => None,
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// descriptors
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Values common to every line, decoded from the log-prefix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinePrelude<'a> {
    pub timestamp: Timestamp,
    pub node: &'a str,
}

/// Converts the captures of a matching line to a record.
pub type DecodeFn = fn(&Captures<'_>, &LinePrelude<'_>) -> Result<EventRecord, FieldDecodeError>;

/// Static description of one event kind.
pub struct EventKindDef {
    pub id: EventKindId,
    pub name: &'static str,
    /// kind-specific part of the line, follows the log-prefix
    pub pattern: &'static RegexPattern,
    pub precision: DateTimePrecision,
    /// output header, in field order
    pub columns: &'static [&'static str],
    /// output file name, before any run tag is applied
    pub file_name: &'static str,
    pub decode: DecodeFn,
    /// Hardcoded self-test lines, written with the default log-prefix.
    #[cfg(any(debug_assertions, test))]
    pub _test_cases: &'static [&'static str],
    /// Source code line number of declaration, to aid debugging.
    pub _line_num: u32,
}

impl fmt::Debug for EventKindDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventKindDef")
            .field("name", &self.name)
            .field("file_name", &self.file_name)
            .field("precision", &self.precision)
            .field("_line_num", &self._line_num)
            .finish()
    }
}

/// Declare an [`EventKindDef`] more easily.
#[macro_export]
macro_rules! EKD {
    (
        $id:expr,
        $name:literal,
        $pattern:expr,
        $precision:expr,
        $columns:expr,
        $file_name:literal,
        $decode:expr,
        $test_cases:expr,
        $line_num:expr,
    ) => {
        EventKindDef {
            id: $id,
            name: $name,
            pattern: $pattern,
            precision: $precision,
            columns: $columns,
            file_name: $file_name,
            decode: $decode,
            #[cfg(any(debug_assertions, test))]
            _test_cases: $test_cases,
            _line_num: $line_num,
        }
    };
}
pub use EKD;

// capture group patterns used in `EKD!` declarations

/// block or transaction hash
pub const CGP_HASH: &RegexPattern = "[0-9a-fA-F]{64}";
pub const CGP_UINT: &RegexPattern = "[0-9]+";
pub const CGP_FLOAT: &RegexPattern = r"[0-9]+\.[0-9]+";
/// simulation driver preamble `[thread] [level]  `
pub const RP_SIM_PREAMBLE: &RegexPattern = r"\[.*\] \[.*\]  ";

// capture group names used in `EKD!` declarations

pub const CGN_HASH: &CaptureGroupName = "hash";
pub const CGN_TOTAL_SIZE: &CaptureGroupName = "total_size";
pub const CGN_TXS: &CaptureGroupName = "txs";
pub const CGN_HEIGHT: &CaptureGroupName = "height";
pub const CGN_TX: &CaptureGroupName = "tx";
pub const CGN_INPUTS: &CaptureGroupName = "inputs";
/// node named in a simulation driver message
pub const CGN_TARGET: &CaptureGroupName = "target";
pub const CGN_EXCEPTION: &CaptureGroupName = "exception";
pub const CGN_METHOD: &CaptureGroupName = "method";
pub const CGN_START: &CaptureGroupName = "start";
pub const CGN_DURATION: &CaptureGroupName = "duration";

/// a well-formed hash for the `_test_cases` of `EKD!` declarations
#[allow(unused_macros)]
macro_rules! hash_t {
    () => {
        "00000000a1b2c3d4e5f60718293a4b5c6d7e8f90123456789abcdef0fedcba98"
    };
}

/// Every recognized event kind.
///
/// Patterns must be disjoint; no line may match two kinds.
pub static EVENT_KIND_DEFS: [EventKindDef; EVENT_KIND_COUNT] = [
    EKD!(
        EventKindId::BlockCreate,
        "BlockCreate",
        concatcp!(
            r"CreateNewBlock\(\): total size: (?P<", CGN_TOTAL_SIZE, ">", CGP_UINT, ") block weight: [0-9]+ txs: (?P<",
            CGN_TXS, ">", CGP_UINT, r") fees: [0-9]+ sigops [0-9]+"
        ),
        DateTimePrecision::Micros,
        &["timestamp", "node", "total_size", "txs"],
        "blocks_create.csv",
        decode_block_create,
        &["LOG 2020-01-01 00:00:01.000001 [node-1] CreateNewBlock(): total size: 1234 block weight: 4936 txs: 7 fees: 3000 sigops 400"],
        line!(),
    ),
    EKD!(
        EventKindId::BlockReceived,
        "BlockReceived",
        concatcp!("received block (?P<", CGN_HASH, ">", CGP_HASH, ") peer=[0-9]+"),
        DateTimePrecision::Micros,
        &["timestamp", "node", "hash"],
        "blocks_received.csv",
        decode_block_received,
        &[concat!("LOG 2020-01-01 00:00:02 [node-2] received block ", hash_t!(), " peer=0")],
        line!(),
    ),
    EKD!(
        EventKindId::BlockReconstruct,
        "BlockReconstruct",
        concatcp!(
            "Successfully reconstructed block (?P<", CGN_HASH, ">", CGP_HASH, r") with [0-9]+ txn prefilled, [0-9]+ txn from mempool \(incl at least [0-9]+ from extra pool\) and [0-9]+ txn requested"
        ),
        DateTimePrecision::Micros,
        &["timestamp", "node", "hash"],
        "blocks_reconstructed.csv",
        decode_block_reconstruct,
        &[concat!(
            "LOG 2020-01-01 00:00:03.500000 [node-3] Successfully reconstructed block ",
            hash_t!(),
            " with 1 txn prefilled, 9 txn from mempool (incl at least 0 from extra pool) and 0 txn requested"
        )],
        line!(),
    ),
    EKD!(
        EventKindId::BlockException,
        "BlockException",
        concatcp!(
            RP_SIM_PREAMBLE, "Could not generate block for node=(?P<", CGN_TARGET, ">", CGP_NODE_TOKEN, r")\. Exception=",
            "\"(?P<", CGN_EXCEPTION, ">.+)\""
        ),
        DateTimePrecision::Seconds,
        &["timestamp", "node", "exception"],
        "block_exceptions.csv",
        decode_block_exception,
        &[r#"LOG 2020-01-01 00:00:04 [simcoin] [MainThread  ] [WARNI]  Could not generate block for node=node-1. Exception="Connection refused: 'localhost'""#],
        line!(),
    ),
    EKD!(
        EventKindId::UpdateTip,
        "UpdateTip",
        concatcp!(
            "UpdateTip: new best=(?P<", CGN_HASH, ">", CGP_HASH, ") height=(?P<", CGN_HEIGHT, ">", CGP_UINT,
            r") version=0x[0-9a-fA-F]{8} log2_work=[0-9]+\.?[0-9]* tx=(?P<", CGN_TX, ">", CGP_UINT,
            r") date='[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2}' progress=[0-9]+\.[0-9]+ cache=[0-9]+\.[0-9]+[a-zA-Z]+\([0-9]+txo?\)"
        ),
        DateTimePrecision::Micros,
        &["timestamp", "node", "hash", "height", "tx"],
        "update_tip.csv",
        decode_update_tip,
        &[concat!(
            "LOG 2020-01-01 00:00:05.000005 [node-1] UpdateTip: new best=",
            hash_t!(),
            " height=100 version=0x20000000 log2_work=90.5 tx=150 date='2020-01-01 00:00:00' progress=1.000000 cache=1.0MiB(150txo)"
        )],
        line!(),
    ),
    EKD!(
        EventKindId::PeerLogicValidation,
        "PeerLogicValidation",
        concatcp!("PeerLogicValidation::NewPoWValidBlock sending header-and-ids (?P<", CGN_HASH, ">", CGP_HASH, ") to peer=[0-9]+"),
        DateTimePrecision::Micros,
        &["timestamp", "node", "hash"],
        "peer_logic_validation.csv",
        decode_peer_logic_validation,
        &[concat!("LOG 2020-01-01 00:00:06 [node-4] PeerLogicValidation::NewPoWValidBlock sending header-and-ids ", hash_t!(), " to peer=2")],
        line!(),
    ),
    EKD!(
        EventKindId::Tx,
        "Tx",
        concatcp!("AddToWallet (?P<", CGN_HASH, ">", CGP_HASH, ")  new"),
        DateTimePrecision::Micros,
        &["timestamp", "node", "hash"],
        "txs.csv",
        decode_tx,
        &[concat!("LOG 2020-01-01 00:00:07.123456 [node-1] AddToWallet ", hash_t!(), "  new")],
        line!(),
    ),
    EKD!(
        EventKindId::TxReceived,
        "TxReceived",
        concatcp!(
            "AcceptToMemoryPool: peer=[0-9]+: accepted (?P<", CGN_HASH, ">", CGP_HASH, r") \(poolsz [0-9]+ txn, [0-9]+ [a-zA-Z]+\)"
        ),
        DateTimePrecision::Micros,
        &["timestamp", "node", "hash"],
        "txs_received.csv",
        decode_tx_received,
        &[concat!("LOG 2020-01-01 00:00:08 [node-2] AcceptToMemoryPool: peer=1: accepted ", hash_t!(), " (poolsz 3 txn, 4 kB)")],
        line!(),
    ),
    EKD!(
        EventKindId::TxException,
        "TxException",
        concatcp!(
            RP_SIM_PREAMBLE, "Could not generate tx for node=(?P<", CGN_TARGET, ">", CGP_NODE_TOKEN, r")\. Exception=",
            "\"(?P<", CGN_EXCEPTION, ">.+)\""
        ),
        DateTimePrecision::Seconds,
        &["timestamp", "node", "exception"],
        "tx_exceptions.csv",
        decode_tx_exception,
        &[r#"LOG 2020-01-01 00:00:09 [simcoin] [Thread-2    ] [WARNI]  Could not generate tx for node=node-2. Exception="Insufficient funds""#],
        line!(),
    ),
    EKD!(
        EventKindId::MempoolSnapshot,
        "MempoolSnapshot",
        concatcp!("Checking mempool with (?P<", CGN_TXS, ">", CGP_UINT, ") transactions and (?P<", CGN_INPUTS, ">", CGP_UINT, ") inputs"),
        DateTimePrecision::Micros,
        &["timestamp", "node", "txs", "inputs"],
        "mempool_snapshots.csv",
        decode_mempool_snapshot,
        &["LOG 2020-01-01 00:00:10.000010 [node-1] Checking mempool with 45 transactions and 36 inputs"],
        line!(),
    ),
    EKD!(
        EventKindId::RpcException,
        "RpcException",
        concatcp!(
            RP_SIM_PREAMBLE, "Node=(?P<", CGN_TARGET, ">", CGP_NODE_TOKEN, ") could not execute RPC-call=(?P<", CGN_METHOD,
            ">[a-zA-Z0-9]+) because of error=\"(?P<", CGN_EXCEPTION, r#">.*)"\. Reconnecting RPC and retrying\."#
        ),
        DateTimePrecision::Seconds,
        &["timestamp", "node", "method", "exception"],
        "rpc_exceptions.csv",
        decode_rpc_exception,
        &[r#"LOG 2020-01-01 00:00:11 [simcoin] [MainThread  ] [ERROR]  Node=node-3 could not execute RPC-call=getnewaddress because of error="Request-sent". Reconnecting RPC and retrying."#],
        line!(),
    ),
    EKD!(
        EventKindId::Tick,
        "Tick",
        concatcp!(
            RP_SIM_PREAMBLE, "The tick started at (?P<", CGN_START, ">", CGP_FLOAT, ") and took (?P<", CGN_DURATION, ">",
            CGP_FLOAT, ")s to finish"
        ),
        DateTimePrecision::Seconds,
        &["timestamp", "start", "duration"],
        "tick_infos.csv",
        decode_tick,
        &["LOG 2020-01-01 00:00:12 [simcoin] [MainThread  ] [INFO ]  The tick started at 1.5 and took 0.25s to finish"],
        line!(),
    ),
];

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// capture conversion helpers
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Return the text of named capture group `name`.
pub fn capture_str<'t>(
    captures: &Captures<'t>,
    name: &'static CaptureGroupName,
) -> Result<&'t str, FieldDecodeError> {
    match captures.name(name) {
        Some(m) => Ok(m.as_str()),
        None => Err(FieldDecodeError {
            field: name,
            value: String::new(),
            reason: String::from("capture group did not participate in the match"),
        }),
    }
}

pub fn capture_u64(
    captures: &Captures<'_>,
    name: &'static CaptureGroupName,
) -> Result<u64, FieldDecodeError> {
    let value = capture_str(captures, name)?;
    value
        .parse::<u64>()
        .map_err(|err| FieldDecodeError {
            field: name,
            value: String::from(value),
            reason: err.to_string(),
        })
}

pub fn capture_f64(
    captures: &Captures<'_>,
    name: &'static CaptureGroupName,
) -> Result<f64, FieldDecodeError> {
    let value = capture_str(captures, name)?;
    value
        .parse::<f64>()
        .map_err(|err| FieldDecodeError {
            field: name,
            value: String::from(value),
            reason: err.to_string(),
        })
}

/// Hashes are stored lowercase.
pub fn capture_hash(
    captures: &Captures<'_>,
    name: &'static CaptureGroupName,
) -> Result<String, FieldDecodeError> {
    Ok(capture_str(captures, name)?.to_ascii_lowercase())
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// decode functions referenced by `EVENT_KIND_DEFS`
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn object_seen(
    captures: &Captures<'_>,
    prelude: &LinePrelude<'_>,
) -> Result<ObjectSeen, FieldDecodeError> {
    Ok(ObjectSeen {
        timestamp: prelude.timestamp,
        node: String::from(prelude.node),
        hash: capture_hash(captures, CGN_HASH)?,
    })
}

/// The node of a simulation driver exception is the one named in the
/// message, not the one in the log-prefix.
fn node_exception(
    captures: &Captures<'_>,
    prelude: &LinePrelude<'_>,
) -> Result<NodeException, FieldDecodeError> {
    Ok(NodeException {
        timestamp: prelude.timestamp,
        node: String::from(capture_str(captures, CGN_TARGET)?),
        exception: String::from(capture_str(captures, CGN_EXCEPTION)?),
    })
}

fn decode_block_create(
    captures: &Captures<'_>,
    prelude: &LinePrelude<'_>,
) -> Result<EventRecord, FieldDecodeError> {
    Ok(EventRecord::BlockCreate(BlockCreate {
        timestamp: prelude.timestamp,
        node: String::from(prelude.node),
        total_size: capture_u64(captures, CGN_TOTAL_SIZE)?,
        txs: capture_u64(captures, CGN_TXS)?,
    }))
}

fn decode_block_received(
    captures: &Captures<'_>,
    prelude: &LinePrelude<'_>,
) -> Result<EventRecord, FieldDecodeError> {
    Ok(EventRecord::BlockReceived(object_seen(captures, prelude)?))
}

fn decode_block_reconstruct(
    captures: &Captures<'_>,
    prelude: &LinePrelude<'_>,
) -> Result<EventRecord, FieldDecodeError> {
    Ok(EventRecord::BlockReconstruct(object_seen(captures, prelude)?))
}

fn decode_block_exception(
    captures: &Captures<'_>,
    prelude: &LinePrelude<'_>,
) -> Result<EventRecord, FieldDecodeError> {
    Ok(EventRecord::BlockException(node_exception(captures, prelude)?))
}

fn decode_update_tip(
    captures: &Captures<'_>,
    prelude: &LinePrelude<'_>,
) -> Result<EventRecord, FieldDecodeError> {
    Ok(EventRecord::UpdateTip(UpdateTip {
        timestamp: prelude.timestamp,
        node: String::from(prelude.node),
        hash: capture_hash(captures, CGN_HASH)?,
        height: capture_u64(captures, CGN_HEIGHT)?,
        tx: capture_u64(captures, CGN_TX)?,
    }))
}

fn decode_peer_logic_validation(
    captures: &Captures<'_>,
    prelude: &LinePrelude<'_>,
) -> Result<EventRecord, FieldDecodeError> {
    Ok(EventRecord::PeerLogicValidation(object_seen(captures, prelude)?))
}

fn decode_tx(
    captures: &Captures<'_>,
    prelude: &LinePrelude<'_>,
) -> Result<EventRecord, FieldDecodeError> {
    Ok(EventRecord::Tx(object_seen(captures, prelude)?))
}

fn decode_tx_received(
    captures: &Captures<'_>,
    prelude: &LinePrelude<'_>,
) -> Result<EventRecord, FieldDecodeError> {
    Ok(EventRecord::TxReceived(object_seen(captures, prelude)?))
}

fn decode_tx_exception(
    captures: &Captures<'_>,
    prelude: &LinePrelude<'_>,
) -> Result<EventRecord, FieldDecodeError> {
    Ok(EventRecord::TxException(node_exception(captures, prelude)?))
}

fn decode_mempool_snapshot(
    captures: &Captures<'_>,
    prelude: &LinePrelude<'_>,
) -> Result<EventRecord, FieldDecodeError> {
    Ok(EventRecord::MempoolSnapshot(MempoolSnapshot {
        timestamp: prelude.timestamp,
        node: String::from(prelude.node),
        txs: capture_u64(captures, CGN_TXS)?,
        inputs: capture_u64(captures, CGN_INPUTS)?,
    }))
}

fn decode_rpc_exception(
    captures: &Captures<'_>,
    prelude: &LinePrelude<'_>,
) -> Result<EventRecord, FieldDecodeError> {
    Ok(EventRecord::RpcException(RpcException {
        timestamp: prelude.timestamp,
        node: String::from(capture_str(captures, CGN_TARGET)?),
        method: String::from(capture_str(captures, CGN_METHOD)?),
        exception: String::from(capture_str(captures, CGN_EXCEPTION)?),
    }))
}

/// The log-prefix node of a tick line is the simulation driver itself and is
/// dropped.
fn decode_tick(
    captures: &Captures<'_>,
    prelude: &LinePrelude<'_>,
) -> Result<EventRecord, FieldDecodeError> {
    Ok(EventRecord::Tick(Tick {
        timestamp: prelude.timestamp,
        start: capture_f64(captures, CGN_START)?,
        duration: capture_f64(captures, CGN_DURATION)?,
    }))
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// EventKind and EventKindRegistry
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Build the full recognition regex pattern of `ekd` from the log-prefix
/// template `log_prefix`.
pub fn regex_pattern_full(
    log_prefix: &str,
    ekd: &EventKindDef,
) -> Result<String, ConfigError> {
    if !log_prefix.contains(DATETIME_PLACEHOLDER) {
        return Err(ConfigError::MissingDatetimePlaceholder(String::from(log_prefix)));
    }
    let datetime_group = format!("(?P<{}>{})", CGN_DATETIME, ekd.precision.regex_pattern());
    let prefix = log_prefix
        .strip_prefix('^')
        .unwrap_or(log_prefix)
        .replacen(DATETIME_PLACEHOLDER, &datetime_group, 1);

    Ok(format!("^{}{}$", prefix, ekd.pattern))
}

/// A run-time ready event kind; an [`EventKindDef`] with its compiled
/// recognition regex.
#[derive(Clone, Debug)]
pub struct EventKind {
    def: &'static EventKindDef,
    regex: Regex,
}

impl EventKind {
    pub fn new(
        def: &'static EventKindDef,
        log_prefix: &str,
    ) -> Result<EventKind, ConfigError> {
        defn!("({:?}, {:?})", def.name, log_prefix);
        let pattern = regex_pattern_full(log_prefix, def)?;
        defo!("pattern {:?}", pattern);
        let regex = match Regex::new(&pattern) {
            Ok(val) => val,
            Err(err) => {
                defx!("Regex::new failed {}", err);
                return Err(ConfigError::Regex { kind: def.name, err });
            }
        };
        if !regex
            .capture_names()
            .any(|cgn| cgn == Some(CGN_NODE))
        {
            defx!("missing capture group {:?}", CGN_NODE);
            return Err(ConfigError::MissingNodeGroup(String::from(log_prefix)));
        }
        defx!();

        Ok(EventKind { def, regex })
    }

    pub const fn id(&self) -> EventKindId {
        self.def.id
    }

    pub const fn name(&self) -> &'static str {
        self.def.name
    }

    pub const fn columns(&self) -> &'static [&'static str] {
        self.def.columns
    }

    pub const fn file_name(&self) -> &'static str {
        self.def.file_name
    }

    pub const fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Run the kind's decode function on the captures of a matching line.
    pub fn decode(
        &self,
        captures: &Captures<'_>,
        prelude: &LinePrelude<'_>,
    ) -> Result<EventRecord, FieldDecodeError> {
        (self.def.decode)(captures, prelude)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.def.name)
    }
}

/// The ordered collection of [`EventKind`]s used by one pipeline run.
/// Read-only after construction.
#[derive(Clone, Debug)]
pub struct EventKindRegistry {
    kinds: Vec<EventKind>,
}

pub type EventKinds = Vec<EventKind>;

impl EventKindRegistry {
    /// Compile every entry of [`EVENT_KIND_DEFS`] with the configured
    /// log-prefix.
    pub fn new(config: &ParserConfig) -> Result<EventKindRegistry, ConfigError> {
        defn!("({:?})", config.log_prefix);
        let mut kinds = EventKinds::with_capacity(EVENT_KIND_COUNT);
        for def in EVENT_KIND_DEFS.iter() {
            kinds.push(EventKind::new(def, &config.log_prefix)?);
        }
        defx!("{} kinds", kinds.len());

        Ok(EventKindRegistry { kinds })
    }

    /// Keep only the kinds named in `names` (case-insensitive), in registry
    /// order. Returns the first unknown name as `Err`.
    pub fn select(
        self,
        names: &[String],
    ) -> Result<EventKindRegistry, String> {
        defn!("({:?})", names);
        for name in names.iter() {
            if self.get_by_name(name).is_none() {
                defx!("unknown kind {:?}", name);
                return Err(name.clone());
            }
        }
        let kinds: EventKinds = self
            .kinds
            .into_iter()
            .filter(|kind| names.iter().any(|name| name.eq_ignore_ascii_case(kind.name())))
            .collect();
        defx!("{} kinds", kinds.len());

        Ok(EventKindRegistry { kinds })
    }

    pub fn get_by_name(
        &self,
        name: &str,
    ) -> Option<&EventKind> {
        self.kinds
            .iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }

    pub fn get(
        &self,
        id: EventKindId,
    ) -> Option<&EventKind> {
        self.kinds
            .iter()
            .find(|kind| kind.id() == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EventKind> {
        self.kinds.iter()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl<'a> IntoIterator for &'a EventKindRegistry {
    type Item = &'a EventKind;
    type IntoIter = std::slice::Iter<'a, EventKind>;

    fn into_iter(self) -> Self::IntoIter {
        self.kinds.iter()
    }
}
