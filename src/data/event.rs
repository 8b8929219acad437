// src/data/event.rs

//! Typed event records decoded from single log lines.
//!
//! Each [`EventKind`] decodes to exactly one [`EventRecord`] variant.
//! Variants share field layouts by composition ([`ObjectSeen`],
//! [`NodeException`]) rather than by a common base type.
//!
//! [`EventKind`]: crate::data::eventkind::EventKind

use crate::data::datetime::Timestamp;
use crate::data::eventkind::EventKindId;

use std::fmt;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// FieldValue
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One output field of a record, borrowed from the record.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldValue<'a> {
    Float(f64),
    Int(u64),
    Str(&'a str),
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // `Debug` keeps the fractional part of whole values, e.g. `2.0`
            FieldValue::Float(val) => write!(f, "{:?}", val),
            FieldValue::Int(val) => write!(f, "{}", val),
            FieldValue::Str(val) => f.write_str(val),
        }
    }
}

/// Anything that can be rendered as one row of a delimited table.
pub trait CsvRow {
    /// Fields in declared column order.
    fn csv_fields(&self) -> Vec<FieldValue<'_>>;
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// record payloads
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A node created a new block template.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockCreate {
    pub timestamp: Timestamp,
    pub node: String,
    pub total_size: u64,
    pub txs: u64,
}

/// A node saw a block or transaction identified by `hash`.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectSeen {
    pub timestamp: Timestamp,
    pub node: String,
    pub hash: String,
}

/// The simulation driver failed to make `node` do something.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeException {
    pub timestamp: Timestamp,
    pub node: String,
    pub exception: String,
}

/// A node moved its chain tip.
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateTip {
    pub timestamp: Timestamp,
    pub node: String,
    pub hash: String,
    pub height: u64,
    pub tx: u64,
}

/// A node checked its mempool.
#[derive(Clone, Debug, PartialEq)]
pub struct MempoolSnapshot {
    pub timestamp: Timestamp,
    pub node: String,
    pub txs: u64,
    pub inputs: u64,
}

/// An RPC call from the simulation driver to `node` failed.
#[derive(Clone, Debug, PartialEq)]
pub struct RpcException {
    pub timestamp: Timestamp,
    pub node: String,
    pub method: String,
    pub exception: String,
}

/// One simulation tick. Not attributed to a node.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    pub timestamp: Timestamp,
    pub start: f64,
    pub duration: f64,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// EventRecord
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A decoded occurrence of one event kind.
#[derive(Clone, Debug, PartialEq)]
pub enum EventRecord {
    BlockCreate(BlockCreate),
    BlockReceived(ObjectSeen),
    BlockReconstruct(ObjectSeen),
    BlockException(NodeException),
    UpdateTip(UpdateTip),
    PeerLogicValidation(ObjectSeen),
    Tx(ObjectSeen),
    TxReceived(ObjectSeen),
    TxException(NodeException),
    MempoolSnapshot(MempoolSnapshot),
    RpcException(RpcException),
    Tick(Tick),
}

pub type EventRecords = Vec<EventRecord>;

impl EventRecord {
    /// The event kind that produces this variant.
    pub const fn kind_id(&self) -> EventKindId {
        match self {
            EventRecord::BlockCreate(_) => EventKindId::BlockCreate,
            EventRecord::BlockReceived(_) => EventKindId::BlockReceived,
            EventRecord::BlockReconstruct(_) => EventKindId::BlockReconstruct,
            EventRecord::BlockException(_) => EventKindId::BlockException,
            EventRecord::UpdateTip(_) => EventKindId::UpdateTip,
            EventRecord::PeerLogicValidation(_) => EventKindId::PeerLogicValidation,
            EventRecord::Tx(_) => EventKindId::Tx,
            EventRecord::TxReceived(_) => EventKindId::TxReceived,
            EventRecord::TxException(_) => EventKindId::TxException,
            EventRecord::MempoolSnapshot(_) => EventKindId::MempoolSnapshot,
            EventRecord::RpcException(_) => EventKindId::RpcException,
            EventRecord::Tick(_) => EventKindId::Tick,
        }
    }

    pub fn timestamp(&self) -> Timestamp {
        match self {
            EventRecord::BlockCreate(r) => r.timestamp,
            EventRecord::BlockReceived(r)
            | EventRecord::BlockReconstruct(r)
            | EventRecord::PeerLogicValidation(r)
            | EventRecord::Tx(r)
            | EventRecord::TxReceived(r) => r.timestamp,
            EventRecord::BlockException(r) | EventRecord::TxException(r) => r.timestamp,
            EventRecord::UpdateTip(r) => r.timestamp,
            EventRecord::MempoolSnapshot(r) => r.timestamp,
            EventRecord::RpcException(r) => r.timestamp,
            EventRecord::Tick(r) => r.timestamp,
        }
    }

    /// The originating node. `None` only for [`EventRecord::Tick`].
    pub fn node(&self) -> Option<&str> {
        match self {
            EventRecord::BlockCreate(r) => Some(&r.node),
            EventRecord::BlockReceived(r)
            | EventRecord::BlockReconstruct(r)
            | EventRecord::PeerLogicValidation(r)
            | EventRecord::Tx(r)
            | EventRecord::TxReceived(r) => Some(&r.node),
            EventRecord::BlockException(r) | EventRecord::TxException(r) => Some(&r.node),
            EventRecord::UpdateTip(r) => Some(&r.node),
            EventRecord::MempoolSnapshot(r) => Some(&r.node),
            EventRecord::RpcException(r) => Some(&r.node),
            EventRecord::Tick(_) => None,
        }
    }
}

impl CsvRow for EventRecord {
    fn csv_fields(&self) -> Vec<FieldValue<'_>> {
        match self {
            EventRecord::BlockCreate(r) => vec![
                FieldValue::Float(r.timestamp),
                FieldValue::Str(&r.node),
                FieldValue::Int(r.total_size),
                FieldValue::Int(r.txs),
            ],
            EventRecord::BlockReceived(r)
            | EventRecord::BlockReconstruct(r)
            | EventRecord::PeerLogicValidation(r)
            | EventRecord::Tx(r)
            | EventRecord::TxReceived(r) => vec![
                FieldValue::Float(r.timestamp),
                FieldValue::Str(&r.node),
                FieldValue::Str(&r.hash),
            ],
            EventRecord::BlockException(r) | EventRecord::TxException(r) => vec![
                FieldValue::Float(r.timestamp),
                FieldValue::Str(&r.node),
                FieldValue::Str(&r.exception),
            ],
            EventRecord::UpdateTip(r) => vec![
                FieldValue::Float(r.timestamp),
                FieldValue::Str(&r.node),
                FieldValue::Str(&r.hash),
                FieldValue::Int(r.height),
                FieldValue::Int(r.tx),
            ],
            EventRecord::MempoolSnapshot(r) => vec![
                FieldValue::Float(r.timestamp),
                FieldValue::Str(&r.node),
                FieldValue::Int(r.txs),
                FieldValue::Int(r.inputs),
            ],
            EventRecord::RpcException(r) => vec![
                FieldValue::Float(r.timestamp),
                FieldValue::Str(&r.node),
                FieldValue::Str(&r.method),
                FieldValue::Str(&r.exception),
            ],
            EventRecord::Tick(r) => vec![
                FieldValue::Float(r.timestamp),
                FieldValue::Float(r.start),
                FieldValue::Float(r.duration),
            ],
        }
    }
}
