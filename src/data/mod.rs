// src/data/mod.rs

//! The `data` module is the catalogue of event kinds and the data
//! containers for decoded events.
//!
//! ## Definitions of data
//!
//! #### Aggregated log
//!
//! One text file holding the log lines of every simulated node and of the
//! simulator itself. Each line is handled on its own.
//!
//! #### Event kind
//!
//! A named category of log line. An [`EventKindDef`] gives its pattern, the
//! precision of its datetime, its output columns, its output file name and
//! its decode function.
//!
//! #### Event record
//!
//! The fields decoded from one matching line, an [`EventRecord`]. The record
//! has exactly as many fields as its kind has columns, in column order.
//!
//! [`EventKindDef`]: crate::data::eventkind::EventKindDef
//! [`EventRecord`]: crate::data::event::EventRecord

pub mod datetime;
pub mod event;
pub mod eventkind;
