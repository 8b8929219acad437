// src/lib.rs

//! _sxlib_ extracts the events of a simulated blockchain network run from
//! one aggregated log file into one `;`-delimited table per event kind.
//!
//! See [`readers`] for an overview.

pub mod common;
pub mod data;
pub mod debug;
pub mod printer;
pub mod readers;
#[cfg(test)]
pub mod tests;
