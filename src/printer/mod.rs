// src/printer/mod.rs

//! The `printer` module writes decoded event records to output files.

pub mod csvwriter;
