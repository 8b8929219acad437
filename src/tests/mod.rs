// src/tests/mod.rs

//! Tests for _sxlib_.
//!
//! Tests are placed at `src/tests/`, inside the `sxlib`. This allows tests
//! crate-internal visibility while keeping them apart from the library
//! modules.
//!
//! Tests placed at top-level path `tests/` only use the public API.

pub mod common;
pub mod eventkind_tests;
