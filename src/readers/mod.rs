// src/readers/mod.rs

//! "Readers" for _sxlib_.
//!
//! ## Overview of readers
//!
//! * A [`ParseDriver`] runs one [`LogScanner`] per event kind on a
//!   [`WorkerPool`].
//! * A `LogScanner` reads every line of the aggregated log and passes it to
//!   a [`LineMatcher`].
//! * A `LineMatcher` tests one line against one [`EventKind`] and decodes a
//!   match into an [`EventRecord`].
//!
//! <br/>
//!
//! Every `LogScanner` reads the whole file independently. The kinds share
//! only the read-only source file and never write the same output file.
//!
//! [`ParseDriver`]: crate::readers::parsedriver::ParseDriver
//! [`LogScanner`]: crate::readers::logscanner::LogScanner
//! [`WorkerPool`]: crate::readers::workerpool::WorkerPool
//! [`LineMatcher`]: crate::readers::linematcher::LineMatcher
//! [`EventKind`]: crate::data::eventkind::EventKind
//! [`EventRecord`]: crate::data::event::EventRecord

pub mod helpers;
pub mod linematcher;
pub mod logscanner;
pub mod parsedriver;
pub mod summary;
pub mod workerpool;
