// src/debug/helpers.rs

//! Miscellaneous helper functions for testing.

use crate::common::FPath;
use crate::readers::helpers::path_to_fpath;

#[allow(unused_imports)] // XXX: clippy wrongly marks this as unused
use std::io::Write; // for `NamedTempFile.write_all`

use ::lazy_static::lazy_static;
use ::si_trace_print::{defo, defñ};

#[doc(hidden)]
pub use ::tempfile::tempdir;
#[doc(hidden)]
pub use ::tempfile::NamedTempFile;
#[doc(hidden)]
pub use ::tempfile::TempDir;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// temporary file helper functions
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// NamedTempFile and TempDir instances default to this name prefix.
pub const STR_TEMPFILE_PREFIX: &str = "tmp-sx-test-";

lazy_static! {
    pub static ref STRING_TEMPFILE_PREFIX: String = {
        defñ!("lazy_static! STRING_TEMPFILE_PREFIX");

        String::from(STR_TEMPFILE_PREFIX)
    };
}

/// Small helper function for copying `NamedTempFile` path to a `FPath`.
pub fn ntf_fpath(ntf: &NamedTempFile) -> FPath {
    path_to_fpath(ntf.path())
}

/// Testing helper function to write a `str` to a temporary file.
pub fn create_temp_file(data: &str) -> NamedTempFile {
    let mut ntf = match ::tempfile::Builder::new()
        // use known prefix for easier cleanup
        .prefix::<str>(&STRING_TEMPFILE_PREFIX)
        .tempfile()
    {
        Ok(val) => val,
        Err(err) => {
            panic!("NamedTempFile::new() return Err {}", err);
        }
    };
    match ntf.write_all(data.as_bytes()) {
        Ok(_) => {}
        Err(err) => {
            panic!("NamedTempFile::write_all() return Err {}", err);
        }
    }
    defo!("created {:?} with {} bytes", ntf.path(), data.len());

    ntf
}

/// Testing helper function to create a temporary directory, typically used as
/// an output directory.
pub fn create_temp_dir() -> TempDir {
    match ::tempfile::Builder::new()
        .prefix::<str>(&STRING_TEMPFILE_PREFIX)
        .tempdir()
    {
        Ok(val) => val,
        Err(err) => {
            panic!("tempfile::Builder::new().tempdir() return Err {}", err);
        }
    }
}

/// Testing helper function to read an entire file, panics on failure.
pub fn read_file(path: &std::path::Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(val) => val,
        Err(err) => {
            panic!("read_to_string({:?}) return Err {}", path, err);
        }
    }
}
