// src/readers/helpers.rs

//! Miscellaneous helper functions for _Readers_.

use crate::common::FPath;

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Return the basename of an `FPath`.
pub fn basename(path: &FPath) -> FPath {
    let mut riter = path.rsplit(std::path::MAIN_SEPARATOR);

    FPath::from(riter.next().unwrap_or(""))
}

/// Helper function for a slightly annoying set of calls.
pub fn path_to_fpath(path: &std::path::Path) -> FPath {
    // `PathBuf` to `String` https://stackoverflow.com/q/37388107/471376
    (*(path.to_string_lossy())).to_string()
}

/// Helper function for completeness.
pub fn fpath_to_path(path: &FPath) -> &std::path::Path {
    std::path::Path::new(path)
}

/// Remove one trailing `"\n"` or `"\r\n"` from `line`.
pub fn trim_line_end(line: &str) -> &str {
    match line.strip_suffix('\n') {
        Some(s) => s.strip_suffix('\r').unwrap_or(s),
        None => line,
    }
}

/// Insert the run `tag` in front of the extension of `file_name`,
/// e.g. `("txs.csv", "run1")` returns `"txs_run1.csv"`.
/// An empty `tag` returns `file_name` unchanged.
pub fn file_name_tagged(file_name: &str, tag: &str) -> String {
    defñ!("({:?}, {:?})", file_name, tag);
    if tag.is_empty() {
        return String::from(file_name);
    }
    match file_name.rfind('.') {
        Some(at) if at > 0 => format!("{}_{}{}", &file_name[..at], tag, &file_name[at..]),
        _ => format!("{}_{}", file_name, tag),
    }
}
