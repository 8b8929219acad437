// src/printer/csvwriter.rs

//! Write records of one event kind to a semicolon-delimited text file.
//!
//! The format is
//!
//! ```text
//! column1;column2;column3\r\n
//! value1;value2;value3\r\n
//! ```
//!
//! Values are written with their `Display` form and are never quoted or
//! escaped. A value holding the delimiter would corrupt its row; the log
//! formats recognized do not produce such values.
//!
//! The destination is always replaced as a whole. Data is written to a
//! temporary file in the destination directory which is then renamed over
//! the destination, so a failed write never leaves a partial file behind.

use crate::common::{Count, FPath, CSV_DELIMITER, CSV_LINE_END};
use crate::data::event::CsvRow;
use crate::readers::helpers::{file_name_tagged, path_to_fpath};

use std::io::{BufWriter, Error, ErrorKind, Result, Write};
use std::path::{Path, PathBuf};

use ::itertools::Itertools; // for `join`
use ::more_asserts::debug_assert_le;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};
use ::tempfile::NamedTempFile;

/// Prefix of the temporary file created next to the destination.
const TEMPFILE_PREFIX: &str = ".sx-";

/// Destination path of an event kind's output file, `file_name` tagged with
/// `tag`, within directory `dir`.
pub fn csv_path(
    dir: &Path,
    file_name: &str,
    tag: &str,
) -> PathBuf {
    dir.join(file_name_tagged(file_name, tag))
}

/// Render the header line, including line ending.
pub fn csv_header(columns: &[&str]) -> String {
    let mut line: String = columns.iter().join(CSV_DELIMITER);
    line.push_str(CSV_LINE_END);

    line
}

/// Render one row, including line ending.
///
/// Panics in debug builds if the row does not have `columns_len` fields.
pub fn csv_row<R: CsvRow>(
    row: &R,
    columns_len: usize,
) -> String {
    let fields = row.csv_fields();
    debug_assert_eq!(fields.len(), columns_len, "row field count does not equal column count");
    let mut line: String = fields.iter().join(CSV_DELIMITER);
    line.push_str(CSV_LINE_END);

    line
}

/// Write `columns` and then every item of `rows` to file `path`, replacing
/// any existing file. Returns the count of rows written.
pub fn write_csv<R: CsvRow>(
    path: &Path,
    columns: &[&str],
    rows: &[R],
) -> Result<Count> {
    defn!("({:?}, {:?}, {} rows)", path, columns, rows.len());
    if columns.is_empty() {
        defx!("no columns");
        return Err(Error::new(
            ErrorKind::InvalidInput,
            format!("no columns given for {:?}", path),
        ));
    }
    let dir: &Path = match path.parent() {
        Some(val) if !val.as_os_str().is_empty() => val,
        _ => Path::new("."),
    };
    let ntf: NamedTempFile = match ::tempfile::Builder::new()
        .prefix(TEMPFILE_PREFIX)
        .tempfile_in(dir)
    {
        Ok(val) => val,
        Err(err) => {
            defx!("tempfile_in({:?}) failed {}", dir, err);
            return Err(Error::new(
                err.kind(),
                format!("cannot create a file in directory {:?}: {}", dir, err),
            ));
        }
    };

    let mut count: Count = 0;
    {
        let mut writer = BufWriter::new(ntf.as_file());
        writer.write_all(csv_header(columns).as_bytes())?;
        for row in rows.iter() {
            writer.write_all(csv_row(row, columns.len()).as_bytes())?;
            count += 1;
        }
        writer.flush()?;
    }
    debug_assert_le!(count as usize, rows.len());

    // `persist` replaces `path` with a rename, dropping `ntf` on failure
    // removes the temporary file
    if let Err(err) = ntf.persist(path) {
        defx!("persist({:?}) failed {}", path, err.error);
        return Err(Error::new(
            err.error.kind(),
            format!("cannot write {:?}: {}", path, err.error),
        ));
    }
    defx!("wrote {} rows to {:?}", count, path);

    Ok(count)
}

/// [`write_csv`] returning the written path as an `FPath`.
pub fn write_csv_fpath<R: CsvRow>(
    path: &Path,
    columns: &[&str],
    rows: &[R],
) -> Result<(FPath, Count)> {
    let count = write_csv(path, columns, rows)?;

    Ok((path_to_fpath(path), count))
}
