//! Whitespace-delimited text tables (CrunchFlow `totcon*.out`)
//!
//! ```text
//! TITLE
//! Total concentrations at time 50 yrs
//! VARIABLES = "Distance (m)" "Tracer"
//! ZONE I= 100
//!   0.5000E-01  0.9999E+00
//!   0.1500E+00  0.9998E+00
//! ```
//!
//! The header is discarded by count, never inspected. Every line after it
//! must hold a position in column 0 and enough value columns for the
//! requested component.

use std::fs;
use std::path::Path;

use super::ReadError;
use crate::series::SampleSeries;

/// Read `(column 0, column comp + 1)` from every data line of `dir/file_name`
///
/// # Arguments
///
/// * `dir` - Directory holding the table
/// * `file_name` - Table file name (e.g. `"totcon5.out"`)
/// * `comp` - Zero-based component index; the value is read from column `comp + 1`
/// * `ignore` - Number of leading lines discarded unconditionally
///
/// # Errors
///
/// - [`ReadError::NotFound`] / [`ReadError::Io`] if the file cannot be read
/// - [`ReadError::HeaderOverrun`] if the file has fewer than `ignore` lines
/// - [`ReadError::ShortLine`] for a data line lacking the value column
/// - [`ReadError::BadNumber`] for a token that is not a float
pub fn read_table(
    dir: impl AsRef<Path>,
    file_name: &str,
    comp: usize,
    ignore: usize,
) -> Result<SampleSeries, ReadError> {
    let path = dir.as_ref().join(file_name);
    if !path.is_file() {
        return Err(ReadError::NotFound(path));
    }

    log::debug!("opening {}", path.display());
    let text = fs::read_to_string(&path).map_err(|e| ReadError::io(&path, e))?;
    let lines: Vec<&str> = text.lines().collect();

    if ignore > lines.len() {
        return Err(ReadError::HeaderOverrun {
            path,
            ignore,
            available: lines.len(),
        });
    }

    let value_column = comp + 1;
    let mut positions = Vec::with_capacity(lines.len() - ignore);
    let mut values = Vec::with_capacity(lines.len() - ignore);

    for (offset, line) in lines[ignore..].iter().enumerate() {
        let line_no = ignore + offset + 1;
        let columns: Vec<&str> = line.split_whitespace().collect();

        if columns.len() <= value_column {
            return Err(ReadError::ShortLine {
                path,
                line: line_no,
                expected: value_column + 1,
                found: columns.len(),
            });
        }

        positions.push(parse_float(&path, line_no, columns[0])?);
        values.push(parse_float(&path, line_no, columns[value_column])?);
    }

    SampleSeries::new(positions, values)
}

fn parse_float(path: &Path, line: usize, token: &str) -> Result<f64, ReadError> {
    token.parse::<f64>().map_err(|_| ReadError::BadNumber {
        path: path.to_path_buf(),
        line,
        token: token.to_string(),
    })
}

// =================================================================================================
// Tests
// =================================================================================================
