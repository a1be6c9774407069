//! PFloTran single-file HDF5 output
//!
//! Layout read here:
//!
//! ```text
//! 1d-<root>.h5
//! ├── Coordinates/
//! │   └── X [m]                 node positions (nx + 1)
//! └── Time:  5.00000E+01 y/     one group per output time
//!     └── Total_Tracer [M]      (nx, ny, nz) cell values
//! ```

use std::path::Path;

use super::{open_hdf5, read_flat, ReadError, TimeSelector};
use crate::series::{cell_centers, SampleSeries};

/// Dataset holding the x node positions
pub const X_COORDINATES: &str = "Coordinates/X [m]";

/// Prefix of every time-snapshot group
const TIME_PREFIX: &str = "Time:";

/// Read one profile from a PFloTran HDF5 file
///
/// Cell centres are midpoints of the `X [m]` nodes; the value array is
/// flattened in storage order.
///
/// # Errors
///
/// - [`ReadError::NotFound`] if the file does not exist
/// - [`ReadError::Hdf5`] for a missing group or dataset
/// - [`ReadError::NoSnapshot`] for `TimeSelector::Latest` on a file without time groups
/// - [`ReadError::LengthMismatch`] when coordinates and values disagree
pub fn read_pflotran(
    path: impl AsRef<Path>,
    time: &TimeSelector,
    field: &str,
) -> Result<SampleSeries, ReadError> {
    let path = path.as_ref();
    let file = open_hdf5(path)?;

    let nodes = read_flat(&file, path, X_COORDINATES)?;
    let centers = cell_centers(&nodes);

    let group = match time {
        TimeSelector::Label(label) => label.clone(),
        TimeSelector::Latest => latest_time_group(&file, path)?,
    };

    log::debug!("reading {}/{} from {}", group, field, path.display());
    let values = read_flat(&file, path, &format!("{}/{}", group, field))?;

    SampleSeries::new(centers, values)
}

/// Parse the time value out of a `"Time:  5.00000E+01 y"` group name
pub fn parse_time_group(name: &str) -> Option<f64> {
    name.strip_prefix(TIME_PREFIX)?
        .split_whitespace()
        .next()?
        .parse()
        .ok()
}

fn latest_time_group(file: &hdf5::File, path: &Path) -> Result<String, ReadError> {
    let names = file.member_names().map_err(|e| ReadError::hdf5(path, e))?;

    names
        .into_iter()
        .filter_map(|name| parse_time_group(&name).map(|t| (t, name)))
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, name)| name)
        .ok_or_else(|| ReadError::NoSnapshot { path: path.to_path_buf() })
}

// =================================================================================================
// Tests
// =================================================================================================
