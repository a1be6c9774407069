//! Format readers for solver output
//!
//! Each reader is a stateless function from a path (plus time and field
//! selectors) to a [`SampleSeries`](crate::series::SampleSeries). Files are
//! opened and closed within the call.
//!
//! # Organization
//!
//! | Solver output | Module | Function |
//! |---------------|--------|----------|
//! | Amanzi-U mesh + data HDF5 | [`amanzi`] | [`read_amanzi_unstructured`] |
//! | PFloTran single HDF5 file | [`pflotran`] | [`read_pflotran`] |
//! | Amanzi-S AMReX plot file | [`plotfile`] | [`read_plotfile`] |
//! | CrunchFlow text table | [`tabular`] | [`read_table`] |
//!
//! # Example
//!
//! ```rust,ignore
//! use rtbench::readers::{read_table, read_pflotran, TimeSelector};
//!
//! let gimrt = read_table("crunchflow/gimrt", "totcon5.out", 0, 4)?;
//! let pflo = read_pflotran(
//!     "pflotran/1d-tracer.h5",
//!     &TimeSelector::label("Time:  5.00000E+01 y"),
//!     "Total_Tracer [M]",
//! )?;
//! ```

pub mod amanzi;
pub mod error;
pub mod pflotran;
pub mod plotfile;
pub mod tabular;

pub use amanzi::{read_amanzi_unstructured, read_field_values, read_mesh_centers};
pub use error::ReadError;
pub use pflotran::read_pflotran;
pub use plotfile::{find_latest_plotfile, read_plotfile};
pub use tabular::read_table;

use std::fmt;
use std::path::Path;

/// Which snapshot of a time-keyed output to read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeSelector {
    /// Exact key as written by the solver (e.g. `"71"` or `"Time:  5.00000E+01 y"`)
    Label(String),

    /// Last snapshot present in the file
    Latest,
}

impl TimeSelector {
    pub fn label(label: impl Into<String>) -> Self {
        Self::Label(label.into())
    }
}

impl fmt::Display for TimeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Label(label) => write!(f, "'{}'", label),
            Self::Latest => write!(f, "latest"),
        }
    }
}

/// Open an HDF5 file read-only, reporting a missing file as [`ReadError::NotFound`]
pub(crate) fn open_hdf5(path: &Path) -> Result<hdf5::File, ReadError> {
    if !path.is_file() {
        return Err(ReadError::NotFound(path.to_path_buf()));
    }
    log::debug!("opening {}", path.display());
    hdf5::File::open(path).map_err(|e| ReadError::hdf5(path, e))
}

/// Read any-rank `f64` dataset in storage order
pub(crate) fn read_flat(
    file: &hdf5::File,
    path: &Path,
    dataset: &str,
) -> Result<Vec<f64>, ReadError> {
    file.dataset(dataset)
        .and_then(|ds| ds.read_raw::<f64>())
        .map_err(|e| ReadError::hdf5(path, e))
}
