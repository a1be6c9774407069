//! Errors raised while extracting a profile from solver output

use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn one solver output into a [`SampleSeries`](crate::series::SampleSeries)
///
/// The variants keep the offending path so a skipped benchmark curve can be
/// traced back to the file that caused it.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("file or directory not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("HDF5 error in {}: {source}", .path.display())]
    Hdf5 {
        path: PathBuf,
        #[source]
        source: hdf5::Error,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: cannot skip {ignore} header lines, file has {available}", .path.display())]
    HeaderOverrun {
        path: PathBuf,
        ignore: usize,
        available: usize,
    },

    #[error("{}:{line}: expected at least {expected} columns, found {found}", .path.display())]
    ShortLine {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("{}:{line}: '{token}' is not a number", .path.display())]
    BadNumber {
        path: PathBuf,
        line: usize,
        token: String,
    },

    #[error("mesh {} has {found} distinct nodes, at least 2 are required", .path.display())]
    TooFewNodes { path: PathBuf, found: usize },

    #[error("length mismatch: {positions} positions versus {values} values")]
    LengthMismatch { positions: usize, values: usize },

    #[error("no time snapshot found in {}", .path.display())]
    NoSnapshot { path: PathBuf },

    #[error("no plot file '{root}<step>' in {}", .dir.display())]
    NoPlotfile { dir: PathBuf, root: String },

    #[error("component '{component}' not found in {}", .path.display())]
    MissingComponent { path: PathBuf, component: String },

    #[error("level {requested} requested but {} has {available} level(s)", .path.display())]
    LevelOutOfRange {
        path: PathBuf,
        requested: usize,
        available: usize,
    },

    #[error("malformed plot file {}: {reason}", .path.display())]
    Plotfile { path: PathBuf, reason: String },
}

impl ReadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub(crate) fn hdf5(path: impl Into<PathBuf>, source: hdf5::Error) -> Self {
        Self::Hdf5 { path: path.into(), source }
    }

    pub(crate) fn plotfile(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Plotfile { path: path.into(), reason: reason.into() }
    }

    /// True when the error only says the output was never written
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::NoPlotfile { .. })
    }
}
