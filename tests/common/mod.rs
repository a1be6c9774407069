//! Common utilities for integration tests

pub mod fixtures;
pub mod runners;

// Re-export commonly used items
pub use fixtures::{
    centers,
    front,
    write_amanzi,
    write_pflotran,
    write_plotfile,
    write_table,
    DX,
    N_CELLS,
};
pub use runners::{FailingRunner, RecordingRunner};
