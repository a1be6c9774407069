//! Output of benchmark comparisons
//!
//! The only artefact a benchmark run produces is the comparison figure,
//! written as PNG (or SVG when the file name asks for it).
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs              ← This file
//! └── visualization/      ← Plots and graphics
//!     ├── mod.rs
//!     ├── config.rs
//!     └── comparison.rs
//! ```

pub mod visualization;

// Re-export commonly used items for convenience
pub use visualization::{
    plot_profile_comparison,
    Curve,
    CurveStyle,
    LineKind,
    PlotConfig,
};
