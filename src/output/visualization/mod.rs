//! Visualization of extracted benchmark profiles
//!
//! This module draws the comparison figure using the `plotters` library.
//!
//! # Organization
//!
//! - **config**: Figure configuration (`PlotConfig`) and per-curve style (`CurveStyle`)
//! - **comparison**: Overlay of several distance profiles on one set of axes
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use rtbench::output::visualization::{plot_profile_comparison, Curve, CurveStyle, PlotConfig};
//! use plotters::prelude::*;
//!
//! let config = PlotConfig::profile("Amanzi 1D Tracer Benchmark at 50 years");
//! let curves = [
//!     Curve::new("PFloTran", &pflotran, CurveStyle::solid(MAGENTA)),
//!     Curve::new("CrunchFlow OS3D", &os3d, CurveStyle::markers(MAGENTA)),
//! ];
//! plot_profile_comparison(&curves, Path::new("tracer_1d.png"), Some(&config))?;
//! ```

pub mod config;
pub mod comparison;

pub use config::{title_case, CurveStyle, LineKind, PlotConfig, NO_TITLE};

pub use comparison::{plot_profile_comparison, Curve, PlotRange};
