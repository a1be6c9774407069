//! rtbench: 1-D Reactive-Transport Benchmark Comparison
//!
//! Extracts one-dimensional concentration profiles from the outputs of
//! several reactive-transport solvers and overlays them on a single figure.
//!
//! # Architecture
//!
//! rtbench is built on two core principles:
//!
//! 1. **Separation of Reading and Orchestration**
//!    - Readers turn one solver output into a profile (what the data is)
//!    - The benchmark decides which outputs to run, read and draw (how they are compared)
//!
//! 2. **Configuration as Data**
//!    - A benchmark is a table of source descriptors
//!    - Adding a solver variant means pushing one descriptor
//!    - The simulator run step is an injected trait
//!
//! # Quick Start
//!
//! ```rust
//! use plotters::prelude::*;
//! use rtbench::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dir = tempfile::TempDir::new()?;
//! std::fs::write(dir.path().join("totcon5.out"), "header\n0.5 1e-3\n1.5 5e-4\n")?;
//!
//! // 1. Describe the benchmark
//! let config = BenchmarkConfig::new("tracer")
//!     .base_dir(dir.path())
//!     .output_dir(dir.path())
//!     .source(SourceDescriptor::new(
//!         "CrunchFlow GIMRT",
//!         CurveStyle::dashed(MAGENTA),
//!         SourceFormat::Table {
//!             dir: ".".into(),
//!             file_name: "totcon5.out".to_string(),
//!             comp: 0,
//!             ignore: 1,
//!         },
//!     ));
//!
//! // 2. Run it (no source here needs the simulator)
//! let report = run_benchmark(&config, &ProcessRunner::default())?;
//!
//! // 3. Inspect the report
//! assert_eq!(report.plotted_labels(), ["CrunchFlow GIMRT"]);
//! assert!(report.image.ends_with("tracer_1d.png"));
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`series`]: Position/value profiles
//! - [`readers`]: Solver output readers (Amanzi-U, PFloTran, AMReX plot files, text tables)
//! - [`benchmark`]: Benchmark configuration, simulator runs and orchestration
//! - [`output`]: Comparison figure

pub mod series;
pub mod readers;

pub mod benchmark;
pub mod output;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //!
    //! use rtbench::prelude::*;
    //! ```
    pub use crate::series::SampleSeries;
    pub use crate::readers::{ReadError, TimeSelector};
    pub use crate::benchmark::{run_benchmark,
                               BenchmarkConfig,
                               BenchmarkError,
                               BenchmarkReport,
                               FailurePolicy,
                               ProcessRunner,
                               RunRequest,
                               SimulationRunner,
                               SourceDescriptor,
                               SourceFormat,
                               SourceOutcome};
    pub use crate::output::{CurveStyle, LineKind, PlotConfig};
}
