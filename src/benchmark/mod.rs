//! Benchmark definition and execution
//!
//! # Organization
//!
//! - **config**: `BenchmarkConfig` and the `tracer_1d` preset
//! - **source**: one configured curve (`SourceDescriptor`, `SourceFormat`, `FailurePolicy`)
//! - **runner**: the simulator run contract (`SimulationRunner`) and its process implementation
//! - **orchestrator**: `run_benchmark`, per-source outcomes and the final report
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use rtbench::benchmark::{run_benchmark, BenchmarkConfig, ProcessRunner};
//!
//! let config = BenchmarkConfig::tracer_1d().base_dir("benchmarks/tracer_1d");
//! let report = run_benchmark(&config, &ProcessRunner::default())?;
//! for label in report.plotted_labels() {
//!     println!("plotted {}", label);
//! }
//! ```

pub mod config;
pub mod orchestrator;
pub mod runner;
pub mod source;

pub use config::BenchmarkConfig;
pub use orchestrator::{
    collect_sources, run_benchmark, BenchmarkError, BenchmarkReport, SourceError, SourceOutcome,
    SourceReport,
};
pub use runner::{ProcessRunner, RunError, RunRequest, SimulationRunner, STDOUT_FILE};
pub use source::{FailurePolicy, SourceDescriptor, SourceFormat};
