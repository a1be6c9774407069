//! Benchmark orchestration: run, extract, plot
//!
//! For each source in table order the orchestrator optionally runs the
//! simulator, then reads the profile. A source's [`FailurePolicy`] decides
//! what a failure means: optional sources are recorded as unavailable and
//! left out of the figure, required sources abort the benchmark. Every
//! available source becomes one curve of the comparison image.

use std::path::PathBuf;

use thiserror::Error;

use super::config::BenchmarkConfig;
use super::runner::{RunError, SimulationRunner};
use super::source::{FailurePolicy, SourceDescriptor};
use crate::output::visualization::{plot_profile_comparison, Curve};
use crate::readers::ReadError;
use crate::series::SampleSeries;

/// Why a single source could not be obtained
#[derive(Debug, Error)]
pub enum SourceError {
    #[error(transparent)]
    Run(#[from] RunError),

    #[error(transparent)]
    Read(#[from] ReadError),
}

impl SourceError {
    /// True when the source's output was never written (as opposed to unreadable)
    pub fn is_missing_output(&self) -> bool {
        matches!(self, SourceError::Read(e) if e.is_not_found())
    }
}

/// Failure of a whole benchmark
#[derive(Debug, Error)]
pub enum BenchmarkError {
    #[error("invalid benchmark configuration: {0}")]
    InvalidConfig(String),

    #[error("required source '{label}' unavailable: {source}")]
    RequiredSource {
        label: String,
        #[source]
        source: SourceError,
    },

    #[error("no source produced data, nothing to plot")]
    NothingToPlot,

    #[error("failed to write comparison plot: {0}")]
    Plot(String),
}

/// Result of obtaining one source
#[derive(Debug, Clone, PartialEq)]
pub enum SourceOutcome {
    Available(SampleSeries),

    /// The cause, as reported by the runner or reader
    Unavailable(String),
}

impl SourceOutcome {
    pub fn is_available(&self) -> bool {
        matches!(self, SourceOutcome::Available(_))
    }

    pub fn series(&self) -> Option<&SampleSeries> {
        match self {
            SourceOutcome::Available(series) => Some(series),
            SourceOutcome::Unavailable(_) => None,
        }
    }
}

/// Outcome of one source, keyed by its label
#[derive(Debug, Clone, PartialEq)]
pub struct SourceReport {
    pub label: String,
    pub outcome: SourceOutcome,
}

/// What a benchmark run produced
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkReport {
    /// One entry per configured source, in table order
    pub sources: Vec<SourceReport>,

    /// Written comparison image
    pub image: PathBuf,
}

impl BenchmarkReport {
    /// Labels of the curves drawn, in drawing order
    pub fn plotted_labels(&self) -> Vec<&str> {
        self.sources
            .iter()
            .filter(|s| s.outcome.is_available())
            .map(|s| s.label.as_str())
            .collect()
    }

    pub fn available_count(&self) -> usize {
        self.sources.iter().filter(|s| s.outcome.is_available()).count()
    }

    /// Report entry for `label`
    pub fn get(&self, label: &str) -> Option<&SourceReport> {
        self.sources.iter().find(|s| s.label == label)
    }
}

/// Run a benchmark end to end and write `<output_dir>/<root>_1d.png`
///
/// # Errors
///
/// - configuration fails validation
/// - a required source cannot be run or read
/// - no source is available
/// - the image cannot be written
///
/// # Example
///
/// ```rust,ignore
/// use rtbench::benchmark::{run_benchmark, BenchmarkConfig, ProcessRunner};
///
/// let report = run_benchmark(&BenchmarkConfig::tracer_1d(), &ProcessRunner::default())?;
/// println!("{}", report.image.display());
/// ```
pub fn run_benchmark(
    config: &BenchmarkConfig,
    runner: &dyn SimulationRunner,
) -> Result<BenchmarkReport, BenchmarkError> {
    config.validate().map_err(BenchmarkError::InvalidConfig)?;

    let sources = collect_sources(config, runner)?;

    let curves: Vec<Curve<'_>> = config
        .sources
        .iter()
        .zip(&sources)
        .filter_map(|(descriptor, report)| {
            report
                .outcome
                .series()
                .map(|series| Curve::new(&descriptor.label, series, descriptor.style))
        })
        .collect();

    if curves.is_empty() {
        return Err(BenchmarkError::NothingToPlot);
    }

    let image = config.image_path();
    if let Some(parent) = image.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| BenchmarkError::Plot(format!("{}: {}", parent.display(), e)))?;
    }

    plot_profile_comparison(&curves, &image, Some(&config.plot))
        .map_err(|e| BenchmarkError::Plot(e.to_string()))?;

    log::info!(
        "wrote {} with {} of {} curves",
        image.display(),
        curves.len(),
        sources.len()
    );

    Ok(BenchmarkReport { sources, image })
}

/// Obtain every source without plotting
///
/// Optional failures become [`SourceOutcome::Unavailable`]; the first required
/// failure stops collection.
pub fn collect_sources(
    config: &BenchmarkConfig,
    runner: &dyn SimulationRunner,
) -> Result<Vec<SourceReport>, BenchmarkError> {
    let mut reports = Vec::with_capacity(config.sources.len());

    for descriptor in &config.sources {
        let outcome = match obtain(config, descriptor, runner) {
            Ok(series) => {
                log::info!("{}: {} samples", descriptor.label, series.len());
                SourceOutcome::Available(series)
            }
            Err(source) => match descriptor.policy {
                FailurePolicy::Required => {
                    return Err(BenchmarkError::RequiredSource {
                        label: descriptor.label.clone(),
                        source,
                    });
                }
                FailurePolicy::Optional => {
                    if source.is_missing_output() {
                        log::warn!("skipping {}: no output ({})", descriptor.label, source);
                    } else {
                        log::warn!("skipping {}: unreadable output: {}", descriptor.label, source);
                    }
                    SourceOutcome::Unavailable(source.to_string())
                }
            },
        };

        reports.push(SourceReport {
            label: descriptor.label.clone(),
            outcome,
        });
    }

    Ok(reports)
}

fn obtain(
    config: &BenchmarkConfig,
    descriptor: &SourceDescriptor,
    runner: &dyn SimulationRunner,
) -> Result<SampleSeries, SourceError> {
    if config.run_simulations {
        if let Some(request) = &descriptor.run {
            runner.run(request, &config.base_dir)?;
        }
    }

    log::debug!("{}: reading {}", descriptor.label, descriptor.format);
    Ok(descriptor.format.extract(&config.base_dir)?)
}

// =================================================================================================
// Tests
// =================================================================================================
