//! Benchmark configuration and named presets
//!
//! A benchmark is a problem root, a base directory holding the reference
//! outputs and simulator inputs, figure settings, and an ordered table of
//! sources. Curves are drawn in table order.

use std::collections::HashSet;
use std::path::PathBuf;

use plotters::prelude::*;

use super::runner::RunRequest;
use super::source::{SourceDescriptor, SourceFormat};
use crate::output::visualization::{title_case, CurveStyle, PlotConfig};
use crate::readers::TimeSelector;

/// Complete description of one benchmark comparison
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    /// Problem root name (e.g. `"tracer"`), used in the image name
    pub root: String,

    /// Directory against which every source path resolves (default: ".")
    pub base_dir: PathBuf,

    /// Directory receiving `<root>_1d.png` (default: ".")
    pub output_dir: PathBuf,

    /// Invoke the simulator for sources carrying a run request (default: true)
    pub run_simulations: bool,

    pub plot: PlotConfig,

    /// Sources in drawing order
    pub sources: Vec<SourceDescriptor>,
}

impl BenchmarkConfig {
    /// Empty benchmark for `root` with a profile plot titled after it
    pub fn new(root: impl Into<String>) -> Self {
        let root = root.into();
        let plot = PlotConfig::profile(format!("Amanzi 1D {} Benchmark", title_case(&root)));
        Self {
            root,
            base_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            run_simulations: true,
            plot,
            sources: Vec::new(),
        }
    }

    /// Builder pattern: set base directory
    pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    /// Builder pattern: set output directory
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Builder pattern: enable or disable simulator runs
    pub fn run_simulations(mut self, run: bool) -> Self {
        self.run_simulations = run;
        self
    }

    /// Builder pattern: set figure configuration
    pub fn plot(mut self, plot: PlotConfig) -> Self {
        self.plot = plot;
        self
    }

    /// Builder pattern: append a source
    pub fn source(mut self, source: SourceDescriptor) -> Self {
        self.sources.push(source);
        self
    }

    /// Path of the comparison image, `<output_dir>/<root>_1d.png`
    pub fn image_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}_1d.png", self.root))
    }

    /// Verifying benchmark content
    pub fn validate(&self) -> Result<(), String> {
        if self.root.is_empty() {
            return Err("Benchmark root name must not be empty".to_string());
        }
        if self.plot.width == 0 || self.plot.height == 0 {
            return Err("Image dimensions must be positive".to_string());
        }
        if self.sources.is_empty() {
            return Err("Benchmark has no sources".to_string());
        }

        let mut labels = HashSet::new();
        for source in &self.sources {
            source.validate()?;
            if !labels.insert(source.label.as_str()) {
                return Err(format!("Duplicate source label '{}'", source.label));
            }
        }
        Ok(())
    }

    /// One-dimensional conservative tracer benchmark at 50 years
    ///
    /// PFloTran and the two CrunchFlow tables are reference data shipped with
    /// the benchmark. The five Amanzi variants (native chemistry, Alquimia
    /// with PFloTran or CrunchFlow engines, unstructured and structured
    /// meshes) are simulated before extraction.
    pub fn tracer_1d() -> Self {
        let root = "tracer";
        let title = title_case(root);
        let amanzi_field = format!("total_component_concentration.cell.{}", title);
        let alquimia_field = "total_component_concentration.cell.tracer conc";
        let structured_component = "tracer_water_Concentration";

        let plot = PlotConfig::profile(format!("Amanzi 1D {} Benchmark at 50 years", title))
            .ylabel(format!("Total {} concentration [mol/L]", title));

        let pflo_run = |deck: &str, dir: &str| {
            RunRequest::new(deck, dir).with_support_files(["1d-tracer.in", "tracer.dat"])
        };
        let crunch_run = |deck: &str, dir: &str| {
            RunRequest::new(deck, dir).with_support_files(["1d-tracer-crunch.in", "tracer.dbs"])
        };
        let unstructured = |dir: &str, time: TimeSelector, field: &str| {
            SourceFormat::AmanziUnstructured {
                dir: dir.into(),
                root: root.to_string(),
                time,
                field: field.to_string(),
            }
        };
        let structured = |dir: &str| SourceFormat::Plotfile {
            dir: dir.into(),
            root: "plt".to_string(),
            component: structured_component.to_string(),
            level: 1,
        };
        let crunchflow = |dir: &str| SourceFormat::Table {
            dir: dir.into(),
            file_name: "totcon5.out".to_string(),
            comp: 0,
            ignore: 4,
        };

        Self::new(root)
            .plot(plot)
            .source(SourceDescriptor::new(
                "PFloTran",
                CurveStyle::solid(MAGENTA),
                SourceFormat::PFloTran {
                    file: "pflotran/1d-tracer.h5".into(),
                    time: TimeSelector::label("Time:  5.00000E+01 y"),
                    field: format!("Total_{} [M]", title),
                },
            ))
            .source(SourceDescriptor::new(
                "CrunchFlow GIMRT",
                CurveStyle::dashed(MAGENTA),
                crunchflow("crunchflow/gimrt"),
            ))
            .source(SourceDescriptor::new(
                "CrunchFlow OS3D",
                CurveStyle::markers(MAGENTA),
                crunchflow("crunchflow/os3d"),
            ))
            .source(
                SourceDescriptor::new(
                    "Amanzi Native Chemistry",
                    CurveStyle::dashed(RED),
                    unstructured("amanzi-output", TimeSelector::label("71"), &amanzi_field),
                )
                .with_run(RunRequest::new("amanzi-u-1d-tracer.xml", "amanzi-output")),
            )
            .source(
                SourceDescriptor::new(
                    "AmanziU+Alq(PFT)",
                    CurveStyle::solid(RED),
                    unstructured("output-u-alq-pflo", TimeSelector::Latest, alquimia_field),
                )
                .with_run(pflo_run("amanzi-u-1d-tracer-alq-pflo.xml", "output-u-alq-pflo")),
            )
            .source(
                SourceDescriptor::new(
                    "AmanziU+Alq(CF)",
                    CurveStyle::markers(RED),
                    unstructured("output-u-alq-crunch", TimeSelector::Latest, alquimia_field),
                )
                .with_run(crunch_run("amanzi-u-1d-tracer-alq-crunch.xml", "output-u-alq-crunch")),
            )
            .source(
                SourceDescriptor::new(
                    "AmanziS+Alq(PFT)",
                    CurveStyle::solid(GREEN),
                    structured("output-s-alq-pflo"),
                )
                .with_run(pflo_run("amanzi-s-1d-tracer-alq-pflo.xml", "output-s-alq-pflo")),
            )
            .source(
                SourceDescriptor::new(
                    "AmanziS+Alq(CF)",
                    CurveStyle::markers(GREEN),
                    structured("output-s-alq-crunch"),
                )
                .with_run(crunch_run("amanzi-s-1d-tracer-alq-crunch.xml", "output-s-alq-crunch")),
            )
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmark::source::FailurePolicy;
    use crate::output::visualization::LineKind;

    #[test]
    fn test_tracer_preset_is_valid() {
        let config = BenchmarkConfig::tracer_1d();
        assert!(config.validate().is_ok());
        assert_eq!(config.sources.len(), 8);
        assert_eq!(config.plot.title, "Amanzi 1D Tracer Benchmark at 50 years");
        assert_eq!(config.plot.xlabel, "Distance (m)");
        assert_eq!(config.plot.ylabel, "Total Tracer concentration [mol/L]");
        assert_eq!(config.image_path(), PathBuf::from("./tracer_1d.png"));
    }

    #[test]
    fn test_tracer_preset_policies() {
        let config = BenchmarkConfig::tracer_1d();
        let required: Vec<&str> = config
            .sources
            .iter()
            .filter(|s| s.policy == FailurePolicy::Required)
            .map(|s| s.label.as_str())
            .collect();
        assert_eq!(required, ["CrunchFlow GIMRT", "CrunchFlow OS3D"]);

        let with_run = config.sources.iter().filter(|s| s.run.is_some()).count();
        assert_eq!(with_run, 5);
    }

    #[test]
    fn test_tracer_preset_styles() {
        let config = BenchmarkConfig::tracer_1d();
        let pflotran = &config.sources[0];
        assert_eq!(pflotran.style.color, MAGENTA);
        assert_eq!(pflotran.style.line, LineKind::Solid);

        let native = &config.sources[3];
        assert_eq!(native.style, CurveStyle::dashed(RED));
        match &native.format {
            SourceFormat::AmanziUnstructured { field, time, .. } => {
                assert_eq!(field, "total_component_concentration.cell.Tracer");
                assert_eq!(time, &TimeSelector::label("71"));
            }
            other => panic!("unexpected format {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_duplicates_and_empty() {
        assert!(BenchmarkConfig::new("tracer").validate().is_err());
        assert!(BenchmarkConfig::new("").validate().is_err());

        let table = SourceFormat::Table {
            dir: ".".into(),
            file_name: "t.out".to_string(),
            comp: 0,
            ignore: 0,
        };
        let config = BenchmarkConfig::new("tracer")
            .source(SourceDescriptor::new("a", CurveStyle::solid(RED), table.clone()))
            .source(SourceDescriptor::new("a", CurveStyle::solid(BLUE), table));
        assert!(config.validate().unwrap_err().contains("Duplicate"));
    }

    #[test]
    fn test_image_path_uses_output_dir() {
        let config = BenchmarkConfig::new("calcite").output_dir("/tmp/out");
        assert_eq!(config.image_path(), PathBuf::from("/tmp/out/calcite_1d.png"));
        assert_eq!(config.plot.title, "Amanzi 1D Calcite Benchmark");
    }
}
