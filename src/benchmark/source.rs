//! Benchmark source descriptors
//!
//! A [`SourceDescriptor`] is one row of the benchmark configuration table:
//! where a curve's data lives, how to read it, how to draw it, whether a
//! simulator run produces it, and what a failure to obtain it means.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::output::visualization::CurveStyle;
use crate::readers::{self, ReadError, TimeSelector};
use crate::series::SampleSeries;
use super::runner::RunRequest;

/// What a failure to obtain a source does to the benchmark
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Missing or unreadable data leaves the curve out of the plot
    Optional,

    /// Missing or unreadable data aborts the benchmark
    Required,
}

/// Output format of a source, with its file and selectors
///
/// Relative paths resolve against the benchmark base directory.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceFormat {
    /// Amanzi-U `<root>_mesh.h5` + `<root>_data.h5` in `dir`
    AmanziUnstructured {
        dir: PathBuf,
        root: String,
        time: TimeSelector,
        field: String,
    },

    /// PFloTran single HDF5 file
    PFloTran {
        file: PathBuf,
        time: TimeSelector,
        field: String,
    },

    /// Amanzi-S AMReX plot files `<root>NNNNN/` in `dir`
    Plotfile {
        dir: PathBuf,
        root: String,
        component: String,
        /// 1-based refinement level, 1 = coarsest
        level: usize,
    },

    /// Whitespace-delimited text table `dir/file_name`
    Table {
        dir: PathBuf,
        file_name: String,
        /// Zero-based component; values come from column `comp + 1`
        comp: usize,
        /// Header lines discarded before the data
        ignore: usize,
    },
}

impl SourceFormat {
    /// Policy used unless a descriptor overrides it
    ///
    /// Text tables are required; hierarchical and directory outputs are optional.
    pub fn default_policy(&self) -> FailurePolicy {
        match self {
            SourceFormat::Table { .. } => FailurePolicy::Required,
            _ => FailurePolicy::Optional,
        }
    }

    /// Run the matching reader with paths resolved against `base_dir`
    pub fn extract(&self, base_dir: &Path) -> Result<SampleSeries, ReadError> {
        match self {
            SourceFormat::AmanziUnstructured { dir, root, time, field } => {
                readers::read_amanzi_unstructured(base_dir.join(dir), root, time, field)
            }
            SourceFormat::PFloTran { file, time, field } => {
                readers::read_pflotran(base_dir.join(file), time, field)
            }
            SourceFormat::Plotfile { dir, root, component, level } => {
                readers::read_plotfile(base_dir.join(dir), root, component, *level)
            }
            SourceFormat::Table { dir, file_name, comp, ignore } => {
                readers::read_table(base_dir.join(dir), file_name, *comp, *ignore)
            }
        }
    }

    /// Validate that selectors are meaningful
    pub fn validate(&self) -> Result<(), String> {
        match self {
            SourceFormat::AmanziUnstructured { root, field, .. } => {
                if root.is_empty() {
                    return Err("Amanzi root name must not be empty".to_string());
                }
                if field.is_empty() {
                    return Err("Field name must not be empty".to_string());
                }
                Ok(())
            }
            SourceFormat::PFloTran { field, .. } => {
                if field.is_empty() {
                    return Err("Field name must not be empty".to_string());
                }
                Ok(())
            }
            SourceFormat::Plotfile { root, component, level, .. } => {
                if root.is_empty() || component.is_empty() {
                    return Err("Plot file root and component must not be empty".to_string());
                }
                if *level == 0 {
                    return Err("Levels are numbered from 1".to_string());
                }
                Ok(())
            }
            SourceFormat::Table { file_name, .. } => {
                if file_name.is_empty() {
                    return Err("Table file name must not be empty".to_string());
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFormat::AmanziUnstructured { dir, root, time, field } => write!(
                f,
                "Amanzi-U {}/{}_*.h5 [{} @ {}]",
                dir.display(), root, field, time
            ),
            SourceFormat::PFloTran { file, time, field } => {
                write!(f, "PFloTran {} [{} @ {}]", file.display(), field, time)
            }
            SourceFormat::Plotfile { dir, root, component, level } => write!(
                f,
                "plot file {}/{}* [{} level {}]",
                dir.display(), root, component, level
            ),
            SourceFormat::Table { dir, file_name, comp, ignore } => write!(
                f,
                "table {} [column {}, skip {}]",
                dir.join(file_name).display(), comp + 1, ignore
            ),
        }
    }
}

/// One benchmark curve: data location, reader, style, optional run, failure policy
///
/// # Example
///
/// ```rust
/// use plotters::prelude::*;
/// use rtbench::benchmark::{FailurePolicy, RunRequest, SourceDescriptor, SourceFormat};
/// use rtbench::output::visualization::CurveStyle;
/// use rtbench::readers::TimeSelector;
///
/// let source = SourceDescriptor::new(
///     "Amanzi",
///     CurveStyle::solid(RED),
///     SourceFormat::AmanziUnstructured {
///         dir: "amanzi-output".into(),
///         root: "tracer".to_string(),
///         time: TimeSelector::label("71"),
///         field: "total_component_concentration.cell.Tracer".to_string(),
///     },
/// )
/// .with_run(RunRequest::new("amanzi-u-1d-tracer.xml", "amanzi-output"));
///
/// assert_eq!(source.policy, FailurePolicy::Optional);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SourceDescriptor {
    /// Legend label
    pub label: String,

    pub style: CurveStyle,
    pub format: SourceFormat,

    /// Simulator run producing the data, if any
    pub run: Option<RunRequest>,

    pub policy: FailurePolicy,
}

impl SourceDescriptor {
    /// Create a descriptor with the format's default policy and no run step
    pub fn new(label: impl Into<String>, style: CurveStyle, format: SourceFormat) -> Self {
        let policy = format.default_policy();
        Self {
            label: label.into(),
            style,
            format,
            run: None,
            policy,
        }
    }

    /// Builder pattern: attach a simulator run
    pub fn with_run(mut self, run: RunRequest) -> Self {
        self.run = Some(run);
        self
    }

    /// Builder pattern: abort the benchmark if this source fails
    pub fn required(mut self) -> Self {
        self.policy = FailurePolicy::Required;
        self
    }

    /// Builder pattern: skip this source's curve if it fails
    pub fn optional(mut self) -> Self {
        self.policy = FailurePolicy::Optional;
        self
    }

    /// Verifying descriptor content
    pub fn validate(&self) -> Result<(), String> {
        if self.label.is_empty() {
            return Err("Source label must not be empty".to_string());
        }
        self.format
            .validate()
            .map_err(|e| format!("{}: {}", self.label, e))?;
        if let Some(run) = &self.run {
            run.validate().map_err(|e| format!("{}: {}", self.label, e))?;
        }
        Ok(())
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use plotters::prelude::*;

    fn table() -> SourceFormat {
        SourceFormat::Table {
            dir: "crunchflow/gimrt".into(),
            file_name: "totcon5.out".to_string(),
            comp: 0,
            ignore: 4,
        }
    }

    fn plotfile(level: usize) -> SourceFormat {
        SourceFormat::Plotfile {
            dir: "output-s-alq-pflo".into(),
            root: "plt".to_string(),
            component: "tracer_water_Concentration".to_string(),
            level,
        }
    }

    #[test]
    fn test_default_policies() {
        assert_eq!(table().default_policy(), FailurePolicy::Required);
        assert_eq!(plotfile(1).default_policy(), FailurePolicy::Optional);

        let source = SourceDescriptor::new("GIMRT", CurveStyle::dashed(MAGENTA), table());
        assert_eq!(source.policy, FailurePolicy::Required);
        assert_eq!(source.optional().policy, FailurePolicy::Optional);
    }

    #[test]
    fn test_validate() {
        let style = CurveStyle::solid(GREEN);
        assert!(SourceDescriptor::new("S", style, plotfile(1)).validate().is_ok());
        assert!(SourceDescriptor::new("S", style, plotfile(0)).validate().is_err());
        assert!(SourceDescriptor::new("", style, plotfile(1)).validate().is_err());

        let bad_run = SourceDescriptor::new("S", CurveStyle::solid(GREEN), plotfile(1))
            .with_run(RunRequest::new("in.xml", "out").with_nprocs(0));
        assert!(bad_run.validate().is_err());
    }

    #[test]
    fn test_display_names_the_file() {
        let text = table().to_string();
        assert!(text.contains("totcon5.out"));
        assert!(text.contains("column 1"));
    }

    #[test]
    fn test_extract_resolves_against_base_dir() {
        let base = tempfile::TempDir::new().unwrap();
        let dir = base.path().join("crunchflow/gimrt");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("totcon5.out"), "a\nb\nc\nd\n1.0 0.5\n").unwrap();

        let series = table().extract(base.path()).unwrap();
        assert_eq!(series.positions(), &[1.0]);
        assert_eq!(series.values(), &[0.5]);
    }
}
