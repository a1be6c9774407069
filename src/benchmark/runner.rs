//! Running the primary simulator before extraction
//!
//! The simulator is an external program. From this crate's point of view a
//! run is a blocking call that either leaves output files in the run
//! directory or fails. The [`SimulationRunner`] trait is that contract; the
//! orchestrator receives it as a parameter so tests can substitute a stub that
//! writes fixture files instead of launching a solver.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use thiserror::Error;

/// Name of the file receiving the simulator's standard output
pub const STDOUT_FILE: &str = "stdout.out";

/// One simulator run
///
/// All relative paths resolve against the benchmark base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    /// Simulator input deck (e.g. `amanzi-u-1d-tracer.xml`)
    pub input_file: PathBuf,

    /// Number of MPI processes (1 runs the executable directly)
    pub nprocs: usize,

    /// Extra files the run needs next to the input deck (chemistry databases, ...)
    pub support_files: Vec<PathBuf>,

    /// Directory the simulator runs in and writes its output to
    pub run_dir: PathBuf,
}

impl RunRequest {
    /// Serial run of `input_file` inside `run_dir`
    pub fn new(input_file: impl Into<PathBuf>, run_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_file: input_file.into(),
            nprocs: 1,
            support_files: Vec::new(),
            run_dir: run_dir.into(),
        }
    }

    /// Builder pattern: add support files
    pub fn with_support_files<I, P>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.support_files.extend(files.into_iter().map(Into::into));
        self
    }

    /// Builder pattern: set process count
    pub fn with_nprocs(mut self, nprocs: usize) -> Self {
        self.nprocs = nprocs;
        self
    }

    /// Verifying request content
    pub fn validate(&self) -> Result<(), String> {
        if self.nprocs == 0 {
            return Err("Process count must be at least 1".to_string());
        }
        if self.input_file.as_os_str().is_empty() {
            return Err("Input file must not be empty".to_string());
        }
        if self.run_dir.as_os_str().is_empty() {
            return Err("Run directory must not be empty".to_string());
        }
        Ok(())
    }
}

/// Failure of a simulator run
#[derive(Debug, Error)]
pub enum RunError {
    #[error("invalid run request: {0}")]
    InvalidRequest(String),

    #[error("I/O error preparing {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {}", exit_description(.code))]
    Failed { program: String, code: Option<i32> },
}

/// Blocking "run a configuration, produce output files or fail" contract
pub trait SimulationRunner {
    /// Run the simulator for `request`, resolving relative paths against `base_dir`
    ///
    /// Returns once the run has finished; there is no timeout and no retry.
    fn run(&self, request: &RunRequest, base_dir: &Path) -> Result<(), RunError>;
}

/// Launch the simulator as a child process
///
/// The run directory is created if needed, the input deck and support files
/// are copied into it, and the simulator runs there with
/// `--xml_file=<input file name>`. Standard output goes to [`STDOUT_FILE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRunner {
    /// Simulator executable (default: `amanzi`)
    pub executable: PathBuf,

    /// MPI launcher used when `nprocs > 1` (default: `mpirun`)
    pub mpi_launcher: String,
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self {
            executable: PathBuf::from("amanzi"),
            mpi_launcher: "mpirun".to_string(),
        }
    }
}

impl ProcessRunner {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            ..Default::default()
        }
    }

    /// Build the command line for `request` (without I/O redirection)
    pub fn command(&self, request: &RunRequest, run_dir: &Path) -> Command {
        let input_name = request
            .input_file
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| request.input_file.clone());
        let xml_arg = format!("--xml_file={}", input_name.display());

        let mut command = if request.nprocs > 1 {
            let mut c = Command::new(&self.mpi_launcher);
            c.arg("-n")
                .arg(request.nprocs.to_string())
                .arg(&self.executable);
            c
        } else {
            Command::new(&self.executable)
        };
        command.arg(xml_arg).current_dir(run_dir);
        command
    }

    fn program_name(&self, request: &RunRequest) -> String {
        if request.nprocs > 1 {
            self.mpi_launcher.clone()
        } else {
            self.executable.display().to_string()
        }
    }
}

impl SimulationRunner for ProcessRunner {
    fn run(&self, request: &RunRequest, base_dir: &Path) -> Result<(), RunError> {
        request.validate().map_err(RunError::InvalidRequest)?;

        let run_dir = base_dir.join(&request.run_dir);
        fs::create_dir_all(&run_dir).map_err(|source| RunError::Io {
            path: run_dir.clone(),
            source,
        })?;

        for file in std::iter::once(&request.input_file).chain(&request.support_files) {
            copy_into(&base_dir.join(file), &run_dir)?;
        }

        let stdout_path = run_dir.join(STDOUT_FILE);
        let stdout = File::create(&stdout_path).map_err(|source| RunError::Io {
            path: stdout_path.clone(),
            source,
        })?;

        let program = self.program_name(request);
        log::info!(
            "running {} ({} process(es)) in {}",
            request.input_file.display(),
            request.nprocs,
            run_dir.display()
        );

        let status = self
            .command(request, &run_dir)
            .stdout(Stdio::from(stdout))
            .status()
            .map_err(|source| RunError::Spawn {
                program: program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(RunError::Failed { program, code: status.code() });
        }

        log::debug!("run finished, output in {}", run_dir.display());
        Ok(())
    }
}

fn exit_description(code: &Option<i32>) -> String {
    code.map_or_else(|| "a signal".to_string(), |c| format!("status {}", c))
}

fn copy_into(file: &Path, dir: &Path) -> Result<(), RunError> {
    let Some(name) = file.file_name() else {
        return Err(RunError::InvalidRequest(format!(
            "'{}' is not a file path",
            file.display()
        )));
    };
    let target = dir.join(name);
    if target == file {
        return Ok(());
    }
    fs::copy(file, &target)
        .map(|_| ())
        .map_err(|source| RunError::Io { path: file.to_path_buf(), source })
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn request() -> RunRequest {
        RunRequest::new("amanzi-u-1d-tracer.xml", "amanzi-output")
            .with_support_files(["tracer.dat"])
    }

    #[test]
    fn test_request_validate() {
        assert!(request().validate().is_ok());
        assert!(request().with_nprocs(0).validate().is_err());
        assert!(RunRequest::new("", "out").validate().is_err());
    }

    #[test]
    fn test_command_serial_and_parallel() {
        let runner = ProcessRunner::default();
        let dir = Path::new("/tmp/run");

        let serial = runner.command(&request(), dir);
        assert_eq!(serial.get_program(), "amanzi");
        let args: Vec<_> = serial.get_args().collect();
        assert_eq!(args, ["--xml_file=amanzi-u-1d-tracer.xml"]);

        let parallel = runner.command(&request().with_nprocs(4), dir);
        assert_eq!(parallel.get_program(), "mpirun");
        let args: Vec<_> = parallel.get_args().collect();
        assert_eq!(args, ["-n", "4", "amanzi", "--xml_file=amanzi-u-1d-tracer.xml"]);
    }

    #[test]
    fn test_missing_input_is_io_error() {
        let base = TempDir::new().unwrap();
        let err = ProcessRunner::new("true").run(&request(), base.path()).unwrap_err();
        assert!(matches!(err, RunError::Io { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_successful_run_copies_inputs() {
        let base = TempDir::new().unwrap();
        fs::write(base.path().join("amanzi-u-1d-tracer.xml"), "<ParameterList/>").unwrap();
        fs::write(base.path().join("tracer.dat"), "database").unwrap();

        ProcessRunner::new("true").run(&request(), base.path()).unwrap();

        let run_dir = base.path().join("amanzi-output");
        assert!(run_dir.join("amanzi-u-1d-tracer.xml").exists());
        assert!(run_dir.join("tracer.dat").exists());
        assert!(run_dir.join(STDOUT_FILE).exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_run() {
        let base = TempDir::new().unwrap();
        fs::write(base.path().join("amanzi-u-1d-tracer.xml"), "").unwrap();
        fs::write(base.path().join("tracer.dat"), "").unwrap();

        let err = ProcessRunner::new("false").run(&request(), base.path()).unwrap_err();
        assert!(matches!(err, RunError::Failed { code: Some(1), .. }));
    }

    #[test]
    fn test_missing_executable() {
        let base = TempDir::new().unwrap();
        fs::write(base.path().join("amanzi-u-1d-tracer.xml"), "").unwrap();
        fs::write(base.path().join("tracer.dat"), "").unwrap();

        let err = ProcessRunner::new("/nonexistent/amanzi-binary")
            .run(&request(), base.path())
            .unwrap_err();
        assert!(matches!(err, RunError::Spawn { .. }));
    }
}
