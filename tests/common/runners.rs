//! Stub simulator runners

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use rtbench::benchmark::{RunError, RunRequest, SimulationRunner};

type Producer = Box<dyn Fn(&RunRequest, &Path)>;

/// Records every request and lets a closure write the run's output
pub struct RecordingRunner {
    pub calls: RefCell<Vec<PathBuf>>,
    produce: Producer,
}

impl RecordingRunner {
    /// Runner whose runs succeed without writing anything
    pub fn silent() -> Self {
        Self::producing(|_, _| {})
    }

    /// Runner calling `produce(request, run_dir)` for each run
    pub fn producing(produce: impl Fn(&RunRequest, &Path) + 'static) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            produce: Box::new(produce),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl SimulationRunner for RecordingRunner {
    fn run(&self, request: &RunRequest, base_dir: &Path) -> Result<(), RunError> {
        self.calls.borrow_mut().push(request.input_file.clone());
        (self.produce)(request, &base_dir.join(&request.run_dir));
        Ok(())
    }
}

/// Every run exits with status 1
pub struct FailingRunner;

impl SimulationRunner for FailingRunner {
    fn run(&self, _: &RunRequest, _: &Path) -> Result<(), RunError> {
        Err(RunError::Failed {
            program: "amanzi".to_string(),
            code: Some(1),
        })
    }
}
