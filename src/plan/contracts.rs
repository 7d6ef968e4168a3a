//! Contracts for collaborators the planner consumes but does not own:
//! the project's source/incremental-report accessor, the sandbox file-name
//! mapper, and the reporter that is notified once planning completes.

use super::model::{IncrementalReport, PlanRecord};

/// Read-only access to the current project: its source texts and, when
/// available, the parsed incremental report from a previous run.
pub trait Project {
    /// Current source text for `path`, or `None` if the path is unknown.
    ///
    /// Used for both mutated source files and test files, since both are
    /// just "text by path" as far as range matching is concerned.
    fn source(&self, path: &str) -> Option<&str>;

    /// The previous run's parsed report, if an incremental run was requested.
    fn incremental_report(&self) -> Option<&IncrementalReport>;
}

/// Maps a project-relative file name onto the sandbox copy the test runner
/// should mutate. A pure function of its input from the planner's perspective.
pub trait Sandbox {
    /// Sandbox file name for `file_name`.
    fn sandbox_file_for(&self, file_name: &str) -> String;
}

/// Notified exactly once, after the full plan list has been assembled.
pub trait Reporter {
    /// Called with the complete, ordered list of plan records.
    fn on_mutation_testing_plan_ready(&self, plans: &[PlanRecord]);
}

/// A [`Project`] with no incremental report, backed by an in-memory map of
/// current source texts. Convenient for callers that have no previous run
/// to reconcile against.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProject {
    sources: std::collections::BTreeMap<String, String>,
    incremental_report: Option<IncrementalReport>,
}

impl InMemoryProject {
    /// An empty project with no sources and no incremental report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the current source text for `path`.
    pub fn with_source(mut self, path: impl Into<String>, source: impl Into<String>) -> Self {
        self.sources.insert(path.into(), source.into());
        self
    }

    /// Attach a previous run's parsed report.
    pub fn with_incremental_report(mut self, report: IncrementalReport) -> Self {
        self.incremental_report = Some(report);
        self
    }
}

impl Project for InMemoryProject {
    fn source(&self, path: &str) -> Option<&str> {
        self.sources.get(path).map(String::as_str)
    }

    fn incremental_report(&self) -> Option<&IncrementalReport> {
        self.incremental_report.as_ref()
    }
}

/// A [`Sandbox`] that passes file names through unchanged. Useful for tests
/// and for hosts that mutate sources in place rather than in a sandbox copy.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentitySandbox;

impl Sandbox for IdentitySandbox {
    fn sandbox_file_for(&self, file_name: &str) -> String {
        file_name.to_string()
    }
}

/// A [`Reporter`] that records the plans it was notified with, for tests.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    calls: std::sync::Mutex<Vec<Vec<PlanRecord>>>,
}

impl RecordingReporter {
    /// A reporter with no recorded calls.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times the reporter was notified.
    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("recording reporter mutex should lock").len()
    }

    /// The plans passed in the most recent call, if any.
    pub fn last_plans(&self) -> Option<Vec<PlanRecord>> {
        self.calls
            .lock()
            .expect("recording reporter mutex should lock")
            .last()
            .cloned()
    }
}

impl Reporter for RecordingReporter {
    fn on_mutation_testing_plan_ready(&self, plans: &[PlanRecord]) {
        self.calls
            .lock()
            .expect("recording reporter mutex should lock")
            .push(plans.to_vec());
    }
}
