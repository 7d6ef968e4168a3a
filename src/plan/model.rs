//! Data model shared by every planning component: mutants, tests, dry-run
//! coverage, the incremental report, and the plan records produced at the end.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A position in a source file. Lines are 1-based, columns are 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// 1-based line number.
    pub line: u32,
    /// 0-based column.
    pub column: u32,
}

impl Position {
    /// Construct a position.
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// A closed range in a source file, used for mutants and resolved prior locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Start of the range, inclusive.
    pub start: Position,
    /// End of the range, exclusive.
    pub end: Position,
}

/// A prior test's location, whose end may not have been recorded (open-ended).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenLocation {
    /// Start of the range, inclusive.
    pub start: Position,
    /// End of the range, if known.
    #[serde(default)]
    pub end: Option<Position>,
}

/// Verdict reached for a mutant, either freshly assigned this run or reused
/// from a prior incremental report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutantStatus {
    /// Excluded from execution entirely (by the generator, or by `ignoreStatic`).
    Ignored,
    /// A test failed while this mutant was active.
    Killed,
    /// All tests passed while this mutant was active.
    Survived,
    /// No test covered this mutation point.
    NoCoverage,
    /// Execution exceeded its timeout.
    Timeout,
    /// The mutant could not be compiled or loaded.
    CompileError,
    /// Execution ended in an unexpected runtime error.
    RuntimeError,
}

impl MutantStatus {
    /// Terminal statuses other than `Killed` are the "no new covering test" class in §4.3.
    pub fn is_non_killed_terminal(self) -> bool {
        !matches!(self, Self::Killed | Self::Ignored)
    }
}

/// A candidate mutation, as produced by the mutant generator and (optionally)
/// enriched with fields reused from a prior run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mutant {
    /// Stable identifier, unique among the current mutant set.
    pub id: String,
    /// Source file path, relative to the project root.
    pub file_name: String,
    /// Name of the mutation operator that produced this mutant.
    pub mutator_name: String,
    /// Replacement text substituted at `location`.
    pub replacement: String,
    /// Location of the mutated span in the current source.
    pub location: Location,
    /// Verdict, if already decided (by the generator, or reused from a prior run).
    #[serde(default)]
    pub status: Option<MutantStatus>,
    /// Human-readable reason for `status`, when set.
    #[serde(default)]
    pub status_reason: Option<String>,
    /// Number of tests that had completed when the verdict was reached.
    #[serde(default)]
    pub tests_completed: Option<u32>,
    /// Test ids that killed this mutant, most recent killer first.
    #[serde(default)]
    pub killed_by: Option<Vec<String>>,
    /// Test ids known to cover this mutation point.
    #[serde(default)]
    pub covered_by: Option<Vec<String>>,
    /// Whether this mutation point is hit outside of any test (module load).
    #[serde(default, rename = "static")]
    pub is_static: Option<bool>,
}

impl Mutant {
    /// True when this mutant already carries a decided verdict (input-ignored
    /// or reused from an incremental report).
    pub fn has_decided_status(&self) -> bool {
        self.status.is_some()
    }
}

/// Timing and identity of one test executed during the dry run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResult {
    /// Stable identifier, unique among the current test set.
    pub id: String,
    /// Test file path, relative to the project root.
    pub file_name: String,
    /// Test name.
    pub name: String,
    /// Elapsed wall-clock time in milliseconds during the dry run.
    pub time_spent_ms: u64,
    /// Start position of the test's body in its source file, if known.
    #[serde(default)]
    pub start_position: Option<Position>,
}

/// Hit counts recorded for each mutation point, split into hits observed
/// outside any test (`static_hits`) and hits observed per test (`per_test`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CoverageMatrix {
    /// Hit count per mutation-point id, accumulated during module load.
    /// Absent means "no static hits were recorded", not "unknown".
    #[serde(default)]
    pub static_hits: Option<BTreeMap<String, u64>>,
    /// Hit count per mutation-point id, keyed by the covering test's id.
    #[serde(default)]
    pub per_test: BTreeMap<String, BTreeMap<String, u64>>,
}

/// Dry-run test suite execution: timings plus (optionally unknown) coverage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DryRunResult {
    /// Tests executed during the dry run, in execution order.
    pub tests: Vec<TestResult>,
    /// Coverage matrix, or `None` when coverage is entirely unknown.
    #[serde(default)]
    pub coverage: Option<CoverageMatrix>,
}

/// A mutant's outcome as recorded in a previous mutation-testing run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorMutantResult {
    /// Identifier under the prior run.
    pub id: String,
    /// Mutation operator name.
    pub mutator_name: String,
    /// Replacement text.
    pub replacement: String,
    /// Location in the prior source.
    pub location: Location,
    /// Verdict reached.
    pub status: MutantStatus,
    /// Human-readable reason for `status`, when recorded.
    #[serde(default)]
    pub status_reason: Option<String>,
    /// Number of tests that had completed when the verdict was reached.
    #[serde(default)]
    pub tests_completed: Option<u32>,
    /// Test ids that killed this mutant, most recent killer first.
    #[serde(default)]
    pub killed_by: Vec<String>,
    /// Test ids that covered this mutation point.
    #[serde(default)]
    pub covered_by: Vec<String>,
}

/// A test's identity and (possibly open-ended) location in a previous run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorTestDefinition {
    /// Identifier under the prior run.
    pub id: String,
    /// Test name.
    pub name: String,
    /// Location in the prior source, if recorded.
    #[serde(default)]
    pub location: Option<OpenLocation>,
}

/// A previously mutated source file: its text and the mutants found in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFileEntry {
    /// Full prior source text.
    pub source: String,
    /// Mutants previously discovered in this file.
    pub mutants: Vec<PriorMutantResult>,
}

/// A previous test file: its text and the tests found in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestFileEntry {
    /// Full prior source text.
    pub source: String,
    /// Tests previously discovered in this file.
    pub tests: Vec<PriorTestDefinition>,
}

/// The parsed outcome of a previous mutation-testing run, keyed by file path.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IncrementalReport {
    /// Mutated source files, keyed by path.
    pub files: BTreeMap<String, SourceFileEntry>,
    /// Test files, keyed by path.
    pub test_files: BTreeMap<String, TestFileEntry>,
}

/// Whether a mutant is injected at module load (`Static`) or gated at runtime
/// by an active-mutant identifier (`Runtime`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationMode {
    /// Mutant is compiled in unconditionally; the whole suite reloads per mutant.
    Static,
    /// Mutant is gated behind a runtime check, filtered to specific tests.
    Runtime,
}

/// Options passed through to the test runner for one `Run` plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunOptions {
    /// The mutant to activate, possibly enriched with coverage fields.
    pub active_mutant: Mutant,
    /// Tests to execute; `None` means "run the whole suite".
    pub test_filter: Option<Vec<String>>,
    /// Sandboxed file name to substitute the mutated source for.
    pub sandbox_file_name: String,
    /// Timeout for this mutant's execution, in milliseconds.
    pub timeout_ms: u64,
    /// Whether to keep running tests after the first failure.
    pub disable_bail: bool,
    /// Maximum allowed hits of the mutation point, to catch infinite loops.
    pub hit_limit: Option<u64>,
    /// Static or runtime activation.
    pub mutant_activation: ActivationMode,
    /// Whether the test environment must be reloaded before this run.
    pub reload_environment: Option<bool>,
}

/// One planning outcome per input mutant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum PlanRecord {
    /// No test execution needed; the mutant already has a verdict.
    EarlyResult {
        /// The mutant, carrying its decided verdict.
        mutant: Mutant,
    },
    /// Execute the mutant against the tests named in `run_options`.
    Run {
        /// The mutant to run (possibly enriched with coverage fields).
        mutant: Mutant,
        /// Execution options for the test runner.
        run_options: RunOptions,
        /// Estimated net test time this mutant will consume, in milliseconds.
        net_time_ms: u64,
    },
}

impl PlanRecord {
    /// The mutant carried by this record, regardless of variant.
    pub fn mutant(&self) -> &Mutant {
        match self {
            Self::EarlyResult { mutant } => mutant,
            Self::Run { mutant, .. } => mutant,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_ordering_is_line_major() {
        assert!(Position::new(1, 9) < Position::new(2, 0));
        assert!(Position::new(2, 0) < Position::new(2, 1));
    }

    #[test]
    fn non_killed_terminal_excludes_killed_and_ignored() {
        assert!(!MutantStatus::Killed.is_non_killed_terminal());
        assert!(!MutantStatus::Ignored.is_non_killed_terminal());
        assert!(MutantStatus::Survived.is_non_killed_terminal());
        assert!(MutantStatus::NoCoverage.is_non_killed_terminal());
        assert!(MutantStatus::Timeout.is_non_killed_terminal());
    }
}
