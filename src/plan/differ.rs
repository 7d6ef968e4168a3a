//! Incremental differ (§4.3): reuse a prior mutant's verdict when the mutant,
//! its location, and every test it depends on are all unchanged.

use std::collections::{BTreeMap, BTreeSet};

use super::contracts::Project;
use super::model::{Mutant, MutantStatus, PriorMutantResult, TestResult};
use super::range::ranges_match;
use super::test_identity::{group_by_file, resolve_unchanged};

/// Rewrite each mutant in `current_mutants` with a reused prior verdict where
/// safe, leaving the rest untouched. `covering_tests_by_mutant_id` gives, for
/// each mutant id, the current test ids that cover it (raw coverage, before
/// any `ignoreStatic` adjustment — see [`crate::plan::coverage::raw_covering_tests`]).
pub fn diff(
    current_mutants: &[Mutant],
    covering_tests_by_mutant_id: &BTreeMap<String, Vec<String>>,
    dry_run_tests: &[TestResult],
    project: &dyn Project,
) -> Vec<Mutant> {
    let Some(report) = project.incremental_report() else {
        return current_mutants.to_vec();
    };

    let tests_by_id: BTreeMap<&str, &TestResult> =
        dry_run_tests.iter().map(|test| (test.id.as_str(), test)).collect();
    let tests_by_file = group_by_file(dry_run_tests);

    current_mutants
        .iter()
        .map(|mutant| {
            if mutant.has_decided_status() {
                return mutant.clone();
            }
            let empty = Vec::new();
            let covering = covering_tests_by_mutant_id.get(&mutant.id).unwrap_or(&empty);
            match find_reusable_prior(
                mutant,
                covering,
                &tests_by_id,
                &tests_by_file,
                dry_run_tests,
                report,
                project,
            ) {
                Some(prior) => merge_prior_into_mutant(mutant, prior),
                None => mutant.clone(),
            }
        })
        .collect()
}

fn find_reusable_prior<'a>(
    mutant: &Mutant,
    covering_test_ids: &[String],
    tests_by_id: &BTreeMap<&str, &TestResult>,
    tests_by_file: &BTreeMap<&str, Vec<&TestResult>>,
    dry_run_tests: &[TestResult],
    report: &'a super::model::IncrementalReport,
    project: &dyn Project,
) -> Option<&'a PriorMutantResult> {
    let file_entry = report.files.get(&mutant.file_name)?;
    let current_source = project.source(&mutant.file_name)?;
    let prior_source = file_entry.source.as_str();

    file_entry
        .mutants
        .iter()
        .filter(|prior| prior.mutator_name == mutant.mutator_name && prior.replacement == mutant.replacement)
        .find(|prior| {
            ranges_match(prior_source, prior.location, current_source, mutant.location)
                && test_dependencies_unchanged(
                    prior,
                    covering_test_ids,
                    tests_by_id,
                    tests_by_file,
                    dry_run_tests,
                    project,
                )
        })
}

fn test_dependencies_unchanged(
    prior: &PriorMutantResult,
    covering_test_ids: &[String],
    tests_by_id: &BTreeMap<&str, &TestResult>,
    tests_by_file: &BTreeMap<&str, Vec<&TestResult>>,
    dry_run_tests: &[TestResult],
    project: &dyn Project,
) -> bool {
    let mut resolved_prior_ids = Vec::with_capacity(covering_test_ids.len());

    for test_id in covering_test_ids {
        let Some(test) = tests_by_id.get(test_id.as_str()) else {
            return false;
        };
        let empty = Vec::new();
        let siblings = tests_by_file.get(test.file_name.as_str()).unwrap_or(&empty);
        match resolve_unchanged(test, project, siblings) {
            Some(prior_test) => resolved_prior_ids.push(prior_test.id.clone()),
            None => return false,
        }
    }

    match prior.status {
        MutantStatus::Killed => {
            let Some(killer_id) = prior.killed_by.first() else {
                return false;
            };
            killer_still_present_unchanged(killer_id, dry_run_tests, tests_by_file, project)
        }
        status if status.is_non_killed_terminal() => {
            let prior_covered: BTreeSet<&str> = prior.covered_by.iter().map(String::as_str).collect();
            resolved_prior_ids.iter().all(|id| prior_covered.contains(id.as_str()))
        }
        MutantStatus::Ignored => false,
    }
}

fn killer_still_present_unchanged(
    killer_prior_id: &str,
    dry_run_tests: &[TestResult],
    tests_by_file: &BTreeMap<&str, Vec<&TestResult>>,
    project: &dyn Project,
) -> bool {
    dry_run_tests.iter().any(|test| {
        let empty = Vec::new();
        let siblings = tests_by_file.get(test.file_name.as_str()).unwrap_or(&empty);
        resolve_unchanged(test, project, siblings)
            .map(|prior_test| prior_test.id == killer_prior_id)
            .unwrap_or(false)
    })
}

/// Merge a reused prior verdict into a fresh [`Mutant`], preserving the
/// current mutant's `file_name`, `replacement`, `location`, and `mutator_name`.
fn merge_prior_into_mutant(current: &Mutant, prior: &PriorMutantResult) -> Mutant {
    Mutant {
        id: current.id.clone(),
        file_name: current.file_name.clone(),
        mutator_name: current.mutator_name.clone(),
        replacement: current.replacement.clone(),
        location: current.location,
        status: Some(prior.status),
        status_reason: prior.status_reason.clone(),
        tests_completed: prior.tests_completed,
        killed_by: Some(prior.killed_by.clone()),
        covered_by: Some(prior.covered_by.clone()),
        is_static: current.is_static,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::contracts::InMemoryProject;
    use crate::plan::model::{
        IncrementalReport, Location, OpenLocation, Position, PriorTestDefinition, SourceFileEntry,
        TestFileEntry,
    };

    fn mutant(id: &str, file: &str, mutator: &str, replacement: &str, loc: Location) -> Mutant {
        Mutant {
            id: id.to_string(),
            file_name: file.to_string(),
            mutator_name: mutator.to_string(),
            replacement: replacement.to_string(),
            location: loc,
            status: None,
            status_reason: None,
            tests_completed: None,
            killed_by: None,
            covered_by: None,
            is_static: None,
        }
    }

    fn loc(sl: u32, sc: u32, el: u32, ec: u32) -> Location {
        Location { start: Position::new(sl, sc), end: Position::new(el, ec) }
    }

    fn test_result(id: &str, file: &str, name: &str, start: (u32, u32)) -> TestResult {
        TestResult {
            id: id.to_string(),
            file_name: file.to_string(),
            name: name.to_string(),
            time_spent_ms: 10,
            start_position: Some(Position::new(start.0, start.1)),
        }
    }

    #[test]
    fn no_incremental_report_leaves_mutants_untouched() {
        let current = vec![mutant("1", "src/add.js", "min-replacement", "-", loc(3, 25, 3, 26))];
        let project = InMemoryProject::new().with_source("src/add.js", "a - b\n");
        let out = diff(&current, &BTreeMap::new(), &[], &project);
        assert_eq!(out, current);
    }

    #[test]
    fn unchanged_killed_mutant_is_reused() {
        let source = "function add(a, b) {\n  return a + b;\n}\n";
        let test_source = "describe('add', () => {\n  it('adds', () => {})\n})\n";

        let mut report = IncrementalReport::default();
        report.files.insert(
            "src/add.js".to_string(),
            SourceFileEntry {
                source: source.to_string(),
                mutants: vec![PriorMutantResult {
                    id: "p1".to_string(),
                    mutator_name: "arithmetic".to_string(),
                    replacement: "-".to_string(),
                    location: loc(2, 11, 2, 12),
                    status: MutantStatus::Killed,
                    status_reason: None,
                    tests_completed: Some(1),
                    killed_by: vec!["t1".to_string()],
                    covered_by: vec!["t1".to_string()],
                }],
            },
        );
        report.test_files.insert(
            "test/add.spec.js".to_string(),
            TestFileEntry {
                source: test_source.to_string(),
                tests: vec![PriorTestDefinition {
                    id: "t1".to_string(),
                    name: "adds".to_string(),
                    location: Some(OpenLocation { start: Position::new(2, 2), end: None }),
                }],
            },
        );

        let project = InMemoryProject::new()
            .with_source("src/add.js", source)
            .with_source("test/add.spec.js", test_source)
            .with_incremental_report(report);

        let current_mutants = vec![mutant("m1", "src/add.js", "arithmetic", "-", loc(2, 11, 2, 12))];
        let dry_run_tests = vec![test_result("t1", "test/add.spec.js", "adds", (2, 2))];
        let mut covering = BTreeMap::new();
        covering.insert("m1".to_string(), vec!["t1".to_string()]);

        let out = diff(&current_mutants, &covering, &dry_run_tests, &project);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].status, Some(MutantStatus::Killed));
        assert_eq!(out[0].killed_by.as_deref(), Some(["t1".to_string()].as_slice()));
        assert_eq!(out[0].id, "m1");
        assert_eq!(out[0].replacement, "-");
    }

    #[test]
    fn new_covering_test_breaks_reuse_for_non_killed_verdict() {
        let source = "function add(a, b) {\n  return a + b;\n}\n";

        let mut report = IncrementalReport::default();
        report.files.insert(
            "src/add.js".to_string(),
            SourceFileEntry {
                source: source.to_string(),
                mutants: vec![PriorMutantResult {
                    id: "p1".to_string(),
                    mutator_name: "arithmetic".to_string(),
                    replacement: "-".to_string(),
                    location: loc(2, 11, 2, 12),
                    status: MutantStatus::Survived,
                    status_reason: None,
                    tests_completed: Some(1),
                    killed_by: vec![],
                    covered_by: vec![],
                }],
            },
        );
        report.test_files.insert(
            "test/add.spec.js".to_string(),
            TestFileEntry { source: String::new(), tests: vec![] },
        );

        let project = InMemoryProject::new()
            .with_source("src/add.js", source)
            .with_incremental_report(report);

        let current_mutants = vec![mutant("m1", "src/add.js", "arithmetic", "-", loc(2, 11, 2, 12))];
        let dry_run_tests = vec![test_result("t1", "test/add.spec.js", "new test", (1, 0))];
        let mut covering = BTreeMap::new();
        covering.insert("m1".to_string(), vec!["t1".to_string()]);

        let out = diff(&current_mutants, &covering, &dry_run_tests, &project);
        assert_eq!(out[0].status, None);
    }

    #[test]
    fn removed_covering_test_preserves_reuse_for_non_killed_verdict() {
        let source = "function add(a, b) {\n  return a + b;\n}\n";

        let mut report = IncrementalReport::default();
        report.files.insert(
            "src/add.js".to_string(),
            SourceFileEntry {
                source: source.to_string(),
                mutants: vec![PriorMutantResult {
                    id: "p1".to_string(),
                    mutator_name: "arithmetic".to_string(),
                    replacement: "-".to_string(),
                    location: loc(2, 11, 2, 12),
                    status: MutantStatus::Survived,
                    status_reason: None,
                    tests_completed: Some(1),
                    killed_by: vec![],
                    covered_by: vec!["t1".to_string()],
                }],
            },
        );
        report.test_files.insert(
            "test/add.spec.js".to_string(),
            TestFileEntry { source: String::new(), tests: vec![] },
        );

        let project = InMemoryProject::new()
            .with_source("src/add.js", source)
            .with_incremental_report(report);

        let current_mutants = vec![mutant("m1", "src/add.js", "arithmetic", "-", loc(2, 11, 2, 12))];
        // The test that used to cover this mutant is gone; no current test covers it at all.
        let out = diff(&current_mutants, &BTreeMap::new(), &[], &project);
        assert_eq!(out[0].status, Some(MutantStatus::Survived));
    }
}
