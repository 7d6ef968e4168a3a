//! Test-identity matching (§4.2): deciding whether a current test still
//! refers to the same prior test definition, under test generation and
//! reordering.

use super::contracts::Project;
use super::model::{Position, PriorTestDefinition, TestResult};
use super::range::{close_open_range, ranges_match};
use crate::plan::model::Location;

/// Whether `test`, a current test, still matches the same prior test
/// definition unchanged. `siblings` must be every current `TestResult` in the
/// same file as `test` (including `test` itself), used to close open-ended
/// ranges the same way a prior run would have.
pub fn resolve_unchanged<'a>(
    test: &TestResult,
    project: &'a dyn Project,
    siblings: &[&TestResult],
) -> Option<&'a PriorTestDefinition> {
    let report = project.incremental_report()?;
    let test_file = report.test_files.get(&test.file_name)?;

    let candidates: Vec<&PriorTestDefinition> =
        test_file.tests.iter().filter(|candidate| candidate.name == test.name).collect();
    if candidates.is_empty() {
        return None;
    }

    let Some(current_start) = test.start_position else {
        // No position to verify against; only safe when the name is unambiguous.
        return if candidates.len() == 1 { Some(candidates[0]) } else { None };
    };

    let current_source = project.source(&test.file_name)?;
    let prior_source = test_file.source.as_str();

    let current_sibling_starts: Vec<Position> =
        siblings.iter().filter_map(|sibling| sibling.start_position).collect();
    let current_end = close_open_range(current_start, &current_sibling_starts, current_source);
    let current_range = Location { start: current_start, end: current_end };

    let prior_sibling_starts: Vec<Position> =
        test_file.tests.iter().filter_map(|candidate| candidate.location.map(|loc| loc.start)).collect();

    candidates.into_iter().find(|candidate| {
        let Some(location) = candidate.location else {
            return false;
        };
        let candidate_end = location
            .end
            .unwrap_or_else(|| close_open_range(location.start, &prior_sibling_starts, prior_source));
        let candidate_range = Location { start: location.start, end: candidate_end };
        ranges_match(prior_source, candidate_range, current_source, current_range)
    })
}

/// Group `tests` by file name, for passing as `siblings` to [`resolve_unchanged`].
pub fn group_by_file(tests: &[TestResult]) -> std::collections::BTreeMap<&str, Vec<&TestResult>> {
    let mut grouped: std::collections::BTreeMap<&str, Vec<&TestResult>> = Default::default();
    for test in tests {
        grouped.entry(test.file_name.as_str()).or_default().push(test);
    }
    grouped
}
