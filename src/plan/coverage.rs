//! Coverage classification (§4.4): deciding, per mutant, which tests must run
//! and whether the mutant can be activated statically.

use std::collections::{BTreeMap, BTreeSet};

use super::model::{CoverageMatrix, DryRunResult};

/// Classification reached for a single mutant, before plan synthesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverageClass {
    /// The dry run carried no coverage matrix at all (§4.4.1): there is no
    /// basis to filter tests, so the whole suite runs unfiltered. Distinct
    /// from a mutation point with recorded-but-zero hits, which classifies
    /// as `PerTest` with an empty test list (§4.4.5).
    NoCoverage,
    /// The mutation point is hit outside of any test (at module load); the
    /// whole suite reruns regardless of whether tests also cover it (§4.4.2,
    /// §4.4.3).
    Static,
    /// Covered only by specific tests, each of which must run.
    PerTest {
        /// Ids of the tests that must execute, in ascending id order.
        test_ids: Vec<String>,
    },
}

/// A mutant's classification together with the net test time it will cost
/// and the coverage metadata (§4.4) that gets attached to the mutant itself,
/// independent of which tests the run plan actually filters to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    /// The coverage class reached.
    pub class: CoverageClass,
    /// Sum of `time_spent_ms` for every test in `class`'s `test_ids`, or for
    /// the whole suite when `class` is `Static` (§4.5: static mutants rerun
    /// everything since their effect isn't attributable to one test).
    pub net_time_ms: u64,
    /// Whether this mutation point is hit outside of any test. `None` when
    /// coverage is entirely unknown (§4.4.1).
    pub is_static: Option<bool>,
    /// Test ids known to cover this mutation point. `None` when coverage is
    /// entirely unknown; empty when the mutant is static-only (§4.4.2).
    pub covered_by: Option<Vec<String>>,
    /// `static[id] + Σ_t perTest[t][id]`, used for the hit limit (§4.5).
    /// `None` when coverage is entirely unknown.
    pub total_hits: Option<u64>,
}

/// Drop coverage entries that reference a test id absent from `dry_run.tests`,
/// logging a warning for each one (§4.4: malformed coverage is recoverable,
/// not fatal).
pub fn sanitize_coverage(mut coverage: CoverageMatrix, dry_run: &DryRunResult) -> CoverageMatrix {
    let known_ids: BTreeSet<&str> = dry_run.tests.iter().map(|test| test.id.as_str()).collect();

    let stale: Vec<String> = coverage
        .per_test
        .keys()
        .filter(|test_id| !known_ids.contains(test_id.as_str()))
        .cloned()
        .collect();

    for test_id in stale {
        tracing::warn!(
            test_id = %test_id,
            "coverage referenced an unknown test id; dropping the stale entry"
        );
        coverage.per_test.remove(&test_id);
    }

    coverage
}

/// Whether `mutant_id` is hit outside of any test (module load), i.e.
/// `static[id] > 0`. `None` when coverage is entirely unknown (§4.4.1);
/// shared by [`classify`] and by early-result mutants that never reach
/// classification (already-decided input, or a reused incremental verdict),
/// which still need this flag populated on the outgoing record.
pub fn static_hit(mutant_id: &str, coverage: Option<&CoverageMatrix>) -> Option<bool> {
    let coverage = coverage?;
    Some(
        coverage
            .static_hits
            .as_ref()
            .and_then(|hits| hits.get(mutant_id))
            .is_some_and(|count| *count > 0),
    )
}

/// The current set of test ids that hit `mutant_id` at least once, per-test
/// only (no `ignoreStatic` adjustment — shared by the differ and by [`classify`]).
pub fn raw_covering_tests(mutant_id: &str, coverage: &CoverageMatrix) -> Vec<String> {
    coverage
        .per_test
        .iter()
        .filter(|(_, hits)| hits.get(mutant_id).is_some_and(|count| *count > 0))
        .map(|(test_id, _)| test_id.clone())
        .collect()
}

/// `static[id] + Σ_t perTest[t][id]`, regardless of `ignoreStatic` (§4.5):
/// the hit limit is a property of raw coverage, not of the classification
/// policy applied on top of it.
fn total_hits(mutant_id: &str, coverage: &CoverageMatrix) -> u64 {
    let static_part = coverage
        .static_hits
        .as_ref()
        .and_then(|hits| hits.get(mutant_id))
        .copied()
        .unwrap_or(0);
    let per_test_part: u64 = coverage
        .per_test
        .values()
        .filter_map(|hits| hits.get(mutant_id))
        .sum();
    static_part + per_test_part
}

fn net_time_for(test_ids: &[String], dry_run: &DryRunResult) -> u64 {
    let times: BTreeMap<&str, u64> =
        dry_run.tests.iter().map(|test| (test.id.as_str(), test.time_spent_ms)).collect();
    test_ids.iter().filter_map(|id| times.get(id.as_str())).sum()
}

/// Classify one mutant's coverage, given the sanitized matrix and dry-run
/// timings. `ignore_static` controls whether a static hit alone is enough to
/// treat the mutant as statically covered, or whether it must fall back to
/// per-test coverage (§4.4, §4.6).
pub fn classify(
    mutant_id: &str,
    coverage: Option<&CoverageMatrix>,
    dry_run: &DryRunResult,
    ignore_static: bool,
) -> Classified {
    let Some(coverage) = coverage else {
        // §4.5: a mutant with no coverage data at all still runs against the
        // whole suite, so its net time is the suite's total, not zero.
        let net_time_ms = dry_run.tests.iter().map(|test| test.time_spent_ms).sum();
        return Classified {
            class: CoverageClass::NoCoverage,
            net_time_ms,
            is_static: None,
            covered_by: None,
            total_hits: None,
        };
    };

    let has_static_hit = static_hit(mutant_id, Some(coverage)).unwrap_or(false);

    let mut covering = raw_covering_tests(mutant_id, coverage);
    covering.sort();
    let total = total_hits(mutant_id, coverage);

    if !has_static_hit && covering.is_empty() {
        // §4.4.5: neither static nor per-test coverage recorded for this id.
        return Classified {
            class: CoverageClass::PerTest { test_ids: Vec::new() },
            net_time_ms: 0,
            is_static: Some(false),
            covered_by: Some(Vec::new()),
            total_hits: Some(total),
        };
    }

    if has_static_hit && covering.is_empty() {
        // §4.4.2: static-only. `ignoreStatic` decides Ignored vs. Static in
        // the synthesizer; the classification itself is unaffected.
        let net_time_ms = dry_run.tests.iter().map(|test| test.time_spent_ms).sum();
        return Classified {
            class: CoverageClass::Static,
            net_time_ms,
            is_static: Some(true),
            covered_by: Some(Vec::new()),
            total_hits: Some(total),
        };
    }

    if has_static_hit {
        // §4.4.3: hybrid. `ignoreStatic` demotes the class to per-test but
        // the mutant still carries `static = true` and its full coverage.
        if ignore_static {
            let net_time_ms = net_time_for(&covering, dry_run);
            return Classified {
                class: CoverageClass::PerTest { test_ids: covering.clone() },
                net_time_ms,
                is_static: Some(true),
                covered_by: Some(covering),
                total_hits: Some(total),
            };
        }
        let net_time_ms = dry_run.tests.iter().map(|test| test.time_spent_ms).sum();
        return Classified {
            class: CoverageClass::Static,
            net_time_ms,
            is_static: Some(true),
            covered_by: Some(covering),
            total_hits: Some(total),
        };
    }

    // §4.4.4: per-test only.
    let net_time_ms = net_time_for(&covering, dry_run);
    Classified {
        class: CoverageClass::PerTest { test_ids: covering.clone() },
        net_time_ms,
        is_static: Some(false),
        covered_by: Some(covering),
        total_hits: Some(total),
    }
}
