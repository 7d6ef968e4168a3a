//! Plan synthesis (§4.5): turning a mutant's coverage classification into the
//! concrete record the test runner will execute (or skip).

use super::contracts::Sandbox;
use super::coverage::{Classified, CoverageClass};
use super::model::{ActivationMode, Mutant, MutantStatus, PlanRecord, RunOptions};
use super::options::PlanOptions;

/// Multiplier applied to a mutation point's total recorded hit count to
/// derive its hit limit (§4.5): generous enough not to trip on legitimate
/// loops, tight enough to catch a mutant that spins forever.
const HIT_LIMIT_MULTIPLIER: u64 = 100;

/// Synthesize the plan record for one mutant, given its coverage classification.
pub fn synthesize(
    mutant: Mutant,
    classified: Classified,
    options: &PlanOptions,
    sandbox: &dyn Sandbox,
) -> PlanRecord {
    let Classified { class, net_time_ms, is_static, covered_by, total_hits } = classified;
    let hit_limit = total_hits.map(|hits| hits.saturating_mul(HIT_LIMIT_MULTIPLIER));

    match class {
        // §4.5: coverage data was entirely unavailable for this dry run, so
        // there's no basis to filter tests — the whole suite runs against
        // the mutant, same as if coverage tracking were off.
        CoverageClass::NoCoverage => run_record(
            mutant,
            None,
            ActivationMode::Runtime,
            net_time_ms,
            hit_limit,
            is_static,
            covered_by,
            options,
            sandbox,
            false,
        ),
        CoverageClass::Static if options.ignore_static => early_result(
            mutant,
            MutantStatus::Ignored,
            "Static mutant (and \"ignoreStatic\" was enabled)",
            is_static,
            covered_by,
        ),
        CoverageClass::Static => run_record(
            mutant,
            None,
            ActivationMode::Static,
            net_time_ms,
            hit_limit,
            is_static,
            covered_by,
            options,
            sandbox,
            true,
        ),
        CoverageClass::PerTest { test_ids } => run_record(
            mutant,
            Some(test_ids),
            ActivationMode::Runtime,
            net_time_ms,
            hit_limit,
            is_static,
            covered_by,
            options,
            sandbox,
            false,
        ),
    }
}

fn early_result(
    mut mutant: Mutant,
    status: MutantStatus,
    reason: &str,
    is_static: Option<bool>,
    covered_by: Option<Vec<String>>,
) -> PlanRecord {
    mutant.status = Some(status);
    mutant.status_reason = Some(reason.to_string());
    mutant.is_static = is_static;
    mutant.covered_by = covered_by;
    PlanRecord::EarlyResult { mutant }
}

#[allow(clippy::too_many_arguments)]
fn run_record(
    mut mutant: Mutant,
    test_filter: Option<Vec<String>>,
    mutant_activation: ActivationMode,
    net_time_ms: u64,
    hit_limit: Option<u64>,
    is_static: Option<bool>,
    covered_by: Option<Vec<String>>,
    options: &PlanOptions,
    sandbox: &dyn Sandbox,
    reload_environment: bool,
) -> PlanRecord {
    mutant.is_static = is_static;
    mutant.covered_by = covered_by;

    let run_options = RunOptions {
        sandbox_file_name: sandbox.sandbox_file_for(&mutant.file_name),
        active_mutant: mutant.clone(),
        test_filter,
        timeout_ms: options.timeout_for(net_time_ms),
        disable_bail: options.disable_bail,
        hit_limit,
        mutant_activation,
        reload_environment: Some(reload_environment),
    };

    PlanRecord::Run { mutant, run_options, net_time_ms }
}
