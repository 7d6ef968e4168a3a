//! Public facade (§5): the single entry point that orchestrates C1–C6 into a
//! complete, ordered list of plan records.

use std::collections::BTreeMap;

use super::contracts::{Project, Reporter, Sandbox};
use super::coverage::{classify, sanitize_coverage};
use super::differ::diff;
use super::error::{validate_mutants, PlanError};
use super::heuristic::maybe_warn_static_mutants;
use super::model::{DryRunResult, Mutant, PlanRecord};
use super::options::PlanOptions;
use super::synth::synthesize;

/// Plan an entire mutation-testing run: validate the input mutants, reconcile
/// them against the project's incremental report (if any), classify coverage
/// for whatever remains undecided, and synthesize one [`PlanRecord`] per
/// mutant, in input order.
///
/// `reporter` is notified exactly once, with the complete ordered list,
/// before this function returns it to the caller.
pub fn plan_mutation_testing(
    mutants: Vec<Mutant>,
    dry_run: DryRunResult,
    options: &PlanOptions,
    project: &dyn Project,
    sandbox: &dyn Sandbox,
    reporter: &dyn Reporter,
) -> Result<Vec<PlanRecord>, PlanError> {
    validate_mutants(&mutants)?;

    let coverage = dry_run.coverage.clone().map(|matrix| sanitize_coverage(matrix, &dry_run));
    let sanitized_dry_run = DryRunResult { tests: dry_run.tests, coverage };

    let covering_tests_by_mutant_id: BTreeMap<String, Vec<String>> = sanitized_dry_run
        .coverage
        .as_ref()
        .map(|matrix| {
            mutants
                .iter()
                .map(|mutant| {
                    (
                        mutant.id.clone(),
                        super::coverage::raw_covering_tests(&mutant.id, matrix),
                    )
                })
                .collect()
        })
        .unwrap_or_default();

    let reconciled = diff(&mutants, &covering_tests_by_mutant_id, &sanitized_dry_run.tests, project);

    let mut plans = Vec::with_capacity(reconciled.len());
    let mut classes = Vec::new();

    for mutant in reconciled {
        if mutant.has_decided_status() {
            let mut mutant = mutant;
            mutant.is_static = super::coverage::static_hit(&mutant.id, sanitized_dry_run.coverage.as_ref());
            plans.push(PlanRecord::EarlyResult { mutant });
            continue;
        }

        let classified = classify(
            &mutant.id,
            sanitized_dry_run.coverage.as_ref(),
            &sanitized_dry_run,
            options.ignore_static,
        );
        classes.push((mutant.id.clone(), classified.class.clone()));
        plans.push(synthesize(mutant, classified, options, sandbox));
    }

    maybe_warn_static_mutants(&plans, options, &classes);

    reporter.on_mutation_testing_plan_ready(&plans);
    Ok(plans)
}
