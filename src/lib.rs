//! # mutant-planner
//!
//! The mutation-test planning core of a mutation-testing orchestrator.
//!
//! Given a set of candidate mutants, a prior dry run of the test suite
//! (per-test timings plus a mutant/test coverage matrix), policy options,
//! and optionally an incremental report from a previous mutation-testing
//! run, [`plan::plan_mutation_testing`] produces one [`plan::PlanRecord`]
//! per mutant: either an early result (the mutant is ignored, or its prior
//! verdict can safely be reused) or a run plan naming which tests to
//! execute, under which activation mode, and for how long.
//!
//! The crate is deliberately narrow: it does not generate mutants, run
//! tests, write reports, or load configuration. Those are collaborators,
//! referenced here only through the [`plan::contracts`] traits.

#![warn(missing_docs)]

pub mod plan;

pub use plan::{
    plan_mutation_testing, DryRunResult, Mutant, PlanError, PlanOptions, PlanRecord, TestResult,
};
