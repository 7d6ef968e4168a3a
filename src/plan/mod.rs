//! Mutation-test planning core: given a dry run's timings and coverage
//! matrix, a set of candidate mutants, and (optionally) a previous run's
//! incremental report, produce one execution plan per mutant.
//!
//! The pipeline is `differ` (§4.3) → `coverage` (§4.4) → `synth` (§4.5) →
//! `heuristic` (§4.6), orchestrated by [`facade::plan_mutation_testing`].

pub mod contracts;
pub mod coverage;
pub mod differ;
pub mod error;
pub mod facade;
pub mod heuristic;
pub mod model;
pub mod options;
pub mod range;
pub mod synth;
pub mod test_identity;

pub use contracts::{IdentitySandbox, InMemoryProject, Project, RecordingReporter, Reporter, Sandbox};
pub use error::PlanError;
pub use facade::plan_mutation_testing;
pub use model::{
    ActivationMode, CoverageMatrix, DryRunResult, IncrementalReport, Location, Mutant,
    MutantStatus, OpenLocation, PlanRecord, Position, PriorMutantResult, PriorTestDefinition,
    RunOptions, SourceFileEntry, TestFileEntry, TestResult,
};
pub use options::PlanOptions;
