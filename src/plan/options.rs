//! Planner-wide policy options.

use serde::{Deserialize, Serialize};

/// Base timeout applied to every mutant, before the net-time-scaled component.
pub const DEFAULT_BASE_TIMEOUT_MS: u64 = 5_000;
/// Multiplier applied to a mutant's net test time when computing its timeout.
pub const DEFAULT_TIMEOUT_FACTOR: f64 = 1.5;

/// Policy options consumed by the coverage classifier, the plan synthesizer,
/// and the static-mutant heuristic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanOptions {
    /// Treat static-only mutants as ignored rather than running them.
    pub ignore_static: bool,
    /// Keep running tests for a mutant after the first failure.
    pub disable_bail: bool,
    /// Base timeout in milliseconds, added to every mutant's computed timeout.
    pub base_timeout_ms: u64,
    /// Multiplier applied to a mutant's net test time.
    pub timeout_factor: f64,
    /// Fixed overhead added to every mutant's timeout (process startup, etc.),
    /// supplied by the host's dependency-injection layer.
    pub time_overhead_ms: u64,
    /// Emit the static-mutant slowness warning (§4.6) when triggered.
    pub warnings_slow: bool,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            ignore_static: false,
            disable_bail: false,
            base_timeout_ms: DEFAULT_BASE_TIMEOUT_MS,
            timeout_factor: DEFAULT_TIMEOUT_FACTOR,
            time_overhead_ms: 0,
            warnings_slow: true,
        }
    }
}

impl PlanOptions {
    /// Enable or disable `ignoreStatic`.
    pub fn with_ignore_static(mut self, ignore_static: bool) -> Self {
        self.ignore_static = ignore_static;
        self
    }

    /// Enable or disable `disableBail`.
    pub fn with_disable_bail(mut self, disable_bail: bool) -> Self {
        self.disable_bail = disable_bail;
        self
    }

    /// Set the base timeout in milliseconds.
    pub fn with_base_timeout_ms(mut self, base_timeout_ms: u64) -> Self {
        self.base_timeout_ms = base_timeout_ms;
        self
    }

    /// Set the net-time multiplier.
    pub fn with_timeout_factor(mut self, timeout_factor: f64) -> Self {
        self.timeout_factor = timeout_factor;
        self
    }

    /// Set the fixed per-mutant overhead in milliseconds.
    pub fn with_time_overhead_ms(mut self, time_overhead_ms: u64) -> Self {
        self.time_overhead_ms = time_overhead_ms;
        self
    }

    /// Enable or disable the static-mutant slowness warning.
    pub fn with_warnings_slow(mut self, warnings_slow: bool) -> Self {
        self.warnings_slow = warnings_slow;
        self
    }

    /// Compute the timeout for a mutant whose estimated net test time is `net_time_ms`.
    pub fn timeout_for(&self, net_time_ms: u64) -> u64 {
        let scaled = self.timeout_factor * net_time_ms as f64;
        self.base_timeout_ms
            .saturating_add(scaled.round() as u64)
            .saturating_add(self.time_overhead_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_match_documented_defaults() {
        let options = PlanOptions::default();
        assert!(!options.ignore_static);
        assert!(!options.disable_bail);
        assert!(options.warnings_slow);
        assert_eq!(options.base_timeout_ms, DEFAULT_BASE_TIMEOUT_MS);
    }

    #[test]
    fn builder_overrides_apply() {
        let options = PlanOptions::default()
            .with_ignore_static(true)
            .with_disable_bail(true)
            .with_base_timeout_ms(1_000)
            .with_timeout_factor(2.0)
            .with_time_overhead_ms(50)
            .with_warnings_slow(false);

        assert!(options.ignore_static);
        assert!(options.disable_bail);
        assert_eq!(options.base_timeout_ms, 1_000);
        assert_eq!(options.timeout_factor, 2.0);
        assert_eq!(options.time_overhead_ms, 50);
        assert!(!options.warnings_slow);
    }

    #[test]
    fn timeout_for_combines_base_factor_and_overhead() {
        let options = PlanOptions::default()
            .with_base_timeout_ms(1_000)
            .with_timeout_factor(1.5)
            .with_time_overhead_ms(200);

        assert_eq!(options.timeout_for(100), 1_000 + 150 + 200);
    }
}
