//! Batch what-if runner over a single loaded snapshot
//!
//! Fetches the account snapshot once, then allows running many scenario
//! configs against it without touching the providers again.

use rayon::prelude::*;

use crate::projection::{ProjectionEngine, ProjectionInput, ProjectionResult};
use crate::scenario::ScenarioConfig;

/// Pre-loaded runner for efficient batch projections
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(input);
///
/// for rate in [0.03, 0.05, 0.07] {
///     let config = ScenarioConfig { ... };
///     let result = runner.run(&config);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    input: ProjectionInput,
}

impl ScenarioRunner {
    /// Create a runner over an already-fetched snapshot
    pub fn new(input: ProjectionInput) -> Self {
        Self { input }
    }

    /// Run a single projection with the given config
    pub fn run(&self, config: &ScenarioConfig) -> ProjectionResult {
        ProjectionEngine::new(config.clone()).project(&self.input)
    }

    /// Run multiple what-if configs in parallel.
    ///
    /// Each run constructs its own engine and balance maps; nothing is
    /// shared across the parallel projections.
    pub fn run_scenarios(&self, configs: &[ScenarioConfig]) -> Vec<ProjectionResult> {
        configs.par_iter().map(|config| self.run(config)).collect()
    }

    /// Get a reference to the loaded snapshot
    pub fn input(&self) -> &ProjectionInput {
        &self.input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::{AccountSnapshot, AccountType};
    use std::collections::HashMap;

    fn runner() -> ScenarioRunner {
        ScenarioRunner::new(ProjectionInput {
            accounts: vec![AccountSnapshot::asset("tfsa-1", AccountType::Tfsa, 50_000.0)],
            recurring_expenses: Vec::new(),
        })
    }

    #[test]
    fn test_higher_returns_produce_higher_final_net_worth() {
        let configs: Vec<ScenarioConfig> = [0.03, 0.05, 0.07]
            .iter()
            .map(|&rate| ScenarioConfig {
                horizon_years: 5,
                investment_returns: HashMap::from([(AccountType::Tfsa, rate)]),
                savings_allocation: HashMap::from([(AccountType::Tfsa, 1.0)]),
                ..Default::default()
            })
            .collect();

        let results = runner().run_scenarios(&configs);
        assert_eq!(results.len(), 3);

        let finals: Vec<f64> = results
            .iter()
            .map(|r| r.net_worth.last().unwrap().value)
            .collect();
        assert!(finals[0] < finals[1] && finals[1] < finals[2]);
    }

    #[test]
    fn test_repeat_runs_are_deterministic() {
        let config = ScenarioConfig {
            horizon_years: 2,
            ..Default::default()
        };
        let runner = runner();
        let first = runner.run(&config);
        let second = runner.run(&config);
        assert_eq!(
            first.net_worth.last().unwrap().value,
            second.net_worth.last().unwrap().value
        );
    }
}
