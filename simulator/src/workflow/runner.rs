use crate::workflow::config::WorkflowConfig;
use anyhow::Context;
use doacore::{ComparisonRow, DoaEngine, DoaParameters, DoaResult};

pub struct WorkflowOutcome {
    pub results: Vec<DoaResult>,
    pub notes: Vec<String>,
}

/// Driver-side wrapper binding a workflow config to the engine.
pub struct Runner {
    config: WorkflowConfig,
    engine: DoaEngine,
}

impl Runner {
    pub fn new(config: WorkflowConfig, trials: usize) -> Self {
        Self {
            config,
            engine: DoaEngine::with_trials(trials),
        }
    }

    /// One estimation pass over the configured scenario.
    pub fn execute(&self) -> anyhow::Result<WorkflowOutcome> {
        let params = self.config.to_parameters();
        self.execute_with(&params)
    }

    /// One estimation pass over caller-supplied parameters (bridge jobs).
    pub fn execute_with(&self, params: &DoaParameters) -> anyhow::Result<WorkflowOutcome> {
        let results = self
            .engine
            .run_doa_estimation(params)
            .context("running DOA estimation")?;
        let (runs, shortfalls) = self.engine.metrics().snapshot();
        let notes = vec![format!(
            "runs {} shortfall recoveries {}",
            runs, shortfalls
        )];
        Ok(WorkflowOutcome { results, notes })
    }

    /// Trial-averaged comparison sweep over the configured base scenario.
    pub fn sweep(&self, parameter: &str, values: &[f64]) -> anyhow::Result<Vec<ComparisonRow>> {
        let params = self.config.to_parameters();
        self.engine
            .run_comparison_analysis(parameter, values, &params)
            .context("running comparison sweep")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doacore::Algorithm;

    fn reference_config() -> WorkflowConfig {
        WorkflowConfig::from_args(200, 8, 20.0, vec![20.0, 60.0], 0.5, 7)
    }

    #[test]
    fn runner_executes_workflow() {
        let runner = Runner::new(reference_config(), 2);
        let outcome = runner.execute().unwrap();
        assert_eq!(outcome.results.len(), 3);
        for algorithm in Algorithm::ALL {
            assert!(outcome
                .results
                .iter()
                .any(|result| result.algorithm == algorithm));
        }
        assert!(!outcome.notes.is_empty());
    }

    #[test]
    fn runner_sweeps_in_input_order() {
        let runner = Runner::new(reference_config(), 1);
        let rows = runner.sweep("snapshots", &[50.0, 100.0]).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].value, 50.0);
        assert_eq!(rows[1].value, 100.0);
    }

    #[test]
    fn runner_rejects_unknown_sweep_parameter() {
        let runner = Runner::new(reference_config(), 1);
        assert!(runner.sweep("bandwidth", &[1.0]).is_err());
    }
}
