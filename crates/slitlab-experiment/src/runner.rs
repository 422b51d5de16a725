//! Running circuit descriptions on a backend.

use slitlab_hal::{Backend, Counts, HalError};
use tracing::{debug, info, instrument};

use crate::error::{SimulationError, SimulationResult};
use crate::scenario::{Scenario, ScenarioOutcome};
use crate::spec::CircuitSpec;

/// Build, compile and execute `spec` for `shots` trials.
///
/// The backend may be reused across calls; nothing is carried over between
/// them. Fails if the returned counts do not add up to `shots`.
#[instrument(skip(backend, spec), fields(scenario = spec.name, backend = backend.name()))]
pub async fn run_experiment<B>(
    backend: &B,
    spec: &CircuitSpec,
    shots: u32,
) -> SimulationResult<Counts>
where
    B: Backend + ?Sized,
{
    let circuit = spec.to_circuit().map_err(|source| SimulationError::Build {
        scenario: spec.name.to_string(),
        source,
    })?;
    let backend_error = |source: HalError| SimulationError::Backend {
        scenario: spec.name.to_string(),
        source,
    };

    let executable = backend.compile(&circuit).await.map_err(backend_error)?;
    debug!(
        "Compiled {} ops into {} ops",
        circuit.num_ops(),
        executable.circuit().num_ops()
    );

    let result = backend
        .execute(&executable, shots)
        .await
        .map_err(backend_error)?;

    let expected = u64::from(shots);
    let actual = result.counts.total_shots();
    if actual != expected {
        return Err(SimulationError::CountMismatch {
            scenario: spec.name.to_string(),
            expected,
            actual,
        });
    }

    info!(
        outcomes = result.counts.len(),
        elapsed_ms = result.execution_time_ms,
        "Experiment finished"
    );
    Ok(result.counts)
}

/// Run each scenario in order, stopping at the first failure.
pub async fn run_scenarios<B>(
    backend: &B,
    scenarios: &[Scenario],
    shots: u32,
) -> SimulationResult<Vec<ScenarioOutcome>>
where
    B: Backend + ?Sized,
{
    let mut outcomes = Vec::with_capacity(scenarios.len());
    for scenario in scenarios {
        let counts = run_experiment(backend, &scenario.spec, shots).await?;
        outcomes.push(ScenarioOutcome {
            scenario: *scenario,
            counts,
        });
    }
    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use slitlab_hal::{Capabilities, Executable, ExecutionResult, HalResult, ValidationResult};
    use slitlab_ir::Circuit;

    /// Reports one trial fewer than requested.
    struct LossyBackend {
        caps: Capabilities,
    }

    #[async_trait]
    impl Backend for LossyBackend {
        fn name(&self) -> &str {
            "lossy"
        }

        fn capabilities(&self) -> &Capabilities {
            &self.caps
        }

        async fn validate(&self, _circuit: &Circuit) -> HalResult<ValidationResult> {
            Ok(ValidationResult::Valid)
        }

        async fn compile(&self, circuit: &Circuit) -> HalResult<Executable> {
            Ok(Executable::new(self.name(), circuit.clone()))
        }

        async fn execute(
            &self,
            _executable: &Executable,
            shots: u32,
        ) -> HalResult<ExecutionResult> {
            let mut counts = Counts::new();
            counts.insert("0", u64::from(shots.saturating_sub(1)));
            Ok(ExecutionResult::new(counts, shots))
        }
    }

    /// Refuses to compile anything.
    struct BrokenBackend {
        caps: Capabilities,
    }

    #[async_trait]
    impl Backend for BrokenBackend {
        fn name(&self) -> &str {
            "broken"
        }

        fn capabilities(&self) -> &Capabilities {
            &self.caps
        }

        async fn validate(&self, _circuit: &Circuit) -> HalResult<ValidationResult> {
            Ok(ValidationResult::Invalid {
                reasons: vec!["offline".into()],
            })
        }

        async fn compile(&self, _circuit: &Circuit) -> HalResult<Executable> {
            Err(HalError::Backend("offline".into()))
        }

        async fn execute(
            &self,
            _executable: &Executable,
            _shots: u32,
        ) -> HalResult<ExecutionResult> {
            Err(HalError::Backend("offline".into()))
        }
    }

    #[tokio::test]
    async fn test_count_mismatch_detected() {
        let backend = LossyBackend {
            caps: Capabilities::simulator(2),
        };
        let err = run_experiment(&backend, &CircuitSpec::INTERFERENCE, 16)
            .await
            .unwrap_err();

        assert_eq!(err.scenario(), "interference");
        assert!(matches!(
            err,
            SimulationError::CountMismatch {
                expected: 16,
                actual: 15,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_backend_failure_names_scenario() {
        let backend = BrokenBackend {
            caps: Capabilities::simulator(2),
        };
        let err = run_scenarios(&backend, &Scenario::ALL, 8).await.unwrap_err();

        assert_eq!(err.scenario(), "interference");
        assert!(matches!(err, SimulationError::Backend { .. }));
        assert!(err.to_string().contains("interference"));
    }

    #[tokio::test]
    async fn test_runs_through_trait_object() {
        let backend: Box<dyn Backend> = Box::new(LossyBackend {
            caps: Capabilities::simulator(2),
        });
        let result = run_experiment(backend.as_ref(), &CircuitSpec::OBSERVER, 1).await;
        assert!(matches!(
            result,
            Err(SimulationError::CountMismatch { actual: 0, .. })
        ));
    }
}
