//! Scenarios pair a circuit with the text shown next to its histogram.

use serde::Serialize;
use slitlab_hal::Counts;

use crate::spec::CircuitSpec;

/// A circuit plus its presentation metadata.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scenario {
    /// The circuit to run.
    pub spec: CircuitSpec,
    /// Panel title.
    pub title: &'static str,
    /// Outcome labels shown on the x axis, in order.
    pub labels: &'static [&'static str],
    /// Caption drawn inside the plot area.
    pub top_caption: &'static str,
    /// Caption drawn below the axis.
    pub bottom_caption: &'static str,
}

impl Scenario {
    /// Two Hadamards with no observer.
    pub const INTERFERENCE: Scenario = Scenario {
        spec: CircuitSpec::INTERFERENCE,
        title: "SCENARIO 1: INTERFERENCE (NO OBSERVER)",
        labels: &["0"],
        top_caption: "CONSTRUCTIVE\nINTERFERENCE",
        bottom_caption: "WAVE-LIKE BEHAVIOR",
    };

    /// Two Hadamards with a which-path marker in between.
    pub const OBSERVER: Scenario = Scenario {
        spec: CircuitSpec::OBSERVER,
        title: "SCENARIO 2: OBSERVER EFFECT",
        labels: &["0", "1"],
        top_caption: "RANDOM OUTCOME",
        bottom_caption: "PARTICLE-LIKE BEHAVIOR",
    };

    /// Both scenarios in display order.
    pub const ALL: [Scenario; 2] = [Scenario::INTERFERENCE, Scenario::OBSERVER];

    /// Short identifier of the underlying circuit.
    pub fn name(&self) -> &'static str {
        self.spec.name
    }
}

/// Counts gathered for one scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioOutcome {
    /// The scenario that was run.
    pub scenario: Scenario,
    /// Outcome frequencies; totals equal the requested shots.
    pub counts: Counts,
}

impl ScenarioOutcome {
    /// Count for each declared label, zero when the outcome never occurred.
    pub fn label_counts(&self) -> Vec<(&'static str, u64)> {
        self.scenario
            .labels
            .iter()
            .map(|&label| (label, self.counts.get(label)))
            .collect()
    }
}
