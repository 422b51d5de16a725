//! Terminal and JSON summaries of the experiment outcomes.

use std::collections::BTreeMap;
use std::path::Path;

use console::style;
use serde::Serialize;
use slitlab_experiment::ScenarioOutcome;

/// Declared labels first (zero-filled), then any unexpected outcomes in
/// bitstring order.
pub fn rows(outcome: &ScenarioOutcome) -> Vec<(String, u64)> {
    let mut rows: Vec<(String, u64)> = outcome
        .label_counts()
        .into_iter()
        .map(|(label, count)| (label.to_string(), count))
        .collect();
    for (bitstring, &count) in outcome.counts.sorted() {
        if !outcome.scenario.labels.contains(&bitstring.as_str()) {
            rows.push((bitstring.clone(), count));
        }
    }
    rows
}

/// Print the run banner.
pub fn print_header(backend: &str, shots: u32, seed: Option<u64>) {
    println!();
    println!("{}", style("═".repeat(60)).cyan());
    println!("{}", style("  QUANTUM DOUBLE-SLIT EXPERIMENT").cyan().bold());
    println!("{}", style("═".repeat(60)).cyan());
    print!("  {} shots per scenario on {}", shots, style(backend).yellow());
    match seed {
        Some(seed) => println!(", seed {}", style(seed).yellow()),
        None => println!(),
    }
}

/// Print one scenario's histogram as a bar table.
pub fn print_outcome(outcome: &ScenarioOutcome) {
    let scenario = &outcome.scenario;
    println!();
    println!("{} {}", style("▶").green().bold(), style(scenario.title).bold());

    for (bitstring, count) in rows(outcome) {
        let percent = outcome.counts.probability(&bitstring) * 100.0;
        let bar = "█".repeat((percent / 2.0).round() as usize);
        println!(
            "  {}: {:>6} ({:>5.2}%) {}",
            style(bitstring).cyan(),
            count,
            percent,
            style(bar).green()
        );
    }
    println!("  {}", style(scenario.top_caption.replace('\n', " ")).dim());
    println!("  {}", style(scenario.bottom_caption).yellow());
}

/// Print where the figure went.
pub fn print_figure_written(path: &Path) {
    println!();
    println!(
        "{} Figure written to {}",
        style("✓").green().bold(),
        style(path.display()).green()
    );
}

/// Machine-readable run summary.
#[derive(Debug, Serialize)]
pub struct JsonReport {
    pub shots: u32,
    pub seed: Option<u64>,
    pub scenarios: Vec<JsonScenario>,
    pub figure: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct JsonScenario {
    pub name: &'static str,
    pub title: &'static str,
    pub counts: BTreeMap<String, u64>,
}

impl JsonReport {
    pub fn new(
        outcomes: &[ScenarioOutcome],
        shots: u32,
        seed: Option<u64>,
        figure: Option<&Path>,
    ) -> Self {
        let scenarios = outcomes
            .iter()
            .map(|outcome| JsonScenario {
                name: outcome.scenario.name(),
                title: outcome.scenario.title,
                counts: rows(outcome).into_iter().collect(),
            })
            .collect();
        Self {
            shots,
            seed,
            scenarios,
            figure: figure.map(|path| path.display().to_string()),
        }
    }
}
