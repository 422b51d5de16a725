//! Run both experiments and publish the results.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use slitlab_adapter_sim::SimulatorBackend;
use slitlab_experiment::{Scenario, ScenarioOutcome, run_experiment};
use slitlab_hal::Backend;
use slitlab_report::{SvgPresenter, render_scenarios};

use super::summary::{self, JsonReport};

/// Options for a single invocation.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub output: PathBuf,
    pub shots: u32,
    pub seed: Option<u64>,
    pub figure: bool,
    pub json: bool,
}

fn spinner(hidden: bool, message: String) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(template);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Execute the run command.
pub async fn execute(options: &RunOptions) -> Result<()> {
    debug!(?options, "Starting run");
    let backend = match options.seed {
        Some(seed) => SimulatorBackend::with_seed(seed),
        None => SimulatorBackend::new(),
    };

    if !options.json {
        summary::print_header(backend.name(), options.shots, options.seed);
    }

    let mut outcomes = Vec::with_capacity(Scenario::ALL.len());
    for scenario in Scenario::ALL {
        let progress = spinner(options.json, format!("Running {}...", scenario.name()));
        let counts = run_experiment(&backend, &scenario.spec, options.shots).await;
        progress.finish_and_clear();

        let counts =
            counts.with_context(|| format!("experiment '{}' failed", scenario.name()))?;
        outcomes.push(ScenarioOutcome { scenario, counts });
    }

    if !options.json {
        for outcome in &outcomes {
            summary::print_outcome(outcome);
        }
    }

    let figure_path = if options.figure {
        let [first, second] = outcomes.as_slice() else {
            bail!("expected two scenario outcomes, got {}", outcomes.len());
        };
        let figure = render_scenarios(first, second, options.shots)
            .context("failed to build the comparison figure")?;
        SvgPresenter::new()
            .present_to_file(&figure, &options.output)
            .with_context(|| format!("failed to write {}", options.output.display()))?;
        Some(options.output.as_path())
    } else {
        None
    };

    if options.json {
        let report = JsonReport::new(&outcomes, options.shots, options.seed, figure_path);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if let Some(path) = figure_path {
        summary::print_figure_written(path);
    } else {
        println!();
        println!("{} Figure skipped", style("✓").green().bold());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(output: PathBuf, figure: bool) -> RunOptions {
        RunOptions {
            output,
            shots: 256,
            seed: Some(11),
            figure,
            json: true,
        }
    }

    #[tokio::test]
    async fn test_execute_without_figure() {
        let path = std::env::temp_dir().join("slitlab-cli-unit-never-written.svg");
        let _ = std::fs::remove_file(&path);
        execute(&options(path.clone(), false)).await.unwrap();
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_execute_writes_figure() {
        let path = std::env::temp_dir().join(format!(
            "slitlab-cli-unit-{}.svg",
            std::process::id()
        ));
        execute(&options(path.clone(), true)).await.unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("WAVE-LIKE BEHAVIOR"));
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_unwritable_output_fails() {
        let path = std::env::temp_dir()
            .join("slitlab-cli-missing-dir")
            .join("nested")
            .join("out.svg");
        let err = execute(&options(path, true)).await.unwrap_err();
        assert!(format!("{err:#}").contains("failed to write"));
    }
}
