//! slitlab Command-Line Interface
//!
//! Runs the interference and observer experiments on the local simulator,
//! prints a summary of the outcome histograms and writes the comparison
//! figure as SVG.
//!
//! ```text
//! $ slitlab
//! $ slitlab --seed 7 -o out/double_slit.svg
//! $ slitlab --no-figure --json
//! ```

use std::path::PathBuf;

use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::run::{self, RunOptions};

/// Run the double-slit experiment on a quantum circuit simulator
#[derive(Parser, Debug)]
#[command(name = "slitlab")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Where to write the comparison figure
    #[arg(short, long, env = "SLITLAB_OUTPUT", default_value = "double_slit.svg")]
    output: PathBuf,

    /// Number of shots per experiment
    #[arg(
        short,
        long,
        default_value_t = slitlab_experiment::SHOTS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    shots: u32,

    /// Seed for deterministic sampling
    #[arg(long, env = "SLITLAB_SEED")]
    seed: Option<u64>,

    /// Skip the figure and only print the summary
    #[arg(long)]
    no_figure: bool,

    /// Print the counts as JSON instead of the styled summary
    #[arg(long)]
    json: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl From<Cli> for RunOptions {
    fn from(cli: Cli) -> Self {
        Self {
            output: cli.output,
            shots: cli.shots,
            seed: cli.seed,
            figure: !cli.no_figure,
            json: cli.json,
        }
    }
}

fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_filter(cli.verbose)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run::execute(&cli.into()).await {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
