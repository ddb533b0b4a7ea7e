//! MaxRank CLI
//!
//! Usage:
//!   `maxrank data.csv queries.csv exact-high-dim`
//!   `maxrank data.csv queries.csv AA --output-dir out --parallel`

// CLI tool - relax pedantic lints for ergonomics
#![allow(clippy::pedantic)]

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use maxrank_core::{RunConfig, RunContext, RunReport, WitnessMode};

#[derive(Parser)]
#[command(name = "maxrank")]
#[command(version)]
#[command(about = "MaxRank - best achievable rank of query records under linear scoring", long_about = None)]
struct Cli {
    /// Dataset CSV (id column followed by numeric attributes)
    #[arg(value_name = "DATAFILE")]
    data: PathBuf,

    /// Query CSV (first column holds dataset ids)
    #[arg(value_name = "QUERYFILE")]
    queries: PathBuf,

    /// High-dimensional method: exact-high-dim (BA) or approximate-high-dim (AA)
    #[arg(value_name = "METHOD")]
    method: String,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory receiving the result files
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Write every witness weight vector instead of the first one
    #[arg(long)]
    all_witnesses: bool,

    /// Reject unrecognised method selectors instead of falling back
    #[arg(long)]
    strict_method: bool,

    /// Rank queries on all cores
    #[arg(long)]
    parallel: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn run_config(&self) -> anyhow::Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::load_from_path(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => RunConfig::load().context("Failed to load config from environment")?,
        };

        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if self.all_witnesses {
            config.witnesses = WitnessMode::All;
        }
        config.strict_method |= self.strict_method;
        config.parallel |= self.parallel;
        Ok(config)
    }
}

fn print_report(report: &RunReport) {
    println!("\n{:<24} {:>8} {:>6}", "Query", "MaxRank", "Cells");
    for result in &report.table {
        println!(
            "{:<24} {:>8} {:>6}",
            result.query_id.as_str(),
            result.rank,
            result.cells.len()
        );
    }

    println!("\nSummary ({})", report.strategy);
    println!("  Queries:   {}", report.table.len());
    println!("  Min rank:  {}", report.summary.min);
    println!("  Max rank:  {}", report.summary.max);
    println!("  Avg rank:  {:.3}", report.summary.avg);
    println!("  Duration:  {} ms", report.elapsed.as_millis());
    println!("  Output:    {}", report.artifacts.ranks.display());
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = cli.run_config()?;

    let ctx = RunContext::load(&cli.data, &cli.queries, config)?;
    println!(
        "Loaded {} records from {}",
        ctx.dataset().len(),
        cli.data.display()
    );

    let method = ctx.resolve_method(&cli.method)?;

    let report = ctx.execute(method)?;
    print_report(&report);

    Ok(())
}
