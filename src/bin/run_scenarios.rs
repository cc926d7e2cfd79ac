//! Run a return-rate sweep over an account snapshot loaded from CSV
//!
//! Outputs per-month net worth for each scenario variant for comparison

use anyhow::anyhow;
use clap::Parser;
use networth_engine::accounts::loader;
use networth_engine::projection::ProjectionInput;
use networth_engine::{ScenarioConfig, ScenarioRunner};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(about = "Batch what-if projections over an account snapshot")]
struct Args {
    /// Directory containing accounts.csv and recurring_expenses.csv
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Scenario config JSON; defaults apply when omitted
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Override the projection horizon in years
    #[arg(long)]
    horizon_years: Option<u32>,

    /// Output CSV path
    #[arg(long, default_value = "scenario_sweep.csv")]
    output: PathBuf,
}

/// Return-rate deltas applied to every investment account type
const RATE_DELTAS: [f64; 5] = [-0.02, -0.01, 0.0, 0.01, 0.02];

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    println!("Loading snapshot from {}...", args.data_dir.display());

    let accounts = loader::load_accounts(args.data_dir.join("accounts.csv"))
        .map_err(|e| anyhow!(e))?;
    let recurring_expenses =
        loader::load_recurring_expenses(args.data_dir.join("recurring_expenses.csv"))
            .map_err(|e| anyhow!(e))?;
    println!(
        "Loaded {} accounts and {} recurring expenses in {:?}",
        accounts.len(),
        recurring_expenses.len(),
        start.elapsed()
    );

    let mut base_config = match &args.scenario {
        Some(path) => {
            let file = File::open(path)?;
            serde_json::from_reader(file)?
        }
        None => ScenarioConfig::default(),
    };
    if let Some(horizon_years) = args.horizon_years {
        base_config.horizon_years = horizon_years;
    }

    // One variant per return-rate delta
    let configs: Vec<ScenarioConfig> = RATE_DELTAS
        .iter()
        .map(|&delta| {
            let mut config = base_config.clone();
            for rate in config.investment_returns.values_mut() {
                *rate += delta;
            }
            config
        })
        .collect();

    println!("Running {} scenarios...", configs.len());
    let projection_start = Instant::now();

    let runner = ScenarioRunner::new(ProjectionInput {
        accounts,
        recurring_expenses,
    });
    let results = runner.run_scenarios(&configs);

    println!("Projections complete in {:?}", projection_start.elapsed());

    // Write per-month net worth per variant
    let mut file = File::create(&args.output)?;
    let labels: Vec<String> = RATE_DELTAS
        .iter()
        .map(|delta| format!("NetWorth{:+.0}bp", delta * 10_000.0))
        .collect();
    writeln!(file, "Month,{}", labels.join(","))?;

    let months = results[0].months();
    for month in 0..months {
        let values: Vec<String> = results
            .iter()
            .map(|result| format!("{:.2}", result.net_worth[month].value))
            .collect();
        writeln!(file, "{},{}", month, values.join(","))?;
    }

    println!("Output written to {}", args.output.display());

    // Print summary per variant
    println!("\nSweep Summary:");
    for (delta, result) in RATE_DELTAS.iter().zip(&results) {
        let summary = result.summary();
        println!(
            "  {:+.0}bp: final net worth ${:.0}, final debt ${:.0}",
            delta * 10_000.0,
            summary.final_net_worth,
            summary.final_total_debt
        );
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
