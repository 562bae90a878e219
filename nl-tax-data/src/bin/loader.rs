use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use nl_tax_core::YearConfigRegistry;
use nl_tax_data::Box3OverrideLoader;
use tracing_subscriber::EnvFilter;

/// Check a Box 3 overrides CSV file against the bundled tax years.
///
/// The CSV file should have the following columns (only `tax_year` is
/// required; empty cells keep the bundled value):
/// - tax_year: The tax year to override (e.g., 2025)
/// - tax_free_assets_per_individual, debts_threshold_per_individual: euro amounts
/// - tax_rate, bank_balance_rate, investment_assets_rate, debts_rate: decimals (e.g., 0.36)
#[derive(Parser, Debug)]
#[command(name = "nl-tax-overrides")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing Box 3 overrides
    #[arg(short, long)]
    file: PathBuf,

    /// Only print the merged configuration for this year
    #[arg(short, long)]
    year: Option<i32>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();
    let registry = YearConfigRegistry::global();

    println!("Loading Box 3 overrides from: {}", args.file.display());

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;

    let records = Box3OverrideLoader::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", args.file.display()))?;

    println!("Parsed {} records from CSV", records.len());

    let years = match args.year {
        Some(year) => vec![year],
        None => records.iter().map(|record| record.tax_year).collect(),
    };

    for year in years {
        let config = Box3OverrideLoader::resolve(&records, year, registry)
            .with_context(|| format!("Failed to apply overrides for {year}"))?;

        println!(
            "{}: tax-free assets {} / debts threshold {} / rate {} / returns bank {} investments {} debts {}",
            config.tax_year,
            config.thresholds.tax_free_assets_per_individual,
            config.thresholds.debts_threshold_per_individual,
            config.tax_rate,
            config.assumed_return_rates.bank_balance,
            config.assumed_return_rates.investment_assets,
            config.assumed_return_rates.debts,
        );
    }

    Ok(())
}
