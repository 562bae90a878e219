use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use nl_tax_core::{
    Box1Engine, Box1Input, Box3Engine, Box3Input, DEFAULT_YEAR, IncomePeriod, RulingCategory,
    YearConfigRegistry,
};
use nl_tax_data::utils::parse_amount;
use nl_tax_data::{Box3OverrideLoader, aggregate, entries};
use tracing::{debug, warn};

use crate::report::{Box1Report, Box3Report};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Dutch income tax (Box 1) and wealth tax (Box 3) estimator.
#[derive(Debug, Parser)]
#[command(name = "nl-tax", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the tax years with bundled rates.
    Years,

    /// Estimate income tax and net salary.
    Box1(Box1Args),

    /// Estimate tax on savings and investments.
    Box3(Box3Args),
}

#[derive(Debug, Args)]
pub struct Box1Args {
    /// Tax year; unknown years use the most recent bundled year.
    #[arg(long, default_value_t = DEFAULT_YEAR)]
    pub year: i32,

    /// Gross salary, e.g. `60000` or `"€ 5,000"`.
    #[arg(long, default_value = "0")]
    pub gross: String,

    /// Period the gross salary is expressed in.
    #[arg(long, default_value = "yearly", value_parser = parse_period)]
    pub period: IncomePeriod,

    /// Hours per week, used with `--period hourly`.
    #[arg(long, default_value = "40")]
    pub hours: String,

    /// The gross salary does not include the 8% holiday allowance.
    #[arg(long)]
    pub excluding_holiday_allowance: bool,

    /// At or above the state pension age.
    #[arg(long)]
    pub older: bool,

    /// Apply the 30% ruling.
    #[arg(long)]
    pub ruling: bool,

    /// 30% ruling category: researchWorker, youngProfessional or other.
    #[arg(long, default_value = "other", value_parser = parse_category)]
    pub ruling_category: RulingCategory,

    /// Not insured for the national insurance schemes.
    #[arg(long)]
    pub no_social_security: bool,
}

#[derive(Debug, Args)]
pub struct Box3Args {
    /// Tax year; unknown years use the most recent bundled year.
    #[arg(long, default_value_t = DEFAULT_YEAR)]
    pub year: i32,

    /// Total bank balance on 1 January.
    #[arg(long, default_value = "0")]
    pub bank: String,

    /// Total investments on 1 January.
    #[arg(long, default_value = "0")]
    pub investments: String,

    /// Total debts on 1 January.
    #[arg(long, default_value = "0")]
    pub debts: String,

    /// Has a fiscal partner (doubles allowance and debts threshold).
    #[arg(long)]
    pub partner: bool,

    /// CSV of itemized accounts (`category,name,amount`); replaces the
    /// amount flags.
    #[arg(long)]
    pub entries: Option<PathBuf>,

    /// CSV of Box 3 rate and threshold overrides.
    #[arg(long)]
    pub overrides: Option<PathBuf>,
}

fn parse_period(s: &str) -> Result<IncomePeriod, String> {
    IncomePeriod::parse(s).ok_or_else(|| {
        let valid: Vec<_> = IncomePeriod::all().iter().map(|p| p.as_str()).collect();
        format!("unknown period '{s}' (expected one of: {})", valid.join(", "))
    })
}

fn parse_category(s: &str) -> Result<RulingCategory, String> {
    Ok(RulingCategory::parse(s))
}

// ─── commands ────────────────────────────────────────────────────────────────

/// Runs `cli` and returns the report to print.
pub fn run(cli: &Cli) -> Result<String> {
    let registry = YearConfigRegistry::global();
    match &cli.command {
        Command::Years => Ok(years(registry)),
        Command::Box1(args) => box1(args, registry),
        Command::Box3(args) => box3(args, registry),
    }
}

fn years(registry: &YearConfigRegistry) -> String {
    registry
        .available_years()
        .into_iter()
        .map(|year| {
            if year == registry.default_year() {
                format!("{year} (default)")
            } else {
                year.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn warn_on_fallback(
    registry: &YearConfigRegistry,
    year: i32,
) -> i32 {
    let resolved = registry.resolve_year(year);
    if resolved != year {
        warn!("tax year {} is not bundled; using {}", year, resolved);
    }
    resolved
}

fn box1(
    args: &Box1Args,
    registry: &YearConfigRegistry,
) -> Result<String> {
    let year = warn_on_fallback(registry, args.year);
    let input = Box1Input {
        gross_income: parse_amount(&args.gross),
        period: args.period,
        hours_per_week: parse_amount(&args.hours),
        holiday_allowance_included: !args.excluding_holiday_allowance,
        older: args.older,
        ruling_30_enabled: args.ruling,
        ruling_30_category: args.ruling_category,
        social_security: !args.no_social_security,
    };
    debug!(?input, "box1 input");

    let summary = Box1Engine::new(registry.box1_config(year).clone())
        .calculate(&input)
        .context("Box 1 calculation failed")?;

    Ok(Box1Report(&summary).to_string())
}

fn box3(
    args: &Box3Args,
    registry: &YearConfigRegistry,
) -> Result<String> {
    let year = warn_on_fallback(registry, args.year);

    let input = match &args.entries {
        Some(path) => {
            let items = entries::load_from_file(path)
                .with_context(|| format!("Failed to load entries: {}", path.display()))?;
            aggregate(&items, args.partner)
        }
        None => Box3Input {
            bank_balance: parse_amount(&args.bank),
            investment_assets: parse_amount(&args.investments),
            debts: parse_amount(&args.debts),
            has_tax_partner: args.partner,
        },
    };
    debug!(?input, "box3 input");

    let config = match &args.overrides {
        Some(path) => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("Failed to open: {}", path.display()))?;
            let records = Box3OverrideLoader::parse(file)
                .with_context(|| format!("Failed to parse CSV: {}", path.display()))?;
            Box3OverrideLoader::resolve(&records, year, registry)
                .with_context(|| format!("Failed to apply overrides for {year}"))?
        }
        None => registry.box3_config(year).clone(),
    };

    let summary = Box3Engine::new(config.clone())
        .calculate(&input)
        .context("Box 3 calculation failed")?;

    Ok(Box3Report {
        config: &config,
        summary: &summary,
    }
    .to_string())
}
