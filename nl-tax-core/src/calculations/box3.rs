//! Box 3 (savings and investments) tax calculation.
//!
//! Box 3 taxes a fictitious return on the assets held on the reference date
//! (1 January). The calculation runs in six fixed steps; each step feeds the
//! next and is reported in the same order in [`Box3Summary::breakdown`].
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Total returns: bank × bank rate + investments × investment rate |
//! | 2    | Total costs: (debts − debts threshold, minimum 0) × debts rate |
//! | 3    | Taxable returns: step 1 − step 2, minimum 0 |
//! | 4    | Capital yield tax base: bank + investments − deductible debts |
//! | 5    | Basis for savings & investments: step 4 − tax-free allowance, minimum 0 |
//! | 6    | Income from savings and investments: step 3 × (step 5 / step 4) |
//!
//! The estimated tax is step 6 × the flat Box 3 rate. The debts threshold
//! and the tax-free allowance are doubled for taxpayers with a fiscal
//! partner.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use nl_tax_core::calculations::{Box3Engine, Box3Input};
//! use nl_tax_core::registry::YearConfigRegistry;
//!
//! let config = YearConfigRegistry::global().box3_config(2025).clone();
//! let engine = Box3Engine::new(config);
//!
//! let summary = engine
//!     .calculate(&Box3Input {
//!         bank_balance: dec!(50000),
//!         investment_assets: dec!(100000),
//!         debts: dec!(0),
//!         has_tax_partner: false,
//!     })
//!     .unwrap();
//!
//! assert_eq!(summary.taxable_base, dec!(92316));
//! assert_eq!(summary.estimated_tax, dec!(1462.29));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::calculations::common::{capped, max, non_negative, round_half_up};
use crate::models::{Box3Config, ConfigError};

/// Errors that can occur during Box 3 calculations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Box3Error {
    /// The supplied configuration failed validation.
    #[error("invalid Box 3 configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// Asset totals on the reference date.
///
/// Itemized accounts are summed by the caller before they reach the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Box3Input {
    pub bank_balance: Decimal,
    pub investment_assets: Decimal,
    pub debts: Decimal,
    pub has_tax_partner: bool,
}

/// The named quantities reported in the breakdown, in calculation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Box3Step {
    TotalReturns,
    TotalCosts,
    TaxableReturns,
    CapitalYieldTaxBase,
    BasisForSavingsAndInvestments,
    IncomeFromSavingsAndInvestments,
}

impl Box3Step {
    pub fn description(&self) -> &'static str {
        match self {
            Self::TotalReturns => "Total returns",
            Self::TotalCosts => "Total costs",
            Self::TaxableReturns => "Taxable returns",
            Self::CapitalYieldTaxBase => "Capital yield tax base",
            Self::BasisForSavingsAndInvestments => "Basis for savings & investments",
            Self::IncomeFromSavingsAndInvestments => "Income from savings and investments",
        }
    }
}

/// One line of the Box 3 breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownEntry {
    pub step: Box3Step,
    pub amount: Decimal,
}

impl BreakdownEntry {
    pub fn description(&self) -> &'static str {
        self.step.description()
    }
}

/// Result of a Box 3 calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Box3Summary {
    /// Basis for savings & investments (step 5), never negative.
    pub taxable_base: Decimal,

    /// Box 3 tax due, never negative.
    pub estimated_tax: Decimal,

    /// The six steps in calculation order.
    pub breakdown: Vec<BreakdownEntry>,

    /// Tax-free allowance after the partner multiplier.
    pub total_tax_free_allowance: Decimal,

    /// Debts threshold after the partner multiplier.
    pub total_debts_threshold: Decimal,

    /// Debts that remain after the threshold.
    pub debt_after_threshold: Decimal,

    /// Step 5 / step 4; zero when the capital yield tax base is not positive.
    pub share_in_capital_yield_tax_base: Decimal,
}

impl Box3Summary {
    /// Amount reported for `step`.
    pub fn amount(
        &self,
        step: Box3Step,
    ) -> Option<Decimal> {
        self.breakdown
            .iter()
            .find(|entry| entry.step == step)
            .map(|entry| entry.amount)
    }
}

/// Calculator for Box 3 tax.
#[derive(Debug, Clone)]
pub struct Box3Engine {
    config: Box3Config,
}

impl Box3Engine {
    pub fn new(config: Box3Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Box3Config {
        &self.config
    }

    /// Runs the six Box 3 steps for `input`.
    ///
    /// Negative amounts in `input` are treated as zero and amounts above
    /// [`MAX_AMOUNT`](crate::calculations::common::MAX_AMOUNT) are capped.
    ///
    /// # Errors
    ///
    /// Returns [`Box3Error::InvalidConfig`] if the configuration is invalid.
    pub fn calculate(
        &self,
        input: &Box3Input,
    ) -> Result<Box3Summary, Box3Error> {
        self.config.validate()?;

        let bank_balance =
            capped("bank_balance", non_negative("bank_balance", input.bank_balance));
        let investment_assets = capped(
            "investment_assets",
            non_negative("investment_assets", input.investment_assets),
        );
        let debts = capped("debts", non_negative("debts", input.debts));
        let multiplier = self.allowance_multiplier(input.has_tax_partner);

        // Step 1
        let total_returns = self.total_returns(bank_balance, investment_assets);

        // Step 2
        let total_debts_threshold = round_half_up(
            self.config.thresholds.debts_threshold_per_individual * multiplier,
        );
        let debt_after_threshold = self.debt_after_threshold(debts, total_debts_threshold);
        let total_costs = self.total_costs(debt_after_threshold);

        // Step 3
        let taxable_returns = max(total_returns - total_costs, Decimal::ZERO);

        // Step 4
        let capital_yield_tax_base =
            round_half_up(bank_balance + investment_assets - debt_after_threshold);

        // Step 5
        let total_tax_free_allowance = round_half_up(
            self.config.thresholds.tax_free_assets_per_individual * multiplier,
        );
        let taxable_base = max(
            capital_yield_tax_base - total_tax_free_allowance,
            Decimal::ZERO,
        );

        // Step 6
        // The tax is taken from the unrounded income; only outputs are rounded.
        let share = self.share_in_capital_yield_tax_base(taxable_base, capital_yield_tax_base);
        let exact_income = taxable_returns * share;
        let income = round_half_up(exact_income);
        let estimated_tax = round_half_up(exact_income * self.config.tax_rate);

        let breakdown = vec![
            BreakdownEntry {
                step: Box3Step::TotalReturns,
                amount: total_returns,
            },
            BreakdownEntry {
                step: Box3Step::TotalCosts,
                amount: total_costs,
            },
            BreakdownEntry {
                step: Box3Step::TaxableReturns,
                amount: taxable_returns,
            },
            BreakdownEntry {
                step: Box3Step::CapitalYieldTaxBase,
                amount: capital_yield_tax_base,
            },
            BreakdownEntry {
                step: Box3Step::BasisForSavingsAndInvestments,
                amount: taxable_base,
            },
            BreakdownEntry {
                step: Box3Step::IncomeFromSavingsAndInvestments,
                amount: income,
            },
        ];

        Ok(Box3Summary {
            taxable_base,
            estimated_tax,
            breakdown,
            total_tax_free_allowance,
            total_debts_threshold,
            debt_after_threshold,
            share_in_capital_yield_tax_base: share,
        })
    }

    /// Thresholds are per individual; a fiscal partner doubles them.
    fn allowance_multiplier(
        &self,
        has_tax_partner: bool,
    ) -> Decimal {
        if has_tax_partner {
            Decimal::TWO
        } else {
            Decimal::ONE
        }
    }

    fn total_returns(
        &self,
        bank_balance: Decimal,
        investment_assets: Decimal,
    ) -> Decimal {
        let rates = &self.config.assumed_return_rates;
        round_half_up(bank_balance * rates.bank_balance + investment_assets * rates.investment_assets)
    }

    fn debt_after_threshold(
        &self,
        debts: Decimal,
        total_debts_threshold: Decimal,
    ) -> Decimal {
        max(debts - total_debts_threshold, Decimal::ZERO)
    }

    fn total_costs(
        &self,
        debt_after_threshold: Decimal,
    ) -> Decimal {
        round_half_up(debt_after_threshold * self.config.assumed_return_rates.debts)
    }

    /// The capital yield tax base is not floored, so debts above the assets
    /// make it negative. Only a positive base yields a share.
    fn share_in_capital_yield_tax_base(
        &self,
        taxable_base: Decimal,
        capital_yield_tax_base: Decimal,
    ) -> Decimal {
        if capital_yield_tax_base > Decimal::ZERO {
            taxable_base / capital_yield_tax_base
        } else {
            debug!(
                capital_yield_tax_base = %capital_yield_tax_base,
                "capital yield tax base is not positive; no Box 3 income"
            );
            Decimal::ZERO
        }
    }
}

/// Calculates Box 3 tax for `input` under `config`.
///
/// Accepts any configuration of the right shape, including one merged from
/// a user override.
///
/// # Errors
///
/// Returns [`Box3Error::InvalidConfig`] if `config` is invalid.
pub fn compute_box3(
    input: &Box3Input,
    config: &Box3Config,
) -> Result<Box3Summary, Box3Error> {
    Box3Engine::new(config.clone()).calculate(input)
}
