//! Box 1 (income from employment) tax calculation.
//!
//! This module estimates the wage tax and national insurance premium withheld
//! from an employee's salary, and the resulting net income.
//!
//! # Calculation Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Gross income annualized from its period (`gross_year`) |
//! | 2    | Holiday allowance paid on top of, or embedded in, the gross |
//! | 3    | 30%-ruling tax-free allowance if the category threshold is met |
//! | 4    | Taxable income: step 1 − step 3 |
//! | 5    | Payroll tax over the progressive brackets |
//! | 6    | National insurance premium up to the first-band ceiling |
//! | 7    | General and labour tax credits |
//! | 8    | Income tax: step 5 + step 6 − step 7, minimum 0 |
//! | 9    | Net income: step 1 + allowance paid on top − step 8 |
//!
//! Tax credits cannot be refunded. Taxpayers above the state pension age,
//! or anyone not insured, pay no premium and receive only the payroll-tax
//! share of the credits.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use nl_tax_core::calculations::{compute_box1, Box1Input};
//!
//! let summary = compute_box1(
//!     &Box1Input {
//!         gross_income: dec!(60000),
//!         ..Default::default()
//!     },
//!     2025,
//! )
//! .unwrap();
//!
//! assert_eq!(summary.income_tax, dec!(16287.07));
//! assert_eq!(summary.net_month, dec!(3642.74));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::calculations::common::{capped, max, non_negative, round_half_up};
use crate::models::{Box1Config, ConfigError, CreditSegment, IncomePeriod, RulingCategory};
use crate::registry::YearConfigRegistry;

/// Errors that can occur during Box 1 calculations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Box1Error {
    /// The supplied configuration failed validation.
    #[error("invalid Box 1 configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// Salary and personal circumstances for a Box 1 estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Box1Input {
    /// Gross salary in `period` units.
    pub gross_income: Decimal,

    pub period: IncomePeriod,

    /// Only read when `period` is [`IncomePeriod::Hourly`].
    pub hours_per_week: Decimal,

    /// Whether `gross_income` already contains the 8% holiday allowance.
    pub holiday_allowance_included: bool,

    /// At or above the state pension (AOW) age.
    pub older: bool,

    pub ruling_30_enabled: bool,

    pub ruling_30_category: RulingCategory,

    /// Insured for the national insurance schemes.
    pub social_security: bool,
}

impl Default for Box1Input {
    fn default() -> Self {
        Self {
            gross_income: Decimal::ZERO,
            period: IncomePeriod::Yearly,
            hours_per_week: Decimal::from(40),
            holiday_allowance_included: true,
            older: false,
            ruling_30_enabled: false,
            ruling_30_category: RulingCategory::Other,
            social_security: true,
        }
    }
}

/// Result of a Box 1 calculation. Every amount is yearly unless named
/// otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Box1Summary {
    pub tax_year: i32,

    /// Gross salary annualized from the input period.
    pub gross_year: Decimal,

    /// Holiday allowance paid on top of `gross_year`.
    pub gross_allowance: Decimal,

    /// Holiday allowance already contained in an inclusive `gross_year`.
    /// Informational; not added to net income.
    pub embedded_allowance: Decimal,

    /// 30%-ruling tax-free part of `gross_year`.
    pub tax_free: Decimal,

    pub ruling_applied: bool,

    pub taxable_year: Decimal,

    pub payroll_tax: Decimal,

    /// National insurance premium (AOW, Anw, Wlz).
    pub social_tax: Decimal,

    pub general_credit: Decimal,

    pub labour_credit: Decimal,

    /// Payroll tax plus premium minus credits, never negative.
    pub income_tax: Decimal,

    pub net_year: Decimal,
    pub net_month: Decimal,
    pub net_week: Decimal,
}

impl Box1Summary {
    /// A summary for zero income.
    pub fn zero(tax_year: i32) -> Self {
        Self {
            tax_year,
            gross_year: Decimal::ZERO,
            gross_allowance: Decimal::ZERO,
            embedded_allowance: Decimal::ZERO,
            tax_free: Decimal::ZERO,
            ruling_applied: false,
            taxable_year: Decimal::ZERO,
            payroll_tax: Decimal::ZERO,
            social_tax: Decimal::ZERO,
            general_credit: Decimal::ZERO,
            labour_credit: Decimal::ZERO,
            income_tax: Decimal::ZERO,
            net_year: Decimal::ZERO,
            net_month: Decimal::ZERO,
            net_week: Decimal::ZERO,
        }
    }

    /// Income tax as a fraction of `gross_year`, or zero without income.
    pub fn effective_tax_rate(&self) -> Decimal {
        if self.gross_year.is_zero() {
            Decimal::ZERO
        } else {
            self.income_tax / self.gross_year
        }
    }
}

/// Calculator for Box 1 tax.
#[derive(Debug, Clone)]
pub struct Box1Engine {
    config: Box1Config,
}

impl Box1Engine {
    pub fn new(config: Box1Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Box1Config {
        &self.config
    }

    /// Estimates yearly tax and net income for `input`.
    ///
    /// A negative gross income is treated as zero.
    ///
    /// # Errors
    ///
    /// Returns [`Box1Error::InvalidConfig`] if the configuration is invalid.
    pub fn calculate(
        &self,
        input: &Box1Input,
    ) -> Result<Box1Summary, Box1Error> {
        self.config.validate()?;

        // Step 1
        let gross_year = self.gross_year(input);
        if gross_year.is_zero() {
            debug!(tax_year = self.config.tax_year, "no gross income; Box 1 summary is zero");
            return Ok(Box1Summary::zero(self.config.tax_year));
        }

        // Step 2
        let (gross_allowance, embedded_allowance) =
            self.holiday_allowance(gross_year, input.holiday_allowance_included);

        // Steps 3-4
        let ruling_applied = self.ruling_applies(input, gross_year);
        let tax_free = if ruling_applied {
            round_half_up(gross_year * self.config.ruling_tax_free_rate)
        } else {
            Decimal::ZERO
        };
        let taxable_year = gross_year - tax_free;

        // Step 5
        let payroll_tax = self.payroll_tax(taxable_year);

        // Step 6
        let pays_premium = input.social_security && !input.older;
        let social_tax = if pays_premium {
            self.social_tax(taxable_year)
        } else {
            Decimal::ZERO
        };

        // Step 7
        let credit_share = if pays_premium {
            Decimal::ONE
        } else {
            self.config.credit_share_without_premium()
        };
        let general_credit = self.credit(&self.config.general_credit, taxable_year, credit_share);
        let labour_credit = self.credit(&self.config.labour_credit, taxable_year, credit_share);

        // Step 8
        let income_tax = max(
            payroll_tax + social_tax - general_credit - labour_credit,
            Decimal::ZERO,
        );

        // Step 9
        let net_year = gross_year + gross_allowance - income_tax;

        Ok(Box1Summary {
            tax_year: self.config.tax_year,
            gross_year,
            gross_allowance,
            embedded_allowance,
            tax_free,
            ruling_applied,
            taxable_year,
            payroll_tax,
            social_tax,
            general_credit,
            labour_credit,
            income_tax,
            net_year,
            net_month: round_half_up(net_year / Decimal::from(12)),
            net_week: round_half_up(net_year / Decimal::from(52)),
        })
    }

    /// Annualizes the gross income, rounded to cents and capped at
    /// [`MAX_AMOUNT`](crate::calculations::common::MAX_AMOUNT).
    fn gross_year(
        &self,
        input: &Box1Input,
    ) -> Decimal {
        let gross_income = non_negative("gross_income", input.gross_income);
        if input.period == IncomePeriod::Hourly && input.hours_per_week <= Decimal::ZERO {
            debug!(hours_per_week = %input.hours_per_week, "hourly income without hours; gross is zero");
        }
        let yearly = input.period.annualize(gross_income, input.hours_per_week);
        round_half_up(capped("gross_year", yearly))
    }

    /// Returns `(paid on top, embedded)`.
    ///
    /// An exclusive gross earns the allowance on top; an inclusive gross
    /// already holds `rate / (1 + rate)` of itself as allowance.
    fn holiday_allowance(
        &self,
        gross_year: Decimal,
        included: bool,
    ) -> (Decimal, Decimal) {
        let rate = self.config.holiday_allowance_rate;
        if included {
            let embedded = round_half_up(gross_year * rate / (Decimal::ONE + rate));
            (Decimal::ZERO, embedded)
        } else {
            (round_half_up(gross_year * rate), Decimal::ZERO)
        }
    }

    /// The ruling applies only above the category's salary threshold.
    fn ruling_applies(
        &self,
        input: &Box1Input,
        gross_year: Decimal,
    ) -> bool {
        if !input.ruling_30_enabled {
            return false;
        }
        let threshold = self
            .config
            .ruling_thresholds
            .for_category(input.ruling_30_category);
        if gross_year > threshold {
            true
        } else {
            debug!(
                category = input.ruling_30_category.as_str(),
                gross_year = %gross_year,
                threshold = %threshold,
                "salary below 30% ruling threshold"
            );
            false
        }
    }

    fn payroll_tax(
        &self,
        taxable_year: Decimal,
    ) -> Decimal {
        let tax: Decimal = self
            .config
            .payroll_brackets
            .iter()
            .map(|bracket| bracket.taxable_portion(taxable_year) * bracket.tax_rate)
            .sum();
        round_half_up(tax)
    }

    fn social_tax(
        &self,
        taxable_year: Decimal,
    ) -> Decimal {
        let insured = taxable_year.min(self.config.social_security_ceiling);
        round_half_up(insured * self.config.social_security_rate)
    }

    /// Evaluates a credit curve at `taxable_year`, floored at zero and
    /// scaled by `share`.
    fn credit(
        &self,
        segments: &[CreditSegment],
        taxable_year: Decimal,
        share: Decimal,
    ) -> Decimal {
        let amount = segments
            .iter()
            .find(|segment| segment.contains(taxable_year))
            .map_or(Decimal::ZERO, |segment| segment.amount_at(taxable_year));
        round_half_up(max(amount, Decimal::ZERO) * share)
    }
}

/// Calculates Box 1 tax for `input` with the bundled configuration of `year`.
///
/// Unknown years use the default year's configuration.
///
/// # Errors
///
/// Returns [`Box1Error::InvalidConfig`] if the year's configuration is invalid.
pub fn compute_box1(
    input: &Box1Input,
    year: i32,
) -> Result<Box1Summary, Box1Error> {
    let config = YearConfigRegistry::global().box1_config(year);
    Box1Engine::new(config.clone()).calculate(input)
}
