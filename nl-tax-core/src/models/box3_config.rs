use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Per-individual amounts; doubled for taxpayers with a fiscal partner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Box3Thresholds {
    pub tax_free_assets_per_individual: Decimal,
    pub debts_threshold_per_individual: Decimal,
}

/// Fictitious yearly return per asset class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssumedReturnRates {
    pub bank_balance: Decimal,
    pub investment_assets: Decimal,
    pub debts: Decimal,
}

/// Box 3 rates and thresholds for one tax year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Box3Config {
    pub tax_year: i32,
    pub thresholds: Box3Thresholds,
    pub tax_rate: Decimal,
    pub assumed_return_rates: AssumedReturnRates,
}

impl Box3Config {
    /// Checks that thresholds are non-negative and rates lie in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            (
                "thresholds.tax_free_assets_per_individual",
                self.thresholds.tax_free_assets_per_individual,
            ),
            (
                "thresholds.debts_threshold_per_individual",
                self.thresholds.debts_threshold_per_individual,
            ),
        ] {
            if value < Decimal::ZERO {
                return Err(ConfigError::NegativeAmount { field, value });
            }
        }

        for (field, value) in [
            ("tax_rate", self.tax_rate),
            ("assumed_return_rates.bank_balance", self.assumed_return_rates.bank_balance),
            (
                "assumed_return_rates.investment_assets",
                self.assumed_return_rates.investment_assets,
            ),
            ("assumed_return_rates.debts", self.assumed_return_rates.debts),
        ] {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(ConfigError::RateOutOfRange { field, value });
            }
        }

        Ok(())
    }
}

/// User-supplied changes to a year's Box 3 defaults.
///
/// Fields left as `None` keep the default. The merged result is validated,
/// so an override can never produce a config the engine would reject.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Box3ConfigOverride {
    pub tax_free_assets_per_individual: Option<Decimal>,
    pub debts_threshold_per_individual: Option<Decimal>,
    pub tax_rate: Option<Decimal>,
    pub bank_balance_rate: Option<Decimal>,
    pub investment_assets_rate: Option<Decimal>,
    pub debts_rate: Option<Decimal>,
}

impl Box3ConfigOverride {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merges this override onto `base`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the merged config is invalid.
    pub fn apply_to(
        &self,
        base: &Box3Config,
    ) -> Result<Box3Config, ConfigError> {
        let merged = Box3Config {
            tax_year: base.tax_year,
            thresholds: Box3Thresholds {
                tax_free_assets_per_individual: self
                    .tax_free_assets_per_individual
                    .unwrap_or(base.thresholds.tax_free_assets_per_individual),
                debts_threshold_per_individual: self
                    .debts_threshold_per_individual
                    .unwrap_or(base.thresholds.debts_threshold_per_individual),
            },
            tax_rate: self.tax_rate.unwrap_or(base.tax_rate),
            assumed_return_rates: AssumedReturnRates {
                bank_balance: self
                    .bank_balance_rate
                    .unwrap_or(base.assumed_return_rates.bank_balance),
                investment_assets: self
                    .investment_assets_rate
                    .unwrap_or(base.assumed_return_rates.investment_assets),
                debts: self.debts_rate.unwrap_or(base.assumed_return_rates.debts),
            },
        };
        merged.validate()?;
        Ok(merged)
    }
}
