use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::tax_bracket::{validate_brackets, validate_credit_segments};
use super::{ConfigError, CreditSegment, RulingCategory, TaxBracket};

/// Minimum gross yearly salary per 30%-ruling category.
///
/// The ruling applies only when the salary exceeds the category threshold.
/// Research workers have no salary requirement (threshold 0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulingThresholds {
    pub research_worker: Decimal,
    pub young_professional: Decimal,
    pub other: Decimal,
}

impl RulingThresholds {
    pub fn for_category(
        &self,
        category: RulingCategory,
    ) -> Decimal {
        match category {
            RulingCategory::ResearchWorker => self.research_worker,
            RulingCategory::YoungProfessional => self.young_professional,
            RulingCategory::Other => self.other,
        }
    }
}

/// Box 1 rates and thresholds for one tax year.
///
/// `payroll_brackets` hold the income-tax part of each band only. In the
/// first band the national insurance premium (AOW, Anw, Wlz) is levied on
/// top at `social_security_rate`, up to `social_security_ceiling`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Box1Config {
    pub tax_year: i32,
    pub payroll_brackets: Vec<TaxBracket>,
    pub social_security_rate: Decimal,
    pub social_security_ceiling: Decimal,
    /// Algemene heffingskorting.
    pub general_credit: Vec<CreditSegment>,
    /// Arbeidskorting.
    pub labour_credit: Vec<CreditSegment>,
    pub holiday_allowance_rate: Decimal,
    pub ruling_tax_free_rate: Decimal,
    pub ruling_thresholds: RulingThresholds,
}

impl Box1Config {
    /// Checks every rate, threshold and schedule.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_brackets("payroll", &self.payroll_brackets)?;
        validate_credit_segments("general credit", &self.general_credit)?;
        validate_credit_segments("labour credit", &self.labour_credit)?;

        for (field, value) in [
            ("social_security_rate", self.social_security_rate),
            ("holiday_allowance_rate", self.holiday_allowance_rate),
            ("ruling_tax_free_rate", self.ruling_tax_free_rate),
        ] {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(ConfigError::RateOutOfRange { field, value });
            }
        }

        if self.social_security_ceiling <= Decimal::ZERO {
            return Err(ConfigError::NonPositiveAmount {
                field: "social_security_ceiling",
                value: self.social_security_ceiling,
            });
        }

        for (field, value) in [
            ("ruling_thresholds.research_worker", self.ruling_thresholds.research_worker),
            ("ruling_thresholds.young_professional", self.ruling_thresholds.young_professional),
            ("ruling_thresholds.other", self.ruling_thresholds.other),
        ] {
            if value < Decimal::ZERO {
                return Err(ConfigError::NegativeAmount { field, value });
            }
        }

        Ok(())
    }

    /// Fraction of the tax credits that remains when no national insurance
    /// premium is paid.
    ///
    /// Credits are granted against the combined first-band rate; without the
    /// premium only the income-tax share of that rate can be offset.
    pub fn credit_share_without_premium(&self) -> Decimal {
        let payroll_rate = self
            .payroll_brackets
            .first()
            .map_or(Decimal::ZERO, |b| b.tax_rate);
        let combined = payroll_rate + self.social_security_rate;
        if combined.is_zero() {
            Decimal::ONE
        } else {
            payroll_rate / combined
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::registry::YearConfigRegistry;

    fn config_2025() -> Box1Config {
        YearConfigRegistry::global().box1_config(2025).clone()
    }

    #[test]
    fn bundled_config_is_valid() {
        assert_eq!(config_2025().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_social_rate_above_one() {
        let config = Box1Config {
            social_security_rate: dec!(1.2765),
            ..config_2025()
        };

        assert_eq!(
            config.validate(),
            Err(ConfigError::RateOutOfRange {
                field: "social_security_rate",
                value: dec!(1.2765)
            })
        );
    }

    #[test]
    fn validate_rejects_zero_social_ceiling() {
        let config = Box1Config {
            social_security_ceiling: dec!(0),
            ..config_2025()
        };

        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositiveAmount {
                field: "social_security_ceiling",
                value: dec!(0)
            })
        );
    }

    #[test]
    fn validate_rejects_negative_ruling_threshold() {
        let mut config = config_2025();
        config.ruling_thresholds.young_professional = dec!(-1);

        assert_eq!(
            config.validate(),
            Err(ConfigError::NegativeAmount {
                field: "ruling_thresholds.young_professional",
                value: dec!(-1)
            })
        );
    }

    #[test]
    fn validate_rejects_empty_labour_credit() {
        let config = Box1Config {
            labour_credit: Vec::new(),
            ..config_2025()
        };

        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptySchedule("labour credit"))
        );
    }

    #[test]
    fn ruling_threshold_per_category() {
        let thresholds = config_2025().ruling_thresholds;

        assert_eq!(thresholds.for_category(RulingCategory::ResearchWorker), dec!(0));
        assert_eq!(thresholds.for_category(RulingCategory::YoungProfessional), dec!(35468));
        assert_eq!(thresholds.for_category(RulingCategory::Other), dec!(46660));
    }

    #[test]
    fn credit_share_uses_first_band_split() {
        // 8.17% / (8.17% + 27.65%)
        let share = config_2025().credit_share_without_premium();

        assert_eq!(share.round_dp(4), dec!(0.2281));
    }
}
