use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ConfigError;

/// One band of a progressive rate schedule.
///
/// `max_income` is exclusive and `None` for the top band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub tax_rate: Decimal,
}

impl TaxBracket {
    /// The part of `income` that falls inside this band.
    pub fn taxable_portion(
        &self,
        income: Decimal,
    ) -> Decimal {
        let upper = self.max_income.map_or(income, |max| income.min(max));
        (upper - self.min_income).max(Decimal::ZERO)
    }
}

/// One linear piece of a tax-credit curve.
///
/// Inside `[min_income, max_income)` the credit is
/// `base_amount + rate × (income − min_income)`. A negative `rate` models the
/// phase-out above an income threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditSegment {
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub base_amount: Decimal,
    pub rate: Decimal,
}

impl CreditSegment {
    pub fn contains(
        &self,
        income: Decimal,
    ) -> bool {
        income >= self.min_income && self.max_income.is_none_or(|max| income < max)
    }

    pub fn amount_at(
        &self,
        income: Decimal,
    ) -> Decimal {
        self.base_amount + self.rate * (income - self.min_income)
    }
}

/// Shared shape checks: non-empty, starts at zero, contiguous, open-ended.
fn validate_bounds(
    schedule: &'static str,
    bounds: impl ExactSizeIterator<Item = (Decimal, Option<Decimal>)>,
) -> Result<(), ConfigError> {
    let len = bounds.len();
    if len == 0 {
        return Err(ConfigError::EmptySchedule(schedule));
    }

    let mut previous_max: Option<Decimal> = None;
    for (index, (min, max)) in bounds.enumerate() {
        if index == 0 && min != Decimal::ZERO {
            return Err(ConfigError::ScheduleStartsAboveZero {
                schedule,
                start: min,
            });
        }
        if index > 0 && previous_max != Some(min) {
            return Err(ConfigError::ScheduleNotContiguous { schedule, index });
        }
        match max {
            Some(max) if max <= min => {
                return Err(ConfigError::ScheduleNotContiguous { schedule, index });
            }
            None if index + 1 != len => return Err(ConfigError::ScheduleNotOpenEnded(schedule)),
            Some(_) if index + 1 == len => return Err(ConfigError::ScheduleNotOpenEnded(schedule)),
            _ => {}
        }
        previous_max = max;
    }

    Ok(())
}

pub(crate) fn validate_brackets(
    schedule: &'static str,
    brackets: &[TaxBracket],
) -> Result<(), ConfigError> {
    validate_bounds(
        schedule,
        brackets.iter().map(|b| (b.min_income, b.max_income)),
    )?;
    for bracket in brackets {
        if bracket.tax_rate < Decimal::ZERO || bracket.tax_rate > Decimal::ONE {
            return Err(ConfigError::RateOutOfRange {
                field: schedule,
                value: bracket.tax_rate,
            });
        }
    }
    Ok(())
}

pub(crate) fn validate_credit_segments(
    schedule: &'static str,
    segments: &[CreditSegment],
) -> Result<(), ConfigError> {
    validate_bounds(
        schedule,
        segments.iter().map(|s| (s.min_income, s.max_income)),
    )?;
    for segment in segments {
        if segment.base_amount < Decimal::ZERO {
            return Err(ConfigError::NegativeAmount {
                field: schedule,
                value: segment.base_amount,
            });
        }
        if segment.rate.abs() > Decimal::ONE {
            return Err(ConfigError::RateOutOfRange {
                field: schedule,
                value: segment.rate,
            });
        }
    }
    Ok(())
}
