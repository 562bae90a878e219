use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Working weeks per year used to annualise weekly and hourly pay.
pub const WORKING_WEEKS_PER_YEAR: u32 = 52;

/// Working days per year (52 weeks of 5 days).
pub const WORKING_DAYS_PER_YEAR: u32 = 260;

/// The period a gross income figure is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncomePeriod {
    #[default]
    Yearly,
    Monthly,
    Weekly,
    Daily,
    Hourly,
}

impl IncomePeriod {
    pub fn all() -> &'static [IncomePeriod] {
        &[
            IncomePeriod::Yearly,
            IncomePeriod::Monthly,
            IncomePeriod::Weekly,
            IncomePeriod::Daily,
            IncomePeriod::Hourly,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yearly => "yearly",
            Self::Monthly => "monthly",
            Self::Weekly => "weekly",
            Self::Daily => "daily",
            Self::Hourly => "hourly",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yearly" | "year" => Some(Self::Yearly),
            "monthly" | "month" => Some(Self::Monthly),
            "weekly" | "week" => Some(Self::Weekly),
            "daily" | "day" => Some(Self::Daily),
            "hourly" | "hour" => Some(Self::Hourly),
            _ => None,
        }
    }

    /// Fixed factor to a yearly amount. `None` for [`IncomePeriod::Hourly`],
    /// which depends on the hours worked per week.
    pub fn multiplier(&self) -> Option<Decimal> {
        match self {
            Self::Yearly => Some(Decimal::ONE),
            Self::Monthly => Some(Decimal::from(12)),
            Self::Weekly => Some(Decimal::from(WORKING_WEEKS_PER_YEAR)),
            Self::Daily => Some(Decimal::from(WORKING_DAYS_PER_YEAR)),
            Self::Hourly => None,
        }
    }

    /// Converts `amount` in this period to a yearly amount.
    ///
    /// Hourly amounts use `hours_per_week × 52`; a non-positive
    /// `hours_per_week` yields zero. Saturates at [`Decimal::MAX`] instead
    /// of overflowing.
    pub fn annualize(
        &self,
        amount: Decimal,
        hours_per_week: Decimal,
    ) -> Decimal {
        match self.multiplier() {
            Some(factor) => amount.saturating_mul(factor),
            None if hours_per_week > Decimal::ZERO => amount
                .saturating_mul(hours_per_week)
                .saturating_mul(Decimal::from(WORKING_WEEKS_PER_YEAR)),
            None => Decimal::ZERO,
        }
    }
}

impl std::fmt::Display for IncomePeriod {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn multipliers_match_working_calendar() {
        assert_eq!(IncomePeriod::Yearly.multiplier(), Some(dec!(1)));
        assert_eq!(IncomePeriod::Monthly.multiplier(), Some(dec!(12)));
        assert_eq!(IncomePeriod::Weekly.multiplier(), Some(dec!(52)));
        assert_eq!(IncomePeriod::Daily.multiplier(), Some(dec!(260)));
        assert_eq!(IncomePeriod::Hourly.multiplier(), None);
    }

    #[test]
    fn annualize_hourly_uses_hours_per_week() {
        let yearly = IncomePeriod::Hourly.annualize(dec!(25), dec!(40));

        assert_eq!(yearly, dec!(52000));
    }

    #[test]
    fn annualize_hourly_with_zero_hours_is_zero() {
        assert_eq!(IncomePeriod::Hourly.annualize(dec!(25), dec!(0)), dec!(0));
        assert_eq!(IncomePeriod::Hourly.annualize(dec!(25), dec!(-8)), dec!(0));
    }

    #[test]
    fn annualize_ignores_hours_for_fixed_periods() {
        assert_eq!(IncomePeriod::Monthly.annualize(dec!(5000), dec!(0)), dec!(60000));
    }

    #[test]
    fn annualize_saturates_instead_of_overflowing() {
        assert_eq!(IncomePeriod::Monthly.annualize(Decimal::MAX, dec!(0)), Decimal::MAX);
        assert_eq!(
            IncomePeriod::Hourly.annualize(dec!(25), Decimal::MAX),
            Decimal::MAX
        );
    }

    #[test]
    fn parse_round_trips_as_str() {
        for period in IncomePeriod::all() {
            assert_eq!(IncomePeriod::parse(period.as_str()), Some(*period));
        }
        assert_eq!(IncomePeriod::parse(" Monthly "), Some(IncomePeriod::Monthly));
        assert_eq!(IncomePeriod::parse("fortnightly"), None);
    }
}
