//! Plain-text rendering of engine summaries for the terminal.

use std::fmt;

use nl_tax_core::calculations::common::round_half_up;
use nl_tax_core::registry::reference_date;
use nl_tax_core::{Box1Summary, Box3Config, Box3Summary};
use rust_decimal::Decimal;

/// Formats an amount as euros with thousands separators, e.g. `€ 1,462.29`.
pub fn format_euro(value: Decimal) -> String {
    let rounded = round_half_up(value);
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    format!("{sign}€ {grouped}.{cents}")
}

/// Formats a fraction as a percentage with two decimals, e.g. `36.00%`.
pub fn format_percent(rate: Decimal) -> String {
    format!("{:.2}%", rate * Decimal::ONE_HUNDRED)
}

/// Box 1 summary as printed by `nl-tax box1`.
pub struct Box1Report<'a>(pub &'a Box1Summary);

impl fmt::Display for Box1Report<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let s = self.0;
        writeln!(f, "Box 1 (tax year {})", s.tax_year)?;
        writeln!(f, "Gross income (year):     {}", format_euro(s.gross_year))?;
        if s.gross_allowance > Decimal::ZERO {
            writeln!(f, "Holiday allowance:       {}", format_euro(s.gross_allowance))?;
        }
        if s.embedded_allowance > Decimal::ZERO {
            writeln!(
                f,
                "  of which holiday pay:  {}",
                format_euro(s.embedded_allowance)
            )?;
        }
        if s.ruling_applied {
            writeln!(f, "30% ruling tax-free:     {}", format_euro(s.tax_free))?;
        }
        writeln!(f, "Taxable income:          {}", format_euro(s.taxable_year))?;
        writeln!(f, "Payroll tax:             {}", format_euro(s.payroll_tax))?;
        writeln!(f, "Social security:         {}", format_euro(s.social_tax))?;
        writeln!(f, "General tax credit:      {}", format_euro(-s.general_credit))?;
        writeln!(f, "Labour tax credit:       {}", format_euro(-s.labour_credit))?;
        writeln!(f, "Income tax:              {}", format_euro(s.income_tax))?;
        writeln!(
            f,
            "Effective tax rate:      {}",
            format_percent(s.effective_tax_rate())
        )?;
        writeln!(f, "Net income (year):       {}", format_euro(s.net_year))?;
        writeln!(f, "Net income (month):      {}", format_euro(s.net_month))?;
        write!(f, "Net income (week):       {}", format_euro(s.net_week))
    }
}

/// Box 3 summary as printed by `nl-tax box3`, with the rates it was
/// computed from.
pub struct Box3Report<'a> {
    pub config: &'a Box3Config,
    pub summary: &'a Box3Summary,
}

impl fmt::Display for Box3Report<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let Self { config, summary } = self;
        let rates = &config.assumed_return_rates;

        writeln!(f, "Box 3 (tax year {})", config.tax_year)?;
        if let Some(date) = reference_date(config.tax_year) {
            writeln!(f, "Reference date:          {date}")?;
        }
        writeln!(
            f,
            "Assumed returns:         bank {} / investments {} / debts {}",
            format_percent(rates.bank_balance),
            format_percent(rates.investment_assets),
            format_percent(rates.debts)
        )?;
        writeln!(
            f,
            "Tax-free allowance:      {}",
            format_euro(summary.total_tax_free_allowance)
        )?;
        writeln!(
            f,
            "Debts threshold:         {}",
            format_euro(summary.total_debts_threshold)
        )?;
        for entry in &summary.breakdown {
            writeln!(f, "{:<36} {}", entry.description(), format_euro(entry.amount))?;
        }
        writeln!(
            f,
            "Share in tax base:       {}",
            format_percent(summary.share_in_capital_yield_tax_base)
        )?;
        write!(
            f,
            "Box 3 tax ({}):          {}",
            format_percent(config.tax_rate),
            format_euro(summary.estimated_tax)
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn format_euro_groups_thousands() {
        assert_eq!(format_euro(dec!(1462.28)), "€ 1,462.28");
        assert_eq!(format_euro(dec!(1234567.891)), "€ 1,234,567.89");
        assert_eq!(format_euro(dec!(100)), "€ 100.00");
    }

    #[test]
    fn format_euro_small_and_negative() {
        assert_eq!(format_euro(dec!(0)), "€ 0.00");
        assert_eq!(format_euro(dec!(-1065.885)), "-€ 1,065.89");
    }

    #[test]
    fn format_percent_two_decimals() {
        assert_eq!(format_percent(dec!(0.36)), "36.00%");
        assert_eq!(format_percent(dec!(0.0588)), "5.88%");
        assert_eq!(format_percent(dec!(0.61544)), "61.54%");
    }
}
