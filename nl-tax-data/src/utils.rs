use rust_decimal::Decimal;
use thiserror::Error;
use tracing::warn;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid decimal '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Trims whitespace and removes the euro sign, inner spaces and commas
/// (thousands separator).
fn normalize_decimal_input(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '€' | ' ' | '\u{a0}'))
        .collect()
}

/// Parses a user-entered amount, never failing.
///
/// Accepts `"€ 1,234.56"` style input. Empty input, unparsable input and
/// negative amounts all count as zero; the latter two are logged.
///
/// ```
/// use rust_decimal_macros::dec;
/// use nl_tax_data::utils::parse_amount;
///
/// assert_eq!(parse_amount("€ 12,500.50"), dec!(12500.50));
/// assert_eq!(parse_amount("-40"), dec!(0));
/// assert_eq!(parse_amount("n/a"), dec!(0));
/// ```
pub fn parse_amount(s: &str) -> Decimal {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Decimal::ZERO;
    }
    match normalized.parse::<Decimal>() {
        Ok(amount) if amount < Decimal::ZERO => {
            warn!(input = %s, "negative amount treated as zero");
            Decimal::ZERO
        }
        Ok(amount) => amount,
        Err(e) => {
            warn!(input = %s, "invalid amount treated as zero: {}", e);
            Decimal::ZERO
        }
    }
}

/// Parses an optional decimal cell such as `"€ 60,000"` or `"0.36"`.
///
/// Empty or whitespace-only input is `None`; anything else must parse.
///
/// ```
/// use rust_decimal_macros::dec;
/// use nl_tax_data::utils::parse_optional_decimal;
///
/// assert_eq!(parse_optional_decimal("60,000").unwrap(), Some(dec!(60000)));
/// assert_eq!(parse_optional_decimal(" ").unwrap(), None);
/// assert!(parse_optional_decimal("36%").is_err());
/// ```
pub fn parse_optional_decimal(s: &str) -> Result<Option<Decimal>, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(None);
    }
    normalized.parse().map(Some).map_err(|e| ParseDecimalError {
        input: s.to_string(),
        source: e,
    })
}
