//! CSV loader for itemized Box 3 accounts.
//!
//! ## CSV Format
//!
//! | Column     | Required | Notes |
//! |------------|----------|-------|
//! | `category` | yes      | `bank`, `investment` or `debt` (plural and case variants accepted) |
//! | `name`     | yes      | Free text, e.g. the account label |
//! | `amount`   | yes      | Balance on 1 January; `€` and thousands commas are allowed |
//!
//! Amounts that are empty, unparsable or negative count as zero, so a
//! half-filled sheet still loads. An unknown category is an error.
//!
//! ```csv
//! category,name,amount
//! bank,Savings,"€ 25,000.00"
//! investment,Index fund,100000
//! debt,Student loan,12000
//! ```

use std::path::{Path, PathBuf};

use nl_tax_core::Box3Input;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::utils::parse_amount;

/// Box 3 asset class an entry is counted under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryCategory {
    Bank,
    Investment,
    Debt,
}

impl EntryCategory {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bank" | "banks" | "bank_account" | "bank_accounts" | "savings" => Some(Self::Bank),
            "investment" | "investments" => Some(Self::Investment),
            "debt" | "debts" => Some(Self::Debt),
            _ => None,
        }
    }
}

/// One named balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonetaryEntry {
    pub category: EntryCategory,
    pub name: String,
    pub amount: Decimal,
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    category: String,
    name: String,
    amount: String,
}

/// Errors that can occur while loading entries.
#[derive(Debug, thiserror::Error)]
pub enum EntriesLoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Bad structure or a missing column.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// `row` is 1-based (header = row 0).
    #[error("unrecognised category '{category}' on row {row}")]
    UnknownCategory { category: String, row: usize },
}

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<MonetaryEntry, EntriesLoadError> {
    let category =
        EntryCategory::parse(&row.category).ok_or_else(|| EntriesLoadError::UnknownCategory {
            category: row.category.clone(),
            row: row_number,
        })?;

    Ok(MonetaryEntry {
        category,
        name: row.name,
        amount: parse_amount(&row.amount),
    })
}

/// Parses CSV text into entries, in file order.
///
/// # Errors
///
/// * [`EntriesLoadError::Parse`] if the CSV is structurally invalid.
/// * [`EntriesLoadError::UnknownCategory`] if a row names no known category.
pub fn load_from_str(input: &str) -> Result<Vec<MonetaryEntry>, EntriesLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    let entries = reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1)
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(count = entries.len(), "loaded Box 3 entries");
    Ok(entries)
}

/// Reads and parses the CSV file at `path`.
///
/// # Errors
///
/// As [`load_from_str`], plus [`EntriesLoadError::Io`] if the file cannot be read.
pub fn load_from_file(path: impl AsRef<Path>) -> Result<Vec<MonetaryEntry>, EntriesLoadError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| EntriesLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents)
}

/// Sums entries per category into engine input, saturating instead of
/// overflowing.
pub fn aggregate(
    entries: &[MonetaryEntry],
    has_tax_partner: bool,
) -> Box3Input {
    let total = |category: EntryCategory| -> Decimal {
        entries
            .iter()
            .filter(|entry| entry.category == category)
            .fold(Decimal::ZERO, |sum, entry| sum.saturating_add(entry.amount))
    };

    Box3Input {
        bank_balance: total(EntryCategory::Bank),
        investment_assets: total(EntryCategory::Investment),
        debts: total(EntryCategory::Debt),
        has_tax_partner,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const HEADER: &str = "category,name,amount";

    fn csv(rows: &[&str]) -> String {
        let mut lines = vec![HEADER];
        lines.extend_from_slice(rows);
        lines.join("\n")
    }

    #[test]
    fn loads_rows_in_file_order() {
        let entries = load_from_str(&csv(&[
            "bank,Savings,25000",
            "investment,Index fund,100000",
            "debt,Student loan,12000",
        ]))
        .unwrap();

        assert_eq!(
            entries,
            vec![
                MonetaryEntry {
                    category: EntryCategory::Bank,
                    name: "Savings".to_string(),
                    amount: dec!(25000),
                },
                MonetaryEntry {
                    category: EntryCategory::Investment,
                    name: "Index fund".to_string(),
                    amount: dec!(100000),
                },
                MonetaryEntry {
                    category: EntryCategory::Debt,
                    name: "Student loan".to_string(),
                    amount: dec!(12000),
                },
            ]
        );
    }

    #[test]
    fn quoted_amounts_may_use_currency_and_commas() {
        let entries = load_from_str(&csv(&[r#"bank,Current,"€ 1,250.75""#])).unwrap();

        assert_eq!(entries[0].amount, dec!(1250.75));
    }

    #[test]
    fn invalid_amounts_become_zero() {
        let entries = load_from_str(&csv(&["bank,A,", "bank,B,-500", "bank,C,lots"])).unwrap();

        assert!(entries.iter().all(|entry| entry.amount == Decimal::ZERO));
    }

    #[test]
    fn category_is_case_insensitive_and_accepts_plurals() {
        let entries = load_from_str(&csv(&["Bank,A,1", "INVESTMENTS,B,2", "debts,C,3"])).unwrap();

        let categories: Vec<_> = entries.iter().map(|e| e.category).collect();
        assert_eq!(
            categories,
            vec![EntryCategory::Bank, EntryCategory::Investment, EntryCategory::Debt]
        );
    }

    #[test]
    fn unknown_category_reports_row() {
        let err = load_from_str(&csv(&["bank,A,1", "crypto,Wallet,2"])).unwrap_err();

        match err {
            EntriesLoadError::UnknownCategory { category, row } => {
                assert_eq!(category, "crypto");
                assert_eq!(row, 2);
            }
            other => panic!("expected UnknownCategory, got {other:?}"),
        }
    }

    #[test]
    fn missing_column_is_a_parse_error() {
        let err = load_from_str("category,name\nbank,A").unwrap_err();

        assert!(matches!(err, EntriesLoadError::Parse(_)));
    }

    #[test]
    fn aggregate_sums_per_category() {
        let entries = load_from_str(&csv(&[
            "bank,Savings,20000",
            "bank,Current,5000.50",
            "investment,Shares,60000",
            "investment,Crypto,40000",
            "debt,Loan,2500",
        ]))
        .unwrap();

        let input = aggregate(&entries, true);

        assert_eq!(
            input,
            Box3Input {
                bank_balance: dec!(25000.50),
                investment_assets: dec!(100000),
                debts: dec!(2500),
                has_tax_partner: true,
            }
        );
    }

    #[test]
    fn aggregate_of_nothing_is_zero() {
        assert_eq!(aggregate(&[], false), Box3Input::default());
    }

    #[test]
    fn aggregate_saturates_huge_totals() {
        let huge = MonetaryEntry {
            category: EntryCategory::Bank,
            name: "Huge".to_string(),
            amount: Decimal::MAX,
        };

        let input = aggregate(&[huge.clone(), huge], false);

        assert_eq!(input.bank_balance, Decimal::MAX);
    }
}
