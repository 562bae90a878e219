use std::collections::HashSet;
use std::io::Read;

use nl_tax_core::{Box3Config, Box3ConfigOverride, ConfigError, YearConfigRegistry};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::utils::parse_optional_decimal;

/// Errors that can occur when loading Box 3 configuration overrides.
#[derive(Debug, Error)]
pub enum OverrideLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Tax year {0} has no bundled configuration to override")]
    UnknownTaxYear(i32),

    #[error("Tax year {0} is overridden more than once")]
    DuplicateTaxYear(i32),

    #[error("Override for tax year {tax_year} is invalid: {source}")]
    InvalidOverride {
        tax_year: i32,
        #[source]
        source: ConfigError,
    },
}

impl From<csv::Error> for OverrideLoaderError {
    fn from(err: csv::Error) -> Self {
        OverrideLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from the Box 3 overrides CSV file.
///
/// Only `tax_year` is required; an empty cell keeps that year's default.
/// - `tax_free_assets_per_individual`, `debts_threshold_per_individual`: euro amounts
/// - `tax_rate`, `bank_balance_rate`, `investment_assets_rate`, `debts_rate`:
///   decimal fractions (e.g. 0.36 for 36%)
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Box3OverrideRecord {
    pub tax_year: i32,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub tax_free_assets_per_individual: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub debts_threshold_per_individual: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub tax_rate: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub bank_balance_rate: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub investment_assets_rate: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub debts_rate: Option<Decimal>,
}

impl From<&Box3OverrideRecord> for Box3ConfigOverride {
    fn from(record: &Box3OverrideRecord) -> Self {
        Box3ConfigOverride {
            tax_free_assets_per_individual: record.tax_free_assets_per_individual,
            debts_threshold_per_individual: record.debts_threshold_per_individual,
            tax_rate: record.tax_rate,
            bank_balance_rate: record.bank_balance_rate,
            investment_assets_rate: record.investment_assets_rate,
            debts_rate: record.debts_rate,
        }
    }
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(s) => parse_optional_decimal(&s).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for user overrides of the bundled Box 3 configuration.
pub struct Box3OverrideLoader;

impl Box3OverrideLoader {
    /// Parse override records from a CSV reader.
    ///
    /// The reader can be any type that implements `Read`, such as a file or
    /// a string slice.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<Box3OverrideRecord>, OverrideLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: Box3OverrideRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Checks that every record targets a configured year, at most once.
    pub fn check_years(
        records: &[Box3OverrideRecord],
        registry: &YearConfigRegistry,
    ) -> Result<(), OverrideLoaderError> {
        let mut seen = HashSet::new();
        for record in records {
            if !registry.contains(record.tax_year) {
                return Err(OverrideLoaderError::UnknownTaxYear(record.tax_year));
            }
            if !seen.insert(record.tax_year) {
                return Err(OverrideLoaderError::DuplicateTaxYear(record.tax_year));
            }
        }
        Ok(())
    }

    /// The Box 3 configuration for `year` with any matching override applied.
    ///
    /// `year` is resolved through the registry first, so an unknown year
    /// uses the default year's configuration and that year's override.
    pub fn resolve(
        records: &[Box3OverrideRecord],
        year: i32,
        registry: &YearConfigRegistry,
    ) -> Result<Box3Config, OverrideLoaderError> {
        Self::check_years(records, registry)?;

        let tax_year = registry.resolve_year(year);
        let base = registry.box3_config(tax_year);

        let overrides = records
            .iter()
            .find(|record| record.tax_year == tax_year)
            .map(Box3ConfigOverride::from)
            .unwrap_or_default();
        if overrides.is_empty() {
            return Ok(base.clone());
        }

        debug!(tax_year, "applying Box 3 configuration override");
        overrides
            .apply_to(base)
            .map_err(|source| OverrideLoaderError::InvalidOverride { tax_year, source })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const TEST_CSV: &str = r#"tax_year,tax_free_assets_per_individual,debts_threshold_per_individual,tax_rate,bank_balance_rate,investment_assets_rate,debts_rate
2024,,,0.34,,,
2025,60000,4000,,0.0150,,
"#;

    fn registry() -> &'static YearConfigRegistry {
        YearConfigRegistry::global()
    }

    #[test]
    fn test_parse_csv_single_record() {
        let csv = "tax_year,tax_rate\n2025,0.34";

        let records = Box3OverrideLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(
            records,
            vec![Box3OverrideRecord {
                tax_year: 2025,
                tax_rate: Some(dec!(0.34)),
                ..Default::default()
            }]
        );
    }

    #[test]
    fn test_parse_csv_empty_cells_are_none() {
        let records = Box3OverrideLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].tax_rate, Some(dec!(0.34)));
        assert_eq!(records[0].tax_free_assets_per_individual, None);
        assert_eq!(records[1].tax_free_assets_per_individual, Some(dec!(60000)));
        assert_eq!(records[1].bank_balance_rate, Some(dec!(0.0150)));
        assert_eq!(records[1].debts_rate, None);
    }

    #[test]
    fn test_parse_invalid_csv_missing_year() {
        let csv = "tax_rate\n0.34";

        let err = Box3OverrideLoader::parse(csv.as_bytes()).expect_err("Should fail without year");

        let OverrideLoaderError::CsvParse(msg) = err else {
            panic!("Expected CsvParse error, got: {:?}", err);
        };
        assert!(msg.contains("missing field"), "got: {}", msg);
    }

    #[test]
    fn test_parse_csv_amounts_with_thousands_separator() {
        let csv = "tax_year,tax_free_assets_per_individual,tax_rate\n2025,\"€ 60,000\",0.34";

        let records = Box3OverrideLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records[0].tax_free_assets_per_individual, Some(dec!(60000)));
        assert_eq!(records[0].tax_rate, Some(dec!(0.34)));
    }

    #[test]
    fn test_parse_invalid_csv_bad_decimal() {
        let csv = "tax_year,tax_rate\n2025,abc";

        let err = Box3OverrideLoader::parse(csv.as_bytes()).expect_err("Should fail for bad rate");

        assert!(matches!(err, OverrideLoaderError::CsvParse(_)));
    }

    #[test]
    fn test_resolve_without_override_returns_default() {
        let config = Box3OverrideLoader::resolve(&[], 2023, registry()).unwrap();

        assert_eq!(&config, registry().box3_config(2023));
    }

    #[test]
    fn test_resolve_merges_matching_year() {
        let records = Box3OverrideLoader::parse(TEST_CSV.as_bytes()).unwrap();

        let config = Box3OverrideLoader::resolve(&records, 2025, registry()).unwrap();

        assert_eq!(config.thresholds.tax_free_assets_per_individual, dec!(60000));
        assert_eq!(config.thresholds.debts_threshold_per_individual, dec!(4000));
        assert_eq!(config.assumed_return_rates.bank_balance, dec!(0.0150));
        assert_eq!(config.tax_rate, dec!(0.36));
    }

    #[test]
    fn test_resolve_unknown_year_uses_default_override() {
        let records = Box3OverrideLoader::parse(TEST_CSV.as_bytes()).unwrap();

        let config = Box3OverrideLoader::resolve(&records, 2030, registry()).unwrap();

        assert_eq!(config.tax_year, 2025);
        assert_eq!(config.thresholds.tax_free_assets_per_individual, dec!(60000));
    }

    #[test]
    fn test_resolve_rejects_unknown_record_year() {
        let records = vec![Box3OverrideRecord {
            tax_year: 2019,
            ..Default::default()
        }];

        let result = Box3OverrideLoader::resolve(&records, 2025, registry());

        assert!(matches!(result, Err(OverrideLoaderError::UnknownTaxYear(2019))));
    }

    #[test]
    fn test_resolve_rejects_duplicate_year() {
        let record = Box3OverrideRecord {
            tax_year: 2024,
            ..Default::default()
        };

        let result = Box3OverrideLoader::resolve(&[record.clone(), record], 2024, registry());

        assert!(matches!(result, Err(OverrideLoaderError::DuplicateTaxYear(2024))));
    }

    #[test]
    fn test_resolve_rejects_invalid_rate() {
        let records = vec![Box3OverrideRecord {
            tax_year: 2025,
            tax_rate: Some(dec!(36)),
            ..Default::default()
        }];

        let result = Box3OverrideLoader::resolve(&records, 2025, registry());

        match result {
            Err(OverrideLoaderError::InvalidOverride { tax_year, source }) => {
                assert_eq!(tax_year, 2025);
                assert_eq!(
                    source,
                    ConfigError::RateOutOfRange {
                        field: "tax_rate",
                        value: dec!(36)
                    }
                );
            }
            other => panic!("expected InvalidOverride, got {other:?}"),
        }
    }
}
