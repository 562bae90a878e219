//! Year-keyed configuration lookup.
//!
//! The bundled table covers 2023–2025 and is built once per process. Lookups
//! for a year that is not in the table resolve to the registry's default
//! year instead of failing.

mod bundled;

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::NaiveDate;
use tracing::debug;

use crate::models::{Box1Config, Box3Config, ConfigError, TaxYearConfig};

/// Most recent bundled tax year; the fallback for unknown years.
pub const DEFAULT_YEAR: i32 = 2025;

static BUNDLED: LazyLock<YearConfigRegistry> = LazyLock::new(|| {
    YearConfigRegistry::bundled().expect("bundled tax year configuration must be valid")
});

/// Read-only table of [`TaxYearConfig`] values keyed by tax year.
///
/// A registry always holds its default year, so every lookup succeeds.
///
/// # Example
///
/// ```
/// use nl_tax_core::registry::{YearConfigRegistry, DEFAULT_YEAR};
///
/// let registry = YearConfigRegistry::global();
///
/// assert_eq!(registry.available_years(), vec![2025, 2024, 2023]);
/// assert_eq!(registry.get_config(1999).tax_year, DEFAULT_YEAR);
/// ```
#[derive(Debug, Clone)]
pub struct YearConfigRegistry {
    configs: BTreeMap<i32, TaxYearConfig>,
    default_year: i32,
}

impl YearConfigRegistry {
    /// Creates a registry whose default (fallback) year is `default_config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `default_config` is invalid.
    pub fn new(default_config: TaxYearConfig) -> Result<Self, ConfigError> {
        default_config.validate()?;
        let default_year = default_config.tax_year;
        let mut configs = BTreeMap::new();
        configs.insert(default_year, default_config);
        Ok(Self {
            configs,
            default_year,
        })
    }

    /// Builds a fresh copy of the bundled 2023–2025 table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a bundled table is invalid.
    pub fn bundled() -> Result<Self, ConfigError> {
        let mut registry = Self::new(bundled::config_2025())?;
        registry.register(bundled::config_2024())?;
        registry.register(bundled::config_2023())?;
        Ok(registry)
    }

    /// The process-wide bundled registry.
    pub fn global() -> &'static Self {
        &BUNDLED
    }

    /// Adds or replaces the configuration for `config.tax_year`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` is invalid; the registry is left
    /// unchanged.
    pub fn register(
        &mut self,
        config: TaxYearConfig,
    ) -> Result<(), ConfigError> {
        config.validate()?;
        self.configs.insert(config.tax_year, config);
        Ok(())
    }

    pub fn default_year(&self) -> i32 {
        self.default_year
    }

    pub fn contains(
        &self,
        year: i32,
    ) -> bool {
        self.configs.contains_key(&year)
    }

    /// The year a lookup for `year` will actually use.
    pub fn resolve_year(
        &self,
        year: i32,
    ) -> i32 {
        if self.contains(year) {
            year
        } else {
            debug!(
                requested = year,
                fallback = self.default_year,
                "tax year not configured; using default year"
            );
            self.default_year
        }
    }

    /// Configuration for `year`, or for the default year if `year` is unknown.
    pub fn get_config(
        &self,
        year: i32,
    ) -> &TaxYearConfig {
        &self.configs[&self.resolve_year(year)]
    }

    pub fn box1_config(
        &self,
        year: i32,
    ) -> &Box1Config {
        &self.get_config(year).box1
    }

    pub fn box3_config(
        &self,
        year: i32,
    ) -> &Box3Config {
        &self.get_config(year).box3
    }

    /// Configured years, most recent first.
    pub fn available_years(&self) -> Vec<i32> {
        self.configs.keys().rev().copied().collect()
    }
}

/// The Box 3 reference date (peildatum): 1 January of `year`.
pub fn reference_date(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 1)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn bundled_tables_are_valid() {
        for config in [
            bundled::config_2023(),
            bundled::config_2024(),
            bundled::config_2025(),
        ] {
            assert_eq!(config.validate(), Ok(()), "year {}", config.tax_year);
        }
    }

    #[test]
    fn bundled_years_agree_with_their_boxes() {
        let registry = YearConfigRegistry::global();

        for year in registry.available_years() {
            let config = registry.get_config(year);
            assert_eq!(config.box1.tax_year, year);
            assert_eq!(config.box3.tax_year, year);
        }
    }

    #[test]
    fn available_years_sorted_descending() {
        assert_eq!(
            YearConfigRegistry::global().available_years(),
            vec![2025, 2024, 2023]
        );
    }

    #[test]
    fn known_year_returns_its_own_config() {
        let box3 = YearConfigRegistry::global().box3_config(2023);

        assert_eq!(box3.tax_year, 2023);
        assert_eq!(box3.tax_rate, dec!(0.32));
        assert_eq!(box3.thresholds.debts_threshold_per_individual, dec!(3400));
    }

    #[test]
    fn unknown_year_falls_back_to_default() {
        let registry = YearConfigRegistry::global();

        assert_eq!(registry.resolve_year(2031), DEFAULT_YEAR);
        assert_eq!(registry.get_config(2031), registry.get_config(DEFAULT_YEAR));
        assert_eq!(registry.box3_config(1990).tax_year, DEFAULT_YEAR);
    }

    #[test]
    fn default_year_is_most_recent() {
        let registry = YearConfigRegistry::global();

        assert_eq!(registry.default_year(), DEFAULT_YEAR);
        assert_eq!(registry.available_years().first(), Some(&DEFAULT_YEAR));
    }

    #[test]
    fn register_rejects_invalid_config_and_keeps_table() {
        let mut registry = YearConfigRegistry::bundled().unwrap();
        let mut broken = bundled::config_2023();
        broken.tax_year = 2026;
        broken.box1.tax_year = 2026;
        broken.box3.tax_year = 2026;
        broken.box3.tax_rate = dec!(32);

        let result = registry.register(broken);

        assert_eq!(
            result,
            Err(ConfigError::RateOutOfRange {
                field: "tax_rate",
                value: dec!(32)
            })
        );
        assert!(!registry.contains(2026));
    }

    #[test]
    fn register_rejects_mismatched_box_years() {
        let mut registry = YearConfigRegistry::bundled().unwrap();
        let mut relabeled = bundled::config_2024();
        relabeled.tax_year = 2026;

        let result = registry.register(relabeled);

        assert_eq!(
            result,
            Err(ConfigError::TaxYearMismatch {
                part: "Box 1",
                expected: 2026,
                found: 2024
            })
        );
        assert!(!registry.contains(2026));
    }

    #[test]
    fn new_rejects_mismatched_box3_year() {
        let mut config = bundled::config_2025();
        config.box3.tax_year = 2024;

        let result = YearConfigRegistry::new(config);

        assert!(matches!(
            result,
            Err(ConfigError::TaxYearMismatch {
                part: "Box 3",
                expected: 2025,
                found: 2024
            })
        ));
    }

    #[test]
    fn register_replaces_existing_year() {
        let mut registry = YearConfigRegistry::bundled().unwrap();
        let mut adjusted = bundled::config_2024();
        adjusted.box3.tax_rate = dec!(0.34);

        registry.register(adjusted).unwrap();

        assert_eq!(registry.box3_config(2024).tax_rate, dec!(0.34));
        assert_eq!(registry.available_years().len(), 3);
    }

    #[test]
    fn custom_registry_falls_back_to_its_own_default() {
        let registry = YearConfigRegistry::new(bundled::config_2023()).unwrap();

        assert_eq!(registry.available_years(), vec![2023]);
        assert_eq!(registry.box1_config(2025).tax_year, 2023);
    }

    #[test]
    fn reference_date_is_first_of_january() {
        assert_eq!(reference_date(2025), NaiveDate::from_ymd_opt(2025, 1, 1));
    }
}
