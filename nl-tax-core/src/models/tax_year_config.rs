use serde::{Deserialize, Serialize};

use super::{Box1Config, Box3Config, ConfigError};

/// Everything both engines need for one tax year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearConfig {
    pub tax_year: i32,
    pub box1: Box1Config,
    pub box3: Box3Config,
}

impl TaxYearConfig {
    /// Validates both halves of the year configuration and checks that
    /// they belong to `tax_year`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (part, found) in [("Box 1", self.box1.tax_year), ("Box 3", self.box3.tax_year)] {
            if found != self.tax_year {
                return Err(ConfigError::TaxYearMismatch {
                    part,
                    expected: self.tax_year,
                    found,
                });
            }
        }
        self.box1.validate()?;
        self.box3.validate()
    }
}
