mod box1_config;
mod box3_config;
mod config_error;
mod income_period;
mod ruling_category;
mod tax_bracket;
mod tax_year_config;

pub use box1_config::{Box1Config, RulingThresholds};
pub use box3_config::{AssumedReturnRates, Box3Config, Box3ConfigOverride, Box3Thresholds};
pub use config_error::ConfigError;
pub use income_period::{IncomePeriod, WORKING_DAYS_PER_YEAR, WORKING_WEEKS_PER_YEAR};
pub use ruling_category::RulingCategory;
pub use tax_bracket::{CreditSegment, TaxBracket};
pub use tax_year_config::TaxYearConfig;
