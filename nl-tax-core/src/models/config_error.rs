use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while building or merging a year configuration.
///
/// Configuration is bundled with the crate or supplied by a trusted
/// configuration store, so these indicate a programming or data-entry
/// mistake rather than bad user input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A rate must be a fraction between 0 and 1.
    #[error("{field} must be between 0 and 1, got {value}")]
    RateOutOfRange { field: &'static str, value: Decimal },

    /// A threshold or amount must not be negative.
    #[error("{field} must be non-negative, got {value}")]
    NegativeAmount { field: &'static str, value: Decimal },

    /// A threshold that is used as an upper bound must be positive.
    #[error("{field} must be positive, got {value}")]
    NonPositiveAmount { field: &'static str, value: Decimal },

    /// A bracket or credit schedule has no entries.
    #[error("{0} schedule is empty")]
    EmptySchedule(&'static str),

    /// The first entry of a schedule must start at zero income.
    #[error("{schedule} schedule must start at 0, starts at {start}")]
    ScheduleStartsAboveZero {
        schedule: &'static str,
        start: Decimal,
    },

    /// Entry `index` does not start where the previous entry ends, or ends
    /// before it starts.
    #[error("{schedule} schedule is not contiguous at entry {index}")]
    ScheduleNotContiguous {
        schedule: &'static str,
        index: usize,
    },

    /// Only the last entry may be open-ended, and it must be.
    #[error("{0} schedule must end with exactly one open-ended entry")]
    ScheduleNotOpenEnded(&'static str),

    /// A Box 1 or Box 3 configuration is filed under another tax year.
    #[error("{part} configuration is for {found}, expected tax year {expected}")]
    TaxYearMismatch {
        part: &'static str,
        expected: i32,
        found: i32,
    },
}
