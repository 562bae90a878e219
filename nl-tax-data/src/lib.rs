//! Input collection for the tax engines: lenient amount parsing, itemized
//! Box 3 entries and user overrides of the bundled Box 3 configuration.

pub mod config_loader;
pub mod entries;
pub mod utils;

pub use config_loader::{Box3OverrideLoader, Box3OverrideRecord, OverrideLoaderError};
pub use entries::{EntriesLoadError, EntryCategory, MonetaryEntry, aggregate};
