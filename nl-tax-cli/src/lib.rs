pub mod cli;
pub mod report;

pub use cli::{Cli, run};
