pub mod actions;
pub mod aliases;
pub mod builder;
pub mod catalog;
pub mod cli;
pub mod error;
pub mod extractors;
pub mod grid;
pub mod hour;
pub mod parser;
pub mod scanner;
pub mod settings;
pub mod xlsx;

pub use builder::{GeneratedLog, LogBuilder};
pub use error::LogError;
pub use parser::{NarrativeParser, ParseOutcome, ParserConfig};

#[cfg(test)]
mod builder_test;
#[cfg(test)]
mod grid_test;
#[cfg(test)]
mod settings_test;
