//! CLI commands

mod generate;

pub use generate::GenerateCommand;
