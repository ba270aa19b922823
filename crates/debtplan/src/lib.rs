//! Command-line host for the debt payoff engine
//!
//! Loads a YAML plan file, runs one engine operation, and prints the result
//! as a text table or JSON. All payoff math lives in `debtplan_core`.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod plan;
pub mod report;

pub use logging::init_logging;
