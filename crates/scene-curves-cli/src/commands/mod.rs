//! Subcommand implementations.

pub mod plot;
pub mod scan;
pub mod thresholds;
