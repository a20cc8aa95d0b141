//! SwapRunner -- repeated `forge script` swap broadcasts against a testnet.
//!
//! This crate provides the run configuration, the external process wrapper,
//! output scraping, and the fixed-count loop that tallies successes.

pub mod command;
pub mod config;
pub mod error;
pub mod executor;
pub mod filter;
pub mod outcome;
pub mod report;
pub mod runner;
pub mod summary;

pub use config::RunConfig;
pub use runner::run;
pub use summary::RunSummary;
