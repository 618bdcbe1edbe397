//! Sibscan core library.
//!
//! This crate scans a set of sibling repositories line by line for
//! denylisted code patterns or marker comments and produces one
//! fixed-schema JSON report with a severity-driven exit code.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binaries use this).
//! - `config`: Config file discovery and effective configuration resolution.
//! - `profiles`: Built-in `features` and `markers` rule sets.
//! - `locate`: Which configured repositories exist under the base directory.
//! - `walk`: Candidate file discovery per repository.
//! - `matcher`: Rule compilation and line matching.
//! - `aggregate`: Sorting, counting, and status derivation.
//! - `scan`: The pipeline tying the stages together.
//! - `output`: JSON/human report printers.
//! - `run`: Shared driver for the binaries.
//! - `models`: Data models for rules, matches, and the report.
//! - `error`: Configuration errors.
//! - `utils`: Supporting helpers.
pub mod aggregate;
pub mod cli;
pub mod config;
pub mod error;
pub mod locate;
pub mod matcher;
pub mod models;
pub mod output;
pub mod profiles;
pub mod run;
pub mod scan;
pub mod utils;
pub mod walk;
