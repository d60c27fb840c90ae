//! CLI command implementations for storesearch.
//!
//! Each module corresponds to a subcommand of the `storesearch` binary.

pub mod config;
pub mod doctor;
pub mod search;
