//! Workload capacity calendar CLI library.
//!
//! This crate provides the CLI interface over the capacity engine.

mod cli;
pub mod commands;
mod config;
mod data;

pub use cli::{Cli, Commands, ViewArg};
pub use config::Config;
pub use data::Snapshot;
