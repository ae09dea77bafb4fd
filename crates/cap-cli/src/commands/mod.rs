//! CLI subcommand implementations.

pub mod check;
pub mod render;
pub mod segments;
