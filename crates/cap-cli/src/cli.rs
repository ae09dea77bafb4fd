//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

use cap_core::{HalfDay, ViewLevel};

/// Workload capacity calendar.
///
/// Projects team capacity from a planning snapshot and renders it at week,
/// month, quarter or year granularity.
#[derive(Debug, Parser)]
#[command(name = "cap", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render the capacity grid for a period.
    Render {
        /// Zoom level to render at.
        #[arg(long, value_enum, default_value_t = ViewArg::Month)]
        view: ViewArg,

        /// Anchor date inside the period (defaults to today).
        #[arg(long)]
        anchor: Option<NaiveDate>,

        /// Path to the planning snapshot (overrides config).
        #[arg(long)]
        data: Option<PathBuf>,

        /// Restrict the grid to one collaborator.
        #[arg(long)]
        member: Option<String>,

        /// Output as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Show the valid segment counts for a task duration.
    Segments {
        /// Task duration in half-day units.
        duration: u32,

        /// Output as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Check whether a half-day can receive an assignment.
    Check {
        /// Path to the planning snapshot (overrides config).
        #[arg(long)]
        data: Option<PathBuf>,

        /// Collaborator to check.
        #[arg(long)]
        member: String,

        /// Date to check.
        #[arg(long)]
        date: NaiveDate,

        /// Half of the day: morning/am or afternoon/pm.
        #[arg(long)]
        half: HalfDay,
    },
}

/// Zoom level argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewArg {
    Year,
    Quarter,
    Month,
    Week,
}

impl ViewArg {
    #[must_use]
    pub const fn level(self) -> ViewLevel {
        match self {
            Self::Year => ViewLevel::Year,
            Self::Quarter => ViewLevel::Quarter,
            Self::Month => ViewLevel::Month,
            Self::Week => ViewLevel::Week,
        }
    }
}
