//! Command-line argument definitions for the plan sheet CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. The top-level arguments select the sheet snapshot, the
//! configuration file, and the logging verbosity; the [`Command`] picks the
//! layout operation.

use clap::{Parser, Subcommand};

/// Command-line arguments for the plan sheet tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the sheet snapshot (TOML)
    #[arg(help = "Path to the sheet snapshot")]
    pub sheet: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Layout operation to run against the sheet.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Map a point between ground metres and page centimetres
    Map {
        /// Diagram whose transform is used
        #[arg(short, long)]
        diagram: String,

        #[arg(long, allow_negative_numbers = true)]
        x: f64,

        #[arg(long, allow_negative_numbers = true)]
        y: f64,

        /// Treat the point as a page point and map it to the ground
        #[arg(long)]
        inverse: bool,
    },

    /// Compute the zoom scale that fits a diagram onto the page
    Fit {
        #[arg(short, long)]
        diagram: String,
    },

    /// Move a diagram's page origin and report what needs relayout
    Move {
        #[arg(short, long)]
        diagram: String,

        /// New page origin x (cm)
        #[arg(long, allow_negative_numbers = true)]
        x: f64,

        /// New page origin y (cm)
        #[arg(long, allow_negative_numbers = true)]
        y: f64,

        /// Replace the diagram's zoom scale as well
        #[arg(long)]
        zoom_scale: Option<f64>,
    },
}
