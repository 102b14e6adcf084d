//! Command-line interface for gamma-check.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **check**: Test a sample spectrum for the signature of a reference material
//! - **regions**: Show the candidate photopeak regions of a reference spectrum
//!
//! ## Usage
//!
//! ```text
//! # Check a sample against a plutonium reference
//! gamma-check check sample.spe pu239.spe background.spe --bins 1024
//!
//! # Looser area tolerance, with per-region detail
//! gamma-check check sample.spe pu239.spe background.spe --bins 1024 --threshold 0.2 --verbose
//!
//! # JSON output for scripting
//! gamma-check check sample.spe pu239.spe background.spe --bins 1024 --format json
//!
//! # Inspect the regions found in a reference
//! gamma-check regions pu239.spe --background background.spe --bins 1024
//! ```
//!
//! ## Exit Status
//!
//! `check` exits 0 when fissile material is detected and 1 when it is not.
//! Any error (usage, I/O, parsing, invalid input) exits 2.

use clap::{Parser, Subcommand};

pub mod check;
pub mod regions;

#[derive(Parser)]
#[command(name = "gamma-check")]
#[command(version)]
#[command(about = "Detect fissile material by comparing gamma-ray spectra")]
#[command(
    long_about = "gamma-check compares a test gamma-ray spectrum against a reference spectrum of a known material.\n\nPhotopeak regions are located in the background-subtracted reference, and for each region it:\n- Checks the test peak shape for interference or tampering\n- Compares test and reference peak areas within a relative threshold\n\nMaterial is reported as detected when the matched regions account for nearly all of the reference spectrum."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check a test spectrum against a reference spectrum
    Check(check::CheckArgs),

    /// Show the photopeak regions found in a reference spectrum
    Regions(regions::RegionsArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
