//! Command-line parsing for the asset growth trend viewer.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the data/transform code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::Theme;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "trend",
    version,
    about = "Asset growth chart: actual value vs. 10% annualized target"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive TUI chart.
    ///
    /// This uses the same fetch/transform pipeline as `trend show`, but
    /// renders the chart in a terminal UI using Ratatui.
    Tui(ChartArgs),
    /// Fetch once and print a summary plus an ASCII plot.
    Show(ShowArgs),
    /// Fetch once and export the series bundle as JSON.
    Export(ExportArgs),
    /// Re-plot a previously exported bundle JSON (no fetch).
    Plot(PlotArgs),
}

/// Common options for chart construction.
#[derive(Debug, Parser, Clone)]
pub struct ChartArgs {
    /// Dataset location: a `data.json` path or an http(s) URL.
    /// Defaults to the `TREND_DATA` environment variable (.env supported).
    #[arg(short = 'd', long)]
    pub data: Option<String>,

    /// Use a synthetic sample dataset instead of fetching.
    #[arg(long)]
    pub sample: bool,

    /// Number of monthly points in the sample dataset.
    #[arg(long, default_value_t = 36)]
    pub months: usize,

    /// Starting asset value for the sample dataset.
    #[arg(long, default_value_t = 10.0)]
    pub base: f64,

    /// Random seed for sample noise.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Chart color palette.
    #[arg(long, value_enum, default_value_t = Theme::Dark)]
    pub theme: Theme,
}

/// Options for the one-shot terminal chart.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    #[command(flatten)]
    pub chart: ChartArgs,

    /// Print the summary only, without the plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}

/// Options for exporting the bundle JSON.
#[derive(Debug, Parser)]
pub struct ExportArgs {
    #[command(flatten)]
    pub chart: ChartArgs,

    /// Output path for the bundle JSON.
    #[arg(short = 'o', long, value_name = "JSON")]
    pub out: PathBuf,
}

/// Options for re-plotting a saved bundle.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Bundle JSON written by `trend export`.
    #[arg(short = 'b', long, value_name = "JSON")]
    pub bundle: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}
