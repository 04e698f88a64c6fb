//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - acquires the dataset (file, URL, or synthetic sample)
//! - runs the transform pipeline
//! - prints summaries/plots or launches the TUI
//! - writes optional exports

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{ChartArgs, Command, ExportArgs, PlotArgs, ShowArgs};
use crate::domain::ChartConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `trend` binary.
pub fn run() -> Result<(), AppError> {
    // We want `trend` and `trend --sample` to behave like `trend tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Tui(args) => handle_tui(args),
        Command::Show(args) => handle_show(args),
        Command::Export(args) => handle_export(args),
        Command::Plot(args) => handle_plot(args),
    }
}

/// Install the fmt subscriber for the non-interactive commands.
///
/// The TUI skips this: log lines would fight the alternate screen for the
/// terminal, so there the status line carries the same information.
fn init_logging() {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    init_logging();

    let mut config = chart_config_from_args(&args.chart);
    config.plot_width = args.width;
    config.plot_height = args.height;

    let run = pipeline::run_chart(&config)?;

    println!("{}", crate::report::format_summary(&run, &config));

    if !args.no_plot {
        let plot = crate::plot::render_ascii_plot(&run.bundle, config.plot_width, config.plot_height);
        println!("{plot}");
    }

    Ok(())
}

fn handle_export(args: ExportArgs) -> Result<(), AppError> {
    init_logging();

    let config = chart_config_from_args(&args.chart);
    let run = pipeline::run_chart(&config)?;

    crate::io::bundle::write_bundle_json(&args.out, &run.bundle, &run.source)?;
    println!("Wrote bundle JSON: {}", args.out.display());

    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    init_logging();

    let doc = crate::io::bundle::read_bundle_json(&args.bundle)?;
    println!("Bundle from {} (generated {})", doc.source, doc.generated);

    let plot = crate::plot::render_ascii_plot(&doc.bundle, args.width, args.height);
    println!("{plot}");

    Ok(())
}

fn handle_tui(args: ChartArgs) -> Result<(), AppError> {
    crate::tui::run(chart_config_from_args(&args))
}

pub fn chart_config_from_args(args: &ChartArgs) -> ChartConfig {
    ChartConfig {
        data: args.data.clone(),
        use_sample: args.sample,
        sample_months: args.months,
        sample_base: args.base,
        sample_seed: args.seed,
        theme: args.theme,
        plot_width: 100,
        plot_height: 25,
    }
}

/// Rewrite argv so `trend` defaults to `trend tui`.
///
/// Rules:
/// - `trend`                     -> `trend tui`
/// - `trend --sample ...`        -> `trend tui --sample ...`
/// - `trend --help/--version/-h` -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "tui" | "show" | "export" | "plot");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_tui() {
        assert_eq!(rewrite_args(argv(&["trend"])), argv(&["trend", "tui"]));
    }

    #[test]
    fn leading_flag_routes_to_tui() {
        assert_eq!(
            rewrite_args(argv(&["trend", "--sample"])),
            argv(&["trend", "tui", "--sample"])
        );
    }

    #[test]
    fn explicit_subcommands_and_help_pass_through() {
        assert_eq!(
            rewrite_args(argv(&["trend", "show", "--no-plot"])),
            argv(&["trend", "show", "--no-plot"])
        );
        assert_eq!(
            rewrite_args(argv(&["trend", "plot", "--bundle", "out.json"])),
            argv(&["trend", "plot", "--bundle", "out.json"])
        );
        assert_eq!(rewrite_args(argv(&["trend", "--help"])), argv(&["trend", "--help"]));
    }
}
