//! photosort - organize photo dumps into year/month folders
//!
//! CLI front-end for the sorting pipeline: argument parsing,
//! configuration loading, diagnostics, progress display, and the final
//! summary.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use photosort::{BatchStats, Cli, Config, LogSink, list_source_files, run_batch};
use std::fs;
use std::path::Path;
use std::sync::atomic::Ordering;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

// CLI Output Module
mod cli_output {
    //! Colored terminal output for the CLI

    use crossterm::{
        ExecutableCommand,
        style::{Color, Print, Stylize, style},
    };
    use std::io::stdout;

    /// CLI theme colors
    pub struct CliTheme;

    impl CliTheme {
        pub const SUCCESS: Color = Color::Green;
        pub const WARNING: Color = Color::Yellow;
        pub const ERROR: Color = Color::Red;
        pub const HINT: Color = Color::DarkGrey;
    }

    /// Print a separator line
    pub fn print_separator() {
        let _ = stdout().execute(Print(format!("{}\n", "─".repeat(60))));
    }

    /// Print an empty line
    pub fn print_blank() {
        let _ = stdout().execute(Print("\n"));
    }

    /// Print a hint message
    pub fn print_hint(msg: &str) {
        let _ = stdout().execute(Print(style("→ ").with(CliTheme::HINT)));
        let _ = stdout().execute(Print(format!("{msg}\n")));
    }

    /// Print a warning message
    pub fn print_warning(msg: &str) {
        let _ = stdout().execute(Print(style("⚠ ").with(CliTheme::WARNING).bold()));
        let _ = stdout().execute(Print(format!("{msg}\n")));
    }

    /// Print an error message
    pub fn print_error(msg: &str) {
        let _ = stdout().execute(Print(style("✗ ").with(CliTheme::ERROR).bold()));
        let _ = stdout().execute(Print(format!("{msg}\n")));
    }

    /// Print a statistics entry
    pub fn print_stat(key: &str, value: &str, color: Color) {
        let key_styled = style(key).with(CliTheme::HINT);
        let value_styled = style(value).with(color).bold();
        let _ = stdout().execute(Print("  "));
        let _ = stdout().execute(Print(key_styled));
        let _ = stdout().execute(Print(": "));
        let _ = stdout().execute(Print(value_styled));
        let _ = stdout().execute(Print("\n"));
    }

    /// Print the closing line with the run log location
    pub fn print_done(log_path: &str) {
        let _ = stdout().execute(Print(style("✔ ").with(CliTheme::SUCCESS).bold()));
        let _ = stdout().execute(Print(format!("Done! Check logs in {log_path}\n")));
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli);

    info!(version = env!("CARGO_PKG_VERSION"), "photosort starting");

    let config = load_config(&cli)?;
    config.validate()?;

    cli_output::print_hint(&format!(
        "Sorting {} -> {}",
        config.source_dir.display(),
        config.dest_dir.display()
    ));

    fs::create_dir_all(&config.dest_dir).with_context(|| {
        format!(
            "Failed to create destination directory {}",
            config.dest_dir.display()
        )
    })?;

    let log_path = config.log_path();
    let (sink, guard) = LogSink::init(&log_path)
        .with_context(|| format!("Failed to initialize run log {}", log_path.display()))?;

    let files = list_source_files(&config.source_dir)?;
    if files.is_empty() {
        cli_output::print_error("No files found in source directory!");
        // Flush the run log before the early exit
        drop(sink);
        drop(guard);
        std::process::exit(1);
    }
    info!(count = files.len(), "Found files to process");

    let bar = ProgressBar::new(files.len() as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
            )?
            .progress_chars("#>-"),
    );
    bar.set_message("Sorting");

    let stats = run_batch(&files, &config, &sink, |finished| {
        bar.set_message(format!("Last: {finished}"));
        bar.inc(1);
    })?;
    bar.finish_and_clear();

    print_summary(&config, &stats, &log_path);

    Ok(())
}

/// Diagnostics go to stderr; the per-file run log is handled by
/// [`LogSink`] separately
fn setup_logging(cli: &Cli) {
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if cli.json_log {
        subscriber
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Load configuration from file or CLI arguments
fn load_config(cli: &Cli) -> Result<Config> {
    let config = if let Some(ref config_path) = cli.config {
        info!(config_file = %config_path.display(), "Loading configuration from file");
        let file_config = Config::load_from_file(config_path)?;
        cli.merge_with_config(file_config)
    } else {
        cli.to_config()
    };

    Ok(config)
}

/// Print the closing summary with colored statistics
fn print_summary(config: &Config, stats: &BatchStats, log_path: &Path) {
    use cli_output::*;

    print_blank();
    print_separator();
    print_stat(
        "Sorted",
        &stats.succeeded.load(Ordering::Relaxed).to_string(),
        CliTheme::SUCCESS,
    );
    print_stat(
        "Skipped",
        &stats.skipped.load(Ordering::Relaxed).to_string(),
        CliTheme::WARNING,
    );
    print_stat(
        "Failed",
        &stats.failed.load(Ordering::Relaxed).to_string(),
        CliTheme::ERROR,
    );
    print_blank();

    if config.dry_run {
        print_warning("Dry run - no files were moved");
    }
    print_done(&log_path.display().to_string());
}
