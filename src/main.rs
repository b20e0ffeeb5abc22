//! Lectern - a terminal slide-deck presenter.
//!
//! # Usage
//!
//! ```bash
//! lectern talk.md
//! lectern --watch talk.md
//! lectern --slide 5 --fullscreen talk.md
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use lectern::app::App;
use lectern::config::{
    ConfigFlags, ThemeMode, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};
use lectern::highlight::{background_mode, set_background_mode};
use lectern::theme::Palette;

/// A terminal slide-deck presenter
#[derive(Parser, Debug)]
#[command(name = "lectern", version, about, long_about = None)]
struct Cli {
    /// Markdown deck to present
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Watch the deck for changes and auto-reload
    #[arg(short, long)]
    watch: bool,

    /// Start without the frame, controls and dots
    #[arg(short, long)]
    fullscreen: bool,

    /// Swap slides without the exit/enter animation
    #[arg(long)]
    no_transitions: bool,

    /// Length of a slide transition in milliseconds
    #[arg(long, value_name = "MS")]
    transition_ms: Option<u64>,

    /// Force palette and highlight background (light or dark)
    #[arg(long, value_enum, default_value = "auto")]
    theme: ThemeMode,

    /// Slide to open on (1-based)
    #[arg(short, long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    slide: Option<u32>,

    /// Write debug logs to a file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()),
            )
            .with_writer(std::io::stderr)
            .init();
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let mut cli_flags = parse_flag_tokens(&raw_args);
    // Short forms never reach the token scan.
    cli_flags.watch |= cli.watch;
    cli_flags.fullscreen |= cli.fullscreen;
    cli_flags.no_transitions |= cli.no_transitions;
    cli_flags.transition_ms = cli.transition_ms.or(cli_flags.transition_ms);
    cli_flags.log_file = cli.log_file.clone().or(cli_flags.log_file);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_logging(effective.log_file.as_deref())?;
    tracing::debug!(?effective, "config.effective");

    set_background_mode(effective.theme.unwrap_or(cli.theme).background());
    let palette = Palette::for_background(background_mode());

    if !cli.file.exists() {
        anyhow::bail!("File not found: {}", cli.file.display());
    }

    let start_slide = cli.slide.map_or(0, |n| n as usize - 1);
    let mut app = App::new(cli.file)
        .with_watch(effective.watch)
        .with_fullscreen(effective.fullscreen)
        .with_transition_ms(effective.effective_transition_ms())
        .with_start_slide(start_slide)
        .with_palette(palette)
        .with_config_paths(
            Some(global_path.clone()),
            if local_path.exists() {
                Some(local_path.clone())
            } else {
                None
            },
        );

    app.run().context("Presenter error")
}
