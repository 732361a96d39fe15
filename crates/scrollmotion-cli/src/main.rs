use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scrollmotion_core::{AppConfig, Preset, ThemeMode};

mod commands;

#[derive(Parser)]
#[command(name = "scrollmotion")]
#[command(author, version, about = "Preview scroll-driven motion curves")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Use this config file instead of ~/.config/scrollmotion/config.toml
    #[arg(short = 'c', long, global = true)]
    config: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a preset at one progress value
    Sample {
        /// Preset name (stacked-depth, perspective, reveal, scroll-fade, hero-fade, depth-scale:<n>, parallax:<speed>, scroll-driven, element-depth)
        #[arg(short = 'p', long, default_value = "stacked-depth")]
        preset: Preset,
        /// Section progress (0 = section top at viewport top)
        #[arg(long, allow_negative_numbers = true)]
        progress: f64,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Convert a global scroll offset into a section's progress
    Section {
        /// Scroll offset in pixels
        #[arg(short = 'o', long, allow_negative_numbers = true)]
        offset: f64,
        /// Zero-based section index
        #[arg(short = 'i', long)]
        index: usize,
        /// Viewport height in pixels (defaults to the configured height)
        #[arg(long)]
        viewport: Option<f64>,
    },
    /// Simulate a smooth scroll through a section and print each frame
    Play {
        #[arg(short = 'p', long, default_value = "stacked-depth")]
        preset: Preset,
        /// Section to scroll through
        #[arg(short = 'i', long, default_value_t = 0)]
        index: usize,
        /// Pixels scrolled, starting at the section top (defaults to one viewport)
        #[arg(long)]
        distance: Option<f64>,
        /// Scroll duration in milliseconds
        #[arg(long, default_value_t = 800)]
        duration_ms: u64,
        /// Print one JSON object per frame
        #[arg(long)]
        json: bool,
    },
    /// Show or change the persisted theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
    /// Show or create the config file
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Print the active mode and palette
    Show,
    /// Switch between light and dark
    Toggle,
    /// Set a specific mode
    Set { mode: ThemeMode },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(AppConfig::config_path);
    let config = AppConfig::load_from(&config_path)?;

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        Commands::Sample {
            preset,
            progress,
            json,
        } => commands::sample::run(&config, &preset, progress, json),
        Commands::Section {
            offset,
            index,
            viewport,
        } => commands::section::run(&config, offset, index, viewport),
        Commands::Play {
            preset,
            index,
            distance,
            duration_ms,
            json,
        } => {
            let options = commands::play::PlayOptions {
                preset,
                index,
                distance,
                duration_ms,
                json,
            };
            commands::play::run(&config, options).await
        }
        Commands::Theme { action } => match action {
            Some(ThemeAction::Show) | None => commands::theme::show(&config),
            Some(ThemeAction::Toggle) => commands::theme::toggle(&config),
            Some(ThemeAction::Set { mode }) => commands::theme::set(&config, mode),
        },
        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => commands::config::show(&config),
            Some(ConfigAction::Init { force }) => commands::config::init(&config_path, force),
        },
    }
}
