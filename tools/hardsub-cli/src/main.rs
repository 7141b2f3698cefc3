//! Hardsub Studio CLI — pick files, run the hardsub pipeline, preview insights.
//!
//! Usage:
//!   hardsub run --video <P> --subtitles <P>   Run the hardsub pipeline
//!   hardsub positions                         List thumbnail positions
//!   hardsub insights --video <N> ...          Fetch processing insights only
//!   hardsub init-config                       Write the default config file

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use hardsub_common::config::AppConfig;
use hardsub_model::ThumbnailPosition;

mod commands;
mod render;

#[derive(Parser)]
#[command(
    name = "hardsub",
    about = "Burn ASS subtitles and a logo into anime episodes",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Load configuration from this file instead of the standard location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the hardsub pipeline
    Run {
        /// Video file (.mp4/.mkv)
        #[arg(long)]
        video: Option<PathBuf>,

        /// ASS subtitle file
        #[arg(long)]
        subtitles: Option<PathBuf>,

        /// Optional thumbnail image
        #[arg(long)]
        thumbnail: Option<PathBuf>,

        /// Thumbnail position: top-left, top-right, bottom-left, bottom-right
        #[arg(long, default_value = "top-right")]
        position: ThumbnailPosition,

        /// Skip the step delays
        #[arg(long)]
        instant: bool,

        /// Seconds to wait for insights after the run finishes
        #[arg(long, default_value = "15")]
        insights_wait: u64,

        /// Print the final state as JSON
        #[arg(long)]
        json: bool,
    },

    /// List thumbnail positions and their overlay expressions
    Positions,

    /// Fetch processing insights without running the pipeline
    Insights {
        /// Video display name
        #[arg(long)]
        video: String,

        /// Subtitle display name
        #[arg(long)]
        subtitles: String,

        /// Whether a thumbnail is used
        #[arg(long)]
        thumbnail: bool,

        /// Thumbnail position
        #[arg(long, default_value = "top-right")]
        position: ThumbnailPosition,
    },

    /// Write the default configuration file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load(),
    };
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    hardsub_common::logging::init_logging(&config.logging);

    match cli.command {
        Commands::Run {
            video,
            subtitles,
            thumbnail,
            position,
            instant,
            insights_wait,
            json,
        } => {
            commands::run::run(
                &config,
                commands::run::RunArgs {
                    video,
                    subtitles,
                    thumbnail,
                    position,
                    instant,
                    insights_wait,
                    json,
                },
            )
            .await
        }
        Commands::Positions => commands::positions::run(),
        Commands::Insights {
            video,
            subtitles,
            thumbnail,
            position,
        } => commands::insights::run(&config, video, subtitles, thumbnail, position).await,
        Commands::InitConfig { force } => commands::init_config::run(&config, force),
    }
}
