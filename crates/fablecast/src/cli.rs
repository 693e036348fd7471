//! CLI command definitions and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use fablecast::{ContentPiece, ContentService, FablecastConfig, Outcome};
use serde::Serialize;
use std::path::PathBuf;

/// Fablecast - themed parenting content generation and Instagram publishing
#[derive(Parser, Debug)]
#[command(name = "fablecast")]
#[command(about = "Themed parenting content generation and Instagram publishing", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file overlaid on the bundled defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate content for one day
    Daily {
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Generate seven days of content
    Weekly {
        /// First date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        start: Option<NaiveDate>,
    },

    /// Generate the story-bot teaser campaign
    Campaign,

    /// Generate one piece
    Custom {
        /// Theme wire name, e.g. wonder_wednesday
        #[arg(long)]
        theme: String,

        /// Parenting topic, drawn at random when omitted
        #[arg(long)]
        topic: Option<String>,

        /// carousel, video or story
        #[arg(long, default_value = "carousel")]
        kind: String,
    },

    /// Publish a content piece saved as JSON
    Publish {
        /// Path to the piece JSON
        piece: PathBuf,

        /// Hosted asset URLs, in slide order
        #[arg(long = "asset", required = true)]
        assets: Vec<String>,
    },

    /// Show account insights, or one post's insights
    Insights {
        /// Post id
        #[arg(long)]
        post: Option<String>,
    },

    /// List media created but not yet published
    Scheduled,

    /// Verify credentials against the platform
    Check,
}

/// Load configuration for the given CLI flags.
pub fn load_config(cli: &Cli) -> fablecast::FablecastResult<FablecastConfig> {
    match &cli.config {
        Some(path) => FablecastConfig::from_file(path),
        None => FablecastConfig::load(),
    }
}

/// Execute one command, printing its outcome as JSON.
///
/// Returns whether the command succeeded.
pub async fn run(
    service: &ContentService<fablecast::OpenAiClient>,
    command: Commands,
) -> Result<bool, Box<dyn std::error::Error>> {
    match command {
        Commands::Daily { date } => match date {
            Some(date) => print(service.generate_daily_for(date).await),
            None => print(service.generate_daily().await),
        },
        Commands::Weekly { start } => match start {
            Some(start) => print(service.generate_weekly_from(start).await),
            None => print(service.generate_weekly().await),
        },
        Commands::Campaign => print(service.generate_campaign().await),
        Commands::Custom { theme, topic, kind } => print(
            service
                .generate_custom_raw(&theme, topic.as_deref(), &kind)
                .await,
        ),
        Commands::Publish { piece, assets } => {
            let piece: ContentPiece = serde_json::from_str(&std::fs::read_to_string(&piece)?)?;
            print(service.publish_piece(&piece, &assets).await)
        }
        Commands::Insights { post } => match post {
            Some(post) => print(service.get_post_insights(&post).await),
            None => print(service.get_insights().await),
        },
        Commands::Scheduled => print(service.get_scheduled_posts().await),
        Commands::Check => print(service.test_connection().await),
    }
}

fn print<T: Serialize>(outcome: Outcome<T>) -> Result<bool, Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(outcome.is_success())
}
