//! CLI module for Tubeseek.

pub mod commands;
mod output;

pub use output::{format_timestamp, Output};

use clap::{Parser, Subcommand};

/// Tubeseek - Semantic search over video transcripts
///
/// Paste a video link, get its transcript embedded into timed chunks, and
/// ask natural-language questions answered by the most similar moments.
#[derive(Parser, Debug)]
#[command(name = "tubeseek")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search one video for the moments most similar to a query
    Search {
        /// YouTube URL or video ID
        video: String,

        /// Natural-language query
        query: String,

        /// Maximum number of results
        #[arg(short = 'k', long)]
        top_k: Option<usize>,
    },

    /// Start an interactive session: load a video, then ask questions
    Session {
        /// YouTube URL or video ID to load on startup
        video: Option<String>,
    },

    /// Start HTTP API server for integration with a frontend
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,
}
