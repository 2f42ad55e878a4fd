//! Command definitions and structures for the CLI
//!
//! This module contains all the clap-based command line argument definitions,
//! including the main CLI structure and all subcommands.

use clap::{Args, Parser, Subcommand};
use ntfy_publish::{parse_duration, Priority};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Main CLI structure
#[derive(Parser)]
#[command(name = "ntfy-publish")]
#[command(about = "Publish notifications to an ntfy server")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the configuration file
    #[arg(long, global = true, env = "NTFY_PUBLISH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Publish a message to a topic
    Publish(PublishArgs),

    /// Configure settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args, Debug, Default)]
pub struct PublishArgs {
    /// Message body
    pub message: Option<String>,

    /// Topic to publish to (defaults to ntfy.default_topic)
    #[arg(short = 'o', long)]
    pub topic: Option<String>,

    /// Message title
    #[arg(short, long)]
    pub title: Option<String>,

    /// Comma separated tags, e.g. warning,skull
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Priority: 1-5 or min, low, default, high, max, urgent
    #[arg(short, long)]
    pub priority: Option<Priority>,

    /// URL opened when the notification is tapped
    #[arg(long)]
    pub click: Option<Url>,

    /// Notification icon URL
    #[arg(long)]
    pub icon: Option<Url>,

    /// URL of a file to attach
    #[arg(long)]
    pub attach: Option<Url>,

    /// Display name for the attachment
    #[arg(long, requires = "attach")]
    pub filename: Option<String>,

    /// Delay delivery, e.g. 30m or 1h30m
    #[arg(long, value_parser = parse_duration)]
    pub delay: Option<Duration>,

    /// Also forward the message to this e-mail address
    #[arg(long)]
    pub email: Option<String>,

    /// Phone number to call with the message
    #[arg(long)]
    pub call: Option<String>,

    /// View action button, repeatable
    #[arg(long = "view", value_name = "LABEL,URL")]
    pub views: Vec<String>,

    /// HTTP action button, repeatable
    #[arg(long = "http", value_name = "LABEL,URL[,METHOD]")]
    pub http: Vec<String>,

    /// Server URL, overriding ntfy.server_url
    #[arg(long)]
    pub server: Option<String>,

    /// Print the JSON that would be sent and exit
    #[arg(long)]
    pub dry_run: bool,
}

/// Configuration management actions
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Set configuration value
    Set {
        /// Configuration key (e.g., ntfy.server_url)
        key: String,
        /// Value to set; empty clears optional keys
        value: String,
    },

    /// Get configuration value
    Get {
        /// Configuration key
        key: String,
    },
}
