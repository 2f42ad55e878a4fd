//! Command handlers for all CLI operations
//!
//! This module routes parsed commands to their handlers, keeping clap
//! parsing separate from publishing and configuration logic.

pub mod config;
pub mod publish;

use super::{CliContext, Commands};
use anyhow::Result;

use config::ConfigHandler;
use publish::PublishHandler;

/// Coordinates all command handling operations with dependency injection via CliContext
pub struct CommandHandler {
    context: CliContext,
}

impl CommandHandler {
    /// Create a new command handler instance with the provided context
    pub fn new(context: CliContext) -> Self {
        Self { context }
    }

    /// Route commands to their appropriate handlers
    pub async fn handle_command(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Publish(args) => PublishHandler::new(&self.context).handle_publish(args).await,
            Commands::Config { action } => ConfigHandler::new(&self.context).handle_config(action),
        }
    }
}
