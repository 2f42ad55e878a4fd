//! CLI Context for dependency injection and shared state
//!
//! This module provides the CliContext abstraction that centralizes
//! configuration management and reduces coupling in CLI handlers.

use anyhow::{Context, Result};
use ntfy_publish::config::ConfigManager;
use std::path::PathBuf;
use std::sync::Arc;

/// CLI execution context containing shared dependencies and configuration
#[derive(Clone)]
pub struct CliContext {
    pub config_path: PathBuf,
    pub verbose: bool,
    pub config_manager: Arc<ConfigManager>,
}

impl CliContext {
    /// Create a new CLI context from an optional explicit config path
    pub fn new(config_path: Option<PathBuf>, verbose: bool) -> Result<Self> {
        let config_manager =
            ConfigManager::load(config_path).context("Failed to load configuration")?;

        Ok(Self {
            config_path: config_manager.config_path().to_path_buf(),
            verbose,
            config_manager: Arc::new(config_manager),
        })
    }

    /// Initialize logging subsystem based on verbosity and configuration
    ///
    /// Logs go to stderr so that stdout only carries command output.
    pub fn init_logging(&self) -> Result<()> {
        let log_level = if self.verbose {
            "debug"
        } else {
            &self.config_manager.config().logging.level
        };

        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::from_default_env()
                    .add_directive(log_level.parse().unwrap_or_else(|_| {
                        tracing::Level::WARN.into()
                    })),
            )
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

        if self.verbose {
            tracing::debug!("Verbose logging enabled");
            tracing::debug!("Config path: {}", self.config_path.display());
        }

        Ok(())
    }
}
