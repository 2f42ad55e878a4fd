use crate::errors::{NtfyError, NtfyResult};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

// Re-export shared types for convenience
pub use crate::shared::config::{Config, LoggingConfig, NtfyConfig};

/// Configuration manager for the publisher CLI
///
/// Reads a TOML file from an explicit path or from the platform config
/// directory. A missing file is not an error; it yields the default
/// configuration and nothing is written until [`init`](Self::init) or
/// [`save`](Self::save) is called.
///
/// # Example
///
/// ```rust,no_run
/// use ntfy_publish::config::ConfigManager;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let manager = ConfigManager::load(None)?;
///     println!("Server URL: {}", manager.config().ntfy.server_url);
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct ConfigManager {
    config_path: PathBuf,
    config: Config,
}

impl ConfigManager {
    /// Loads configuration from `config_path`, or the default location when `None`
    ///
    /// # Errors
    ///
    /// Returns an error if the default location cannot be determined, or if
    /// an existing file cannot be read or parsed.
    pub fn load(config_path: Option<PathBuf>) -> NtfyResult<Self> {
        let config_path = match config_path {
            Some(path) => path,
            None => Self::default_config_path()?,
        };

        let config = if config_path.exists() {
            Self::read(&config_path)?
        } else {
            debug!(path = %config_path.display(), "config file not found, using defaults");
            Config::default()
        };

        Ok(ConfigManager {
            config_path,
            config,
        })
    }

    /// Writes a default configuration file
    ///
    /// Refuses to overwrite an existing file unless `force` is set.
    pub fn init(config_path: Option<PathBuf>, force: bool) -> NtfyResult<Self> {
        let config_path = match config_path {
            Some(path) => path,
            None => Self::default_config_path()?,
        };

        if config_path.exists() && !force {
            return Err(NtfyError::config(format!(
                "config file already exists at {} (use --force to overwrite)",
                config_path.display()
            )));
        }

        let manager = ConfigManager {
            config_path,
            config: Config::default(),
        };
        manager.save()?;
        Ok(manager)
    }

    /// Location of the per-user configuration file
    pub fn default_config_path() -> NtfyResult<PathBuf> {
        let dirs = ProjectDirs::from("sh", "ntfy", "ntfy-publish")
            .ok_or_else(|| NtfyError::config("failed to determine the user config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    fn read(path: &Path) -> NtfyResult<Config> {
        let content = fs::read_to_string(path).map_err(|e| {
            NtfyError::config_with_source(format!("failed to read {}", path.display()), e)
        })?;
        toml::from_str(&content).map_err(|e| {
            NtfyError::config_with_source(format!("failed to parse {}", path.display()), e)
        })
    }

    /// Saves the current configuration, creating parent directories as needed
    pub fn save(&self) -> NtfyResult<()> {
        if let Some(parent) = self.config_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    NtfyError::config_with_source(
                        format!("failed to create {}", parent.display()),
                        e,
                    )
                })?;
            }
        }

        let content = toml::to_string_pretty(&self.config)
            .map_err(|e| NtfyError::config_with_source("failed to serialize config", e))?;
        fs::write(&self.config_path, content).map_err(|e| {
            NtfyError::config_with_source(format!("failed to write {}", self.config_path.display()), e)
        })?;

        debug!(path = %self.config_path.display(), "saved config");
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Mutable access; call [`save`](Self::save) to persist changes
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}
