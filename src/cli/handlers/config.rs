//! Configuration management handler
//!
//! This module handles all configuration-related commands including
//! initialization, showing, and setting individual values.

use super::super::commands::ConfigAction;
use super::super::CliContext;
use anyhow::{anyhow, Context, Result};
use ntfy_publish::config::{Config, ConfigManager};
use ntfy_publish::Priority;

/// Handler for configuration operations
pub struct ConfigHandler<'a> {
    context: &'a CliContext,
}

impl<'a> ConfigHandler<'a> {
    /// Create new configuration handler
    pub fn new(context: &'a CliContext) -> Self {
        Self { context }
    }

    /// Handle configuration management
    pub fn handle_config(&self, action: ConfigAction) -> Result<()> {
        match action {
            ConfigAction::Init { force } => {
                let manager = ConfigManager::init(Some(self.context.config_path.clone()), force)
                    .context("Failed to initialize configuration")?;
                println!(
                    "Configuration initialized successfully at: {}",
                    manager.config_path().display()
                );
            }
            ConfigAction::Show => {
                let config = self.context.config_manager.config();
                let text = toml::to_string_pretty(config).context("Failed to render configuration")?;
                print!("{text}");
            }
            ConfigAction::Path => {
                println!("{}", self.context.config_path.display());
            }
            ConfigAction::Set { key, value } => {
                let mut manager = ConfigManager::load(Some(self.context.config_path.clone()))
                    .context("Failed to load configuration")?;
                set_value(manager.config_mut(), &key, &value)?;
                manager.save().context("Failed to save configuration")?;
                println!("Configuration updated: {key} = {value}");
            }
            ConfigAction::Get { key } => {
                let value = get_value(self.context.config_manager.config(), &key)?;
                println!("{value}");
            }
        }

        Ok(())
    }
}

fn optional(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn set_value(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let ntfy = &mut config.ntfy;
    match key {
        "ntfy.server_url" => ntfy.server_url = value.to_string(),
        "ntfy.default_topic" => ntfy.default_topic = optional(value),
        "ntfy.auth_token" => ntfy.auth_token = optional(value),
        "ntfy.user_agent" => ntfy.user_agent = optional(value),
        "ntfy.timeout_secs" => {
            ntfy.timeout_secs = match optional(value) {
                Some(v) => Some(v.parse().context("Timeout must be a whole number of seconds")?),
                None => None,
            }
        }
        "ntfy.default_priority" => {
            ntfy.default_priority = match optional(value) {
                Some(v) => Some(v.parse::<Priority>()?),
                None => None,
            }
        }
        "ntfy.default_tags" => {
            ntfy.default_tags = value
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect()
        }
        "logging.level" => config.logging.level = value.to_string(),
        _ => return Err(anyhow!("Unknown configuration key: {}", key)),
    }
    Ok(())
}

fn get_value(config: &Config, key: &str) -> Result<String> {
    let ntfy = &config.ntfy;
    let value = match key {
        "ntfy.server_url" => ntfy.server_url.clone(),
        "ntfy.default_topic" => ntfy.default_topic.clone().unwrap_or_default(),
        "ntfy.auth_token" => ntfy.auth_token.clone().unwrap_or_default(),
        "ntfy.user_agent" => ntfy.user_agent.clone().unwrap_or_default(),
        "ntfy.timeout_secs" => ntfy.timeout_secs.map(|t| t.to_string()).unwrap_or_default(),
        "ntfy.default_priority" => ntfy
            .default_priority
            .map(|p| p.to_string())
            .unwrap_or_default(),
        "ntfy.default_tags" => ntfy.default_tags.join(","),
        "logging.level" => config.logging.level.clone(),
        _ => return Err(anyhow!("Unknown configuration key: {}", key)),
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get_values() {
        let mut config = Config::default();
        set_value(&mut config, "ntfy.default_topic", "ops").unwrap();
        set_value(&mut config, "ntfy.default_priority", "high").unwrap();
        set_value(&mut config, "ntfy.default_tags", "a, b,,c").unwrap();
        set_value(&mut config, "ntfy.timeout_secs", "10").unwrap();

        assert_eq!(get_value(&config, "ntfy.default_topic").unwrap(), "ops");
        assert_eq!(get_value(&config, "ntfy.default_priority").unwrap(), "4");
        assert_eq!(get_value(&config, "ntfy.default_tags").unwrap(), "a,b,c");
        assert_eq!(get_value(&config, "ntfy.timeout_secs").unwrap(), "10");
    }

    #[test]
    fn test_empty_value_clears_optional_key() {
        let mut config = Config::default();
        set_value(&mut config, "ntfy.auth_token", "tk").unwrap();
        set_value(&mut config, "ntfy.auth_token", "").unwrap();
        assert!(config.ntfy.auth_token.is_none());

        set_value(&mut config, "ntfy.timeout_secs", "").unwrap();
        assert!(config.ntfy.timeout_secs.is_none());
    }

    #[test]
    fn test_rejects_unknown_and_invalid() {
        let mut config = Config::default();
        assert!(set_value(&mut config, "ntfy.nope", "x").is_err());
        assert!(set_value(&mut config, "ntfy.default_priority", "loud").is_err());
        assert!(set_value(&mut config, "ntfy.timeout_secs", "soon").is_err());
        assert!(get_value(&config, "daemon.enabled").is_err());
    }
}
