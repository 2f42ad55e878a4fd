use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use crate::ntfy::Priority;
use crate::shared::clients::ntfy::{DEFAULT_SERVER_URL, DEFAULT_TIMEOUT};

/// Configuration file contents
///
/// Every section and field is optional in the file; anything missing takes
/// its default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ntfy: NtfyConfig,
    pub logging: LoggingConfig,
}

/// Server connection settings plus defaults applied to CLI-built messages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NtfyConfig {
    pub server_url: String,
    pub default_topic: Option<String>,
    #[serde(deserialize_with = "deserialize_priority")]
    pub default_priority: Option<Priority>,
    pub default_tags: Vec<String>,
    pub auth_token: Option<String>,
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
    pub headers: BTreeMap<String, String>, // header name -> value
}

impl Default for NtfyConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            default_topic: None,
            default_priority: None,
            default_tags: Vec::new(),
            auth_token: None,
            timeout_secs: Some(DEFAULT_TIMEOUT.as_secs()),
            user_agent: None,
            headers: BTreeMap::new(),
        }
    }
}

/// Accept the same 1-5 numbers and names as `config set`
fn deserialize_priority<'de, D>(deserializer: D) -> Result<Option<Priority>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i64),
        Name(String),
    }

    let raw = match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(n)) => n.to_string(),
        Some(Raw::Name(name)) => name,
        None => return Ok(None),
    };
    raw.parse::<Priority>()
        .map(Some)
        .map_err(serde::de::Error::custom)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}
