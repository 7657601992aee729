use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::core::draft::CHANNEL_STDOUT;

fn default_server_url() -> String {
    "http://localhost:8080/api/v1/notify".to_string()
}

fn default_channel() -> String {
    CHANNEL_STDOUT.to_string()
}

/// Client configuration, stored as JSON under the user config directory.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ChimeConfig {
    /// Notification resource endpoint. List, create and cancel all hit this
    /// single path.
    #[serde(default = "default_server_url")]
    pub server_url: String,
    /// Channel used when `create` is not given one explicitly.
    #[serde(default = "default_channel")]
    pub default_channel: String,
}

impl Default for ChimeConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            default_channel: default_channel(),
        }
    }
}

impl ChimeConfig {
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("chime")
            .join("config.json")
    }

    /// Load the config file, falling back to defaults when it is missing or
    /// unreadable.
    pub fn load() -> Self {
        match std::fs::read_to_string(Self::path()) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                log::warn!("Invalid config file, using defaults: {}", e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) -> std::io::Result<()> {
        let path = Self::path();
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let raw = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, raw)
    }
}
