//! Shared client configuration types.
//!
//! The TUI reads/writes `moodroom.toml` using these types; file I/O lives in
//! the TUI crate. Every field has a serde default so a partial file loads
//! cleanly.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Canonical config file name.
pub const CONFIG_FILE_NAME: &str = "moodroom.toml";

/// Top-level client configuration (persisted as `moodroom.toml`).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ClientConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub chat: ChatSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_server_url")]
    pub url: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            url: default_server_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSettings {
    #[serde(default = "default_mood_poll_interval")]
    pub mood_poll_interval_secs: u64,
}

impl ChatSettings {
    pub fn mood_poll_interval(&self) -> Duration {
        Duration::from_secs(self.mood_poll_interval_secs.max(1))
    }
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            mood_poll_interval_secs: default_mood_poll_interval(),
        }
    }
}

// ── Serde default functions ─────────────────────────────────────────────

fn default_server_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_mood_poll_interval() -> u64 {
    5
}
