use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

// Re-export shared config types from core
pub use moodroom_core::config::{ClientConfig, CONFIG_FILE_NAME};

// ── File I/O ────────────────────────────────────────────────────────────

pub fn config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .context("Could not determine home directory")?;
    Ok(PathBuf::from(home).join(".config").join("moodroom"))
}

/// Load client config from `~/.config/moodroom/moodroom.toml`.
/// A missing or unreadable file yields the defaults.
pub fn load_config() -> ClientConfig {
    match config_dir() {
        Ok(dir) => load_config_from(&dir),
        Err(_) => ClientConfig::default(),
    }
}

pub fn load_config_from(dir: &Path) -> ClientConfig {
    std::fs::read_to_string(dir.join(CONFIG_FILE_NAME))
        .ok()
        .and_then(|s| toml::from_str(&s).ok())
        .unwrap_or_default()
}

/// Save client config to `~/.config/moodroom/moodroom.toml`.
pub fn save_config(config: &ClientConfig) -> Result<()> {
    save_config_to(&config_dir()?, config)
}

pub fn save_config_to(dir: &Path, config: &ClientConfig) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Could not create config dir {}", dir.display()))?;
    let encoded = toml::to_string_pretty(config).context("Could not serialize config")?;
    std::fs::write(dir.join(CONFIG_FILE_NAME), encoded).context("Could not write config file")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = load_config_from(dir.path());
        assert_eq!(cfg.server.url, ClientConfig::default().server.url);
    }

    #[test]
    fn config_survives_a_save_load_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");

        let mut cfg = ClientConfig::default();
        cfg.server.url = "https://chat.example.com".to_string();
        cfg.chat.mood_poll_interval_secs = 9;
        save_config_to(dir.path(), &cfg).expect("save");

        let loaded = load_config_from(dir.path());
        assert_eq!(loaded.server.url, "https://chat.example.com");
        assert_eq!(loaded.chat.mood_poll_interval_secs, 9);
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "not [valid toml").expect("write");

        let cfg = load_config_from(dir.path());
        assert_eq!(cfg.chat.mood_poll_interval_secs, 5);
    }
}
