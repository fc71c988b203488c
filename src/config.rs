use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::session::DEFAULT_VOLUME;
use crate::summary::{DEFAULT_ENDPOINT, DEFAULT_MODEL};

/// Recitation by Maher Al-Muaiqly.
pub const DEFAULT_AUDIO_BASE_URL: &str = "https://server12.mp3quran.net/maher";

pub const DEFAULT_SLEEP_TIMER_MINUTES: u32 = 30;

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_endpoint: String,
    /// Base URL; chapter N is fetched from `{audio_base_url}/NNN.mp3`.
    pub audio_base_url: String,
    pub default_volume: f64,
    pub sleep_timer_minutes: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: String::new(),
            gemini_model: DEFAULT_MODEL.into(),
            gemini_endpoint: DEFAULT_ENDPOINT.into(),
            audio_base_url: DEFAULT_AUDIO_BASE_URL.into(),
            default_volume: DEFAULT_VOLUME,
            sleep_timer_minutes: DEFAULT_SLEEP_TIMER_MINUTES,
        }
    }
}

impl Config {
    /// Directory: ~/.config/quran-player/
    fn dir() -> PathBuf {
        let mut p = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        p.push("quran-player");
        p
    }

    fn path() -> PathBuf {
        Self::dir().join("config.json")
    }

    /// Load from disk, returning defaults if file doesn't exist or is invalid.
    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(data) => serde_json::from_str(&data).unwrap_or_else(|e| {
                log::warn!("Invalid config at {}, using defaults: {e}", path.display());
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to(&Self::path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let data = serde_json::to_string_pretty(self)?;
        fs::write(path, data)?;
        Ok(())
    }

    /// The stored key, else `GEMINI_API_KEY`, else `API_KEY` from the environment.
    pub fn resolved_api_key(&self) -> String {
        self.api_key_with(|name| std::env::var(name).ok())
    }

    fn api_key_with(&self, env: impl Fn(&str) -> Option<String>) -> String {
        if !self.gemini_api_key.trim().is_empty() {
            return self.gemini_api_key.trim().to_string();
        }
        ["GEMINI_API_KEY", "API_KEY"]
            .into_iter()
            .filter_map(|name| env(name))
            .find(|key| !key.trim().is_empty())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json"));
        assert_eq!(config, Config::default());
        assert_eq!(config.sleep_timer_minutes, 30);
        assert_eq!(config.default_volume, 0.8);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "gemini_api_key": "abc", "sleep_timer_minutes": 15 }"#).unwrap();

        let config = Config::load_from(&path);
        assert_eq!(config.gemini_api_key, "abc");
        assert_eq!(config.sleep_timer_minutes, 15);
        assert_eq!(config.gemini_model, DEFAULT_MODEL);
        assert_eq!(config.audio_base_url, DEFAULT_AUDIO_BASE_URL);
    }

    #[test]
    fn invalid_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "[]").unwrap();
        assert_eq!(Config::load_from(&path), Config::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("config.json");
        let config = Config {
            gemini_api_key: "key".into(),
            sleep_timer_minutes: 45,
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path), config);
    }

    #[test]
    fn api_key_prefers_config_then_environment() {
        let env = |name: &str| match name {
            "GEMINI_API_KEY" => Some(String::new()),
            "API_KEY" => Some("from-env".to_string()),
            _ => None,
        };

        let config = Config::default();
        assert_eq!(config.api_key_with(env), "from-env");

        let config = Config {
            gemini_api_key: " stored ".into(),
            ..Config::default()
        };
        assert_eq!(config.api_key_with(env), "stored");

        assert_eq!(Config::default().api_key_with(|_| None), "");
    }
}
