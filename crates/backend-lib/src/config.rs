// ============================
// crates/backend-lib/src/config.rs
// ============================
//! Configuration management.
use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// Log level / tracing filter directive
    pub log_level: String,
    /// Cadence the chat page polls for new messages, in milliseconds
    pub poll_interval_ms: u64,
    /// Maximum room identifier length in bytes
    pub max_room_id_len: usize,
    /// Maximum message text length in bytes
    pub max_text_len: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".parse().expect("valid default addr"),
            log_level: "info".to_string(),
            poll_interval_ms: 1000,
            max_room_id_len: 64,
            max_text_len: 4096,
        }
    }
}

impl Settings {
    /// Load settings from `roomfeed.toml` and `ROOMFEED_`-prefixed
    /// environment variables, layered over the defaults.
    pub fn load() -> Result<Self> {
        Self::load_from("roomfeed.toml")
    }

    /// Load settings from an explicit config file path.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let settings = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("ROOMFEED_"))
            .extract()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let settings = Settings::default();
        assert_eq!(settings.bind_addr.port(), 3000);
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.poll_interval_ms, 1000);
        assert!(settings.max_room_id_len > 0);
        assert!(settings.max_text_len > 0);
    }

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let settings = Settings::load_from("/definitely/not/a/real/path.toml").unwrap();
        assert_eq!(settings.poll_interval_ms, Settings::default().poll_interval_ms);
        assert_eq!(settings.bind_addr, Settings::default().bind_addr);
    }
}
