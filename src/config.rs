use anyhow::Result;
use config::{Config, ConfigError, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub token: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub static_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub api: ApiSettings,
    pub server: ServerSettings,
    // We could add other general settings here later, e.g., logging level, per-category paths, etc.
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Loads layered settings from `<dir>/default.toml` with an optional
    /// `<dir>/local.toml` override.
    pub fn load_from(dir: &str) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name(&format!("{}/default", dir)).required(true))
            .add_source(File::with_name(&format!("{}/local", dir)).required(false));

        builder.build()?.try_deserialize()
    }
}
