//! Settings layered from defaults, a TOML file and `BIGG_` environment variables.

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

/// Path read when `BIGG_CONFIG` is unset.
pub const DEFAULT_CONFIG_FILE: &str = "bigg.toml";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    /// Default `EnvFilter` directive, overridden by `RUST_LOG`
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 8910,
            },
            database: DatabaseSettings {
                url: "postgres://localhost/bigg".to_string(),
                max_connections: 10,
            },
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Load from `BIGG_CONFIG` (or [`DEFAULT_CONFIG_FILE`]) and the environment.
    ///
    /// A missing file is not an error; defaults and environment still apply.
    /// Nested keys use a double underscore, e.g. `BIGG_DATABASE__URL`.
    ///
    /// # Errors
    ///
    /// Returns the figment error for unreadable or invalid values.
    pub fn load() -> Result<Self, Box<figment::Error>> {
        let path = std::env::var("BIGG_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::from_figment(Self::figment(&path))
    }

    /// The provider stack, without extracting.
    #[must_use]
    pub fn figment(path: &str) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("BIGG_").ignore(&["config"]).split("__"))
    }

    /// # Errors
    ///
    /// Fails when extraction or [`Settings::validate`] fails.
    pub fn from_figment(figment: Figment) -> Result<Self, Box<figment::Error>> {
        let settings: Settings = figment.extract().map_err(Box::new)?;
        settings.validate()?;
        Ok(settings)
    }

    /// # Errors
    ///
    /// Rejects an empty database URL, a zero pool size or an unknown log level.
    pub fn validate(&self) -> Result<(), Box<figment::Error>> {
        if self.database.url.is_empty() {
            return Err(Box::new(figment::Error::from(
                "database.url cannot be empty".to_string(),
            )));
        }

        if self.database.max_connections == 0 {
            return Err(Box::new(figment::Error::from(
                "database.max_connections must be greater than 0".to_string(),
            )));
        }

        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(Box::new(figment::Error::from(format!(
                "log_level must be one of: {}",
                LOG_LEVELS.join(", ")
            ))));
        }

        Ok(())
    }

    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
