//! Runtime settings.
//!
//! Layered lowest to highest: built-in defaults, `config/default.toml` when
//! present, then `APP__SECTION__KEY` environment variables (for example
//! `APP__DATABASE__URL`). A `.env` file is read into the environment first.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
    pub storage: StorageSettings,
    pub cors: CorsSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub upload_dir: String,
    /// Prefix of the URLs handed back for stored photos.
    pub public_base_url: String,
    pub max_upload_bytes: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    /// `*` or a single origin.
    pub allowed_origin: String,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        load_dotenv(dotenvy::dotenv());

        let settings = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = settings.try_deserialize()?;
        if settings.auth.jwt_secret.trim().is_empty() {
            return Err(ConfigError::Message("auth.jwt_secret must not be empty".into()));
        }
        Ok(settings)
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000_i64)?
            .set_default("database.url", "sqlite://brokerage.db?mode=rwc")?
            .set_default("database.max_connections", 5_i64)?
            .set_default("auth.jwt_secret", "")?
            .set_default("auth.token_ttl_hours", 24_i64)?
            .set_default("storage.upload_dir", "uploads")?
            .set_default("storage.public_base_url", "/uploads")?
            .set_default("storage.max_upload_bytes", 5 * 1024 * 1024_i64)?
            .set_default("cors.allowed_origin", "*")
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// A missing `.env` is normal; anything else is worth a warning.
fn load_dotenv(result: dotenvy::Result<std::path::PathBuf>) -> bool {
    match result {
        Ok(path) => {
            tracing::debug!("Loaded environment from {}", path.display());
            true
        }
        Err(e) if e.not_found() => false,
        Err(e) => {
            tracing::warn!("Failed to load .env file: {}", e);
            false
        }
    }
}

#[cfg(test)]
pub(crate) fn test_settings(upload_dir: &str) -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".into(),
            port: 0,
        },
        database: DatabaseSettings {
            url: "sqlite::memory:".into(),
            max_connections: 1,
        },
        auth: AuthSettings {
            jwt_secret: "test-secret".into(),
            token_ttl_hours: 1,
        },
        storage: StorageSettings {
            upload_dir: upload_dir.into(),
            public_base_url: "/uploads".into(),
            max_upload_bytes: 5 * 1024 * 1024,
        },
        cors: CorsSettings {
            allowed_origin: "*".into(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_deserialize() {
        let settings: Settings = Settings::defaults()
            .unwrap()
            .set_override("auth.jwt_secret", "s")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.storage.max_upload_bytes, 5 * 1024 * 1024);
        assert_eq!(settings.auth.token_ttl_hours, 24);
        assert_eq!(settings.bind_address(), "0.0.0.0:3000");
    }

    #[test]
    fn dotenv_missing_file_is_quiet_but_parse_errors_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let absent = dir.path().join("absent.env");
        assert!(!load_dotenv(dotenvy::from_path(&absent).map(|_| absent.clone())));

        let parse_error = dotenvy::Error::LineParse("NOT A VALID LINE".into(), 4);
        assert!(!parse_error.not_found());
        assert!(!load_dotenv(Err(parse_error)));

        let good = dir.path().join("good.env");
        std::fs::write(&good, "BROKERAGE_DOTENV_CHECK=1\n").unwrap();
        assert!(load_dotenv(dotenvy::from_path(&good).map(|_| good.clone())));
    }
}
