use std::path::PathBuf;

use anyhow::{anyhow, Context};
use serde::Deserialize;

const DEFAULT_ENV: &str = "local";
const ENV_VAR_NAME: &str = "BIBLIO_ENV";
const CONFIG_DIR_ENV: &str = "BIBLIO_CONFIG_DIR";

/// Deployment environment the application is running in.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Staging,
    Production,
}

/// Top-level configuration structure loaded from layered sources.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
    #[serde(default)]
    pub auth: AuthSettings,
}

impl Settings {
    /// Load configuration by layering `.env`, base file, and environment overlay.
    pub fn load() -> anyhow::Result<Self> {
        // Allow missing `.env` files without failing.
        let _ = dotenvy::dotenv();

        let environment = std::env::var(ENV_VAR_NAME).unwrap_or_else(|_| DEFAULT_ENV.to_string());
        let config_dir = std::env::var(CONFIG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                // Default to repo root `config` directory.
                std::env::current_dir()
                    .map(|cwd| cwd.join("config"))
                    .expect("unable to resolve current directory")
            });

        let base_path = config_dir.join("base.toml");
        let environment_filename = format!("{}.toml", environment);
        let environment_path = config_dir.join(environment_filename);

        let builder = config::Config::builder()
            .add_source(config::File::from(base_path).required(false))
            .add_source(config::File::from(environment_path).required(false))
            .add_source(config::Environment::with_prefix("BIBLIO").separator("_"));

        let cfg = builder
            .build()
            .with_context(|| "failed to build configuration")?;

        let mut settings: Settings = cfg
            .try_deserialize()
            .with_context(|| "failed to deserialize configuration")?;

        // Override environment field with parsed enum variant.
        settings.environment = match environment.as_str() {
            "local" => Environment::Local,
            "staging" => Environment::Staging,
            "production" => Environment::Production,
            other => {
                return Err(anyhow!(
                    "unsupported environment '{}'; expected local/staging/production",
                    other
                ));
            }
        };

        Ok(settings)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "ServerSettings::default_host")]
    pub host: String,
    #[serde(default = "ServerSettings::default_port")]
    pub port: u16,
    #[serde(default = "ServerSettings::default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl ServerSettings {
    fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    fn default_port() -> u16 {
        8080
    }

    fn default_request_timeout_ms() -> u64 {
        15000
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            request_timeout_ms: Self::default_request_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TelemetrySettings {
    #[serde(default)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AuthSettings {
    /// Session tokens accepted for write operations. An empty list means
    /// every write is rejected.
    #[serde(default)]
    pub session_tokens: Vec<String>,
}
