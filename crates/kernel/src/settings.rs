use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use serde::Deserialize;

const DEFAULT_ENV: &str = "local";
const ENV_VAR_NAME: &str = "SHELF_ENV";
const CONFIG_DIR_ENV: &str = "SHELF_CONFIG_DIR";
const PORT_ENV: &str = "PORT";

/// Deployment environment the application is running in.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Staging,
    Production,
}

impl Environment {
    fn parse(name: &str) -> anyhow::Result<Self> {
        match name {
            "local" => Ok(Environment::Local),
            "staging" => Ok(Environment::Staging),
            "production" => Ok(Environment::Production),
            other => Err(anyhow!(
                "unsupported environment '{}'; expected local/staging/production",
                other
            )),
        }
    }
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
}

impl Settings {
    /// Load configuration by layering `.env`, base file, environment overlay,
    /// `SHELF_*` variables and finally the bare `PORT` override.
    pub fn load() -> anyhow::Result<Self> {
        // Allow missing `.env` files without failing.
        let _ = dotenvy::dotenv();

        let environment = std::env::var(ENV_VAR_NAME).unwrap_or_else(|_| DEFAULT_ENV.to_string());
        let config_dir = match std::env::var(CONFIG_DIR_ENV) {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => std::env::current_dir()
                .context("unable to resolve current directory")?
                .join("config"),
        };

        let mut settings = Self::load_from(&config_dir, &environment)?;
        settings.apply_port_override(std::env::var(PORT_ENV).ok());
        Ok(settings)
    }

    /// Load `base.toml` and `<environment>.toml` from `config_dir`, then `SHELF_*` variables.
    ///
    /// Nested keys use a double underscore, e.g. `SHELF_SERVER__PORT=8081`.
    pub fn load_from(config_dir: &Path, environment: &str) -> anyhow::Result<Self> {
        let parsed_environment = Environment::parse(environment)?;

        let base_path = config_dir.join("base.toml");
        let environment_path = config_dir.join(format!("{}.toml", environment));

        let cfg = config::Config::builder()
            .add_source(config::File::from(base_path).required(false))
            .add_source(config::File::from(environment_path).required(false))
            .add_source(
                config::Environment::with_prefix("SHELF")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .with_context(|| "failed to build configuration")?;

        let mut settings: Settings = cfg
            .try_deserialize()
            .with_context(|| "failed to deserialize configuration")?;

        // The selected environment always wins over a value found in files.
        settings.environment = parsed_environment;

        Ok(settings)
    }

    /// Apply the conventional `PORT` listen-port override used by hosting platforms.
    ///
    /// Unparsable values are ignored with a warning.
    pub fn apply_port_override(&mut self, port: Option<String>) {
        let Some(raw) = port else {
            return;
        };

        match raw.trim().parse::<u16>() {
            Ok(port) => self.server.port = port,
            Err(_) => tracing::warn!(value = %raw, "ignoring invalid PORT override"),
        }
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
        5000
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

#[derive(Debug, Clone, Deserialize)]
pub struct TelemetrySettings {
    #[serde(default)]
    pub log_format: LogFormat,
    /// `tracing-subscriber` filter directive; `RUST_LOG` takes precedence when set.
    #[serde(default = "TelemetrySettings::default_filter")]
    pub filter: String,
}

impl TelemetrySettings {
    fn default_filter() -> String {
        "info,tower_http=info".to_string()
    }
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Pretty,
            filter: Self::default_filter(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_environment_is_local() {
        let settings = Settings::default();
        assert_eq!(settings.environment, Environment::Local);
    }

    #[test]
    fn default_port_is_5000() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 5000);
        assert_eq!(settings.server.host, "0.0.0.0");
    }

    #[test]
    fn port_override_replaces_configured_port() {
        let mut settings = Settings::default();
        settings.apply_port_override(Some("8123".to_string()));
        assert_eq!(settings.server.port, 8123);
    }

    #[test]
    fn invalid_port_override_is_ignored() {
        let mut settings = Settings::default();
        settings.apply_port_override(Some("not-a-port".to_string()));
        assert_eq!(settings.server.port, 5000);

        settings.apply_port_override(None);
        assert_eq!(settings.server.port, 5000);
    }

    #[test]
    fn files_are_layered_by_environment() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("base.toml"),
            "[server]\nport = 7000\nrequest_timeout_ms = 1000\n[telemetry]\nlog_format = \"json\"\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("staging.toml"), "[server]\nport = 7001\n").unwrap();

        let settings = Settings::load_from(dir.path(), "staging").unwrap();
        assert_eq!(settings.environment, Environment::Staging);
        assert_eq!(settings.server.port, 7001);
        assert_eq!(settings.server.request_timeout_ms, 1000);
        assert_eq!(settings.telemetry.log_format, LogFormat::Json);
    }

    #[test]
    fn unknown_environment_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load_from(dir.path(), "qa").unwrap_err();
        assert!(err.to_string().contains("unsupported environment"));
    }
}
