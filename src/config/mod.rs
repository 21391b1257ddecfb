//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::{
    net::{IpAddr, SocketAddr},
    num::{NonZeroI64, NonZeroU32},
    path::PathBuf,
    str::FromStr,
};

use clap::{Args, Parser, Subcommand, builder::BoolishValueParser};
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "foglio";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATABASE_URL: &str = "postgres://localhost/foglio";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 8;
const DEFAULT_SESSION_TTL_SECONDS: u64 = 14 * 24 * 60 * 60;

/// Command-line arguments for the Foglio binary.
#[derive(Debug, Parser)]
#[command(name = "foglio", version, about = "Foglio blog server")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "FOGLIO_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run the Foglio HTTP service.
    Serve(Box<ServeArgs>),
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub overrides: ServeOverrides,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeOverrides {
    /// Override the listener host.
    #[arg(long = "server-host", value_name = "HOST")]
    pub server_host: Option<String>,

    /// Override the listener port.
    #[arg(long = "server-port", value_name = "PORT")]
    pub server_port: Option<u16>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,

    /// Override the database connection URL.
    #[arg(long = "database-url", value_name = "URL")]
    pub database_url: Option<String>,

    /// Override the database pool size.
    #[arg(long = "database-max-connections", value_name = "COUNT")]
    pub database_max_connections: Option<u32>,
}

/// Fully-resolved deployment settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub logging: LoggingSettings,
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub addr: SocketAddr,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: NonZeroU32,
}

#[derive(Debug, Clone)]
pub struct AuthSettings {
    /// Session cookies are signed with a key derived from this value.
    pub secret_key: String,
    /// Registration grants the admin flag only on an exact match.
    pub admin_secret: String,
    pub session_ttl_seconds: NonZeroI64,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Parse CLI arguments and load settings in one step.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let cli = CliArgs::parse();
    let settings = load(&cli)?;
    Ok((cli, settings))
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix("FOGLIO").separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;
    raw.apply_env_fallbacks();

    match cli.command.as_ref() {
        Some(Command::Serve(args)) => raw.apply_serve_overrides(&args.overrides),
        None => raw.apply_serve_overrides(&ServeOverrides::default()),
    }

    Settings::from_raw(raw)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    server: RawServerSettings,
    logging: RawLoggingSettings,
    database: RawDatabaseSettings,
    auth: RawAuthSettings,
}

impl RawSettings {
    fn apply_serve_overrides(&mut self, overrides: &ServeOverrides) {
        if let Some(host) = overrides.server_host.as_ref() {
            self.server.host = Some(host.clone());
        }
        if let Some(port) = overrides.server_port {
            self.server.port = Some(port);
        }
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
        if let Some(url) = overrides.database_url.as_ref() {
            self.database.url = Some(url.clone());
        }
        if let Some(max) = overrides.database_max_connections {
            self.database.max_connections = Some(max);
        }
    }

    /// Honor the conventional deployment variables `SECRET_KEY`, `ADMIN`,
    /// `PORT`, and `IP` when the prefixed forms are absent.
    fn apply_env_fallbacks(&mut self) {
        if self.auth.secret_key.is_none()
            && let Ok(value) = std::env::var("SECRET_KEY")
        {
            self.auth.secret_key = Some(value);
        }
        if self.auth.admin_secret.is_none()
            && let Ok(value) = std::env::var("ADMIN")
        {
            self.auth.admin_secret = Some(value);
        }
        if self.server.port.is_none()
            && let Ok(value) = std::env::var("PORT")
            && let Ok(port) = value.parse()
        {
            self.server.port = Some(port);
        }
        if self.server.host.is_none()
            && let Ok(value) = std::env::var("IP")
        {
            self.server.host = Some(value);
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawServerSettings {
    host: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawDatabaseSettings {
    url: Option<String>,
    max_connections: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawAuthSettings {
    secret_key: Option<String>,
    admin_secret: Option<String>,
    session_ttl_seconds: Option<u64>,
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let host = raw.server.host.as_deref().unwrap_or(DEFAULT_HOST);
        let host = IpAddr::from_str(host)
            .map_err(|err| LoadError::invalid("server.host", err.to_string()))?;
        let port = raw.server.port.unwrap_or(DEFAULT_PORT);

        let level = match raw.logging.level.as_deref() {
            Some(level) => LevelFilter::from_str(level)
                .map_err(|err| LoadError::invalid("logging.level", err.to_string()))?,
            None => LevelFilter::INFO,
        };
        let format = if raw.logging.json.unwrap_or(false) {
            LogFormat::Json
        } else {
            LogFormat::Compact
        };

        let url = raw
            .database
            .url
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let max_connections = NonZeroU32::new(
            raw.database
                .max_connections
                .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS),
        )
        .ok_or_else(|| {
            LoadError::invalid("database.max_connections", "must be greater than zero")
        })?;

        let secret_key = raw
            .auth
            .secret_key
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                LoadError::invalid("auth.secret_key", "required; set FOGLIO_AUTH__SECRET_KEY")
            })?;
        let admin_secret = raw
            .auth
            .admin_secret
            .filter(|secret| !secret.is_empty())
            .ok_or_else(|| {
                LoadError::invalid("auth.admin_secret", "required; set FOGLIO_AUTH__ADMIN_SECRET")
            })?;
        let session_ttl_seconds = raw
            .auth
            .session_ttl_seconds
            .unwrap_or(DEFAULT_SESSION_TTL_SECONDS);
        let session_ttl_seconds = i64::try_from(session_ttl_seconds)
            .ok()
            .and_then(NonZeroI64::new)
            .ok_or_else(|| {
                LoadError::invalid(
                    "auth.session_ttl_seconds",
                    "must be greater than zero and fit a signed 64-bit second count",
                )
            })?;

        Ok(Self {
            server: ServerSettings {
                addr: SocketAddr::new(host, port),
            },
            logging: LoggingSettings { level, format },
            database: DatabaseSettings {
                url,
                max_connections,
            },
            auth: AuthSettings {
                secret_key,
                admin_secret,
                session_ttl_seconds,
            },
        })
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
