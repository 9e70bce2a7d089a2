use crate::layer::{JsonLayer, TintLayer};
use crossterm::tty::IsTty;
use std::io;
use strum::EnumString;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Errors that can occur when installing the logger.
#[derive(thiserror::Error, Debug)]
pub enum InitError {
    #[error("invalid LOG_LEVEL: {0}")]
    InvalidLevel(#[from] tracing_subscriber::filter::ParseError),

    #[error("invalid LOG_FORMAT: {0:?}")]
    InvalidFormat(String),

    #[error("logger already installed: {0}")]
    AlreadyInstalled(#[from] tracing_subscriber::util::TryInitError),
}

/// Output flavor for the installed logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, strum::Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogFormat {
    /// Tinted human-readable lines.
    Pretty,
    /// One pino-shaped JSON object per line.
    Json,
}

/// Logger configuration, resolved from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Filter directive, `LOG_LEVEL` or `info`.
    pub level: String,
    /// `LOG_FORMAT` when set; otherwise pretty on a terminal, JSON elsewhere.
    pub format: LogFormat,
}

impl Config {
    pub fn from_env() -> Result<Self, InitError> {
        let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let format = match std::env::var("LOG_FORMAT") {
            Ok(raw) => raw.parse().map_err(|_| InitError::InvalidFormat(raw))?,
            Err(_) if io::stdout().is_tty() => LogFormat::Pretty,
            Err(_) => LogFormat::Json,
        };
        Ok(Self { level, format })
    }

    /// Install this configuration as the global default subscriber.
    pub fn install(self) -> Result<(), InitError> {
        let filter = EnvFilter::try_new(&self.level)?;
        let registry = tracing_subscriber::registry().with(filter);
        match self.format {
            LogFormat::Pretty => registry.with(TintLayer::stdout()).try_init()?,
            LogFormat::Json => registry.with(JsonLayer::stdout()).try_init()?,
        }
        Ok(())
    }
}

/// Install the logger from `LOG_LEVEL` and `LOG_FORMAT`.
pub fn init() -> Result<(), InitError> {
    Config::from_env()?.install()
}
