//! Logging infrastructure for the AnimeWorld scraper.
//!
//! This module provides structured logging with optional file rotation,
//! contextual fields, and module-specific log levels. Console output goes to
//! stderr so that stdout stays reserved for command output.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

use crate::config::Config;

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log directory path
    pub log_dir: String,
    /// Component name (used for log file naming)
    pub component: String,
    /// Default log level
    pub default_level: Level,
    /// Enable console output
    pub console: bool,
    /// Enable file output
    pub file: bool,
    /// Enable JSON formatting for file logs
    pub json_format: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: "logs".to_string(),
            component: "animeworld".to_string(),
            default_level: Level::INFO,
            console: true,
            file: false,
            json_format: false,
        }
    }
}

impl LogConfig {
    /// Build a logging configuration from the `[logging]` config section.
    ///
    /// An unparseable level falls back to `info`.
    pub fn from_config(component: &str, config: &Config) -> Self {
        let logging = &config.logging;
        let default_level = logging.default_level.parse().unwrap_or(Level::INFO);

        Self {
            log_dir: config.log_dir().to_string_lossy().to_string(),
            component: component.to_string(),
            default_level,
            console: logging.console,
            file: logging.file,
            json_format: logging.json_format,
        }
    }

    /// Filter directives used when `RUST_LOG` is not set.
    ///
    /// HTTP and HTML-parsing crates are kept at `warn` regardless of the
    /// default level.
    pub fn filter_directives(&self) -> String {
        let level = self.default_level.as_str().to_lowercase();
        format!(
            "{level},shared={level},animeworld_scraper={level},\
             hyper=warn,reqwest=warn,h2=warn,html5ever=warn,selectors=warn"
        )
    }
}

/// Initialize logging with the given configuration
///
/// Sets up tracing with:
/// - Console output on stderr
/// - Optional daily-rotated file output
/// - Module-specific log levels (overridable via `RUST_LOG`)
/// - Optional JSON formatting for the file layer
pub fn init(config: LogConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.filter_directives()));

    let mut layers = Vec::new();

    // Console layer (human-readable)
    if config.console {
        let console_layer = fmt::layer()
            .with_target(true)
            .with_level(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_span_events(FmtSpan::NONE)
            .with_writer(std::io::stderr)
            .boxed();
        layers.push(console_layer);
    }

    // File layer with rotation
    if config.file {
        let log_dir = Path::new(&config.log_dir);
        std::fs::create_dir_all(log_dir)
            .with_context(|| format!("Failed to create log directory: {}", config.log_dir))?;

        let file_appender = tracing_appender::rolling::daily(log_dir, &config.component);

        let file_layer = if config.json_format {
            fmt::layer()
                .json()
                .with_target(true)
                .with_level(true)
                .with_current_span(true)
                .with_span_list(false)
                .with_writer(file_appender)
                .boxed()
        } else {
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_ansi(false)
                .with_span_events(FmtSpan::CLOSE)
                .with_writer(file_appender)
                .boxed()
        };

        layers.push(file_layer);
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layers)
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    tracing::debug!(
        component = %config.component,
        level = %config.default_level,
        file = config.file,
        "Logging initialized"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_config() {
        let config = LogConfig::default();
        assert_eq!(config.component, "animeworld");
        assert_eq!(config.default_level, Level::INFO);
        assert!(config.console);
        assert!(!config.file);
    }

    #[test]
    fn test_from_config_parses_level() {
        let mut settings = Config::default();
        settings.logging.default_level = "debug".to_string();
        settings.logging.file = true;
        settings.logging.log_dir = "/var/log/animeworld".to_string();

        let config = LogConfig::from_config("animeworld", &settings);
        assert_eq!(config.default_level, Level::DEBUG);
        assert!(config.file);
        assert_eq!(config.log_dir, "/var/log/animeworld");
    }

    #[test]
    fn test_from_config_bad_level_falls_back() {
        let mut settings = Config::default();
        settings.logging.default_level = "chatty".to_string();

        let config = LogConfig::from_config("animeworld", &settings);
        assert_eq!(config.default_level, Level::INFO);
        assert_eq!(config.log_dir, "logs");
    }

    #[test]
    fn test_filter_directives_quiet_http_crates() {
        let config = LogConfig {
            default_level: Level::DEBUG,
            ..Default::default()
        };

        let directives = config.filter_directives();
        assert!(directives.starts_with("debug,"));
        assert!(directives.contains("animeworld_scraper=debug"));
        assert!(directives.contains("reqwest=warn"));
        assert!(directives.contains("html5ever=warn"));
        assert!(EnvFilter::try_new(&directives).is_ok());
    }
}
