//! Shared library for the AnimeWorld scraper workspace.
//!
//! This crate provides common functionality used by the scraper crate:
//! - Configuration management
//! - Logging infrastructure
//! - Scraped data models

pub mod config;
pub mod logging;
pub mod models;

// Re-export commonly used types
pub use config::{Config, DelayConfig, LoggingConfig, ScraperConfig};
pub use logging::LogConfig;
pub use models::*;
