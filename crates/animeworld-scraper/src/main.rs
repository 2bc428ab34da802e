//! AnimeWorld scraper CLI application.

use animeworld_scraper::{AnimeWorldScraper, ScrapeError};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use shared::{AnimeDetails, Config, Episode, LogConfig, SearchResult, StreamUrl};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// On failure, log a warning and print an empty result instead of failing
    #[arg(long, global = true)]
    fallback: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(flatten)]
    Scrape(ScrapeCommand),

    /// Write the default configuration to the --config path
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand, Debug)]
enum ScrapeCommand {
    /// Search the catalogue by keyword
    Search {
        /// Search keyword (multiple words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        keyword: Vec<String>,
    },

    /// Print metadata of an anime page
    Details {
        /// Anime page URL (absolute, or a path on the site)
        url: String,
    },

    /// List the episodes of an anime page
    Episodes {
        /// Anime page URL (absolute, or a path on the site)
        url: String,
    },

    /// Resolve the direct stream URL of an episode
    Stream {
        /// Episode page URL (absolute, or a path on the site)
        url: String,
    },
}

/// Result of a scraping command, ready to be printed
#[derive(Debug)]
enum Output {
    Search(Vec<SearchResult>),
    /// `None` prints as `[{}]`
    Details(Option<AnimeDetails>),
    Episodes(Vec<Episode>),
    Stream(Option<StreamUrl>),
}

impl Output {
    /// Empty value printed in `--fallback` mode
    fn fallback_for(command: &ScrapeCommand) -> Self {
        match command {
            ScrapeCommand::Search { .. } => Output::Search(Vec::new()),
            ScrapeCommand::Details { .. } => Output::Details(None),
            ScrapeCommand::Episodes { .. } => Output::Episodes(Vec::new()),
            ScrapeCommand::Stream { .. } => Output::Stream(None),
        }
    }

    /// JSON rendering; details are wrapped in a one-element array.
    fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        match self {
            Output::Search(results) => render(results, pretty),
            Output::Details(Some(details)) => render(&[details], pretty),
            Output::Details(None) => render(&[serde_json::Map::new()], pretty),
            Output::Episodes(episodes) => render(episodes, pretty),
            Output::Stream(stream) => render(stream, pretty),
        }
    }
}

fn render<T: Serialize + ?Sized>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

async fn run(scraper: &AnimeWorldScraper, command: &ScrapeCommand) -> Result<Output, ScrapeError> {
    Ok(match command {
        ScrapeCommand::Search { keyword } => {
            Output::Search(scraper.search(&keyword.join(" ")).await?)
        }
        ScrapeCommand::Details { url } => Output::Details(Some(scraper.details(url).await?)),
        ScrapeCommand::Episodes { url } => Output::Episodes(scraper.episodes(url).await?),
        ScrapeCommand::Stream { url } => Output::Stream(Some(scraper.stream_url(url).await?)),
    })
}

/// Warning logged before printing the `--fallback` result
fn fallback_reason(err: &ScrapeError) -> &'static str {
    if err.is_not_found() {
        "Expected element missing from page, printing empty result"
    } else if err.is_fetch() {
        "Page could not be fetched, printing empty result"
    } else {
        "Command failed, printing empty result"
    }
}

/// Load the config file, reporting whether it existed.
fn load_config(path: &Path) -> Result<(Config, bool)> {
    let found = path.exists();
    let config = Config::from_file(path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    Ok((config, found))
}

fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    Config::default()
        .save(path)
        .with_context(|| format!("Failed to write default config to {}", path.display()))?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let command = match args.command {
        Command::InitConfig { force } => return init_config(&args.config, force),
        Command::Scrape(command) => command,
    };

    // Load configuration
    let (config, config_found) = load_config(&args.config)?;

    // Initialize logging
    let mut log_config = LogConfig::from_config("animeworld", &config);
    if args.verbose {
        log_config.default_level = tracing::Level::DEBUG;
    }
    shared::logging::init(log_config)?;

    if config_found {
        info!(config_file = %args.config.display(), "Loaded configuration");
    } else {
        warn!(config_file = %args.config.display(), "Config file not found, using defaults");
    }
    info!(base_url = %config.scraper.base_url, "AnimeWorld scraper starting");

    let scraper = AnimeWorldScraper::from_config(&config.scraper)
        .context("Failed to create scraper")?;

    let output = match run(&scraper, &command).await {
        Ok(output) => output,
        Err(e) if args.fallback => {
            warn!(error = %e, "{}", fallback_reason(&e));
            Output::fallback_for(&command)
        }
        Err(e) => return Err(e).context("Command failed"),
    };

    let json = output.to_json(args.pretty).context("Failed to serialize output")?;
    println!("{json}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use animeworld_scraper::FetchError;
    use tempfile::TempDir;

    #[test]
    fn test_cli_parses_multi_word_search() {
        let args = Args::parse_from(["animeworld", "--pretty", "search", "one", "piece"]);
        assert!(args.pretty);
        match args.command {
            Command::Scrape(ScrapeCommand::Search { keyword }) => {
                assert_eq!(keyword.join(" "), "one piece")
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::parse_from(["animeworld", "stream", "/play/x/1", "--fallback", "-c", "aw.toml"]);
        assert!(args.fallback);
        assert_eq!(args.config, PathBuf::from("aw.toml"));
        assert!(matches!(args.command, Command::Scrape(ScrapeCommand::Stream { .. })));
    }

    #[test]
    fn test_init_config_is_separate_from_scrape_commands() {
        let args = Args::parse_from(["animeworld", "init-config", "--force"]);
        assert!(matches!(args.command, Command::InitConfig { force: true }));
    }

    #[test]
    fn test_fallback_json_shapes() {
        let search = ScrapeCommand::Search { keyword: vec!["x".into()] };
        let details = ScrapeCommand::Details { url: "/x".into() };
        let episodes = ScrapeCommand::Episodes { url: "/x".into() };
        let stream = ScrapeCommand::Stream { url: "/x".into() };

        assert_eq!(Output::fallback_for(&search).to_json(false).unwrap(), "[]");
        assert_eq!(Output::fallback_for(&details).to_json(false).unwrap(), "[{}]");
        assert_eq!(Output::fallback_for(&episodes).to_json(false).unwrap(), "[]");
        assert_eq!(Output::fallback_for(&stream).to_json(false).unwrap(), "null");
    }

    #[test]
    fn test_details_output_keeps_field_order() {
        let output = Output::Details(Some(AnimeDetails {
            description: "Una storia".to_string(),
            alternative_title: "Shingeki no Kyojin".to_string(),
            release_year: String::new(),
        }));
        assert_eq!(
            output.to_json(false).unwrap(),
            r#"[{"description":"Una storia","alternativeTitle":"Shingeki no Kyojin","releaseYear":""}]"#
        );
    }

    #[test]
    fn test_stream_output_is_a_string() {
        let output = Output::Stream(Some(StreamUrl::new("https://cdn.example/v.mp4")));
        assert_eq!(output.to_json(false).unwrap(), r#""https://cdn.example/v.mp4""#);
    }

    #[test]
    fn test_fallback_reason_by_error_kind() {
        let missing = ScrapeError::FrameNotFound { url: "/play/x/1".to_string() };
        assert!(fallback_reason(&missing).starts_with("Expected element missing"));

        let fetch: ScrapeError = FetchError::EmptyBody { url: "/x".to_string() }.into();
        assert!(fallback_reason(&fetch).starts_with("Page could not be fetched"));

        let invalid = ScrapeError::InvalidUrl {
            url: "http://[::1".to_string(),
            source: url::ParseError::InvalidIpv6Address,
        };
        assert!(fallback_reason(&invalid).starts_with("Command failed"));
    }

    #[test]
    fn test_load_config_reports_missing_file() -> Result<()> {
        let temp_dir = TempDir::new()?;

        let (config, found) = load_config(&temp_dir.path().join("missing.toml"))?;
        assert!(!found);
        assert_eq!(config.scraper.base_url, "https://www.animeworld.so");

        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[scraper]\nbase_url = \"https://www.animeworld.tv\"\n")?;
        let (config, found) = load_config(&path)?;
        assert!(found);
        assert_eq!(config.scraper.base_url, "https://www.animeworld.tv");

        Ok(())
    }
}
