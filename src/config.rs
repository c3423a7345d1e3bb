use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::theme::Theme;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// API-Football base URL
    pub api_url: String,

    /// Value forwarded in the `x-apisports-key` header
    pub api_key: String,

    /// Season to fetch when none is given on the command line
    pub season: i32,

    /// Pause between competition requests
    pub request_delay: Duration,

    /// Whether to also pause after the last competition
    pub trailing_delay: bool,

    pub theme: ThemeConfig,
}

/// Theme settings; loadable without an API key
#[derive(Debug, Clone)]
pub struct ThemeConfig {
    /// File holding the stored theme flag
    pub file: PathBuf,

    /// Theme used when no flag has been stored yet
    pub default: Theme,
}

impl ThemeConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(ThemeConfig {
            file: env::var("THEME_FILE")
                .unwrap_or_else(|_| "data/theme".to_string())
                .into(),

            default: env::var("DEFAULT_THEME")
                .unwrap_or_else(|_| "light".to_string())
                .parse()
                .context("DEFAULT_THEME must be dark or light")?,
        })
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            api_url: env::var("API_FOOTBALL_URL")
                .unwrap_or_else(|_| "https://v3.football.api-sports.io".to_string()),

            api_key: env::var("API_FOOTBALL_KEY").context("API_FOOTBALL_KEY must be set")?,

            season: env::var("FIXTURE_SEASON")
                .unwrap_or_else(|_| "2022".to_string())
                .parse()
                .context("FIXTURE_SEASON must be a valid year")?,

            request_delay: Duration::from_millis(
                env::var("REQUEST_DELAY_MS")
                    .unwrap_or_else(|_| "1200".to_string())
                    .parse()
                    .context("REQUEST_DELAY_MS must be a valid number")?,
            ),

            trailing_delay: env::var("TRAILING_DELAY")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .context("TRAILING_DELAY must be true or false")?,

            theme: ThemeConfig::from_env()?,
        })
    }
}
