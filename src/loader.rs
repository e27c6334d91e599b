//! Fetching game log and standings text from files, URLs or a JSON bundle

use crate::error::{Result, StatsError};
use crate::league;
use crate::model::{GameRecord, PlayerAggregate};
use crate::parser::{self, Row};
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use url::Url;

pub const GAME_LOG_FILE: &str = "GameLog.csv";
pub const LEAGUE_TABLE_FILE: &str = "LeagueTable.csv";

/// Where a CSV text comes from
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    File(PathBuf),
    Url(Url),
}

impl Source {
    /// `http://` and `https://` strings are URLs, anything else a file path
    pub fn parse(s: &str) -> Result<Source> {
        let s = s.trim();
        let lower = s.to_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            let url = Url::parse(s)
                .map_err(|e| StatsError::Parse(format!("Invalid URL {}: {}", s, e)))?;
            Ok(Source::Url(url))
        } else {
            Ok(Source::File(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::File(path) => write!(f, "{}", path.display()),
            Source::Url(url) => write!(f, "{}", url),
        }
    }
}

/// HTTP settings for the loader
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    pub timeout_secs: u64,
    /// Extra attempts after a transport error or 5xx response
    pub retries: u32,
    pub retry_delay_ms: u64,
    pub user_agent: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            retries: 2,
            retry_delay_ms: 500,
            user_agent: concat!("league-stats/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl LoaderConfig {
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn with_retry_delay(mut self, ms: u64) -> Self {
        self.retry_delay_ms = ms;
        self
    }
}

/// Why a single HTTP attempt failed
enum Attempt {
    Retry(String),
    Fatal(String),
}

/// Everything a league site publishes
#[derive(Debug, Clone)]
pub struct SiteData {
    pub games: Vec<GameRecord>,
    /// `None` when the standings file could not be loaded
    pub standings: Option<Vec<PlayerAggregate>>,
}

/// Loads raw text and hands it to the parsers
pub struct Loader {
    client: reqwest::blocking::Client,
    config: LoaderConfig,
}

impl Loader {
    pub fn new() -> Result<Self> {
        Self::with_config(LoaderConfig::default())
    }

    pub fn with_config(config: LoaderConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client, config })
    }

    /// Read the full text of a source.
    ///
    /// Any failure to obtain the text is reported as
    /// [`StatsError::SourceUnavailable`].
    pub fn fetch_text(&self, source: &Source) -> Result<String> {
        match source {
            Source::File(path) => std::fs::read_to_string(path)
                .map_err(|e| StatsError::unavailable(path.display().to_string(), e.to_string())),
            Source::Url(url) => self.fetch_url(url),
        }
    }

    fn fetch_url(&self, url: &Url) -> Result<String> {
        let mut attempt = 0;
        loop {
            match self.try_fetch(url) {
                Ok(text) => return Ok(text),
                Err(Attempt::Retry(reason)) if attempt < self.config.retries => {
                    attempt += 1;
                    log::warn!(
                        "Fetching {} failed ({}), retry {}/{}",
                        url,
                        reason,
                        attempt,
                        self.config.retries
                    );
                    thread::sleep(Duration::from_millis(self.config.retry_delay_ms));
                }
                Err(Attempt::Retry(reason)) | Err(Attempt::Fatal(reason)) => {
                    return Err(StatsError::unavailable(url.as_str(), reason));
                }
            }
        }
    }

    fn try_fetch(&self, url: &Url) -> std::result::Result<String, Attempt> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| Attempt::Retry(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status.is_server_error() {
            return Err(Attempt::Retry(format!("HTTP error: {}", status)));
        }
        if !status.is_success() {
            return Err(Attempt::Fatal(format!("HTTP error: {}", status)));
        }

        response
            .text()
            .map_err(|e| Attempt::Retry(format!("Failed to read response: {}", e)))
    }

    pub fn load_game_log(&self, source: &Source) -> Result<Vec<GameRecord>> {
        let text = self.fetch_text(source)?;
        Ok(league::load_game_log(&text))
    }

    pub fn load_standings(&self, source: &Source) -> Result<Vec<PlayerAggregate>> {
        let text = self.fetch_text(source)?;
        Ok(league::load_standings(&text))
    }

    pub fn load_bundle(&self, source: &Source) -> Result<DataBundle> {
        let text = self.fetch_text(source)?;
        DataBundle::from_json(&text)
    }

    /// Fetch `GameLog.csv` and `LeagueTable.csv` next to `base` in parallel.
    ///
    /// The game log is required; a missing standings file is logged and
    /// reported as `None`.
    pub fn load_site(&self, base: &Url) -> Result<SiteData> {
        let join = |file: &str| {
            base.join(file)
                .map(Source::Url)
                .map_err(|e| StatsError::Parse(format!("Invalid URL for {}: {}", file, e)))
        };
        let game_log_source = join(GAME_LOG_FILE)?;
        let standings_source = join(LEAGUE_TABLE_FILE)?;

        let (games, standings) = rayon::join(
            || self.load_game_log(&game_log_source),
            || self.load_standings(&standings_source),
        );

        let standings = match standings {
            Ok(table) => Some(table),
            Err(e) => {
                log::warn!("League table not loaded: {}", e);
                None
            }
        };

        Ok(SiteData {
            games: games?,
            standings,
        })
    }
}

/// A JSON object carrying each sheet as CSV text
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataBundle {
    #[serde(rename = "GameLog", default)]
    pub game_log: String,
    #[serde(rename = "League Table", default)]
    pub league_table: String,
    #[serde(rename = "Player Analysis", default)]
    pub player_analysis: String,
}

impl DataBundle {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn games(&self) -> Vec<GameRecord> {
        league::load_game_log(&self.game_log)
    }

    pub fn standings(&self) -> Vec<PlayerAggregate> {
        league::load_standings(&self.league_table)
    }

    /// The precomputed analysis sheet, passed through as plain rows
    pub fn player_analysis(&self) -> Vec<Row> {
        parser::parse(&self.player_analysis)
    }
}
