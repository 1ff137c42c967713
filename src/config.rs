//! Command-line configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::game::CELEBRATION_DURATION;

const MAX_CELEBRATION_SECS: u64 = 60;

#[derive(Debug, Parser)]
#[command(name = "story-shuffle", version, about = "Rebuild a shuffled story line by line")]
pub struct Cli {
    #[arg(short, long, help = "Story TOML file (defaults to the bundled story)")]
    pub story: Option<PathBuf>,

    #[arg(long, help = "Seed for a reproducible shuffle")]
    pub seed: Option<u64>,

    #[arg(long, help = "Seconds the celebration stays on screen")]
    pub celebration_secs: Option<u64>,

    #[arg(long, help = "Directory for the session log")]
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub story_path: Option<PathBuf>,
    pub seed: Option<u64>,
    pub celebration: Duration,
    pub log_dir: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl Cli {
    pub fn into_settings(self) -> Result<Settings, ConfigError> {
        let settings = Settings {
            story_path: self.story,
            seed: self.seed,
            celebration: self
                .celebration_secs
                .map(Duration::from_secs)
                .unwrap_or(CELEBRATION_DURATION),
            log_dir: self.log_dir.unwrap_or_else(default_log_dir),
        };
        settings.validate()?;
        Ok(settings)
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.celebration.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "celebration_secs",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.celebration > Duration::from_secs(MAX_CELEBRATION_SECS) {
            return Err(ConfigError::InvalidValue {
                field: "celebration_secs",
                reason: format!("must be at most {MAX_CELEBRATION_SECS}"),
            });
        }
        if self.log_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "log_dir",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

pub fn default_log_dir() -> PathBuf {
    std::env::temp_dir().join("story-shuffle").join("logs")
}
