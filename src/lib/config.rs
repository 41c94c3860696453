use std::path::PathBuf;

use argh::FromArgs;
use thiserror::Error;

use crate::store::normalize_channel;

pub const DEFAULT_POSTS_FOLDER: &str = "./posts";
pub const DEFAULT_DB_PATH: &str = "channels.db";
pub const DEFAULT_POLL_TIMEOUT_S: i64 = 60;

/// Archive posts from Telegram channels to disk.
#[derive(FromArgs, Debug, Default, Clone)]
pub struct Args {
    /// bot token (default: $BOT_TOKEN or $TELEGRAM_TOKEN)
    #[argh(option)]
    pub token: Option<String>,

    /// directory to save posts into (default: $POSTS_FOLDER or ./posts)
    #[argh(option)]
    pub posts_dir: Option<PathBuf>,

    /// SQLite database of tracked channels (default: $CHANNELS_DB or channels.db)
    #[argh(option)]
    pub db: Option<PathBuf>,

    /// channel username to always archive; may be repeated (default: $CHANNEL_USERNAME, comma separated)
    #[argh(option)]
    pub channel: Vec<String>,

    /// long poll timeout in seconds (default: $POLL_TIMEOUT or 60)
    #[argh(option)]
    pub poll_timeout: Option<i64>,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("No bot token: pass --token or set BOT_TOKEN")]
    MissingToken,

    #[error("Invalid poll timeout: {0}")]
    InvalidTimeout(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub posts_dir: PathBuf,
    pub db_path: PathBuf,
    /// Normalized usernames of channels archived regardless of the database.
    pub channels: Vec<String>,
    pub poll_timeout_s: i64,
}

impl Config {
    /// Loads `.env` if present, then resolves `args` against the process environment.
    pub fn from_env(args: Args) -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!("Loaded environment from {}", path.display());
        }
        Self::resolve(args, |key| std::env::var(key).ok())
    }

    /// Flags win over environment variables, which win over defaults.
    pub fn resolve(args: Args, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let token = args
            .token
            .or_else(|| lookup("BOT_TOKEN"))
            .or_else(|| lookup("TELEGRAM_TOKEN"))
            .ok_or(ConfigError::MissingToken)?;

        let posts_dir = args
            .posts_dir
            .or_else(|| lookup("POSTS_FOLDER").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_POSTS_FOLDER));

        let db_path = args
            .db
            .or_else(|| lookup("CHANNELS_DB").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));

        let channels = if args.channel.is_empty() {
            lookup("CHANNEL_USERNAME")
                .map(|v| v.split(',').map(str::to_string).collect())
                .unwrap_or_default()
        } else {
            args.channel
        };

        let mut channels: Vec<String> = channels
            .iter()
            .map(|c| normalize_channel(c))
            .filter(|c| !c.is_empty())
            .collect();
        channels.sort();
        channels.dedup();

        let poll_timeout_s = match args.poll_timeout {
            Some(t) => t,
            None => match lookup("POLL_TIMEOUT") {
                Some(v) => v
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidTimeout(v.clone()))?,
                None => DEFAULT_POLL_TIMEOUT_S,
            },
        };

        if poll_timeout_s < 0 {
            return Err(ConfigError::InvalidTimeout(poll_timeout_s.to_string()));
        }

        Ok(Self {
            token,
            posts_dir,
            db_path,
            channels,
            poll_timeout_s,
        })
    }
}
