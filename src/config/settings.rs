use crate::error::{Result, ResolverError};
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_CACHE_TTL_SECS: u64 = 24 * 60 * 60;
pub const DEFAULT_BATCH_SIZE: u16 = 1000;

#[derive(Debug, Clone)]
pub struct Settings {
    pub slack: SlackConfig,
    pub resolver: ResolverConfig,
}

#[derive(Debug, Clone)]
pub struct SlackConfig {
    pub bot_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Expiry of the in-memory cache; zero means it never expires once populated
    pub cache_ttl: Duration,
    pub batch_size: u16,
    pub exclude_archived: bool,
    pub search_public_channels: bool,
    pub refresh_on_cache_miss: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            batch_size: DEFAULT_BATCH_SIZE,
            exclude_archived: false,
            search_public_channels: false,
            refresh_on_cache_miss: false,
        }
    }
}

pub fn load_settings() -> Result<Settings> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let slack = SlackConfig {
        bot_token: std::env::var("SLACK_BOT_TOKEN")
            .map_err(|_| ResolverError::Config("SLACK_BOT_TOKEN not set".to_string()))?,
    };

    let resolver = resolver_config_from(|key| std::env::var(key).ok())?;

    Ok(Settings { slack, resolver })
}

/// Build the resolver config from a key lookup, so tests don't have to touch the process env.
fn resolver_config_from(lookup: impl Fn(&str) -> Option<String>) -> Result<ResolverConfig> {
    let defaults = ResolverConfig::default();

    let cache_ttl_secs: u64 = parse_or(
        "RESOLVER_CACHE_TTL_SECS",
        &lookup,
        defaults.cache_ttl.as_secs(),
    )?;
    let batch_size: u16 = parse_or("RESOLVER_BATCH_SIZE", &lookup, defaults.batch_size)?;
    if batch_size == 0 || batch_size > DEFAULT_BATCH_SIZE {
        return Err(ResolverError::Config(format!(
            "RESOLVER_BATCH_SIZE must be between 1 and {DEFAULT_BATCH_SIZE}, got {batch_size}"
        )));
    }

    Ok(ResolverConfig {
        cache_ttl: Duration::from_secs(cache_ttl_secs),
        batch_size,
        exclude_archived: parse_or(
            "RESOLVER_EXCLUDE_ARCHIVED",
            &lookup,
            defaults.exclude_archived,
        )?,
        search_public_channels: parse_or(
            "RESOLVER_SEARCH_PUBLIC",
            &lookup,
            defaults.search_public_channels,
        )?,
        refresh_on_cache_miss: parse_or(
            "RESOLVER_REFRESH_ON_MISS",
            &lookup,
            defaults.refresh_on_cache_miss,
        )?,
    })
}

fn parse_or<T: FromStr>(
    key: &str,
    lookup: &impl Fn(&str) -> Option<String>,
    default: T,
) -> Result<T> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ResolverError::Config(format!("Invalid {key}: {raw}"))),
        None => Ok(default),
    }
}
