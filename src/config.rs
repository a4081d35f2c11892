//! Start-up configuration read from the process environment (and `.env`).
//!
//! Parsing goes through a lookup closure so the rules can be exercised in tests
//! without mutating the real environment.

use std::env;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::utils::chunker::DISCORD_MESSAGE_LIMIT;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Settings for the Gemini client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub api_base: Url,
    pub max_output_tokens: Option<u32>,
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotConfig {
    pub discord_token: String,
    pub gemini: GeminiConfig,
    pub webhook_url: Option<Url>,
    pub max_message_length: usize,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset.
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let discord_token = get("DISCORD_TOKEN").ok_or(ConfigError::Missing("DISCORD_TOKEN"))?;
        let api_key = get("GEMINI_API_KEY").ok_or(ConfigError::Missing("GEMINI_API_KEY"))?;

        let model = get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());
        let api_base = parse_url(
            "GEMINI_API_BASE",
            &get("GEMINI_API_BASE").unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string()),
        )?;

        let max_output_tokens = match get("GEMINI_MAX_OUTPUT_TOKENS") {
            Some(raw) => Some(parse_number::<u32>("GEMINI_MAX_OUTPUT_TOKENS", &raw)?),
            None => None,
        };

        let timeout_secs = match get("REQUEST_TIMEOUT_SECS") {
            Some(raw) => parse_number::<u64>("REQUEST_TIMEOUT_SECS", &raw)?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        let max_message_length = match get("MAX_MESSAGE_LENGTH") {
            Some(raw) => parse_number::<usize>("MAX_MESSAGE_LENGTH", &raw)?,
            None => DISCORD_MESSAGE_LIMIT,
        };
        if max_message_length == 0 || max_message_length > DISCORD_MESSAGE_LIMIT {
            return Err(ConfigError::Invalid {
                key: "MAX_MESSAGE_LENGTH",
                reason: format!("must be between 1 and {DISCORD_MESSAGE_LIMIT}"),
            });
        }

        let webhook_url = match get("WEBHOOK_URL") {
            Some(raw) => Some(parse_url("WEBHOOK_URL", &raw)?),
            None => None,
        };

        if webhook_url.is_some() && !cfg!(feature = "webhook") {
            warn!("WEBHOOK_URL is set but the `webhook` feature is disabled; ignoring it");
        }

        debug!(
            "Loaded configuration: model={}, api_base={}, max_message_length={}, webhook={}",
            model,
            api_base,
            max_message_length,
            webhook_url.is_some()
        );

        Ok(Self {
            discord_token,
            gemini: GeminiConfig {
                api_key,
                model,
                api_base,
                max_output_tokens,
                timeout: Duration::from_secs(timeout_secs),
            },
            webhook_url,
            max_message_length,
        })
    }
}

fn parse_url(key: &'static str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|e| ConfigError::Invalid {
        key,
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::Invalid {
            key,
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}

fn parse_number<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
        key,
        reason: e.to_string(),
    })
}
