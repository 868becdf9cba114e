use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::ConfigError;

pub const DEFAULT_TAVILY_BASE_URL: &str = "https://api.tavily.com";
pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

#[derive(Debug, Clone)]
pub struct Config {
    pub tavily_api_key: String,
    pub tavily_base_url: String,
    pub groq_api_key: String,
    pub groq_base_url: String,
    pub model: String,
    pub provider_timeout: Duration,
    pub rate_limit_requests: u32,
    pub rate_limit_window: Duration,
}

impl Config {
    /// Read configuration from the process environment, loading `.env` first if present.
    pub fn from_env() -> Result<Config, ConfigError> {
        dotenv().ok();
        Ok(Config {
            tavily_api_key: get_env("TAVILY_API_KEY")?,
            tavily_base_url: get_env_or_default("TAVILY_BASE_URL", DEFAULT_TAVILY_BASE_URL),
            groq_api_key: get_env("GROQ_API_KEY")?,
            groq_base_url: get_env_or_default("GROQ_BASE_URL", DEFAULT_GROQ_BASE_URL),
            model: get_env_or_default("GROQ_MODEL", DEFAULT_MODEL),
            provider_timeout: Duration::from_secs(parse_env_or("PROVIDER_TIMEOUT_SECS", 30)?),
            rate_limit_requests: parse_env_or("RATE_LIMIT_REQUESTS", 5)?,
            rate_limit_window: Duration::from_secs(parse_env_or("RATE_LIMIT_WINDOW_SECS", 60)?),
        })
    }
}

fn get_env(key: &'static str) -> Result<String, ConfigError> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(key)),
    }
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env_or<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        Err(_) => Ok(default),
    }
}
