//! Configuration management for the menu screen.

use std::env;
use std::time::Duration;

use crate::{Error, Result};

const DEFAULT_TABLE: &str = "food_items";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_GEMINI_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the hosted data service
    pub supabase_url: String,
    /// Public API key for the data service
    pub supabase_anon_key: String,
    /// Table holding the food items
    pub food_table: String,
    /// API key for the language-model endpoint
    pub gemini_api_key: String,
    /// Model name
    pub gemini_model: String,
    /// Base URL of the language-model API
    pub gemini_api_base: String,
    /// Transport timeout for the shared HTTP client
    pub http_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| Error::Config(format!("{} not set", key)))
        };

        let http_timeout = match lookup("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|e| Error::Config(format!("Invalid HTTP_TIMEOUT_SECS: {}", e)))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            supabase_url: required("SUPABASE_URL")?.trim_end_matches('/').to_string(),
            supabase_anon_key: required("SUPABASE_ANON_KEY")?,
            food_table: lookup("FOOD_TABLE").unwrap_or_else(|| DEFAULT_TABLE.to_string()),
            gemini_api_key: required("GEMINI_API_KEY")?,
            gemini_model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gemini_api_base: lookup("GEMINI_API_BASE")
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE.to_string())
                .trim_end_matches('/')
                .to_string(),
            http_timeout: Duration::from_secs(http_timeout),
        })
    }

    /// Build the shared HTTP client both service clients use.
    pub fn http_client(&self) -> Result<reqwest::Client> {
        Ok(reqwest::Client::builder().timeout(self.http_timeout).build()?)
    }
}
