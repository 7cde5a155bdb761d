//! Environment configuration
//!
//! Settings are read from environment variables, normally populated from a
//! `.env` file in the working directory by `main`. Every loader takes a lookup
//! function so tests can supply values without touching the process
//! environment.

use std::time::Duration;

use crate::data::SortMode;
use crate::error::Error;

/// URL of the remote OpenAPI document
pub const SWAGGER_URL_VAR: &str = "BANGUMI_SWAGGER";
/// Bearer token for the Bangumi API
pub const ACCESS_TOKEN_VAR: &str = "BANGUMI_ACCESS_TOKEN";
/// Comma-separated tag filter
pub const SEARCH_TAGS_VAR: &str = "BANGUMI_SEARCH_TAGS";
/// One of match, heat, rank, score
pub const SORT_BY_VAR: &str = "BANGUMI_SEARCH_SORT_BY";
/// Request timeout in whole seconds
pub const REQUEST_TIMEOUT_VAR: &str = "BANGUMI_REQUEST_TIMEOUT";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Reads a variable from the process environment
pub fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Fetches a variable, treating empty values as unset
fn non_empty<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).filter(|v| !v.trim().is_empty())
}

/// Returns the configured OpenAPI document URL
pub fn swagger_url<F>(lookup: F) -> Result<String, Error>
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(&lookup, SWAGGER_URL_VAR)
        .ok_or_else(|| Error::Config(format!("{} is not set in .env file", SWAGGER_URL_VAR)))
}

/// Settings used by the season search
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSettings {
    pub access_token: String,
    /// Tag filter, already trimmed; empty means no filter
    pub tags: Vec<String>,
    pub sort_by: SortMode,
    pub request_timeout: Duration,
}

impl SearchSettings {
    /// Loads search settings from the process environment
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(env_lookup)
    }

    /// Loads search settings through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let access_token = non_empty(&lookup, ACCESS_TOKEN_VAR).ok_or_else(|| {
            Error::Config(format!("{} is not set in .env file", ACCESS_TOKEN_VAR))
        })?;

        let tags = non_empty(&lookup, SEARCH_TAGS_VAR)
            .map(|raw| parse_tags(&raw))
            .unwrap_or_default();

        let sort_by = match non_empty(&lookup, SORT_BY_VAR) {
            Some(raw) => raw.parse()?,
            None => SortMode::default(),
        };

        let timeout_secs = match non_empty(&lookup, REQUEST_TIMEOUT_VAR) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                Error::Config(format!(
                    "Invalid timeout value '{}' in {}. Must be an integer",
                    raw, REQUEST_TIMEOUT_VAR
                ))
            })?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(Self {
            access_token,
            tags,
            sort_by,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// One-line summary printed before a search run
    pub fn summary(&self) -> String {
        let tags = if self.tags.is_empty() {
            "None".to_string()
        } else {
            format!("[{}]", self.tags.join(", "))
        };
        format!(
            "Search settings: Tags={}, Sort by={}, Timeout={}s",
            tags,
            self.sort_by,
            self.request_timeout.as_secs()
        )
    }
}

/// Splits a comma-separated tag list, trimming entries and dropping blanks
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}
