//! Client configuration loaded from environment variables.

use crate::middleware::authorizer::DEFAULT_PUBLIC_ENDPOINTS;
use crate::models::asesoria::{MAX_DURATION_MINUTES, MAX_TOPIC_LENGTH, MIN_DURATION_MINUTES};
use std::env;
use std::path::PathBuf;

/// Client configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL, without trailing slash
    pub api_url: String,
    /// File the session is persisted to between runs
    pub session_file: PathBuf,
    /// URL paths that never carry a bearer token
    pub public_endpoints: Vec<String>,
    /// Length of a booked session
    pub booking_duration_minutes: u32,
    /// Minimum (trimmed) length of a booking topic
    pub min_topic_length: usize,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080".to_string(),
            session_file: PathBuf::from(".asesorias-session.json"),
            public_endpoints: default_public_endpoints(),
            booking_duration_minutes: 60,
            min_topic_length: 5,
        }
    }
}

fn default_public_endpoints() -> Vec<String> {
    DEFAULT_PUBLIC_ENDPOINTS.iter().map(|s| s.to_string()).collect()
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let api_url = env::var("ASESORIAS_API_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .map_err(|_| ConfigError::Missing("ASESORIAS_API_URL"))?;
        if api_url.is_empty() {
            return Err(ConfigError::Missing("ASESORIAS_API_URL"));
        }

        let public_endpoints = match env::var("ASESORIAS_PUBLIC_ENDPOINTS") {
            Ok(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            Err(_) => default_public_endpoints(),
        };

        let booking_duration_minutes: u32 = parse_var("ASESORIAS_BOOKING_DURATION_MINUTES", 60)?;
        if !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&booking_duration_minutes) {
            return Err(ConfigError::Invalid(
                "ASESORIAS_BOOKING_DURATION_MINUTES",
                format!("{booking_duration_minutes} (allowed {MIN_DURATION_MINUTES}-{MAX_DURATION_MINUTES})"),
            ));
        }

        let min_topic_length: usize = parse_var("ASESORIAS_MIN_TOPIC_LENGTH", 5)?;
        if (min_topic_length as u64) > MAX_TOPIC_LENGTH {
            return Err(ConfigError::Invalid(
                "ASESORIAS_MIN_TOPIC_LENGTH",
                format!("{min_topic_length} (at most {MAX_TOPIC_LENGTH})"),
            ));
        }

        Ok(Self {
            api_url,
            session_file: env::var("ASESORIAS_SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".asesorias-session.json")),
            public_endpoints,
            booking_duration_minutes,
            min_topic_length,
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(name, raw)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
