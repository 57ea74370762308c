//! Configuration management for the Trip Finder service.
//!
//! This module provides configuration handling via environment variables with sensible defaults.
//! All configuration parameters can be customized through environment variables with the TRIPFINDER_ prefix.
//!
//! # Environment Variables
//! - TRIPFINDER_PORT: HTTP port to listen on (default: 8080)
//! - TRIPFINDER_DEFAULT_PAGE_SIZE: Page size used when a request's is missing or invalid (default: 10)
//! - TRIPFINDER_MAX_PAGE_SIZE: Largest page size accepted as-is (default: 100)
//! - TRIPFINDER_DEFAULT_LATEST_COUNT: Trips returned by /latest without a count (default: 5)
//! - TRIPFINDER_DEFAULT_TOP_DESTINATIONS: Entries returned by /top-destinations without a limit (default: 3)
//! - TRIPFINDER_CORS_ALLOWED_ORIGIN: Front-end origin allowed by CORS (default: http://localhost:4200)
//! - TRIPFINDER_SEED_FILE: Trip export loaded into the store at start-up (default: none)

use serde::Deserialize;
use std::env;

/// Prefix for all Trip Finder environment variables.
const ENV_PREFIX: &str = "TRIPFINDER_";

/// Configuration parameters for the Trip Finder service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TripFinderConfig {
    /// Port the HTTP server binds to on all interfaces.
    pub port: u16,

    /// Page size substituted when a request asks for zero, a negative
    /// number, or more than `max_page_size`.
    pub default_page_size: usize,

    /// Largest page size honoured without substitution.
    pub max_page_size: usize,

    /// Number of trips returned by the latest-trips listing when the caller
    /// gives no positive count.
    pub default_latest_count: usize,

    /// Number of pickup locations returned by the destination ranking when
    /// the caller gives no positive limit.
    pub default_top_destinations: usize,

    /// Origin allowed to call the API from a browser.
    pub cors_allowed_origin: String,

    /// Optional path to a trip export used to populate the in-memory store.
    pub seed_file: Option<String>,
}

impl TripFinderConfig {
    /// Attempts to load configuration from environment variables.
    ///
    /// # Environment Variables
    /// All variables must be prefixed with "TRIPFINDER_". For example:
    /// - TRIPFINDER_PORT=9000
    /// - TRIPFINDER_SEED_FILE=./data/recent.json
    ///
    /// Missing variables keep their default value.
    ///
    /// # Returns
    /// - Ok(config) if all present variables are valid
    /// - Err(message) if any variable cannot be parsed or fails validation
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if it exists for local development
        dotenv::dotenv().ok();

        let env_vars: std::collections::HashMap<String, String> = env::vars()
            .filter(|(k, _)| k.starts_with(ENV_PREFIX))
            .map(|(k, v)| (k.trim_start_matches(ENV_PREFIX).to_string(), v))
            .collect();

        match envy::from_iter::<_, Self>(env_vars) {
            Ok(config) => {
                config.validate()?;
                Ok(config)
            }
            Err(e) => Err(format!("Failed to parse environment variables: {}", e)),
        }
    }

    /// Loads configuration from environment variables, falling back to defaults
    /// if environment variables are invalid.
    pub fn from_env_or_default() -> Self {
        Self::from_env().unwrap_or_else(|e| {
            log::warn!("{}; using default configuration", e);
            Self::default()
        })
    }

    /// Validates all configuration parameters.
    ///
    /// # Validation Rules
    /// - Port must be non-zero
    /// - Max page size must be positive
    /// - Default page size must be between 1 and the max page size
    /// - Latest count and top destinations defaults must be positive
    ///
    /// # Returns
    /// - Ok(()) if all validation passes
    /// - Err(message) with description of the first validation failure
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("port must be non-zero".to_string());
        }
        if self.max_page_size == 0 {
            return Err("max_page_size must be positive".to_string());
        }
        if self.default_page_size == 0 || self.default_page_size > self.max_page_size {
            return Err("default_page_size must be between 1 and max_page_size".to_string());
        }
        if self.default_latest_count == 0 {
            return Err("default_latest_count must be positive".to_string());
        }
        if self.default_top_destinations == 0 {
            return Err("default_top_destinations must be positive".to_string());
        }
        Ok(())
    }
}

/// Default configuration values.
impl Default for TripFinderConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            default_page_size: 10,
            max_page_size: 100,
            default_latest_count: 5,
            default_top_destinations: 3,
            cors_allowed_origin: "http://localhost:4200".to_string(),
            seed_file: None,
        }
    }
}
