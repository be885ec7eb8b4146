//! Configuration for the p6sync CLI
//!
//! Values come from the environment (after `.env` is loaded) and are then
//! overridden by command-line flags.

use std::time::Duration;

use crate::api::endpoints;
use crate::error::{CliError, Result};

/// Default Business Central environment name
pub const DEFAULT_BC_ENVIRONMENT_NAME: &str = "UAT";

/// Default token relay endpoint
pub const DEFAULT_TOKEN_URL: &str = "http://localhost:3001/token";

/// Default number of records per sink request
pub const DEFAULT_CHUNK_SIZE: usize = 500;

/// Runtime configuration for one upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Explicit sink base URL; takes precedence over the Business Central parts
    pub sink_url: Option<String>,
    pub bc_environment: Option<String>,
    pub bc_environment_name: String,
    pub bc_company: Option<String>,
    pub token_url: String,
    pub chunk_size: usize,
    /// Per-request timeout; `None` keeps the transport default
    pub http_timeout: Option<Duration>,
}

/// Command-line overrides, all optional
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub sink_url: Option<String>,
    pub bc_environment: Option<String>,
    pub bc_environment_name: Option<String>,
    pub bc_company: Option<String>,
    pub token_url: Option<String>,
    pub chunk_size: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sink_url: None,
            bc_environment: None,
            bc_environment_name: DEFAULT_BC_ENVIRONMENT_NAME.to_string(),
            bc_company: None,
            token_url: DEFAULT_TOKEN_URL.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            http_timeout: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let chunk_size = match get("P6_CHUNK_SIZE") {
            Some(raw) => raw
                .parse::<usize>()
                .map_err(|_| CliError::config(format!("P6_CHUNK_SIZE must be a positive integer, got '{raw}'")))?,
            None => defaults.chunk_size,
        };

        let http_timeout = match get("P6_HTTP_TIMEOUT_SECS") {
            Some(raw) => Some(Duration::from_secs(raw.parse::<u64>().map_err(|_| {
                CliError::config(format!("P6_HTTP_TIMEOUT_SECS must be a number of seconds, got '{raw}'"))
            })?)),
            None => None,
        };

        Ok(Self {
            sink_url: get("P6_SINK_URL"),
            bc_environment: get("P6_BC_ENVIRONMENT"),
            bc_environment_name: get("P6_BC_ENVIRONMENT_NAME").unwrap_or(defaults.bc_environment_name),
            bc_company: get("P6_BC_COMPANY"),
            token_url: get("P6_TOKEN_URL").unwrap_or(defaults.token_url),
            chunk_size,
            http_timeout,
        })
    }

    /// Apply command-line overrides on top of loaded values
    pub fn apply(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(url) = overrides.sink_url {
            self.sink_url = Some(url);
        }
        if let Some(env) = overrides.bc_environment {
            self.bc_environment = Some(env);
        }
        if let Some(name) = overrides.bc_environment_name {
            self.bc_environment_name = name;
        }
        if let Some(company) = overrides.bc_company {
            self.bc_company = Some(company);
        }
        if let Some(url) = overrides.token_url {
            self.token_url = url;
        }
        if let Some(size) = overrides.chunk_size {
            self.chunk_size = size;
        }
        self
    }

    /// Base URL all sink collection paths are appended to
    pub fn sink_base_url(&self) -> Result<String> {
        if let Some(url) = &self.sink_url {
            return Ok(url.trim_end_matches('/').to_string());
        }
        match (&self.bc_environment, &self.bc_company) {
            (Some(env), Some(company)) => Ok(endpoints::business_central_base_url(
                env,
                &self.bc_environment_name,
                company,
            )),
            _ => Err(CliError::config(
                "no sink URL configured: set P6_SINK_URL, or both P6_BC_ENVIRONMENT and P6_BC_COMPANY",
            )),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(CliError::config("chunk size must be at least 1"));
        }
        check_http_url("sink URL", &self.sink_base_url()?)?;
        check_http_url("token URL", &self.token_url)?;
        Ok(())
    }
}

fn check_http_url(what: &str, url: &str) -> Result<()> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(CliError::config(format!("{what} must start with http:// or https://, got '{url}'")))
    }
}
