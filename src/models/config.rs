//! Configuration module for the scanner service
//!
//! All values come from environment variables with defaults from
//! `utils/constants.rs`. Nothing here is hardcoded twice.

use regex::Regex;
use std::net::IpAddr;
use std::time::Duration;
use tracing::info;

use crate::models::errors::{AppError, AppResult};
use crate::utils::constants::{
    DEFAULT_HOST, DEFAULT_LOOKUP_TIMEOUT_SECS, DEFAULT_OFF_BASE_URL, DEFAULT_PORT, USER_AGENT,
};

lazy_static::lazy_static! {
    /// RFC 1123 host name: dot-separated labels of letters, digits and inner hyphens
    static ref HOSTNAME_PATTERN: Regex = Regex::new(
        r"^[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?(\.[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$"
    )
    .expect("Invalid hostname regex");
}

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    /// Bind host for the HTTP server
    pub host: String,
    /// Bind port for the HTTP server
    pub port: u16,
    /// Base URL of the Open Food Facts API (no trailing slash)
    pub off_base_url: String,
    /// Timeout for a single product lookup
    pub lookup_timeout: Duration,
    /// Whether the external tier is consulted at all
    pub external_lookup_enabled: bool,
    /// User-Agent sent to the product database
    pub user_agent: String,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            off_base_url: DEFAULT_OFF_BASE_URL.to_string(),
            lookup_timeout: Duration::from_secs(DEFAULT_LOOKUP_TIMEOUT_SECS),
            external_lookup_enabled: true,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl ScannerConfig {
    /// Load configuration from the process environment
    ///
    /// Environment:
    ///   ERECYCLE_HOST     - bind host (default: 0.0.0.0)
    ///   PORT              - bind port, used by hosting platforms
    ///   ERECYCLE_PORT     - bind port for local dev (default: 8000)
    ///   OFF_BASE_URL      - product database URL
    ///   OFF_TIMEOUT_SECS  - lookup timeout (default: 5)
    ///   OFF_ENABLED       - "false"/"0" disables the external tier
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(get: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = get("ERECYCLE_HOST").filter(|h| !h.is_empty()) {
            let host = host.trim();
            if !is_valid_host(host) {
                return Err(AppError::invalid_config("ERECYCLE_HOST", host));
            }
            config.host = host.to_string();
        }

        let port = get("PORT").map(|p| ("PORT", p)).or_else(|| get("ERECYCLE_PORT").map(|p| ("ERECYCLE_PORT", p)));
        if let Some((key, raw)) = port {
            config.port = raw.trim().parse().map_err(|_| AppError::invalid_config(key, &raw))?;
        }

        if let Some(url) = get("OFF_BASE_URL").filter(|u| !u.is_empty()) {
            config.off_base_url = url.trim_end_matches('/').to_string();
        }

        if let Some(raw) = get("OFF_TIMEOUT_SECS") {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|_| AppError::invalid_config("OFF_TIMEOUT_SECS", &raw))?;
            if secs == 0 {
                return Err(AppError::invalid_config("OFF_TIMEOUT_SECS", &raw));
            }
            config.lookup_timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = get("OFF_ENABLED") {
            config.external_lookup_enabled = parse_flag(&raw)
                .ok_or_else(|| AppError::invalid_config("OFF_ENABLED", &raw))?;
        }

        if !config.external_lookup_enabled {
            info!("Open Food Facts lookup disabled by configuration");
        }

        Ok(config)
    }

    /// `host:port` for logs; IPv6 hosts are bracketed
    pub fn bind_address(&self) -> String {
        match self.host.parse::<IpAddr>() {
            Ok(IpAddr::V6(ip)) => format!("[{}]:{}", ip, self.port),
            _ => format!("{}:{}", self.host, self.port),
        }
    }
}

/// IP literal (v4 or v6) or a resolvable-looking host name
fn is_valid_host(host: &str) -> bool {
    host.parse::<IpAddr>().is_ok() || (host.len() <= 253 && HOSTNAME_PATTERN.is_match(host))
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
