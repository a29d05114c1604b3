//! Environment-backed application configuration.
//!
//! Everything is read once at startup; the resulting struct is cloned into
//! worker state. Upstream credentials never leave this struct except through
//! the auth client constructor.

use anyhow::Context;
use std::time::Duration;
use url::Url;

const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    /// Base URL of the upstream Auth/identity service.
    pub auth_base_url: Url,
    /// Bearer key presented to the Auth service on every call.
    pub auth_connection_key: String,
    /// Deadline applied to every outbound upstream call.
    pub upstream_timeout: Duration,
    pub api_version: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set.")?;
        let auth_base_url = std::env::var("AUTH_BASE_URL")
            .context("AUTH_BASE_URL must be set.")?
            .parse::<Url>()
            .context("AUTH_BASE_URL is not a valid URL.")?;
        let auth_connection_key =
            std::env::var("AUTH_CONNECTION_KEY").context("AUTH_CONNECTION_KEY must be set.")?;

        let upstream_timeout = match std::env::var("UPSTREAM_TIMEOUT_SECS") {
            Ok(v) => Duration::from_secs(
                v.parse()
                    .context("UPSTREAM_TIMEOUT_SECS must be an integer number of seconds.")?,
            ),
            Err(_) => Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
        };

        Ok(Self {
            database_url,
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_owned()),
            auth_base_url,
            auth_connection_key,
            upstream_timeout,
            api_version: std::env::var("API_VERSION")
                .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_owned()),
        })
    }
}
