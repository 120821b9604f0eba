//! Application settings loaded via OrthoConfig.
//!
//! Values come from the command line, `CONDUCT_DESK_*` environment variables
//! and configuration files, in that order of precedence. Secrets are only
//! held long enough to build the outbound adapters.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_PAGE_DIR: &str = "public";
const DEFAULT_NOTIFY_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_OUTBOUND_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_DB_POOL_SIZE: u32 = 10;

/// Errors raised while resolving settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// A required value was not supplied.
    #[error("missing required setting: {name}")]
    Missing { name: &'static str },
    /// The bind address does not parse.
    #[error("invalid bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

/// Runtime configuration for the server binary.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CONDUCT_DESK")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub db_pool_size: Option<u32>,
    /// Base URL of the identity provider's admin API.
    pub identity_base_url: Option<String>,
    /// API key for the identity provider.
    pub identity_api_key: Option<String>,
    /// Endpoint of the transactional mail API.
    pub mail_api_url: Option<String>,
    /// API key for the mail API.
    pub mail_api_key: Option<String>,
    /// Sender address used for every notification.
    pub mail_sender: Option<String>,
    /// Directory holding the HTML pages.
    pub page_dir: Option<PathBuf>,
    /// File holding session key material.
    pub session_key_file: Option<PathBuf>,
    /// Mark the session cookie `Secure`.
    pub session_cookie_secure: Option<bool>,
    /// `SameSite` policy for the session cookie.
    pub session_same_site: Option<String>,
    /// Permit a generated session key when the key file is unreadable.
    pub session_allow_ephemeral: Option<bool>,
    /// Upper bound for a single notification send, in milliseconds.
    pub notify_timeout_ms: Option<u64>,
    /// Request timeout for the identity and mail clients, in milliseconds.
    pub outbound_timeout_ms: Option<u64>,
}

fn required<'a>(value: Option<&'a String>, name: &'static str) -> Result<&'a str, SettingsError> {
    value
        .map(String::as_str)
        .filter(|v| !v.trim().is_empty())
        .ok_or(SettingsError::Missing { name })
}

impl AppSettings {
    /// Parsed bind address, defaulting to `0.0.0.0:8080`.
    ///
    /// # Errors
    /// Returns [`SettingsError::InvalidBindAddr`] when the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .parse()
            .map_err(|source| SettingsError::InvalidBindAddr {
                value: value.to_owned(),
                source,
            })
    }

    /// Database URL.
    ///
    /// # Errors
    /// Returns [`SettingsError::Missing`] when unset or blank.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        required(self.database_url.as_ref(), "database_url")
    }

    #[must_use]
    pub fn db_pool_size(&self) -> u32 {
        self.db_pool_size.unwrap_or(DEFAULT_DB_POOL_SIZE)
    }

    /// Identity provider base URL and API key.
    ///
    /// # Errors
    /// Returns [`SettingsError::Missing`] naming the first absent value.
    pub fn identity(&self) -> Result<(&str, &str), SettingsError> {
        Ok((
            required(self.identity_base_url.as_ref(), "identity_base_url")?,
            required(self.identity_api_key.as_ref(), "identity_api_key")?,
        ))
    }

    /// Mail API URL, API key and sender.
    ///
    /// # Errors
    /// Returns [`SettingsError::Missing`] naming the first absent value.
    pub fn mail(&self) -> Result<(&str, &str, &str), SettingsError> {
        Ok((
            required(self.mail_api_url.as_ref(), "mail_api_url")?,
            required(self.mail_api_key.as_ref(), "mail_api_key")?,
            required(self.mail_sender.as_ref(), "mail_sender")?,
        ))
    }

    #[must_use]
    pub fn page_dir(&self) -> PathBuf {
        self.page_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PAGE_DIR))
    }

    #[must_use]
    pub fn notify_timeout(&self) -> Duration {
        Duration::from_millis(self.notify_timeout_ms.unwrap_or(DEFAULT_NOTIFY_TIMEOUT_MS))
    }

    #[must_use]
    pub fn outbound_timeout(&self) -> Duration {
        Duration::from_millis(
            self.outbound_timeout_ms
                .unwrap_or(DEFAULT_OUTBOUND_TIMEOUT_MS),
        )
    }
}
