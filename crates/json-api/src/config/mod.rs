//! Server configuration module

use clap::Parser;
use thiserror::Error;

use crate::config::{
    auth::AuthConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
    store::StoreConfig,
};

pub(crate) mod auth;
pub(crate) mod observability;
pub(crate) mod server;
pub(crate) mod store;

/// Errors raised while turning parsed configuration into application settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The selected backend is missing a required setting.
    #[error("{setting} is required when {backend} is selected")]
    Missing {
        /// Setting that was not provided.
        setting: &'static str,

        /// Backend that needs it.
        backend: &'static str,
    },

    /// Session lifetime is zero, negative or out of range.
    #[error("session ttl must be a positive number of minutes, got {0}")]
    InvalidSessionTtl(i64),
}

/// Orderdesk JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "orderdesk-json", about = "Orderdesk JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Order document store settings.
    #[command(flatten)]
    pub store: StoreConfig,

    /// Operator authentication settings.
    #[command(flatten)]
    pub auth: AuthConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}
