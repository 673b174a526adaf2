//! App Context

use std::{path::PathBuf, sync::Arc, time::Duration};

use jiff::SignedDuration;
use orderdesk::fixtures::FixtureError;
use thiserror::Error;

use crate::{
    auth::{
        AuthService, CredentialVerifier, DEFAULT_LOGIN_DELAY, DEFAULT_SESSION_TTL,
        OpenBaoClient, OpenBaoConfig, OpenBaoCredentials, Password, SessionAuthService,
        SessionStore, StaticCredentials,
    },
    orders::{BoardOrdersService, OrdersService},
    store::{DocumentStore, InMemoryDocumentStore, SanityClient, SanityConfig},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to load order fixture")]
    Fixture(#[source] FixtureError),
}

/// Where order documents live.
#[derive(Debug, Clone)]
pub enum StoreBackend {
    /// Hosted Sanity dataset.
    Sanity(SanityConfig),

    /// YAML fixture held in memory; mutations are lost on exit.
    Fixture(PathBuf),
}

impl StoreBackend {
    /// Open the configured store.
    ///
    /// # Errors
    ///
    /// Returns an error when a fixture store cannot be seeded.
    pub fn open(self) -> Result<Arc<dyn DocumentStore>, AppInitError> {
        match self {
            Self::Sanity(config) => Ok(Arc::new(SanityClient::new(config))),
            Self::Fixture(path) => InMemoryDocumentStore::from_fixture(path)
                .map(|store| Arc::new(store) as Arc<dyn DocumentStore>)
                .map_err(AppInitError::Fixture),
        }
    }
}

/// How operator credentials are checked.
#[derive(Debug, Clone)]
pub enum CredentialBackend {
    /// Email and password from configuration.
    Static { email: String, password: Password },

    /// Transit verifier held by OpenBao.
    OpenBao {
        config: OpenBaoConfig,
        verifier: String,
    },
}

impl CredentialBackend {
    #[must_use]
    pub fn into_verifier(self) -> Arc<dyn CredentialVerifier> {
        match self {
            Self::Static { email, password } => Arc::new(StaticCredentials::new(email, password)),
            Self::OpenBao { config, verifier } => Arc::new(OpenBaoCredentials::new(
                OpenBaoClient::new(config),
                verifier,
            )),
        }
    }
}

/// Session lifetime and login pacing.
#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    pub ttl: SignedDuration,
    pub login_delay: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_SESSION_TTL,
            login_delay: DEFAULT_LOGIN_DELAY,
        }
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<dyn AuthService>,
    pub orders: Arc<dyn OrdersService>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build application context from store and credential settings.
    ///
    /// # Errors
    ///
    /// Returns an error when the document store cannot be opened.
    pub fn build(
        store: StoreBackend,
        credentials: CredentialBackend,
        sessions: SessionSettings,
    ) -> Result<Self, AppInitError> {
        Ok(Self::from_parts(
            store.open()?,
            credentials.into_verifier(),
            sessions,
        ))
    }

    #[must_use]
    pub fn from_parts(
        store: Arc<dyn DocumentStore>,
        verifier: Arc<dyn CredentialVerifier>,
        sessions: SessionSettings,
    ) -> Self {
        Self {
            auth: Arc::new(SessionAuthService::new(
                verifier,
                SessionStore::new(sessions.ttl),
                sessions.login_delay,
            )),
            orders: Arc::new(BoardOrdersService::new(store)),
        }
    }
}
