//! Store Config

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use orderdesk_app::{
    context::StoreBackend,
    store::{DEFAULT_API_VERSION, SanityConfig},
};

use crate::config::ConfigError;

/// Document store backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    /// Hosted Sanity dataset.
    Sanity,

    /// YAML fixture held in memory.
    Fixture,
}

/// Order document store settings.
#[derive(Debug, Args)]
pub struct StoreConfig {
    /// Document store backend (sanity, fixture)
    #[arg(long, env = "ORDERDESK_STORE", value_enum, default_value_t = StoreKind::Sanity)]
    pub store: StoreKind,

    /// YAML order fixture used by the fixture store
    #[arg(long, env = "ORDERDESK_FIXTURE")]
    pub fixture: Option<PathBuf>,

    /// Sanity project id
    #[arg(long, env = "SANITY_PROJECT_ID")]
    pub sanity_project_id: Option<String>,

    /// Sanity dataset
    #[arg(long, env = "SANITY_DATASET", default_value = "production")]
    pub sanity_dataset: String,

    /// Sanity API version
    #[arg(long, env = "SANITY_API_VERSION", default_value = DEFAULT_API_VERSION)]
    pub sanity_api_version: String,

    /// Sanity API token with write access to the dataset
    #[arg(long, env = "SANITY_TOKEN", hide_env_values = true)]
    pub sanity_token: Option<String>,

    /// Override for the Sanity API origin
    #[arg(long, env = "SANITY_API_HOST")]
    pub sanity_api_host: Option<String>,
}

impl StoreConfig {
    /// Resolve the configured backend.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when the selected backend lacks its required setting.
    pub fn backend(&self) -> Result<StoreBackend, ConfigError> {
        match self.store {
            StoreKind::Fixture => self
                .fixture
                .clone()
                .map(StoreBackend::Fixture)
                .ok_or(ConfigError::Missing {
                    setting: "ORDERDESK_FIXTURE",
                    backend: "the fixture store",
                }),
            StoreKind::Sanity => {
                let project_id =
                    self.sanity_project_id
                        .clone()
                        .ok_or(ConfigError::Missing {
                            setting: "SANITY_PROJECT_ID",
                            backend: "the sanity store",
                        })?;

                Ok(StoreBackend::Sanity(SanityConfig {
                    project_id,
                    dataset: self.sanity_dataset.clone(),
                    api_version: self.sanity_api_version.clone(),
                    token: self.sanity_token.clone(),
                    api_host: self.sanity_api_host.clone(),
                }))
            }
        }
    }
}
