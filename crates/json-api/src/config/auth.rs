//! Auth Config

use std::time::Duration;

use clap::Args;
use jiff::SignedDuration;
use orderdesk_app::{
    auth::{OpenBaoConfig, Password},
    context::{CredentialBackend, SessionSettings},
};

use crate::config::ConfigError;

/// Operator authentication settings.
///
/// An `OpenBao` verifier takes precedence over a static password.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Operator email address (static credentials)
    #[arg(long, env = "ORDERDESK_OPERATOR_EMAIL")]
    pub operator_email: Option<String>,

    /// Operator password (static credentials)
    #[arg(long, env = "ORDERDESK_OPERATOR_PASSWORD", hide_env_values = true)]
    pub operator_password: Option<String>,

    /// Operator verifier produced by `orderdesk-app operator enroll`
    #[arg(long, env = "ORDERDESK_OPERATOR_VERIFIER", hide_env_values = true)]
    pub operator_verifier: Option<String>,

    /// `OpenBao` server address
    #[arg(long, env = "OPENBAO_ADDR")]
    pub openbao_addr: Option<String>,

    /// `OpenBao` authentication token
    #[arg(long, env = "OPENBAO_TOKEN", hide_env_values = true)]
    pub openbao_token: Option<String>,

    /// `OpenBao` Transit key name
    #[arg(long, env = "OPENBAO_TRANSIT_KEY")]
    pub openbao_transit_key: Option<String>,

    /// Session lifetime in minutes
    #[arg(long, env = "SESSION_TTL_MINUTES", default_value_t = 480)]
    pub session_ttl_minutes: i64,

    /// Pause before each credential check, in milliseconds
    #[arg(long, env = "LOGIN_DELAY_MS", default_value_t = 1_000)]
    pub login_delay_ms: u64,
}

impl AuthConfig {
    /// Resolve how operator credentials are checked.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when neither a complete `OpenBao` setup nor a static
    /// email and password pair is configured.
    pub fn credentials(&self) -> Result<CredentialBackend, ConfigError> {
        if let Some(verifier) = &self.operator_verifier {
            let openbao = "an operator verifier";

            return Ok(CredentialBackend::OpenBao {
                config: OpenBaoConfig {
                    addr: required(self.openbao_addr.as_ref(), "OPENBAO_ADDR", openbao)?,
                    token: required(self.openbao_token.as_ref(), "OPENBAO_TOKEN", openbao)?,
                    transit_key: required(
                        self.openbao_transit_key.as_ref(),
                        "OPENBAO_TRANSIT_KEY",
                        openbao,
                    )?,
                },
                verifier: verifier.clone(),
            });
        }

        let backend = "static credentials";

        Ok(CredentialBackend::Static {
            email: required(
                self.operator_email.as_ref(),
                "ORDERDESK_OPERATOR_EMAIL",
                backend,
            )?,
            password: Password::new(required(
                self.operator_password.as_ref(),
                "ORDERDESK_OPERATOR_PASSWORD",
                backend,
            )?),
        })
    }

    /// Session lifetime and login pacing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSessionTtl`] for a non-positive lifetime.
    pub fn sessions(&self) -> Result<SessionSettings, ConfigError> {
        if self.session_ttl_minutes <= 0 {
            return Err(ConfigError::InvalidSessionTtl(self.session_ttl_minutes));
        }

        let ttl = self
            .session_ttl_minutes
            .checked_mul(60)
            .map(SignedDuration::from_secs)
            .ok_or(ConfigError::InvalidSessionTtl(self.session_ttl_minutes))?;

        Ok(SessionSettings {
            ttl,
            login_delay: Duration::from_millis(self.login_delay_ms),
        })
    }
}

fn required(
    value: Option<&String>,
    setting: &'static str,
    backend: &'static str,
) -> Result<String, ConfigError> {
    value
        .cloned()
        .ok_or(ConfigError::Missing { setting, backend })
}
