//! Operator credential verification.

use async_trait::async_trait;
use mockall::automock;
use subtle::ConstantTimeEq;
use thiserror::Error;
use zeroize::Zeroize;

use crate::auth::{Credentials, OpenBaoClient, OpenBaoError, Password};

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("OpenBao error")]
    OpenBao(#[from] OpenBaoError),
}

#[automock]
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Whether `credentials` belong to the configured operator.
    ///
    /// Comparison is exact: no case folding, no trimming.
    async fn verify(&self, credentials: &Credentials) -> Result<bool, CredentialError>;
}

/// Operator email and password supplied through configuration.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    email: String,
    password: Password,
}

impl StaticCredentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: Password) -> Self {
        Self {
            email: email.into(),
            password,
        }
    }
}

#[async_trait]
impl CredentialVerifier for StaticCredentials {
    async fn verify(&self, credentials: &Credentials) -> Result<bool, CredentialError> {
        let email = credentials.email.as_bytes().ct_eq(self.email.as_bytes());
        let password = credentials
            .password
            .expose()
            .as_bytes()
            .ct_eq(self.password.expose().as_bytes());

        Ok((email & password).into())
    }
}

/// Operator verifier held by OpenBao Transit.
#[derive(Debug, Clone)]
pub struct OpenBaoCredentials {
    client: OpenBaoClient,
    verifier: String,
}

impl OpenBaoCredentials {
    #[must_use]
    pub fn new(client: OpenBaoClient, verifier: impl Into<String>) -> Self {
        Self {
            client,
            verifier: verifier.into(),
        }
    }

    /// Produce the verifier string to configure for `credentials`.
    ///
    /// # Errors
    ///
    /// Returns an error when OpenBao cannot compute the HMAC.
    pub async fn enroll(
        client: &OpenBaoClient,
        credentials: &Credentials,
    ) -> Result<String, OpenBaoError> {
        let mut input = build_credential_input(credentials);
        let verifier = client.hmac(&input).await;

        input.zeroize();

        verifier
    }
}

#[async_trait]
impl CredentialVerifier for OpenBaoCredentials {
    async fn verify(&self, credentials: &Credentials) -> Result<bool, CredentialError> {
        let mut input = build_credential_input(credentials);
        let valid = self.client.verify(&input, &self.verifier).await;

        input.zeroize();

        Ok(valid?)
    }
}

/// Build the canonical HMAC input bytes for a credential pair.
///
/// Format: `{email}:{password}`
#[must_use]
pub fn build_credential_input(credentials: &Credentials) -> Vec<u8> {
    let mut input =
        Vec::with_capacity(credentials.email.len() + 1 + credentials.password.expose().len());

    input.extend_from_slice(credentials.email.as_bytes());
    input.push(b':');
    input.extend_from_slice(credentials.password.expose().as_bytes());

    input
}
