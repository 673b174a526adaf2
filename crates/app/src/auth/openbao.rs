//! OpenBao Transit client for credential verifiers.
//!
//! Operator passwords are never stored. Enrolment asks Transit for an HMAC over the operator's
//! credential input and keeps only the returned verifier string; login asks Transit to verify
//! the submitted input against it.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Value, json};
use thiserror::Error;

/// Configuration for connecting to an OpenBao instance.
#[derive(Debug, Clone)]
pub struct OpenBaoConfig {
    /// OpenBao server address, e.g. `"http://localhost:8200"`.
    pub addr: String,

    /// OpenBao authentication token.
    pub token: String,

    /// Transit key name used for credential HMACs.
    pub transit_key: String,
}

/// HTTP client for OpenBao Transit HMAC operations.
#[derive(Debug, Clone)]
pub struct OpenBaoClient {
    config: OpenBaoConfig,
    http: Client,
}

impl OpenBaoClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: OpenBaoConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    /// Compute an HMAC over `input` bytes using the configured transit key.
    ///
    /// Returns the opaque verifier string (e.g. `"vault:v1:..."`).
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure or an unexpected response body.
    pub async fn hmac(&self, input: &[u8]) -> Result<String, OpenBaoError> {
        let parsed: TransitResponse<HmacData> = self
            .transit("hmac", json!({ "input": BASE64.encode(input) }))
            .await?;

        Ok(parsed.data.hmac)
    }

    /// Verify `input` bytes against a stored `hmac` verifier string.
    ///
    /// Returns `Ok(true)` if valid, `Ok(false)` if the HMAC does not match.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure or an unexpected response body.
    pub async fn verify(&self, input: &[u8], hmac: &str) -> Result<bool, OpenBaoError> {
        let parsed: TransitResponse<VerifyData> = self
            .transit(
                "verify",
                json!({
                    "input": BASE64.encode(input),
                    "hmac": hmac,
                }),
            )
            .await?;

        Ok(parsed.data.valid)
    }

    async fn transit<T: DeserializeOwned>(
        &self,
        operation: &str,
        body: Value,
    ) -> Result<T, OpenBaoError> {
        let url = transit_url(&self.config, operation);

        let response = self
            .http
            .post(&url)
            .header("X-Vault-Token", &self.config.token)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(OpenBaoError::UnexpectedResponse(format!(
                "{operation} request failed with status {status}: {text}"
            )));
        }

        Ok(response.json().await?)
    }
}

fn transit_url(config: &OpenBaoConfig, operation: &str) -> String {
    format!(
        "{}/v1/transit/{operation}/{}",
        config.addr.trim_end_matches('/'),
        config.transit_key
    )
}

#[derive(Debug, Deserialize)]
struct TransitResponse<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct HmacData {
    hmac: String,
}

#[derive(Debug, Deserialize)]
struct VerifyData {
    valid: bool,
}

/// Errors that can occur when communicating with OpenBao.
#[derive(Debug, Error)]
pub enum OpenBaoError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// OpenBao returned a non-2xx response or unexpected body.
    #[error("unexpected response from OpenBao: {0}")]
    UnexpectedResponse(String),
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn transit_urls_use_configured_key() {
        let config = OpenBaoConfig {
            addr: "http://localhost:8200/".to_string(),
            token: "root".to_string(),
            transit_key: "orderdesk-operators".to_string(),
        };

        assert_eq!(
            transit_url(&config, "verify"),
            "http://localhost:8200/v1/transit/verify/orderdesk-operators"
        );
    }

    #[test]
    fn parses_verify_response() -> TestResult {
        let parsed: TransitResponse<VerifyData> =
            serde_json::from_value(json!({ "data": { "valid": true } }))?;

        assert!(parsed.data.valid);

        Ok(())
    }
}
