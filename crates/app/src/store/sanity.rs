//! Sanity HTTP API client.

use async_trait::async_trait;
use orderdesk::orders::{ImageRef, Order, OrderId, OrderStatus};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, de::IgnoredAny};
use serde_json::{Value, json};
use tracing::debug;

use crate::store::{
    DocumentStore, DocumentStoreError, images,
    records::{OrderRecord, QueryResponse},
};

const ORDERS_QUERY: &str = include_str!("groq/orders.groq");

/// API version used when none is configured.
pub const DEFAULT_API_VERSION: &str = "2025-02-01";

/// Configuration for connecting to a Sanity project.
#[derive(Debug, Clone)]
pub struct SanityConfig {
    /// Project id, e.g. `"zp7mbokg"`.
    pub project_id: String,

    /// Dataset holding the order documents.
    pub dataset: String,

    /// Dated API version, without the leading `v`.
    pub api_version: String,

    /// API token with write access to the dataset.
    pub token: Option<String>,

    /// Override for the API origin; defaults to `https://{project_id}.api.sanity.io`.
    pub api_host: Option<String>,
}

impl SanityConfig {
    fn origin(&self) -> String {
        self.api_host.as_ref().map_or_else(
            || format!("https://{}.api.sanity.io", self.project_id),
            |host| host.trim_end_matches('/').to_string(),
        )
    }

    fn query_url(&self) -> String {
        format!(
            "{}/v{}/data/query/{}",
            self.origin(),
            self.api_version,
            self.dataset
        )
    }

    fn mutate_url(&self) -> String {
        format!(
            "{}/v{}/data/mutate/{}",
            self.origin(),
            self.api_version,
            self.dataset
        )
    }
}

/// HTTP client for the Sanity query and mutation endpoints.
#[derive(Debug, Clone)]
pub struct SanityClient {
    config: SanityConfig,
    http: Client,
}

impl SanityClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: SanityConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn mutate(&self, mutation: Value) -> Result<MutateResponse, DocumentStoreError> {
        let request = self
            .http
            .post(self.config.mutate_url())
            .query(&[("returnIds", "true"), ("visibility", "sync")])
            .json(&json!({ "mutations": [mutation] }));

        let response = check_status(self.authorize(request).send().await?, "mutate").await?;

        Ok(response.json().await?)
    }
}

#[async_trait]
impl DocumentStore for SanityClient {
    async fn fetch_orders(&self) -> Result<Vec<Order>, DocumentStoreError> {
        let request = self
            .http
            .get(self.config.query_url())
            .query(&[("query", ORDERS_QUERY)]);

        let response = check_status(self.authorize(request).send().await?, "query").await?;

        Ok(orders_from(response.json().await?))
    }

    async fn set_order_status(
        &self,
        order: &OrderId,
        status: OrderStatus,
    ) -> Result<(), DocumentStoreError> {
        let response = self.mutate(status_patch(order, status)).await?;

        if response.results.is_empty() {
            return Err(DocumentStoreError::NotFound);
        }

        Ok(())
    }

    async fn delete_order(&self, order: &OrderId) -> Result<(), DocumentStoreError> {
        let response = self.mutate(delete_mutation(order)).await?;

        debug!(
            order = %order,
            transaction = response.transaction_id.as_deref().unwrap_or(""),
            "deleted order document"
        );

        Ok(())
    }

    fn image_url(&self, image: &ImageRef) -> Option<String> {
        images::cdn_url(&self.config.project_id, &self.config.dataset, image)
    }
}

async fn check_status(
    response: Response,
    operation: &str,
) -> Result<Response, DocumentStoreError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();

    Err(status_error(status, operation, &text))
}

fn status_error(status: StatusCode, operation: &str, body: &str) -> DocumentStoreError {
    if status == StatusCode::NOT_FOUND {
        return DocumentStoreError::NotFound;
    }

    // Mutations against a missing document fail the whole transaction with a 409.
    if status == StatusCode::CONFLICT
        && serde_json::from_str::<ErrorResponse>(body)
            .is_ok_and(|response| response.error.is_document_not_found())
    {
        return DocumentStoreError::NotFound;
    }

    DocumentStoreError::UnexpectedResponse(format!(
        "{operation} request failed with status {status}: {body}"
    ))
}

fn orders_from(response: QueryResponse<Vec<OrderRecord>>) -> Vec<Order> {
    debug!(count = response.result.len(), "fetched order documents");

    response.result.into_iter().map(Order::from).collect()
}

fn status_patch(order: &OrderId, status: OrderStatus) -> Value {
    json!({
        "patch": {
            "id": order.as_str(),
            "set": { "status": status.as_str() }
        }
    })
}

fn delete_mutation(order: &OrderId) -> Value {
    json!({ "delete": { "id": order.as_str() } })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MutateResponse {
    transaction_id: Option<String>,

    #[serde(default)]
    results: Vec<IgnoredAny>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: MutationError,
}

#[derive(Debug, Deserialize)]
struct MutationError {
    #[serde(rename = "type")]
    kind: String,

    #[serde(default)]
    items: Vec<MutationErrorItem>,
}

impl MutationError {
    fn is_document_not_found(&self) -> bool {
        self.kind == "mutationError"
            && self
                .items
                .iter()
                .any(|item| item.error.kind == "documentNotFoundError")
    }
}

#[derive(Debug, Deserialize)]
struct MutationErrorItem {
    error: MutationErrorDetail,
}

#[derive(Debug, Deserialize)]
struct MutationErrorDetail {
    #[serde(rename = "type")]
    kind: String,
}
