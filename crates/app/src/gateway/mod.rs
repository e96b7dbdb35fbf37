//! Remote data gateway.
//!
//! A thin REST client over the hosted backend's row and storage APIs. Reads
//! and writes are authorized by the current session's bearer token, falling
//! back to the anon service key for public reads. The backend offers no
//! multi-statement transaction primitive to this client; each request stands
//! alone.

pub mod errors;
pub mod query;

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;

use crate::session::token::AccessToken;

pub use errors::GatewayError;
pub use query::{Direction, Filter, FilterValue, Op, Query};

/// Accept header requesting exactly one row as a bare JSON object.
const SINGLE_OBJECT_ACCEPT: &str = "application/vnd.pgrst.object+json";

/// Supplies the bearer token for the signed-in session, when there is one.
pub trait TokenSource: Send + Sync {
    /// The current session's access token, or `None` when signed out.
    fn access_token(&self) -> Option<AccessToken>;
}

/// Connection details for the hosted backend.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Backend base URL, e.g. `"https://project.supabase.co"`.
    pub base_url: String,

    /// Public anon key; sent as the `apikey` header on every request and
    /// used as the bearer fallback for unauthenticated reads.
    pub anon_key: String,
}

/// Row and file operations against the hosted backend.
#[automock]
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Reads rows from `table`.
    async fn select(&self, table: &str, query: Query) -> Result<Vec<Value>, GatewayError>;

    /// Reads exactly one row from `table`; errors when zero or many match.
    async fn select_one(&self, table: &str, query: Query) -> Result<Value, GatewayError>;

    /// Inserts one row into `table`, returning its representation.
    async fn insert(&self, table: &str, values: Value) -> Result<Value, GatewayError>;

    /// Updates the rows of `table` matching `filters`, returning the first
    /// updated representation.
    async fn update(
        &self,
        table: &str,
        values: Value,
        filters: Vec<Filter>,
    ) -> Result<Value, GatewayError>;

    /// Uploads a file to a storage bucket, returning its public URL.
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, GatewayError>;
}

/// HTTP implementation of [`Gateway`].
pub struct RestGateway {
    config: GatewayConfig,
    http: Client,
    tokens: std::sync::Arc<dyn TokenSource>,
}

impl std::fmt::Debug for RestGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestGateway")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

impl RestGateway {
    /// Creates a gateway for the given backend.
    #[must_use]
    pub fn new(config: GatewayConfig, tokens: std::sync::Arc<dyn TokenSource>) -> Self {
        Self {
            config,
            http: Client::new(),
            tokens,
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.config.base_url)
    }

    fn object_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/storage/v1/object/{bucket}/{path}", self.config.base_url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let bearer = self
            .tokens
            .access_token()
            .map_or_else(|| self.config.anon_key.clone(), |token| token.reveal());

        request
            .header("apikey", &self.config.anon_key)
            .bearer_auth(bearer)
    }

    async fn check(
        response: reqwest::Response,
        fallback: &str,
    ) -> Result<reqwest::Response, GatewayError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        Err(Self::error_from(response, status, fallback).await)
    }

    async fn error_from(
        response: reqwest::Response,
        status: StatusCode,
        fallback: &str,
    ) -> GatewayError {
        let body = response
            .json::<errors::ErrorBody>()
            .await
            .unwrap_or_default();

        body.into_gateway_error(status, fallback)
    }

    /// Writes come back as a single-element array; unwrap it like the
    /// backend's representation contract suggests.
    fn first_row(value: Value) -> Value {
        match value {
            Value::Array(rows) => rows.into_iter().next().unwrap_or(Value::Null),
            other => other,
        }
    }
}

#[async_trait]
impl Gateway for RestGateway {
    async fn select(&self, table: &str, query: Query) -> Result<Vec<Value>, GatewayError> {
        let request = self
            .authorize(self.http.get(self.table_url(table)))
            .query(&query.to_pairs());

        let response = Self::check(request.send().await?, "Request failed").await?;

        Ok(response.json().await?)
    }

    async fn select_one(&self, table: &str, query: Query) -> Result<Value, GatewayError> {
        let request = self
            .authorize(self.http.get(self.table_url(table)))
            .header(reqwest::header::ACCEPT, SINGLE_OBJECT_ACCEPT)
            .query(&query.to_pairs());

        let response = Self::check(request.send().await?, "Request failed").await?;

        Ok(response.json().await?)
    }

    async fn insert(&self, table: &str, values: Value) -> Result<Value, GatewayError> {
        let request = self
            .authorize(self.http.post(self.table_url(table)))
            .header("Prefer", "return=representation")
            .json(&values);

        let response = Self::check(request.send().await?, "Insert failed").await?;

        Ok(Self::first_row(response.json().await?))
    }

    async fn update(
        &self,
        table: &str,
        values: Value,
        filters: Vec<Filter>,
    ) -> Result<Value, GatewayError> {
        let pairs: Vec<(String, String)> = filters.iter().map(Filter::to_pair).collect();

        let request = self
            .authorize(self.http.patch(self.table_url(table)))
            .header("Prefer", "return=representation")
            .query(&pairs)
            .json(&values);

        let response = Self::check(request.send().await?, "Update failed").await?;

        Ok(Self::first_row(response.json().await?))
    }

    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, GatewayError> {
        let request = self
            .authorize(self.http.post(self.object_url(bucket, path)))
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header("x-upsert", "true")
            .body(bytes);

        Self::check(request.send().await?, "Upload failed").await?;

        Ok(format!(
            "{}/storage/v1/object/public/{bucket}/{path}",
            self.config.base_url
        ))
    }
}
