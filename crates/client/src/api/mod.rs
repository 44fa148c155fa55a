//! REST client for the shop API.
//!
//! [`ApiClient`] has one method per server operation, grouped by entity
//! family in the submodules. Every call sends one request, parses the JSON
//! body and runs it through the envelope and entity checks in
//! [`wheelhouse_core::validation`]. Nothing is retried or cached here; see
//! [`crate::repository`] for the cached read path.

mod catalog;
mod details;
mod orders;
mod people;
mod transactions;
mod workflow;

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use wheelhouse_core::validation::{
    validate_array_response, validate_empty_response, validate_object_response, Entity,
    ResponseError,
};

use crate::config::ClientConfig;
use crate::error::ClientError;

/// HTTP client for one shop API server.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

/// A response body that parsed as JSON, with its HTTP status.
struct Received {
    status: u16,
    body: Value,
}

impl ApiClient {
    /// Create a client for `base_url`, e.g. `http://localhost:3001`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Create a client from configuration, applying the optional timeout.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|source| ClientError::Request {
            context: "Failed to build HTTP client",
            source,
        })?;
        Ok(Self::with_client(client, config.api_url.clone()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ---- request helpers ----

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        self.client.request(method, format!("{}{}", self.base_url, path))
    }

    /// Like [`Self::request`], with `segment` appended as one percent-encoded
    /// path segment.
    fn request_segment(
        &self,
        method: Method,
        path: &str,
        segment: &str,
    ) -> reqwest::RequestBuilder {
        match reqwest::Url::parse(&format!("{}{}", self.base_url, path)) {
            Ok(mut url) => {
                if let Ok(mut segments) = url.path_segments_mut() {
                    segments.pop_if_empty().push(segment);
                }
                self.client.request(method, url)
            }
            // The builder reports the bad URL when the request is built.
            Err(_) => self.request(method, path),
        }
    }

    /// Send a request and parse the body as JSON.
    ///
    /// A non-JSON body on an error status becomes a failure carrying the
    /// status and body text; on a success status it is a decode error.
    async fn execute(
        &self,
        context: &'static str,
        builder: reqwest::RequestBuilder,
    ) -> Result<Received, ClientError> {
        let request = builder
            .build()
            .map_err(|source| ClientError::Request { context, source })?;
        let method = request.method().clone();
        let path = request.url().path().to_string();

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|source| ClientError::Request { context, source })?;
        let status = response.status();
        tracing::debug!(%method, %path, status = status.as_u16(), "API response");

        let text = response
            .text()
            .await
            .map_err(|source| ClientError::Request { context, source })?;

        match serde_json::from_str::<Value>(&text) {
            Ok(body) => Ok(Received {
                status: status.as_u16(),
                body,
            }),
            Err(_) if !status.is_success() => Err(ClientError::Response {
                context,
                status: status.as_u16(),
                source: ResponseError::Failure {
                    status_code: i64::from(status.as_u16()),
                    message: if text.trim().is_empty() {
                        status.canonical_reason().unwrap_or("HTTP error").to_string()
                    } else {
                        text
                    },
                },
            }),
            Err(source) => Err(ClientError::Decode { context, source }),
        }
    }

    /// Attach the operation context to a validation result.
    fn checked<T>(
        context: &'static str,
        status: u16,
        result: Result<T, ResponseError>,
    ) -> Result<T, ClientError> {
        result.map_err(|source| {
            if !matches!(source, ResponseError::Failure { .. }) {
                tracing::warn!(context, status, error = %source, "API contract violation");
            }
            ClientError::Response {
                context,
                status,
                source,
            }
        })
    }

    async fn get_one<T: Entity>(&self, context: &'static str, path: &str) -> Result<T, ClientError> {
        self.receive_one(context, self.request(Method::GET, path))
            .await
    }

    async fn receive_one<T: Entity>(
        &self,
        context: &'static str,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let received = self.execute(context, builder).await?;
        Self::checked(context, received.status, validate_object_response(received.body))
    }

    async fn get_list<T: Entity>(
        &self,
        context: &'static str,
        path: &str,
    ) -> Result<Vec<T>, ClientError> {
        let received = self.execute(context, self.request(Method::GET, path)).await?;
        Self::checked(context, received.status, validate_array_response(received.body))
    }

    /// Like [`Self::get_list`], but a 404 means "nothing yet" and yields an
    /// empty list.
    async fn get_list_or_empty<T: Entity>(
        &self,
        context: &'static str,
        path: &str,
    ) -> Result<Vec<T>, ClientError> {
        match self.get_list(context, path).await {
            Err(err) if err.status() == Some(404) => {
                tracing::debug!(path, "List endpoint returned 404, treating as empty");
                Ok(Vec::new())
            }
            other => other,
        }
    }

    async fn send_one<T: Entity, B: Serialize + ?Sized>(
        &self,
        context: &'static str,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        self.receive_one(context, self.request(method, path).json(body))
            .await
    }

    async fn send_list<T: Entity, B: Serialize + ?Sized>(
        &self,
        context: &'static str,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Vec<T>, ClientError> {
        let received = self
            .execute(context, self.request(method, path).json(body))
            .await?;
        Self::checked(context, received.status, validate_array_response(received.body))
    }

    /// Send a request whose payload is not an entity, returning it raw.
    async fn send_empty(
        &self,
        context: &'static str,
        builder: reqwest::RequestBuilder,
    ) -> Result<Value, ClientError> {
        let received = self.execute(context, builder).await?;
        Self::checked(context, received.status, validate_empty_response(received.body))
    }

    async fn delete(&self, context: &'static str, path: &str) -> Result<(), ClientError> {
        self.send_empty(context, self.request(Method::DELETE, path))
            .await
            .map(|_| ())
    }
}
