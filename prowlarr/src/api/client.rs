use reqwest::Method;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::Duration;

use super::common::parse_error_body;
use super::error::ApiError;
use super::provider_resource::ProviderResourceApi;
use super::tag::TagsApi;

const API_KEY_HEADER: &str = "X-Api-Key";

/// Prowlarr API client
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
    retry_config: RetryConfig,
}

#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
    pub timeout_seconds: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff_ms: 100,
            max_backoff_ms: 10000,
            timeout_seconds: 30,
        }
    }
}

/// Transport tuning for the underlying connection pool
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub retry: RetryConfig,
    pub max_idle_connections: usize,
    pub idle_timeout: Duration,
    pub connection_timeout: Duration,
    pub tcp_keepalive: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            retry: RetryConfig::default(),
            max_idle_connections: 10,
            idle_timeout: Duration::from_secs(90),
            connection_timeout: Duration::from_secs(10),
            tcp_keepalive: Some(Duration::from_secs(30)),
        }
    }
}

impl ClientConfig {
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.retry.timeout_seconds = timeout_seconds;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.retry.max_retries = max_retries;
        self
    }
}

impl Client {
    /// Create a new API client with default configuration
    pub fn new(endpoint: &str, api_key: &str, insecure: bool) -> Result<Self, ApiError> {
        Self::with_config(endpoint, api_key, insecure, ClientConfig::default())
    }

    /// Create a new API client with custom transport configuration
    pub fn with_config(
        endpoint: &str,
        api_key: &str,
        insecure: bool,
        config: ClientConfig,
    ) -> Result<Self, ApiError> {
        let parsed = url::Url::parse(endpoint)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", endpoint, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl(format!(
                "{}: scheme must be http or https",
                endpoint
            )));
        }

        let http_client = reqwest::Client::builder()
            .danger_accept_invalid_certs(insecure)
            .timeout(Duration::from_secs(config.retry.timeout_seconds))
            .connect_timeout(config.connection_timeout)
            .pool_idle_timeout(config.idle_timeout)
            .pool_max_idle_per_host(config.max_idle_connections)
            .tcp_keepalive(config.tcp_keepalive)
            .build()?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http_client,
                base_url: endpoint.trim_end_matches('/').to_string(),
                api_key: api_key.to_string(),
                retry_config: config.retry,
            }),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// CRUD over one provider-backed category, e.g. `/api/v1/downloadclient`
    pub fn provider_resources(&self, path: &'static str) -> ProviderResourceApi<'_> {
        ProviderResourceApi::new(self, path)
    }

    /// Tags API operations
    pub fn tags(&self) -> TagsApi<'_> {
        TagsApi::new(self)
    }

    /// Execute a GET request with retry logic
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .execute_with_retry(Method::GET, path, || self.request(Method::GET, path).send())
            .await?;
        self.parse_success_response(response, path).await
    }

    /// Execute a POST request. Never retried: the server may have acted on it.
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .execute_with_retry(Method::POST, path, || {
                self.request(Method::POST, path).json(body).send()
            })
            .await?;
        self.parse_success_response(response, path).await
    }

    /// Execute a PUT request with retry logic
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .execute_with_retry(Method::PUT, path, || {
                self.request(Method::PUT, path).json(body).send()
            })
            .await?;
        self.parse_success_response(response, path).await
    }

    /// Execute a DELETE request with retry logic. The body is ignored.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute_with_retry(Method::DELETE, path, || {
            self.request(Method::DELETE, path).send()
        })
        .await
        .map(|_| ())
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.inner.base_url, path);
        tracing::debug!("{} request to: {}", method, url);

        self.inner
            .http_client
            .request(method, &url)
            .header(API_KEY_HEADER, &self.inner.api_key)
    }

    /// Execute request with retry logic. Only idempotent methods retry.
    async fn execute_with_retry<F, Fut>(
        &self,
        method: Method,
        path: &str,
        request_fn: F,
    ) -> Result<reqwest::Response, ApiError>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<reqwest::Response, reqwest::Error>>,
    {
        let retry_config = &self.inner.retry_config;
        let max_retries = if method == Method::POST {
            0
        } else {
            retry_config.max_retries
        };

        let mut attempt = 0;
        let mut last_error = None;

        while attempt <= max_retries {
            if attempt > 0 {
                let backoff = std::cmp::min(
                    retry_config.initial_backoff_ms * (2_u64.pow(attempt - 1)),
                    retry_config.max_backoff_ms,
                );
                tracing::debug!(
                    "Retrying {} {} after {}ms (attempt {})",
                    method,
                    path,
                    backoff,
                    attempt
                );
                tokio::time::sleep(Duration::from_millis(backoff)).await;
            }

            match request_fn().await {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        return Ok(response);
                    }

                    if status == reqwest::StatusCode::UNAUTHORIZED
                        || status == reqwest::StatusCode::FORBIDDEN
                    {
                        return Err(ApiError::AuthError(status.as_u16()));
                    }

                    if status == reqwest::StatusCode::NOT_FOUND {
                        return Err(ApiError::NotFound(path.to_string()));
                    }

                    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        last_error = Some(ApiError::RateLimited);
                    } else if status.is_server_error() {
                        last_error = Some(self.handle_error_response(response).await);
                    } else {
                        return Err(self.handle_error_response(response).await);
                    }
                }
                Err(e) => {
                    if e.is_timeout() {
                        last_error = Some(ApiError::Timeout(retry_config.timeout_seconds));
                    } else if e.is_connect() && method != Method::POST {
                        last_error = Some(ApiError::ServiceUnavailable);
                    } else {
                        return Err(ApiError::RequestError(e));
                    }
                }
            }

            attempt += 1;
        }

        Err(last_error.unwrap_or(ApiError::ServiceUnavailable))
    }

    /// Parse successful response. Bodies carry secrets, so they are never logged.
    async fn parse_success_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        path: &str,
    ) -> Result<T, ApiError> {
        let text = response.text().await?;

        serde_json::from_str::<T>(&text).map_err(|e| {
            tracing::error!("Failed to deserialize response from {}: {}", path, e);
            ApiError::ParseError(format!("Failed to parse response: {}", e))
        })
    }

    /// Handle error response
    async fn handle_error_response(&self, response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        let (message, failures) = parse_error_body(&text);

        if status >= 500 {
            ApiError::ServerError { status, message }
        } else {
            ApiError::Rejected {
                status,
                message,
                failures,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_helpers::{fast_client, tag_body};
    use mockito::Server;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Tag {
        id: i64,
        label: String,
    }

    #[tokio::test]
    async fn client_sends_api_key_header() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/tag/1")
            .match_header("x-api-key", "secret-key")
            .with_body(tag_body(1, "hd"))
            .create_async()
            .await;

        let client = Client::new(&server.url(), "secret-key", false).unwrap();

        let tag: Tag = client.get("/api/v1/tag/1").await.unwrap();
        assert_eq!(tag.id, 1);
        assert_eq!(tag.label, "hd");

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn client_strips_trailing_slash_from_endpoint() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/tag/1")
            .with_body(tag_body(1, "hd"))
            .create_async()
            .await;

        let client = Client::new(&format!("{}/", server.url()), "key", false).unwrap();

        let _: Tag = client.get("/api/v1/tag/1").await.unwrap();
        mock.assert_async().await;
    }

    #[test]
    fn client_rejects_invalid_urls() {
        assert!(matches!(
            Client::new("not a url", "key", false),
            Err(ApiError::InvalidUrl(_))
        ));
        assert!(matches!(
            Client::new("ftp://prowlarr:9696", "key", false),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn client_maps_unauthorized_and_forbidden() {
        let mut server = Server::new_async().await;
        let _unauthorized = server
            .mock("GET", "/api/v1/tag/1")
            .with_status(401)
            .expect(1)
            .create_async()
            .await;
        let _forbidden = server
            .mock("GET", "/api/v1/tag/2")
            .with_status(403)
            .create_async()
            .await;

        let client = fast_client(&server.url());

        let result: Result<Tag, _> = client.get("/api/v1/tag/1").await;
        assert!(matches!(result, Err(ApiError::AuthError(401))));

        let result: Result<Tag, _> = client.get("/api/v1/tag/2").await;
        assert!(matches!(result, Err(ApiError::AuthError(403))));
    }

    #[tokio::test]
    async fn client_maps_not_found() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v1/tag/9")
            .with_status(404)
            .create_async()
            .await;

        let client = fast_client(&server.url());

        let result: Result<Tag, _> = client.get("/api/v1/tag/9").await;
        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn client_surfaces_validation_failures() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/v1/tag")
            .with_status(400)
            .with_body(r#"[{"propertyName":"Label","errorMessage":"Label is required"}]"#)
            .create_async()
            .await;

        let client = fast_client(&server.url());

        let result: Result<Tag, _> = client
            .post("/api/v1/tag", &serde_json::json!({"label": ""}))
            .await;

        match result {
            Err(ApiError::Rejected {
                status, failures, ..
            }) => {
                assert_eq!(status, 400);
                assert_eq!(failures[0].property_name, "Label");
            }
            other => panic!("Expected Rejected error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn client_retries_idempotent_requests() {
        let mut server = Server::new_async().await;
        let failing = server
            .mock("GET", "/api/v1/tag/1")
            .with_status(503)
            .expect(3)
            .create_async()
            .await;

        let client = fast_client(&server.url());

        let result: Result<Tag, _> = client.get("/api/v1/tag/1").await;
        assert!(matches!(
            result,
            Err(ApiError::ServerError { status: 503, .. })
        ));

        failing.assert_async().await;
    }

    #[tokio::test]
    async fn client_never_retries_post() {
        let mut server = Server::new_async().await;
        let failing = server
            .mock("POST", "/api/v1/tag")
            .with_status(503)
            .expect(1)
            .create_async()
            .await;

        let client = fast_client(&server.url());

        let result: Result<Tag, _> = client
            .post("/api/v1/tag", &serde_json::json!({"label": "hd"}))
            .await;
        assert!(matches!(result, Err(ApiError::ServerError { .. })));

        failing.assert_async().await;
    }

    #[tokio::test]
    async fn client_handles_network_errors() {
        let client = fast_client("http://127.0.0.1:1");

        let result = client.delete("/api/v1/tag/1").await;
        assert!(matches!(result, Err(ApiError::ServiceUnavailable)));

        let result: Result<Tag, _> = client
            .post("/api/v1/tag", &serde_json::json!({"label": "hd"}))
            .await;
        assert!(matches!(result, Err(ApiError::RequestError(_))));
    }

    #[tokio::test]
    async fn client_reports_unparsable_bodies() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v1/tag/1")
            .with_body("<html>")
            .create_async()
            .await;

        let client = fast_client(&server.url());

        let result: Result<Tag, _> = client.get("/api/v1/tag/1").await;
        assert!(matches!(result, Err(ApiError::ParseError(_))));
    }
}
