//! # API Client
//!
//! Main HTTP client for backend API communication.
//!
//! Every call goes through [`ApiClient::request`], which owns the whole
//! response contract:
//!
//! | Response            | Result                                                   |
//! |---------------------|----------------------------------------------------------|
//! | no response         | `TransportFailure`                                       |
//! | 401                 | session cleared, `SessionExpired` emitted, `Unauthorized`|
//! | other non-2xx       | `RequestFailed(detail)` or `RequestFailed("Server error: <status>")` |
//! | 204 / empty body    | `Ok(None)`                                               |
//! | 2xx with JSON       | `Ok(Some(value))`                                        |
//!
//! Nothing is retried.

use crate::app::events::AppEvent;
use crate::config::ConsoleConfig;
use crate::core::error::{AppError, Result};
use crate::services::session::SessionHandle;
use async_channel::Sender;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::ErrorResponse;
use std::time::Instant;
use uuid::Uuid;

/// Per-call options: method, extra headers and JSON body.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<serde_json::Value>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: HeaderMap::new(),
            body: None,
        }
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn delete() -> Self {
        Self {
            method: Method::DELETE,
            ..Self::default()
        }
    }

    pub fn post<B: Serialize + ?Sized>(body: &B) -> Result<Self> {
        Self::with_body(Method::POST, body)
    }

    pub fn put<B: Serialize + ?Sized>(body: &B) -> Result<Self> {
        Self::with_body(Method::PUT, body)
    }

    fn with_body<B: Serialize + ?Sized>(method: Method, body: &B) -> Result<Self> {
        Ok(Self {
            method,
            headers: HeaderMap::new(),
            body: Some(serde_json::to_value(body).map_err(|e| {
                AppError::InvalidInput(format!("request body is not serializable: {}", e))
            })?),
        })
    }

    /// Add a caller header. Caller headers override the JSON content type,
    /// never the bearer token.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// HTTP client for communicating with the backend API server.
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: String,
    session: SessionHandle,
    events: Option<Sender<AppEvent>>,
}

impl ApiClient {
    /// Create a new API client from configuration.
    ///
    /// No timeout is configured unless `config.request_timeout` is set.
    pub fn new(config: &ConsoleConfig, session: SessionHandle) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AppError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.normalized_api_url().to_string(),
            session,
            events: None,
        })
    }

    /// Route session-expiry notifications to the app.
    pub fn with_events(mut self, events: Sender<AppEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// Get the base URL for API requests.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session_handle(&self) -> &SessionHandle {
        &self.session
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Merge `Content-Type: application/json`, caller headers and the bearer token, in that order.
    fn build_headers(&self, caller: &HeaderMap) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (name, value) in caller {
            headers.insert(name.clone(), value.clone());
        }
        if let Some(token) = self.session.token() {
            let value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
                AppError::InvalidInput("stored token contains invalid header characters".to_string())
            })?;
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }

    /// Perform one request and normalize the response.
    ///
    /// `Ok(None)` means the backend answered without content.
    #[tracing::instrument(
        skip(self, options),
        fields(method = %options.method, request_id = %Uuid::new_v4())
    )]
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<Option<T>> {
        let start = Instant::now();
        let headers = self.build_headers(&options.headers)?;

        let mut builder = self
            .client
            .request(options.method.clone(), self.url(endpoint))
            .headers(headers);
        if let Some(body) = &options.body {
            builder = builder.json(body);
        }

        tracing::debug!(endpoint, "Sending request");

        let response = builder.send().await.map_err(|e| {
            tracing::error!(endpoint, error = %e, "API request failed");
            AppError::TransportFailure(e.to_string())
        })?;

        let status = response.status();
        let duration_ms = start.elapsed().as_millis();

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(endpoint, duration_ms, "Unauthorized (401), logging out");
            self.session.clear();
            self.notify(AppEvent::SessionExpired);
            return Err(AppError::Unauthorized);
        }

        if !status.is_success() {
            let message = response
                .json::<ErrorResponse>()
                .await
                .ok()
                .and_then(|e| e.message())
                .unwrap_or_else(|| format!("Server error: {}", status.as_u16()));
            tracing::error!(
                endpoint,
                status = status.as_u16(),
                duration_ms,
                error = %message,
                "API error"
            );
            return Err(AppError::RequestFailed(message));
        }

        if status == StatusCode::NO_CONTENT {
            tracing::debug!(endpoint, duration_ms, "No content");
            return Ok(None);
        }

        let bytes = response.bytes().await.map_err(|e| {
            tracing::error!(endpoint, error = %e, "Failed to read response body");
            AppError::TransportFailure(e.to_string())
        })?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            tracing::debug!(endpoint, duration_ms, "Empty body");
            return Ok(None);
        }

        let value = serde_json::from_slice::<T>(&bytes).map_err(|e| {
            tracing::error!(endpoint, error = %e, "Response parse error");
            AppError::Decode(format!("{}: {}", endpoint, e))
        })?;

        tracing::debug!(endpoint, status = status.as_u16(), duration_ms, "Request completed");
        Ok(Some(value))
    }

    /// GET that requires a payload.
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        expect_payload(endpoint, self.request(endpoint, RequestOptions::get()).await?)
    }

    /// POST a JSON body; requires a payload back.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T> {
        expect_payload(endpoint, self.request(endpoint, RequestOptions::post(body)?).await?)
    }

    /// PUT a JSON body; requires a payload back.
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T> {
        expect_payload(endpoint, self.request(endpoint, RequestOptions::put(body)?).await?)
    }

    /// POST without a body, e.g. link endpoints.
    pub async fn post_empty<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let options = RequestOptions {
            method: Method::POST,
            ..RequestOptions::default()
        };
        expect_payload(endpoint, self.request(endpoint, options).await?)
    }

    /// DELETE; any acknowledgement body is ignored.
    pub async fn delete(&self, endpoint: &str) -> Result<()> {
        self.request::<serde_json::Value>(endpoint, RequestOptions::delete())
            .await
            .map(|_| ())
    }

    /// DELETE that returns a payload.
    pub async fn delete_with<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        expect_payload(endpoint, self.request(endpoint, RequestOptions::delete()).await?)
    }

    fn notify(&self, event: AppEvent) {
        if let Some(tx) = &self.events {
            if tx.try_send(event).is_err() {
                tracing::debug!("No listener for app event");
            }
        }
    }
}

/// Turn a "no content" answer into a decode error for callers that need data.
pub fn expect_payload<T>(endpoint: &str, payload: Option<T>) -> Result<T> {
    payload.ok_or_else(|| {
        tracing::error!(endpoint, "Expected a response body, got none");
        AppError::Decode(format!("{}: empty response", endpoint))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        let config = ConsoleConfig {
            api_url: "http://127.0.0.1:9/api/".to_string(),
            ..Default::default()
        };
        ApiClient::new(&config, SessionHandle::in_memory()).unwrap()
    }

    #[test]
    fn test_url_joins_base_and_endpoint() {
        let client = client();
        assert_eq!(client.base_url(), "http://127.0.0.1:9/api");
        assert_eq!(client.url("/patients/3"), "http://127.0.0.1:9/api/patients/3");
    }

    #[test]
    fn test_headers_without_token() {
        let client = client();
        let headers = client.build_headers(&HeaderMap::new()).unwrap();
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert!(headers.get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_headers_merge_caller_and_token() {
        let client = client();
        client.session_handle().set_token("tok".to_string()).unwrap();

        let options = RequestOptions::get()
            .header(CONTENT_TYPE, HeaderValue::from_static("text/plain"))
            .header(AUTHORIZATION, HeaderValue::from_static("Basic xyz"))
            .header(
                HeaderName::from_static("x-request-source"),
                HeaderValue::from_static("console"),
            );
        let headers = client.build_headers(&options.headers).unwrap();

        assert_eq!(headers[CONTENT_TYPE], "text/plain");
        assert_eq!(headers["x-request-source"], "console");
        assert_eq!(headers[AUTHORIZATION], "Bearer tok");
    }

    #[test]
    fn test_expect_payload() {
        assert_eq!(expect_payload("/x", Some(1)).unwrap(), 1);
        assert!(matches!(expect_payload::<i32>("/x", None), Err(AppError::Decode(_))));
    }

    #[tokio::test]
    async fn test_transport_failure_when_nothing_listens() {
        // Port 9 (discard) is closed on test machines
        let client = client();
        let result = client.request::<serde_json::Value>("/patients", RequestOptions::get()).await;
        assert!(matches!(result, Err(AppError::TransportFailure(_))));
    }
}
