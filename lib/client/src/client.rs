//! `reqwest` implementation of the chat backend.

use crate::backend::ChatBackend;
use crate::error::RequestError;
use crate::wire::{
    ConversationSummary, ErrorBody, HealthStatus, HistoryResponse, SendMessageRequest,
    SendMessageResponse,
};
use async_trait::async_trait;
use krx_chat_core::{ConversationId, RequestId};
use reqwest::{Method, StatusCode, Url};
use rootcause::prelude::Report;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Origin of the development server.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Upper bound on one exchange, covering connect, send and body read.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const MAX_LIST_LIMIT: u32 = 100;

/// Connection settings for [`ChatClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Origin the `/api/chat` paths are resolved against.
    pub base_url: String,
    /// Time limit for each exchange.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Creates a config for the given origin with the default timeout.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Replaces the per-exchange time limit.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// HTTP client for the assistant service.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl ChatClient {
    /// Creates a client for the configured origin.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::InvalidConfig`] if the base URL is not an
    /// absolute http(s) URL or the HTTP stack cannot be initialized.
    pub fn new(config: ClientConfig) -> Result<Self, Report<RequestError>> {
        let base_url = Url::parse(config.base_url.trim()).map_err(|e| {
            RequestError::InvalidConfig {
                reason: format!("base url {:?}: {e}", config.base_url),
            }
        })?;
        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(RequestError::InvalidConfig {
                reason: format!("base url {base_url} must be an http(s) origin"),
            }
            .into());
        }
        if config.timeout.is_zero() {
            return Err(RequestError::InvalidConfig {
                reason: "timeout must be greater than zero".to_string(),
            }
            .into());
        }

        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| RequestError::InvalidConfig {
                reason: e.to_string(),
            })?;

        Ok(Self {
            http,
            base_url,
            timeout: config.timeout,
        })
    }

    /// Returns the origin requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the per-exchange time limit.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Lists the most recently updated conversations.
    ///
    /// `limit` is clamped to `1..=100`.
    ///
    /// # Errors
    ///
    /// Returns a classified [`RequestError`] if the exchange fails.
    pub async fn list_conversations(
        &self,
        limit: u32,
    ) -> Result<Vec<ConversationSummary>, Report<RequestError>> {
        let mut url = self.url_for(&["api", "chat", "conversations"]);
        url.query_pairs_mut()
            .append_pair("limit", &limit.clamp(1, MAX_LIST_LIMIT).to_string());
        Ok(self.execute(Method::GET, url, None::<&()>).await?)
    }

    /// Queries the service health endpoint.
    ///
    /// # Errors
    ///
    /// Returns a classified [`RequestError`] if the exchange fails.
    pub async fn health(&self) -> Result<HealthStatus, Report<RequestError>> {
        let url = self.url_for(&["api", "chat", "health"]);
        Ok(self.execute(Method::GET, url, None::<&()>).await?)
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    fn url_for(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejects cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Runs one exchange and decodes a 2xx body as `T`.
    ///
    /// The whole exchange, including the body read, runs under the time
    /// limit. Dropping the future on expiry cancels the request.
    #[instrument(
        skip_all,
        fields(request_id = %RequestId::new(), method = %method, path = %url.path())
    )]
    async fn execute<T, B>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<T, RequestError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let exchange = async {
            let response = request.send().await.map_err(|e| self.classify_transport(&e))?;
            let status = response.status();
            let bytes = response
                .bytes()
                .await
                .map_err(|e| self.classify_transport(&e))?;
            Ok::<_, RequestError>((status, bytes))
        };
        let (status, bytes) = within(self.timeout, exchange).await?;

        debug!(status = status.as_u16(), bytes = bytes.len(), "response received");

        if status.is_success() {
            return serde_json::from_slice(&bytes).map_err(|e| RequestError::InvalidResponse {
                reason: e.to_string(),
            });
        }
        Err(RequestError::Server {
            status: status.as_u16(),
            detail: ErrorBody::detail_from(&bytes),
        })
    }

    fn classify_transport(&self, error: &reqwest::Error) -> RequestError {
        if error.is_timeout() {
            warn!(limit_secs = self.timeout.as_secs(), "transport timed out");
            return RequestError::Timeout {
                limit: self.timeout,
            };
        }
        warn!(error = %error, "request failed before a response arrived");
        RequestError::Network {
            reason: error.to_string(),
        }
    }
}

/// Runs `exchange` under `limit`, cancelling it on expiry.
async fn within<T>(
    limit: Duration,
    exchange: impl Future<Output = Result<T, RequestError>>,
) -> Result<T, RequestError> {
    match tokio::time::timeout(limit, exchange).await {
        Ok(result) => result,
        Err(_elapsed) => {
            warn!(limit_secs = limit.as_secs(), "request timed out");
            Err(RequestError::Timeout { limit })
        }
    }
}

#[async_trait]
impl ChatBackend for ChatClient {
    async fn send_message(
        &self,
        request: &SendMessageRequest,
    ) -> Result<SendMessageResponse, RequestError> {
        let url = self.url_for(&["api", "chat", "message"]);
        self.execute(Method::POST, url, Some(request)).await
    }

    async fn fetch_history(&self, id: &ConversationId) -> Result<HistoryResponse, RequestError> {
        let url = self.url_for(&["api", "chat", "history", id.as_str()]);
        let resource = url.path().to_string();
        // A 404 here means the conversation is gone.
        self.execute(Method::GET, url, None::<&()>)
            .await
            .map_err(|e| match e {
                RequestError::Server { status, .. }
                    if status == StatusCode::NOT_FOUND.as_u16() =>
                {
                    RequestError::NotFound { resource }
                }
                other => other,
            })
    }
}
