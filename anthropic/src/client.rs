//! Anthropic API client implementation

use crate::{
    error::ClaudeError,
    messages::{MessagesRequest, MessagesResponse},
};
use reqwest::{Client, StatusCode};

const DEFAULT_API_URL: &str = "https://api.anthropic.com/v1";

/// Anthropic API client
#[derive(Clone)]
pub struct AnthropicClient {
    client: Client,
    api_key: String,
    api_url: String,
}

impl std::fmt::Debug for AnthropicClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicClient")
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

impl AnthropicClient {
    /// Create a new client with explicit API key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }

    /// Builder: use a preconfigured HTTP client (timeouts, proxies)
    #[must_use]
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Builder: point the client at another base URL (e.g. a mock server)
    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Create messages (non-streaming)
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, API errors, or parsing failures
    pub async fn messages(&self, request: MessagesRequest) -> Result<MessagesResponse, ClaudeError> {
        let response = self
            .client
            .post(format!("{}/messages", self.api_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| ClaudeError::RequestFailed(e.to_string()))?;

        match response.status() {
            StatusCode::OK => response
                .json::<MessagesResponse>()
                .await
                .map_err(|e| ClaudeError::ResponseParseFailed(e.to_string())),
            StatusCode::TOO_MANY_REQUESTS => Err(ClaudeError::RateLimited),
            StatusCode::UNAUTHORIZED => Err(ClaudeError::Unauthorized),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(ClaudeError::ApiError {
                    status: status.as_u16(),
                    message: body,
                })
            },
        }
    }
}
