//! Live enrollment counts, fetched once at startup.

use crate::error::EnrollmentError;
use crate::types::SessionId;
use futures::future::BoxFuture;
use reqwest::Client;
use std::collections::HashMap;

/// Source of per-session enrollment counts
pub trait EnrollmentSource: Send + Sync {
    /// Fetch the current count for every session it knows about
    fn fetch_counts(&self) -> BoxFuture<'static, Result<HashMap<SessionId, u32>, EnrollmentError>>;
}

/// GETs a JSON object of `{ "<session id>": <count> }`
#[derive(Clone, Debug)]
pub struct HttpEnrollmentSource {
    client: Client,
    url: String,
}

impl HttpEnrollmentSource {
    /// Creates a source reading from `url`
    #[must_use]
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

impl EnrollmentSource for HttpEnrollmentSource {
    fn fetch_counts(&self) -> BoxFuture<'static, Result<HashMap<SessionId, u32>, EnrollmentError>> {
        let client = self.client.clone();
        let url = self.url.clone();

        Box::pin(async move {
            let response = client
                .get(&url)
                .send()
                .await
                .map_err(|e| EnrollmentError::Request(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(EnrollmentError::Status(status.as_u16()));
            }

            let counts = response
                .json::<HashMap<SessionId, u32>>()
                .await
                .map_err(|e| EnrollmentError::Parse(e.to_string()))?;

            tracing::debug!(sessions = counts.len(), "Fetched enrollment counts");
            Ok(counts)
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetches_counts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/enrollment"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "s1-1": 29,
                "s2-4": 3
            })))
            .mount(&server)
            .await;

        let source = HttpEnrollmentSource::new(Client::new(), format!("{}/enrollment", server.uri()));
        let counts = source.fetch_counts().await.unwrap();

        assert_eq!(counts.get(&SessionId::new("s1-1")), Some(&29));
        assert_eq!(counts.get(&SessionId::new("s2-4")), Some(&3));
    }

    #[tokio::test]
    async fn test_server_error_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let source = HttpEnrollmentSource::new(Client::new(), server.uri());
        let result = source.fetch_counts().await;

        assert_eq!(result, Err(EnrollmentError::Status(503)));
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let source = HttpEnrollmentSource::new(Client::new(), server.uri());
        let result = source.fetch_counts().await;

        assert!(matches!(result, Err(EnrollmentError::Parse(_))));
    }
}
