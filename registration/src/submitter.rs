//! Delivery of a finished registration to the district's collection endpoint.

use crate::catalog::Catalog;
use crate::error::SubmissionError;
use crate::types::Session;
use chrono::{DateTime, SecondsFormat, Utc};
use futures::future::BoxFuture;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Marker left in the endpoint setting until an operator fills it in
pub const PLACEHOLDER_MARKER: &str = "REPLACE_WITH";

/// Default endpoint value shipped with the app
pub const PLACEHOLDER_ENDPOINT: &str = "REPLACE_WITH_YOUR_GOOGLE_WEB_APP_URL";

/// Whether an endpoint setting is missing or still the shipped placeholder
#[must_use]
pub fn is_unconfigured(endpoint: &str) -> bool {
    endpoint.trim().is_empty() || endpoint.contains(PLACEHOLDER_MARKER)
}

/// One session as recorded by the collection endpoint
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedSession {
    /// Title
    pub title: String,
    /// Presenter
    pub presenter: String,
    /// Room
    pub room: String,
    /// Label of the slot the session runs in
    pub time: String,
}

/// Body of the registration write
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationPayload {
    /// Attendee display name
    pub user_name: String,
    /// Chosen sessions in slot order
    pub sessions: Vec<SubmittedSession>,
    /// ISO-8601 UTC timestamp with milliseconds
    pub submitted_at: String,
}

impl RegistrationPayload {
    /// Assemble the payload; each session's `time` is its slot's label
    #[must_use]
    pub fn new(
        user_name: impl Into<String>,
        sessions: &[Session],
        catalog: &Catalog,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        let sessions = sessions
            .iter()
            .map(|session| SubmittedSession {
                title: session.title.clone(),
                presenter: session.presenter.clone(),
                room: session.room.clone(),
                time: catalog
                    .slot(&session.slot_id)
                    .map_or_else(|| session.slot_id.to_string(), |slot| slot.label.clone()),
            })
            .collect();

        Self {
            user_name: user_name.into(),
            sessions,
            submitted_at: submitted_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Where registrations are delivered
pub trait RegistrationSink: Send + Sync {
    /// Deliver one registration
    fn deliver(&self, payload: RegistrationPayload) -> BoxFuture<'static, Result<(), SubmissionError>>;
}

/// Fire-and-forget POST to the collection endpoint
///
/// The endpoint answers opaquely, so any HTTP response counts as delivered;
/// only a transport failure is an error. An unconfigured endpoint fails with
/// [`SubmissionError::NotConfigured`] after `unconfigured_delay`, without
/// touching the network.
#[derive(Clone, Debug)]
pub struct HttpRegistrationSink {
    client: Client,
    endpoint: String,
    unconfigured_delay: Duration,
}

impl HttpRegistrationSink {
    /// Creates a sink for `endpoint`
    #[must_use]
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            unconfigured_delay: Duration::from_secs(1),
        }
    }

    /// Builder: how long an unconfigured submit waits before failing
    #[must_use]
    pub const fn with_unconfigured_delay(mut self, delay: Duration) -> Self {
        self.unconfigured_delay = delay;
        self
    }

    /// Whether this sink will actually send
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !is_unconfigured(&self.endpoint)
    }
}

impl RegistrationSink for HttpRegistrationSink {
    fn deliver(&self, payload: RegistrationPayload) -> BoxFuture<'static, Result<(), SubmissionError>> {
        let sink = self.clone();

        Box::pin(async move {
            if !sink.is_configured() {
                tokio::time::sleep(sink.unconfigured_delay).await;
                tracing::warn!("Registration endpoint is not configured, nothing was sent");
                metrics::counter!("registration.submissions", "outcome" => "not_configured")
                    .increment(1);
                return Err(SubmissionError::NotConfigured);
            }

            let body = serde_json::to_string(&payload)
                .map_err(|e| SubmissionError::Transport(e.to_string()))?;

            match sink
                .client
                .post(&sink.endpoint)
                .header(reqwest::header::CONTENT_TYPE, "text/plain;charset=utf-8")
                .body(body)
                .send()
                .await
            {
                Ok(response) => {
                    tracing::info!(
                        status = response.status().as_u16(),
                        sessions = payload.sessions.len(),
                        "Registration delivered"
                    );
                    metrics::counter!("registration.submissions", "outcome" => "delivered")
                        .increment(1);
                    Ok(())
                },
                Err(error) => {
                    tracing::error!(%error, "Registration delivery failed");
                    metrics::counter!("registration.submissions", "outcome" => "failed")
                        .increment(1);
                    Err(SubmissionError::Transport(error.to_string()))
                },
            }
        })
    }
}
