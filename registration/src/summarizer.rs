//! Attendee itinerary writing.
//!
//! An AI-written itinerary when a writer is configured and answers with text,
//! a deterministic Markdown summary otherwise. Summarizing never fails.

use crate::error::ItineraryError;
use crate::types::Session;
use futures::future::BoxFuture;
use pd_registration_anthropic::{AnthropicClient, Message, MessagesRequest};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One session as handed to the writer
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItinerarySession {
    /// Title
    pub title: String,
    /// Presenter
    pub presenter: String,
    /// Room
    pub room: String,
    /// Description
    pub description: String,
}

impl From<&Session> for ItinerarySession {
    fn from(session: &Session) -> Self {
        Self {
            title: session.title.clone(),
            presenter: session.presenter.clone(),
            room: session.room.clone(),
            description: session.description.clone(),
        }
    }
}

/// What the writer is asked to summarize
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryRequest {
    /// Chosen sessions in slot order
    pub sessions: Vec<ItinerarySession>,
    /// Attendee display name
    pub attendee_name: String,
}

impl ItineraryRequest {
    /// Build a request from the attendee's chosen sessions
    #[must_use]
    pub fn new(attendee_name: impl Into<String>, sessions: &[Session]) -> Self {
        Self {
            sessions: sessions.iter().map(ItinerarySession::from).collect(),
            attendee_name: attendee_name.into(),
        }
    }
}

/// Where the itinerary text came from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItinerarySource {
    /// Written by the AI collaborator
    Generated,
    /// Deterministic local summary
    Fallback,
}

/// Markdown itinerary shown on the review surface
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Itinerary {
    /// Markdown body
    pub markdown: String,
    /// Who produced it
    pub source: ItinerarySource,
}

/// Something that can write an itinerary (the AI collaborator, or a mock)
pub trait ItineraryWriter: Send + Sync {
    /// Write Markdown for the request
    fn write(&self, request: ItineraryRequest) -> BoxFuture<'static, Result<String, ItineraryError>>;
}

/// Produces an itinerary for every review, falling back when the writer can't
#[derive(Clone, Default)]
pub struct ItinerarySummarizer {
    writer: Option<Arc<dyn ItineraryWriter>>,
}

impl std::fmt::Debug for ItinerarySummarizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItinerarySummarizer")
            .field("has_writer", &self.writer.is_some())
            .finish()
    }
}

impl ItinerarySummarizer {
    /// Summarizer backed by a writer
    #[must_use]
    pub fn new(writer: Arc<dyn ItineraryWriter>) -> Self {
        Self {
            writer: Some(writer),
        }
    }

    /// Summarizer that always uses the fallback rendering
    #[must_use]
    pub fn offline() -> Self {
        Self { writer: None }
    }

    /// Summarize the chosen sessions for an attendee
    #[tracing::instrument(skip(self, sessions), fields(sessions = sessions.len()))]
    pub async fn summarize(&self, attendee_name: &str, sessions: &[Session]) -> Itinerary {
        let Some(writer) = &self.writer else {
            tracing::debug!("No itinerary writer configured, using fallback");
            return fallback(attendee_name, sessions);
        };

        let request = ItineraryRequest::new(attendee_name, sessions);
        let result = match writer.write(request).await {
            Ok(text) if text.trim().is_empty() => Err(ItineraryError::EmptyResponse),
            other => other,
        };

        match result {
            Ok(markdown) => {
                metrics::counter!("itinerary.generated").increment(1);
                Itinerary {
                    markdown,
                    source: ItinerarySource::Generated,
                }
            },
            Err(error) => {
                tracing::warn!(%error, "Itinerary writer failed, using fallback");
                metrics::counter!("itinerary.fallback").increment(1);
                fallback(attendee_name, sessions)
            },
        }
    }
}

/// Deterministic Markdown itinerary
#[must_use]
pub fn fallback_itinerary(attendee_name: &str, sessions: &[Session]) -> String {
    let body = sessions
        .iter()
        .map(|session| {
            format!(
                "### {}\n* **Presenter:** {}\n* **Room:** {}\n",
                session.title, session.presenter, session.room
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("## Professional Development Itinerary\n\n**Attendee:** {attendee_name}\n\n{body}")
}

fn fallback(attendee_name: &str, sessions: &[Session]) -> Itinerary {
    Itinerary {
        markdown: fallback_itinerary(attendee_name, sessions),
        source: ItinerarySource::Fallback,
    }
}

/// Instructions for the writer, in the voice of the district's PD coordinator
#[must_use]
pub fn build_prompt(organization: &str, request: &ItineraryRequest) -> String {
    let sessions = request
        .sessions
        .iter()
        .enumerate()
        .map(|(index, session)| {
            format!(
                "{}. \"{}\" presented by {} in {}: {}",
                index + 1,
                session.title,
                session.presenter,
                session.room,
                session.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are the Professional Development Coordinator for {organization}.\n\
         {name} has registered for the following PD day sessions:\n\n\
         {sessions}\n\n\
         Write a short, encouraging personalized itinerary in Markdown with:\n\
         1. A warm greeting addressed to {name}.\n\
         2. An \"Itinerary at a Glance\" list of the sessions in order, with their rooms.\n\
         3. For each session, one \"Key Takeaway\" question to keep in mind during it.\n\
         4. A brief closing encouragement.\n\n\
         Keep it professional, concise and friendly.",
        name = request.attendee_name,
    )
}

/// Writes itineraries with the Anthropic Messages API
#[derive(Clone, Debug)]
pub struct ClaudeItineraryWriter {
    client: AnthropicClient,
    model: String,
    max_tokens: u32,
    organization: String,
}

impl ClaudeItineraryWriter {
    /// Creates a writer
    #[must_use]
    pub fn new(
        client: AnthropicClient,
        model: impl Into<String>,
        max_tokens: u32,
        organization: impl Into<String>,
    ) -> Self {
        Self {
            client,
            model: model.into(),
            max_tokens,
            organization: organization.into(),
        }
    }
}

impl ItineraryWriter for ClaudeItineraryWriter {
    fn write(&self, request: ItineraryRequest) -> BoxFuture<'static, Result<String, ItineraryError>> {
        let client = self.client.clone();
        let messages_request = MessagesRequest::new(vec![Message::user(build_prompt(
            &self.organization,
            &request,
        ))])
        .with_model(self.model.clone())
        .with_max_tokens(self.max_tokens);

        Box::pin(async move {
            let response = client.messages(messages_request).await?;
            Ok(response.text())
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::types::SessionId;

    fn picks() -> Vec<Session> {
        let catalog = Catalog::seed();
        ["s1-1", "s2-2"]
            .iter()
            .map(|id| catalog.session(&SessionId::new(*id)).unwrap().clone())
            .collect()
    }

    #[test]
    fn test_fallback_format() {
        let text = fallback_itinerary("Dana", &picks());

        assert_eq!(
            text,
            "## Professional Development Itinerary\n\n\
             **Attendee:** Dana\n\n\
             ### AI in the Classroom: Beyond the Hype\n\
             * **Presenter:** Dr. Sarah Jenkins\n\
             * **Room:** Library Media Center\n\
             \n\
             ### Advanced Google Workspace for Education\n\
             * **Presenter:** IT Staff\n\
             * **Room:** Computer Lab 1\n"
        );
    }

    #[test]
    fn test_request_serializes_camel_case() {
        let request = ItineraryRequest::new("Dana", &picks());
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["attendeeName"], "Dana");
        assert_eq!(json["sessions"][1]["room"], "Computer Lab 1");
        assert!(json["sessions"][0]["description"].is_string());
    }

    #[test]
    fn test_prompt_mentions_every_session_and_room() {
        let request = ItineraryRequest::new("Dana", &picks());
        let prompt = build_prompt("Barrington 220", &request);

        assert!(prompt.contains("Barrington 220"));
        assert!(prompt.contains("Dana"));
        assert!(prompt.contains("AI in the Classroom: Beyond the Hype"));
        assert!(prompt.contains("Computer Lab 1"));
        assert!(prompt.contains("Key Takeaway"));
    }

    #[tokio::test]
    async fn test_offline_summarizer_uses_fallback() {
        let itinerary = ItinerarySummarizer::offline().summarize("Dana", &picks()).await;

        assert_eq!(itinerary.source, ItinerarySource::Fallback);
        assert_eq!(itinerary.markdown, fallback_itinerary("Dana", &picks()));
    }
}
