//! In-memory collaborators for tests and offline runs.

use crate::enrollment::EnrollmentSource;
use crate::error::{EnrollmentError, ItineraryError, SubmissionError};
use crate::submitter::{RegistrationPayload, RegistrationSink};
use crate::summarizer::{ItineraryRequest, ItineraryWriter};
use crate::types::SessionId;
use futures::future::BoxFuture;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Answers every fetch with the same result
#[derive(Clone, Debug)]
pub struct StaticEnrollmentSource {
    result: Result<HashMap<SessionId, u32>, EnrollmentError>,
}

impl StaticEnrollmentSource {
    /// Source returning `counts`
    #[must_use]
    pub fn with_counts<I, K>(counts: I) -> Self
    where
        I: IntoIterator<Item = (K, u32)>,
        K: Into<SessionId>,
    {
        Self {
            result: Ok(counts.into_iter().map(|(id, n)| (id.into(), n)).collect()),
        }
    }

    /// Source that always fails
    #[must_use]
    pub const fn failing(error: EnrollmentError) -> Self {
        Self { result: Err(error) }
    }
}

impl EnrollmentSource for StaticEnrollmentSource {
    fn fetch_counts(&self) -> BoxFuture<'static, Result<HashMap<SessionId, u32>, EnrollmentError>> {
        let result = self.result.clone();
        Box::pin(async move { result })
    }
}

#[derive(Clone, Debug)]
enum WriterReply {
    Text(String),
    Empty,
    Fail,
}

/// Records every request and answers with a canned reply
#[derive(Clone, Debug)]
pub struct RecordingItineraryWriter {
    reply: WriterReply,
    requests: Arc<Mutex<Vec<ItineraryRequest>>>,
}

impl RecordingItineraryWriter {
    /// Writer answering with `text`
    #[must_use]
    pub fn replying(text: impl Into<String>) -> Self {
        Self::with_reply(WriterReply::Text(text.into()))
    }

    /// Writer answering with no text at all
    #[must_use]
    pub fn empty() -> Self {
        Self::with_reply(WriterReply::Empty)
    }

    /// Writer that always fails
    #[must_use]
    pub fn failing() -> Self {
        Self::with_reply(WriterReply::Fail)
    }

    fn with_reply(reply: WriterReply) -> Self {
        Self {
            reply,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Requests received so far
    #[must_use]
    pub fn requests(&self) -> Vec<ItineraryRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ItineraryWriter for RecordingItineraryWriter {
    fn write(&self, request: ItineraryRequest) -> BoxFuture<'static, Result<String, ItineraryError>> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);

        let reply = match &self.reply {
            WriterReply::Text(text) => Ok(text.clone()),
            WriterReply::Empty => Ok(String::new()),
            WriterReply::Fail => Err(ItineraryError::NotConfigured),
        };
        Box::pin(async move { reply })
    }
}

/// Records every payload and answers with a fixed outcome
#[derive(Clone, Debug)]
pub struct RecordingSink {
    outcome: Result<(), SubmissionError>,
    payloads: Arc<Mutex<Vec<RegistrationPayload>>>,
}

impl RecordingSink {
    /// Sink that accepts everything
    #[must_use]
    pub fn accepting() -> Self {
        Self::with_outcome(Ok(()))
    }

    /// Sink that always fails with `error`
    #[must_use]
    pub fn failing(error: SubmissionError) -> Self {
        Self::with_outcome(Err(error))
    }

    fn with_outcome(outcome: Result<(), SubmissionError>) -> Self {
        Self {
            outcome,
            payloads: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Payloads delivered so far
    #[must_use]
    pub fn payloads(&self) -> Vec<RegistrationPayload> {
        self.payloads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl RegistrationSink for RecordingSink {
    fn deliver(&self, payload: RegistrationPayload) -> BoxFuture<'static, Result<(), SubmissionError>> {
        self.payloads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(payload);

        let outcome = self.outcome.clone();
        Box::pin(async move { outcome })
    }
}
