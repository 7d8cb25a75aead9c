//! Error types for the registration wizard.
//!
//! Every failure here is local and non-fatal: callers log it and fall back
//! (seed enrollment, fallback itinerary) or surface it for a retry
//! (submission).

use thiserror::Error;

/// Catalog construction errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Two sessions (or two slots) share an id
    #[error("Duplicate id in catalog: {0}")]
    DuplicateId(String),

    /// A session points at a slot the catalog does not define
    #[error("Session {session} references unknown slot {slot}")]
    UnknownSlot {
        /// Offending session id
        session: String,
        /// Slot id it referenced
        slot: String,
    },

    /// Capacity must be positive
    #[error("Session {0} has zero capacity")]
    ZeroCapacity(String),
}

/// Enrollment refresh errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EnrollmentError {
    /// Network-level failure
    #[error("Enrollment request failed: {0}")]
    Request(String),

    /// Non-success HTTP status
    #[error("Enrollment endpoint answered with status {0}")]
    Status(u16),

    /// Body was not a session-id → count map
    #[error("Enrollment response could not be parsed: {0}")]
    Parse(String),
}

/// Itinerary generation errors
///
/// Never shown to the attendee: any of these swaps in the fallback itinerary.
#[derive(Debug, Error)]
pub enum ItineraryError {
    /// No API credential configured
    #[error("No itinerary writer configured")]
    NotConfigured,

    /// The AI collaborator failed
    #[error("Itinerary writer failed: {0}")]
    Writer(#[from] pd_registration_anthropic::ClaudeError),

    /// The AI collaborator answered with no text
    #[error("Itinerary writer returned an empty response")]
    EmptyResponse,
}

/// Registration submission errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmissionError {
    /// The endpoint is missing or still the placeholder value
    #[error("Registration endpoint is not configured. Ask the event organizer to set REGISTRATION_ENDPOINT_URL.")]
    NotConfigured,

    /// The write never left the machine or the connection failed
    #[error("Could not reach the registration service ({0}). Please try again, or print your schedule instead.")]
    Transport(String),
}

impl SubmissionError {
    /// Whether retrying can succeed without operator intervention
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Configuration errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A value failed validation
    #[error("Configuration validation failed: {0}")]
    Invalid(String),

    /// The HTTP client could not be built
    #[error("HTTP client could not be built: {0}")]
    HttpClient(String),
}
