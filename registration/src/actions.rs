//! Wizard actions: user input plus the results of background work.

use crate::error::SubmissionError;
use crate::summarizer::Itinerary;
use crate::types::SessionId;
use std::collections::HashMap;

/// Everything that can happen to the wizard
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistrationAction {
    /// Fetch live enrollment counts (once, at startup)
    RefreshEnrollment,
    /// Live counts arrived
    EnrollmentLoaded {
        /// Count per session id
        counts: HashMap<SessionId, u32>,
    },
    /// The refresh failed; keep the seed numbers
    EnrollmentLoadFailed {
        /// Error description
        error: String,
    },

    /// The name field changed
    EnterName {
        /// Raw text
        name: String,
    },
    /// Leave the welcome screen
    Start,

    /// Choose a session for its slot
    SelectSession {
        /// Session to choose
        session_id: SessionId,
    },

    /// Open the review surface and start writing the itinerary
    OpenReview,
    /// Close the review surface
    CloseReview,
    /// The itinerary for a review opening is ready
    ItineraryGenerated {
        /// Opening it was written for
        epoch: u64,
        /// The itinerary
        itinerary: Itinerary,
    },

    /// Send the registration
    Submit,
    /// The registration write finished
    SubmissionCompleted {
        /// Opening it was sent from
        epoch: u64,
        /// Outcome
        result: Result<(), SubmissionError>,
    },

    /// Give back every held seat and return to the welcome screen
    Restart,
}
