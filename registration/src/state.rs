//! Wizard state: one attendee's walk from welcome to submitted registration.

use crate::catalog::Catalog;
use crate::error::SubmissionError;
use crate::summarizer::Itinerary;
use crate::types::{Attendee, SelectionMap, Session};

/// Which screen the attendee is on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Stage {
    /// Entering a name
    #[default]
    Welcome,
    /// Picking sessions
    Selecting,
}

/// Where the catalog's enrollment numbers came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CatalogStatus {
    /// Built-in starting numbers, no refresh attempted
    #[default]
    Seed,
    /// Refresh in flight; the wizard can't start yet
    Loading,
    /// Live counts applied
    Refreshed,
    /// Refresh failed; seed numbers kept
    Fallback,
}

impl CatalogStatus {
    /// Whether the catalog is ready to be shown
    #[must_use]
    pub const fn is_settled(self) -> bool {
        !matches!(self, Self::Loading)
    }
}

/// Itinerary pane of the review surface
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ItineraryStatus {
    /// Being written
    Loading,
    /// Ready to show, copy or save
    Ready(Itinerary),
}

/// Submission pane of the review surface
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    /// Not submitted yet
    #[default]
    Idle,
    /// Write in flight
    Submitting,
    /// Delivered
    Succeeded,
    /// Failed; may be retried
    Failed(SubmissionError),
}

/// An open review surface
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewState {
    /// Identifies this opening; async results carrying another epoch are stale
    pub epoch: u64,
    /// Sessions under review, in slot order
    pub sessions: Vec<Session>,
    /// Itinerary pane
    pub itinerary: ItineraryStatus,
    /// Submission pane
    pub submission: SubmissionStatus,
}

impl ReviewState {
    /// The itinerary, once written
    #[must_use]
    pub fn itinerary(&self) -> Option<&Itinerary> {
        match &self.itinerary {
            ItineraryStatus::Ready(itinerary) => Some(itinerary),
            ItineraryStatus::Loading => None,
        }
    }

    /// Whether a submit would be accepted now
    #[must_use]
    pub const fn can_submit(&self) -> bool {
        matches!(self.itinerary, ItineraryStatus::Ready(_))
            && matches!(
                self.submission,
                SubmissionStatus::Idle | SubmissionStatus::Failed(_)
            )
    }
}

/// Complete wizard state
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistrationState {
    /// Current screen
    pub stage: Stage,
    /// Raw text of the name field
    pub name_input: String,
    /// Set once the attendee starts
    pub attendee: Option<Attendee>,
    /// Sessions with live counters
    pub catalog: Catalog,
    /// Provenance of the enrollment numbers
    pub catalog_status: CatalogStatus,
    /// Chosen session per slot
    pub selections: SelectionMap,
    /// Open review surface, if any
    pub review: Option<ReviewState>,
    /// Epoch handed to the most recent review opening
    pub review_epoch: u64,
}

impl RegistrationState {
    /// Fresh wizard over a catalog
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            stage: Stage::Welcome,
            name_input: String::new(),
            attendee: None,
            catalog,
            catalog_status: CatalogStatus::Seed,
            selections: SelectionMap::new(),
            review: None,
            review_epoch: 0,
        }
    }

    /// (selected slots, total slots)
    #[must_use]
    pub fn progress(&self) -> (usize, usize) {
        (self.selections.len(), self.catalog.slots().len())
    }

    /// Every slot has a selection
    #[must_use]
    pub fn is_complete(&self) -> bool {
        let (selected, total) = self.progress();
        selected == total
    }

    /// Chosen sessions ordered by slot id
    #[must_use]
    pub fn selected_sessions(&self) -> Vec<Session> {
        self.selections
            .iter()
            .filter_map(|(_, session_id)| self.catalog.session(session_id))
            .cloned()
            .collect()
    }
}

impl Default for RegistrationState {
    fn default() -> Self {
        Self::new(Catalog::seed())
    }
}
