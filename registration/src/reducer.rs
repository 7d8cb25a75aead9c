//! The registration wizard reducer.
//!
//! Every user action and every background result passes through
//! [`RegistrationReducer::reduce`]. A selection is applied in full (map entry
//! plus both ledger updates) inside one call, so the Store never exposes a
//! half-updated catalog.

use crate::actions::RegistrationAction;
use crate::environment::RegistrationEnvironment;
use crate::selection::{self, SelectionOutcome};
use crate::state::{
    CatalogStatus, ItineraryStatus, RegistrationState, ReviewState, Stage, SubmissionStatus,
};
use crate::submitter::RegistrationPayload;
use crate::types::Attendee;
use pd_registration_core::{async_effect, effect::Effect, reducer::Reducer, smallvec, SmallVec};

/// Reducer for the registration wizard
#[derive(Clone, Debug, Default)]
pub struct RegistrationReducer;

impl RegistrationReducer {
    /// Creates the reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// The open review for `epoch`, if it is still the current one
    fn current_review(state: &mut RegistrationState, epoch: u64) -> Option<&mut ReviewState> {
        state.review.as_mut().filter(|review| review.epoch == epoch)
    }
}

impl Reducer for RegistrationReducer {
    type State = RegistrationState;
    type Action = RegistrationAction;
    type Environment = RegistrationEnvironment;

    #[allow(clippy::too_many_lines)] // One arm per action
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Enrollment ==========
            RegistrationAction::RefreshEnrollment => {
                if state.catalog_status != CatalogStatus::Seed
                    || state.stage != Stage::Welcome
                    || !state.selections.is_empty()
                {
                    tracing::debug!(status = ?state.catalog_status, "Enrollment refresh skipped");
                    return SmallVec::new();
                }

                let Some(source) = env.enrollment.clone() else {
                    tracing::debug!("No enrollment source, using seed numbers");
                    state.catalog_status = CatalogStatus::Refreshed;
                    return SmallVec::new();
                };

                state.catalog_status = CatalogStatus::Loading;
                smallvec![async_effect! {
                    Some(match source.fetch_counts().await {
                        Ok(counts) => RegistrationAction::EnrollmentLoaded { counts },
                        Err(error) => RegistrationAction::EnrollmentLoadFailed {
                            error: error.to_string(),
                        },
                    })
                }]
            },

            RegistrationAction::EnrollmentLoaded { counts } => {
                if state.catalog_status != CatalogStatus::Loading {
                    return SmallVec::new();
                }
                state.catalog.overlay_enrollment(&counts);
                state.catalog_status = CatalogStatus::Refreshed;
                tracing::info!(sessions = counts.len(), "Live enrollment applied");
                SmallVec::new()
            },

            RegistrationAction::EnrollmentLoadFailed { error } => {
                if state.catalog_status != CatalogStatus::Loading {
                    return SmallVec::new();
                }
                state.catalog_status = CatalogStatus::Fallback;
                tracing::warn!(%error, "Enrollment refresh failed, keeping seed numbers");
                SmallVec::new()
            },

            // ========== Welcome ==========
            RegistrationAction::EnterName { name } => {
                if state.stage == Stage::Welcome {
                    state.name_input = name;
                }
                SmallVec::new()
            },

            RegistrationAction::Start => {
                if state.stage != Stage::Welcome || !state.catalog_status.is_settled() {
                    tracing::debug!(status = ?state.catalog_status, "Start ignored");
                    return SmallVec::new();
                }
                let Some(attendee) = Attendee::parse(&state.name_input) else {
                    tracing::debug!("Start ignored: name is blank");
                    return SmallVec::new();
                };

                tracing::info!(attendee = %attendee, "Attendee started selecting sessions");
                state.attendee = Some(attendee);
                state.stage = Stage::Selecting;
                SmallVec::new()
            },

            // ========== Selection ==========
            RegistrationAction::SelectSession { session_id } => {
                if state.stage != Stage::Selecting || state.review.is_some() {
                    tracing::debug!(%session_id, "Selection ignored outside the selection screen");
                    return SmallVec::new();
                }

                match selection::select_session(&mut state.catalog, &mut state.selections, &session_id) {
                    SelectionOutcome::Selected { previous } => {
                        tracing::debug!(%session_id, previous = ?previous, "Session selected");
                    },
                    outcome => {
                        tracing::debug!(%session_id, ?outcome, "Selection rejected");
                    },
                }
                SmallVec::new()
            },

            // ========== Review ==========
            RegistrationAction::OpenReview => {
                if state.stage != Stage::Selecting
                    || state.selections.is_empty()
                    || state.review.is_some()
                {
                    return SmallVec::new();
                }
                let Some(attendee) = state.attendee.clone() else {
                    return SmallVec::new();
                };

                state.review_epoch += 1;
                let epoch = state.review_epoch;
                let sessions = state.selected_sessions();
                state.review = Some(ReviewState {
                    epoch,
                    sessions: sessions.clone(),
                    itinerary: ItineraryStatus::Loading,
                    submission: SubmissionStatus::Idle,
                });
                tracing::info!(epoch, sessions = sessions.len(), "Review opened");

                let summarizer = env.summarizer.clone();
                smallvec![async_effect! {
                    let itinerary = summarizer.summarize(attendee.as_str(), &sessions).await;
                    Some(RegistrationAction::ItineraryGenerated { epoch, itinerary })
                }]
            },

            RegistrationAction::CloseReview => {
                if let Some(review) = state.review.take() {
                    tracing::debug!(epoch = review.epoch, "Review closed");
                }
                SmallVec::new()
            },

            RegistrationAction::ItineraryGenerated { epoch, itinerary } => {
                match Self::current_review(state, epoch) {
                    Some(review) if review.itinerary == ItineraryStatus::Loading => {
                        review.itinerary = ItineraryStatus::Ready(itinerary);
                    },
                    _ => tracing::debug!(epoch, "Discarding stale itinerary"),
                }
                SmallVec::new()
            },

            // ========== Submission ==========
            RegistrationAction::Submit => {
                let Some(attendee) = state.attendee.clone() else {
                    return SmallVec::new();
                };
                let Some(review) = state.review.as_mut() else {
                    return SmallVec::new();
                };
                if !review.can_submit() {
                    tracing::debug!(submission = ?review.submission, "Submit ignored");
                    return SmallVec::new();
                }

                review.submission = SubmissionStatus::Submitting;
                let epoch = review.epoch;
                let payload = RegistrationPayload::new(
                    attendee.as_str(),
                    &review.sessions,
                    &state.catalog,
                    env.clock.now(),
                );
                tracing::info!(epoch, "Submitting registration");

                let sink = env.sink.clone();
                smallvec![async_effect! {
                    let result = sink.deliver(payload).await;
                    Some(RegistrationAction::SubmissionCompleted { epoch, result })
                }]
            },

            RegistrationAction::SubmissionCompleted { epoch, result } => {
                match Self::current_review(state, epoch) {
                    Some(review) if review.submission == SubmissionStatus::Submitting => {
                        review.submission = match result {
                            Ok(()) => SubmissionStatus::Succeeded,
                            Err(error) => SubmissionStatus::Failed(error),
                        };
                        tracing::info!(epoch, submission = ?review.submission, "Submission finished");
                    },
                    _ => tracing::debug!(epoch, "Discarding stale submission result"),
                }
                SmallVec::new()
            },

            // ========== Restart ==========
            RegistrationAction::Restart => {
                selection::release_all(&mut state.catalog, &mut state.selections);
                state.review = None;
                state.attendee = None;
                state.stage = Stage::Welcome;
                tracing::info!("Wizard restarted");
                SmallVec::new()
            },
        }
    }
}
