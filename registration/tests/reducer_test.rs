//! Reducer transition tests (Given / When / Then, no runtime).

#![allow(clippy::expect_used, clippy::unwrap_used)] // Test code can use unwrap/expect

use pd_registration::mocks::{RecordingSink, StaticEnrollmentSource};
use pd_registration::{
    Catalog, CatalogStatus, Itinerary, ItinerarySource, ItineraryStatus, ItinerarySummarizer,
    RegistrationAction, RegistrationEnvironment, RegistrationReducer, RegistrationState, Session,
    SessionId, SlotId, Stage, SubmissionError, SubmissionStatus, TimeSlot,
};
use pd_registration_core::reducer::Reducer;
use pd_registration_testing::{ReducerTest, assertions, test_clock};
use std::sync::Arc;

fn environment() -> RegistrationEnvironment {
    RegistrationEnvironment::new(
        Arc::new(test_clock()),
        ItinerarySummarizer::offline(),
        Arc::new(RecordingSink::accepting()),
    )
}

fn select(id: &str) -> RegistrationAction {
    RegistrationAction::SelectSession {
        session_id: SessionId::new(id),
    }
}

fn enrolled(state: &RegistrationState, id: &str) -> u32 {
    state.catalog.session(&SessionId::new(id)).unwrap().enrolled
}

/// A wizard that has already passed the welcome screen
fn selecting() -> RegistrationState {
    let mut state = RegistrationState::default();
    let env = environment();
    let reducer = RegistrationReducer::new();
    reducer.reduce(
        &mut state,
        RegistrationAction::EnterName {
            name: "Dana Ortiz".to_string(),
        },
        &env,
    );
    reducer.reduce(&mut state, RegistrationAction::Start, &env);
    assert_eq!(state.stage, Stage::Selecting);
    state
}

fn ready_itinerary() -> Itinerary {
    Itinerary {
        markdown: "## Itinerary".to_string(),
        source: ItinerarySource::Generated,
    }
}

// ========== Welcome ==========

#[test]
fn test_start_requires_a_name() {
    ReducerTest::new(RegistrationReducer::new())
        .with_env(environment())
        .given_state(RegistrationState::default())
        .when_action(RegistrationAction::EnterName {
            name: "   ".to_string(),
        })
        .when_action(RegistrationAction::Start)
        .then_state(|state| {
            assert_eq!(state.stage, Stage::Welcome);
            assert!(state.attendee.is_none());
        })
        .then_effects(assertions::assert_no_effects)
        .run();
}

#[test]
fn test_start_trims_the_name() {
    ReducerTest::new(RegistrationReducer::new())
        .with_env(environment())
        .given_state(RegistrationState::default())
        .when_action(RegistrationAction::EnterName {
            name: "  Dana Ortiz  ".to_string(),
        })
        .when_action(RegistrationAction::Start)
        .then_state(|state| {
            assert_eq!(state.stage, Stage::Selecting);
            assert_eq!(state.attendee.as_ref().unwrap().as_str(), "Dana Ortiz");
        })
        .run();
}

#[test]
fn test_start_waits_for_enrollment_refresh() {
    let mut state = RegistrationState::default();
    state.catalog_status = CatalogStatus::Loading;
    state.name_input = "Dana".to_string();

    ReducerTest::new(RegistrationReducer::new())
        .with_env(environment())
        .given_state(state)
        .when_action(RegistrationAction::Start)
        .then_state(|state| assert_eq!(state.stage, Stage::Welcome))
        .run();
}

// ========== Enrollment ==========

#[test]
fn test_refresh_without_source_settles_immediately() {
    ReducerTest::new(RegistrationReducer::new())
        .with_env(environment())
        .given_state(RegistrationState::default())
        .when_action(RegistrationAction::RefreshEnrollment)
        .then_state(|state| assert_eq!(state.catalog_status, CatalogStatus::Refreshed))
        .then_effects(assertions::assert_no_effects)
        .run();
}

#[test]
fn test_refresh_with_source_loads_in_background() {
    let env = environment().with_enrollment(Arc::new(StaticEnrollmentSource::with_counts([(
        "s1-1", 29,
    )])));

    ReducerTest::new(RegistrationReducer::new())
        .with_env(env)
        .given_state(RegistrationState::default())
        .when_action(RegistrationAction::RefreshEnrollment)
        .then_state(|state| assert_eq!(state.catalog_status, CatalogStatus::Loading))
        .then_effects(assertions::assert_has_future_effect)
        .run();
}

#[test]
fn test_loaded_counts_overlay_the_seed() {
    let mut state = RegistrationState::default();
    state.catalog_status = CatalogStatus::Loading;

    ReducerTest::new(RegistrationReducer::new())
        .with_env(environment())
        .given_state(state)
        .when_action(RegistrationAction::EnrollmentLoaded {
            counts: [(SessionId::new("s1-1"), 29)].into_iter().collect(),
        })
        .then_state(|state| {
            assert_eq!(state.catalog_status, CatalogStatus::Refreshed);
            assert_eq!(enrolled(state, "s1-1"), 29);
            assert_eq!(enrolled(state, "s1-2"), 0);
        })
        .run();
}

#[test]
fn test_failed_refresh_keeps_seed() {
    let mut state = RegistrationState::default();
    state.catalog_status = CatalogStatus::Loading;

    ReducerTest::new(RegistrationReducer::new())
        .with_env(environment())
        .given_state(state)
        .when_action(RegistrationAction::EnrollmentLoadFailed {
            error: "timeout".to_string(),
        })
        .then_state(|state| {
            assert_eq!(state.catalog_status, CatalogStatus::Fallback);
            assert_eq!(state.catalog, Catalog::seed());
        })
        .run();
}

// ========== Selection ==========

#[test]
fn test_switching_within_a_slot_moves_one_seat() {
    ReducerTest::new(RegistrationReducer::new())
        .with_env(environment())
        .given_state(selecting())
        .when_action(select("s1-1"))
        .when_action(select("s1-4"))
        .then_state(|state| {
            assert_eq!(enrolled(state, "s1-1"), 12);
            assert_eq!(enrolled(state, "s1-4"), 6);
            assert_eq!(enrolled(state, "s1-3"), 18);
            assert_eq!(state.progress(), (1, 3));
        })
        .then_effects(assertions::assert_no_effects)
        .run();
}

#[test]
fn test_reselect_leaves_state_untouched() {
    let mut given = selecting();
    RegistrationReducer::new().reduce(&mut given, select("s2-1"), &environment());
    let expected = given.clone();

    ReducerTest::new(RegistrationReducer::new())
        .with_env(environment())
        .given_state(given)
        .when_action(select("s2-1"))
        .then_state(move |state| assert_eq!(state, &expected))
        .run();
}

#[test]
fn test_full_session_leaves_state_untouched() {
    let given = selecting();
    let expected = given.clone();

    ReducerTest::new(RegistrationReducer::new())
        .with_env(environment())
        .given_state(given)
        .when_action(select("s2-4"))
        .then_state(move |state| assert_eq!(state, &expected))
        .run();
}

#[test]
fn test_full_session_stays_rejected_after_picking_another() {
    // slot-1: A (cap 1, enrolled 1), B (cap 5, enrolled 0)
    let session = |id: &str, capacity: u32, enrolled: u32| Session {
        id: SessionId::new(id),
        slot_id: SlotId::new("slot-1"),
        title: id.to_string(),
        description: String::new(),
        presenter: "P".to_string(),
        room: "R".to_string(),
        capacity,
        enrolled,
    };
    let catalog = Catalog::new(
        vec![TimeSlot::new("slot-1", "Session Block 1", "08:30 AM", "09:45 AM")],
        vec![session("A", 1, 1), session("B", 5, 0)],
    )
    .unwrap();
    let mut state = RegistrationState::new(catalog);
    state.stage = Stage::Selecting;

    ReducerTest::new(RegistrationReducer::new())
        .with_env(environment())
        .given_state(state.clone())
        .when_action(select("A"))
        .then_state(move |after| assert_eq!(after, &state))
        .run();

    let mut state = RegistrationState::new(
        Catalog::new(
            vec![TimeSlot::new("slot-1", "Session Block 1", "08:30 AM", "09:45 AM")],
            vec![session("A", 1, 1), session("B", 5, 0)],
        )
        .unwrap(),
    );
    state.stage = Stage::Selecting;

    ReducerTest::new(RegistrationReducer::new())
        .with_env(environment())
        .given_state(state)
        .when_action(select("A"))
        .when_action(select("B"))
        .when_action(select("A"))
        .then_state(|state| {
            assert_eq!(state.selections.get(&SlotId::new("slot-1")), Some(&SessionId::new("B")));
            assert_eq!(state.selections.len(), 1);
            assert_eq!(enrolled(state, "A"), 1);
            assert_eq!(enrolled(state, "B"), 1);
        })
        .run();
}

#[test]
fn test_selection_ignored_on_welcome_screen() {
    ReducerTest::new(RegistrationReducer::new())
        .with_env(environment())
        .given_state(RegistrationState::default())
        .when_action(select("s1-1"))
        .then_state(|state| {
            assert!(state.selections.is_empty());
            assert_eq!(state.catalog, Catalog::seed());
        })
        .run();
}

// ========== Review ==========

#[test]
fn test_review_needs_a_selection() {
    ReducerTest::new(RegistrationReducer::new())
        .with_env(environment())
        .given_state(selecting())
        .when_action(RegistrationAction::OpenReview)
        .then_state(|state| assert!(state.review.is_none()))
        .then_effects(assertions::assert_no_effects)
        .run();
}

#[test]
fn test_open_review_starts_itinerary() {
    ReducerTest::new(RegistrationReducer::new())
        .with_env(environment())
        .given_state(selecting())
        .when_action(select("s3-1"))
        .when_action(select("s1-4"))
        .when_action(RegistrationAction::OpenReview)
        .then_state(|state| {
            let review = state.review.as_ref().unwrap();
            assert_eq!(review.epoch, 1);
            assert_eq!(review.itinerary, ItineraryStatus::Loading);
            assert_eq!(review.submission, SubmissionStatus::Idle);
            let ids: Vec<_> = review.sessions.iter().map(|s| s.id.to_string()).collect();
            assert_eq!(ids, vec!["s1-4", "s3-1"]);
        })
        .then_effects(|effects| assertions::assert_effects_count(effects, 1))
        .then_effects(assertions::assert_has_future_effect)
        .run();
}

#[test]
fn test_stale_itinerary_is_discarded() {
    ReducerTest::new(RegistrationReducer::new())
        .with_env(environment())
        .given_state(selecting())
        .when_action(select("s1-1"))
        .when_action(RegistrationAction::OpenReview)
        .when_action(RegistrationAction::CloseReview)
        .when_action(RegistrationAction::OpenReview)
        .when_action(RegistrationAction::ItineraryGenerated {
            epoch: 1,
            itinerary: ready_itinerary(),
        })
        .then_state(|state| {
            let review = state.review.as_ref().unwrap();
            assert_eq!(review.epoch, 2);
            assert_eq!(review.itinerary, ItineraryStatus::Loading);
        })
        .run();
}

#[test]
fn test_selection_locked_while_reviewing() {
    ReducerTest::new(RegistrationReducer::new())
        .with_env(environment())
        .given_state(selecting())
        .when_action(select("s1-1"))
        .when_action(RegistrationAction::OpenReview)
        .when_action(select("s1-4"))
        .then_state(|state| {
            assert_eq!(enrolled(state, "s1-1"), 13);
            assert_eq!(enrolled(state, "s1-4"), 5);
        })
        .run();
}

// ========== Submission ==========

#[test]
fn test_submit_ignored_while_itinerary_loading() {
    ReducerTest::new(RegistrationReducer::new())
        .with_env(environment())
        .given_state(selecting())
        .when_action(select("s1-1"))
        .when_action(RegistrationAction::OpenReview)
        .when_action(RegistrationAction::Submit)
        .then_state(|state| {
            assert_eq!(state.review.as_ref().unwrap().submission, SubmissionStatus::Idle);
        })
        .then_effects(assertions::assert_no_effects)
        .run();
}

#[test]
fn test_submit_then_duplicate_submit_is_ignored() {
    ReducerTest::new(RegistrationReducer::new())
        .with_env(environment())
        .given_state(selecting())
        .when_action(select("s1-1"))
        .when_action(RegistrationAction::OpenReview)
        .when_action(RegistrationAction::ItineraryGenerated {
            epoch: 1,
            itinerary: ready_itinerary(),
        })
        .when_action(RegistrationAction::Submit)
        .when_action(RegistrationAction::Submit)
        .then_state(|state| {
            assert_eq!(state.review.as_ref().unwrap().submission, SubmissionStatus::Submitting);
        })
        .then_effects(assertions::assert_no_effects)
        .run();
}

#[test]
fn test_failed_submission_can_be_retried() {
    ReducerTest::new(RegistrationReducer::new())
        .with_env(environment())
        .given_state(selecting())
        .when_action(select("s1-1"))
        .when_action(RegistrationAction::OpenReview)
        .when_action(RegistrationAction::ItineraryGenerated {
            epoch: 1,
            itinerary: ready_itinerary(),
        })
        .when_action(RegistrationAction::Submit)
        .when_action(RegistrationAction::SubmissionCompleted {
            epoch: 1,
            result: Err(SubmissionError::Transport("offline".to_string())),
        })
        .when_action(RegistrationAction::Submit)
        .then_state(|state| {
            assert_eq!(state.review.as_ref().unwrap().submission, SubmissionStatus::Submitting);
        })
        .then_effects(assertions::assert_has_future_effect)
        .run();
}

#[test]
fn test_succeeded_is_terminal() {
    ReducerTest::new(RegistrationReducer::new())
        .with_env(environment())
        .given_state(selecting())
        .when_action(select("s1-1"))
        .when_action(RegistrationAction::OpenReview)
        .when_action(RegistrationAction::ItineraryGenerated {
            epoch: 1,
            itinerary: ready_itinerary(),
        })
        .when_action(RegistrationAction::Submit)
        .when_action(RegistrationAction::SubmissionCompleted {
            epoch: 1,
            result: Ok(()),
        })
        .when_action(RegistrationAction::Submit)
        .then_state(|state| {
            assert_eq!(state.review.as_ref().unwrap().submission, SubmissionStatus::Succeeded);
        })
        .then_effects(assertions::assert_no_effects)
        .run();
}

#[test]
fn test_result_after_close_is_discarded() {
    ReducerTest::new(RegistrationReducer::new())
        .with_env(environment())
        .given_state(selecting())
        .when_action(select("s1-1"))
        .when_action(RegistrationAction::OpenReview)
        .when_action(RegistrationAction::ItineraryGenerated {
            epoch: 1,
            itinerary: ready_itinerary(),
        })
        .when_action(RegistrationAction::Submit)
        .when_action(RegistrationAction::CloseReview)
        .when_action(RegistrationAction::SubmissionCompleted {
            epoch: 1,
            result: Ok(()),
        })
        .then_state(|state| assert!(state.review.is_none()))
        .run();
}

// ========== Restart ==========

#[test]
fn test_restart_releases_seats_and_keeps_name_input() {
    ReducerTest::new(RegistrationReducer::new())
        .with_env(environment())
        .given_state(selecting())
        .when_action(select("s1-1"))
        .when_action(select("s2-3"))
        .when_action(RegistrationAction::OpenReview)
        .when_action(RegistrationAction::Restart)
        .then_state(|state| {
            assert_eq!(state.stage, Stage::Welcome);
            assert!(state.selections.is_empty());
            assert!(state.review.is_none());
            assert!(state.attendee.is_none());
            assert_eq!(state.name_input, "Dana Ortiz");
            assert_eq!(state.catalog, Catalog::seed());
        })
        .run();
}
