//! One-session-per-slot selection, kept consistent with the enrollment counters.

use crate::catalog::Catalog;
use crate::ledger;
use crate::types::{SelectionMap, SessionId};

/// What a selection request did
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// The session is now chosen for its slot
    Selected {
        /// The session it displaced, whose seat was released
        previous: Option<SessionId>,
    },
    /// Already the current choice; nothing changed
    AlreadySelected,
    /// No seat left; nothing changed
    SessionFull,
    /// Not in the catalog; nothing changed
    UnknownSession,
}

impl SelectionOutcome {
    /// Whether the request changed any state
    #[must_use]
    pub const fn changed(&self) -> bool {
        matches!(self, Self::Selected { .. })
    }
}

/// Choose `session_id` for its slot.
///
/// Claims a seat on the new session and releases the seat held by whatever
/// it replaces. Re-selecting the current choice and selecting a full session
/// are no-ops.
pub fn select_session(
    catalog: &mut Catalog,
    selections: &mut SelectionMap,
    session_id: &SessionId,
) -> SelectionOutcome {
    let Some(session) = catalog.session(session_id) else {
        return SelectionOutcome::UnknownSession;
    };

    let slot_id = session.slot_id.clone();
    if selections.get(&slot_id) == Some(session_id) {
        return SelectionOutcome::AlreadySelected;
    }
    if session.is_full() {
        return SelectionOutcome::SessionFull;
    }

    let previous = selections.insert(slot_id, session_id.clone());
    ledger::increment(catalog, session_id);
    if let Some(previous) = &previous {
        ledger::decrement(catalog, previous);
    }

    SelectionOutcome::Selected { previous }
}

/// Drop every selection, handing each held seat back
pub fn release_all(catalog: &mut Catalog, selections: &mut SelectionMap) {
    for session_id in selections.take_all() {
        ledger::decrement(catalog, &session_id);
    }
}
