//! Bounded enrollment counter updates.
//!
//! The only place `Session::enrolled` changes after load. Increments saturate,
//! decrements stop at zero, and an unknown session id is a silent no-op.

use crate::catalog::Catalog;
use crate::types::SessionId;

/// Claim a seat. Returns the new count, or `None` for an unknown session.
pub fn increment(catalog: &mut Catalog, session_id: &SessionId) -> Option<u32> {
    let session = catalog.session_mut(session_id)?;
    session.enrolled = session.enrolled.saturating_add(1);
    Some(session.enrolled)
}

/// Release a seat. Returns the new count, or `None` for an unknown session.
pub fn decrement(catalog: &mut Catalog, session_id: &SessionId) -> Option<u32> {
    let session = catalog.session_mut(session_id)?;
    session.enrolled = session.enrolled.saturating_sub(1);
    Some(session.enrolled)
}
