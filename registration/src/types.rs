//! Domain types for the PD registration wizard.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// How many open seats still count as "almost full"
pub const NEAR_FULL_MARGIN: u32 = 5;

// ============================================================================
// Identifiers
// ============================================================================

/// Identifier of a workshop session (e.g. `s1-2`)
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Creates a new `SessionId`
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Identifier of a time slot (e.g. `slot-1`)
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(String);

impl SlotId {
    /// Creates a new `SlotId`
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SlotId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

// ============================================================================
// Catalog entries
// ============================================================================

/// A scheduled time block; each admits exactly one selection
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Slot identifier
    pub id: SlotId,
    /// Display label (e.g. "Session Block 1")
    pub label: String,
    /// Start time as displayed
    pub start_time: String,
    /// End time as displayed
    pub end_time: String,
}

impl TimeSlot {
    /// Creates a new `TimeSlot`
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            id: SlotId::new(id),
            label: label.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }

    /// "08:30 AM - 09:45 AM"
    #[must_use]
    pub fn time_range(&self) -> String {
        format!("{} - {}", self.start_time, self.end_time)
    }
}

/// A workshop offered within one slot
///
/// `enrolled` is only ever changed through [`crate::ledger`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Session identifier
    pub id: SessionId,
    /// Owning slot
    pub slot_id: SlotId,
    /// Title
    pub title: String,
    /// Short description
    pub description: String,
    /// Presenter name
    pub presenter: String,
    /// Room
    pub room: String,
    /// Seats offered, fixed for the session's lifetime
    pub capacity: u32,
    /// Seats claimed
    pub enrolled: u32,
}

impl Session {
    /// Whether no seat is left
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.enrolled >= self.capacity
    }

    /// Open seats (0 when full or overbooked)
    #[must_use]
    pub const fn spots_left(&self) -> u32 {
        self.capacity.saturating_sub(self.enrolled)
    }

    /// Not full, but within [`NEAR_FULL_MARGIN`] seats of it
    #[must_use]
    pub const fn is_near_full(&self) -> bool {
        !self.is_full() && self.enrolled >= self.capacity.saturating_sub(NEAR_FULL_MARGIN)
    }

    /// Fill level in percent, capped at 100
    #[must_use]
    pub fn fill_percentage(&self) -> u32 {
        if self.capacity == 0 {
            return 100;
        }
        let percent = u64::from(self.enrolled) * 100 / u64::from(self.capacity);
        u32::try_from(percent.min(100)).unwrap_or(100)
    }
}

// ============================================================================
// Selection map
// ============================================================================

/// Chosen session per slot
///
/// Ordered by slot id so projections come out deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionMap(BTreeMap<SlotId, SessionId>);

impl SelectionMap {
    /// Creates an empty map
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current choice for a slot
    #[must_use]
    pub fn get(&self, slot: &SlotId) -> Option<&SessionId> {
        self.0.get(slot)
    }

    /// Whether the session is someone's current choice
    #[must_use]
    pub fn contains_session(&self, session: &SessionId) -> bool {
        self.0.values().any(|chosen| chosen == session)
    }

    /// Number of slots with a selection
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing is selected yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in slot-id order
    pub fn iter(&self) -> impl Iterator<Item = (&SlotId, &SessionId)> {
        self.0.iter()
    }

    pub(crate) fn insert(&mut self, slot: SlotId, session: SessionId) -> Option<SessionId> {
        self.0.insert(slot, session)
    }

    pub(crate) fn take_all(&mut self) -> Vec<SessionId> {
        std::mem::take(&mut self.0).into_values().collect()
    }
}

// ============================================================================
// Attendee
// ============================================================================

/// Name the attendee signed in with (trimmed, never empty)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attendee(String);

impl Attendee {
    /// Accepts a raw name if anything is left after trimming
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
    }

    /// The display name
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Attendee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
