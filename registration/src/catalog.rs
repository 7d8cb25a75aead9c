//! The day's schedule: ordered time slots and the sessions offered in each.

use crate::error::CatalogError;
use crate::types::{Session, SessionId, SlotId, TimeSlot};
use std::collections::{HashMap, HashSet};

/// Ordered slots plus every session, with live enrollment counters
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalog {
    slots: Vec<TimeSlot>,
    sessions: Vec<Session>,
}

impl Catalog {
    /// Builds a catalog, checking ids are unique and every session has a slot
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] on duplicate ids, a dangling slot reference,
    /// or a zero capacity.
    pub fn new(slots: Vec<TimeSlot>, sessions: Vec<Session>) -> Result<Self, CatalogError> {
        let mut slot_ids = HashSet::new();
        for slot in &slots {
            if !slot_ids.insert(&slot.id) {
                return Err(CatalogError::DuplicateId(slot.id.to_string()));
            }
        }

        let mut session_ids = HashSet::new();
        for session in &sessions {
            if !session_ids.insert(&session.id) {
                return Err(CatalogError::DuplicateId(session.id.to_string()));
            }
            if !slot_ids.contains(&session.slot_id) {
                return Err(CatalogError::UnknownSlot {
                    session: session.id.to_string(),
                    slot: session.slot_id.to_string(),
                });
            }
            if session.capacity == 0 {
                return Err(CatalogError::ZeroCapacity(session.id.to_string()));
            }
        }

        Ok(Self { slots, sessions })
    }

    /// Slots in schedule order
    #[must_use]
    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    /// All sessions in catalog order
    #[must_use]
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// Look up a slot
    #[must_use]
    pub fn slot(&self, id: &SlotId) -> Option<&TimeSlot> {
        self.slots.iter().find(|slot| &slot.id == id)
    }

    /// Look up a session
    #[must_use]
    pub fn session(&self, id: &SessionId) -> Option<&Session> {
        self.sessions.iter().find(|session| &session.id == id)
    }

    pub(crate) fn session_mut(&mut self, id: &SessionId) -> Option<&mut Session> {
        self.sessions.iter_mut().find(|session| &session.id == id)
    }

    /// Sessions offered in one slot, in catalog order
    pub fn sessions_in_slot<'a>(&'a self, slot: &'a SlotId) -> impl Iterator<Item = &'a Session> + 'a {
        self.sessions.iter().filter(move |session| &session.slot_id == slot)
    }

    /// Replace every session's enrollment with a fetched count
    ///
    /// Sessions absent from `counts` drop to 0. Counts above capacity are kept
    /// as-is; such a session simply reads as full.
    pub fn overlay_enrollment(&mut self, counts: &HashMap<SessionId, u32>) {
        for session in &mut self.sessions {
            session.enrolled = counts.get(&session.id).copied().unwrap_or(0);
        }
    }

    /// The district's PD-day schedule with its starting enrollment
    #[must_use]
    pub fn seed() -> Self {
        let slots = vec![
            TimeSlot::new("slot-1", "Session Block 1", "08:30 AM", "09:45 AM"),
            TimeSlot::new("slot-2", "Session Block 2", "10:00 AM", "11:15 AM"),
            TimeSlot::new("slot-3", "Session Block 3", "01:00 PM", "02:15 PM"),
        ];

        let sessions = vec![
            seed_session(
                "s1-1",
                "slot-1",
                "AI in the Classroom: Beyond the Hype",
                "Practical classroom uses of generative AI tools, from lesson planning to differentiated feedback, and how to talk with students about them.",
                "Dr. Sarah Jenkins",
                "Library Media Center",
                30,
                12,
            ),
            seed_session(
                "s1-2",
                "slot-1",
                "Social Emotional Learning (SEL) Integrations",
                "Weaving SEL competencies into everyday academic routines without adding to the schedule.",
                "Mark Thompson",
                "Room 104",
                25,
                25,
            ),
            seed_session(
                "s1-3",
                "slot-1",
                "Data-Driven Instruction with Canvas",
                "Turning Canvas gradebook and quiz analytics into targeted reteaching and small-group plans.",
                "Emily Chen",
                "Computer Lab 2",
                20,
                18,
            ),
            seed_session(
                "s1-4",
                "slot-1",
                "Inclusive Practices for Diverse Learners",
                "Universal Design for Learning strategies that open core instruction to every learner in the room.",
                "David Rodriguez",
                "Room 208",
                35,
                5,
            ),
            seed_session(
                "s2-1",
                "slot-2",
                "Project-Based Learning: From Idea to Execution",
                "Planning, scaffolding and assessing a student-driven project from the driving question to the public showcase.",
                "Jessica Alverez",
                "Innovation Lab",
                25,
                20,
            ),
            seed_session(
                "s2-2",
                "slot-2",
                "Advanced Google Workspace for Education",
                "Time-saving Docs, Forms and Classroom workflows for feedback, collaboration and organization.",
                "IT Staff",
                "Computer Lab 1",
                30,
                10,
            ),
            seed_session(
                "s2-3",
                "slot-2",
                "Culturally Responsive Teaching",
                "Building on students' cultural assets to raise engagement and rigor across content areas.",
                "Dr. Alan Smith",
                "Room 112",
                40,
                38,
            ),
            seed_session(
                "s2-4",
                "slot-2",
                "Gamification Strategies for Engagement",
                "Using game mechanics such as points, quests and badges to boost motivation and participation.",
                "Chris Baker",
                "Room 105",
                25,
                25,
            ),
            seed_session(
                "s3-1",
                "slot-3",
                "Restorative Justice Circles",
                "Running restorative circles to build community and repair harm in place of exclusionary discipline.",
                "Counseling Dept",
                "Room 202",
                20,
                5,
            ),
            seed_session(
                "s3-2",
                "slot-3",
                "STEM for Elementary Educators",
                "Hands-on, low-cost engineering and science challenges for young learners.",
                "Lisa Wong",
                "Science Lab 3",
                25,
                15,
            ),
            seed_session(
                "s3-3",
                "slot-3",
                "Literacy Across the Curriculum",
                "Reading and writing strategies every content-area teacher can use to deepen understanding.",
                "English Dept Head",
                "Room 110",
                35,
                30,
            ),
        ];

        Self { slots, sessions }
    }
}

#[allow(clippy::too_many_arguments)]
fn seed_session(
    id: &str,
    slot: &str,
    title: &str,
    description: &str,
    presenter: &str,
    room: &str,
    capacity: u32,
    enrolled: u32,
) -> Session {
    Session {
        id: SessionId::new(id),
        slot_id: SlotId::new(slot),
        title: title.to_string(),
        description: description.to_string(),
        presenter: presenter.to_string(),
        room: room.to_string(),
        capacity,
        enrolled,
    }
}
