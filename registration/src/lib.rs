//! # PD Registration
//!
//! Session registration wizard for a district professional-development day.
//!
//! An attendee enters a name, picks at most one session per time slot from a
//! catalog with live seat counters, reviews a personalized itinerary, and
//! submits the registration to the district's collection endpoint.
//!
//! ## Architecture
//!
//! - [`catalog`], [`ledger`], [`selection`]: schedule data and the
//!   one-session-per-slot rule with bounded seat counters
//! - [`summarizer`]: AI-written itinerary with a deterministic fallback
//! - [`submitter`]: fire-and-forget registration delivery
//! - [`reducer`]: the wizard state machine, driven by a
//!   [`pd_registration_runtime::Store`]
//!
//! ## Example
//!
//! ```ignore
//! use pd_registration::{Config, RegistrationAction, RegistrationEnvironment,
//!     RegistrationReducer, RegistrationState};
//! use pd_registration_runtime::Store;
//!
//! let config = Config::from_env();
//! let environment = RegistrationEnvironment::from_config(&config)?;
//! let store = Store::new(RegistrationState::default(), RegistrationReducer::new(), environment);
//!
//! store.send(RegistrationAction::EnterName { name: "Dana".into() }).await?;
//! store.send(RegistrationAction::Start).await?;
//! ```

pub mod actions;
pub mod catalog;
pub mod config;
pub mod enrollment;
pub mod environment;
pub mod error;
pub mod ledger;
pub mod mocks;
pub mod reducer;
pub mod selection;
pub mod state;
pub mod submitter;
pub mod summarizer;
pub mod types;

pub use actions::RegistrationAction;
pub use catalog::Catalog;
pub use config::Config;
pub use environment::RegistrationEnvironment;
pub use error::{CatalogError, ConfigError, EnrollmentError, ItineraryError, SubmissionError};
pub use reducer::RegistrationReducer;
pub use state::{
    CatalogStatus, ItineraryStatus, RegistrationState, ReviewState, Stage, SubmissionStatus,
};
pub use summarizer::{Itinerary, ItinerarySource, ItinerarySummarizer};
pub use types::{Attendee, SelectionMap, Session, SessionId, SlotId, TimeSlot};
