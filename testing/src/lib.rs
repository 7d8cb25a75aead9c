//! # PD Registration Testing
//!
//! Testing utilities for the registration wizard.
//!
//! This crate provides:
//! - A deterministic [`FixedClock`]
//! - The [`ReducerTest`] Given/When/Then builder
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use pd_registration_testing::{test_clock, ReducerTest};
//!
//! ReducerTest::new(RegistrationReducer::new())
//!     .with_env(test_environment(test_clock()))
//!     .given_state(state_with_catalog())
//!     .when_action(RegistrationAction::SelectSession { session_id })
//!     .then_state(|state| assert_eq!(state.selections.len(), 1))
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use pd_registration_core::environment::Clock;


/// Mock implementations of core environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// # Example
    ///
    /// ```
    /// use pd_registration_testing::mocks::FixedClock;
    /// use pd_registration_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-06-02 08:00:00 UTC)
    ///
    /// # Panics
    ///
    /// Panics if the hardcoded timestamp fails to parse, which cannot happen.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-06-02T08:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, test_clock};
pub use reducer_test::{ReducerTest, assertions};
