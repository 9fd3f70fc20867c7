//! Transitioner: a booking status transition engine
//!
//! A booking carries a status. Transitioner moves that status along named
//! transitions ("confirm", "cancel", ...) by consulting a state machine and
//! builds the transitioned booking as a new value. The input booking is
//! never mutated.
//!
//! The engine core is a pure pass over immutable data; the only pluggable
//! side effects are the collaborators you hand it (machine resolution,
//! booking construction, error construction).
//!
//! # Core Concepts
//!
//! - **TransitionTable**: which transitions are legal from which status
//! - **StateMachine**: the contract the engine uses to validate transitions
//! - **BookingFactory**: builds the transitioned booking from a field bag
//! - **TransitionEngine**: ties the pieces together behind `apply`
//! - **EngineError / TransitionRejected**: the two ways `apply` can fail
//!
//! # Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use serde_json::json;
//! use transitioner::{transition_table, Booking, BookingRecord, RecordFactory, TransitionEngine};
//!
//! let engine = TransitionEngine::builder()
//!     .name("bookings")
//!     .table(transition_table! {
//!         "pending" => { "confirm" => "confirmed", "decline" => "declined" },
//!         "confirmed" => { "cancel" => "cancelled" },
//!         "declined" => {},
//!         "cancelled" => {},
//!     })
//!     .booking_factory(RecordFactory)
//!     .build()
//!     .unwrap();
//!
//! let booking = BookingRecord::new(
//!     Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(),
//!     Utc.with_ymd_and_hms(2024, 5, 1, 11, 0, 0).unwrap(),
//!     "pending",
//! )
//! .with_field("notes", json!("vip"));
//!
//! let confirmed = engine.apply(&booking, "confirm").unwrap();
//! assert_eq!(confirmed.status(), "confirmed");
//! assert_eq!(confirmed.field("notes"), Some(&json!("vip")));
//!
//! let rejected = engine.apply(&booking, "cancel").unwrap_err();
//! let rejected = rejected.as_rejection().unwrap();
//! assert_eq!(rejected.booking(), Some(&booking));
//! assert_eq!(rejected.engine().map(|id| id.name()), Some("bookings"));
//! ```

pub mod builder;
pub mod core;
pub mod engine;
pub mod error;
pub mod machine;

// Re-export commonly used types
pub use builder::{BuildError, EngineBuilder, EngineSettings};
pub use core::{Booking, BookingData, BookingRecord, StateKey, TransitionName, TransitionTable};
pub use engine::{BookingFactory, ExtraFields, RecordFactory, TransitionEngine};
pub use error::{EngineError, EngineId, TransitionError, TransitionRejected};
pub use machine::{ReadableStateMachine, StateMachine, TableMachine};
