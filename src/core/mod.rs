//! Core booking data types.
//!
//! This module contains the plain data the engine works on:
//! - State and transition identifiers
//! - The transition table
//! - The `Booking` read trait, the default `BookingRecord` value and the
//!   `BookingData` bag used to build new bookings
//! - Immutable machine history
//!
//! Nothing in this module performs a transition; see `machine` and `engine`.

mod booking;
mod history;
mod ids;
mod table;

pub use booking::{
    is_reserved, Booking, BookingData, BookingRecord, Fields, FieldsError, RESERVED_FIELDS,
};
pub use history::{MachineHistory, StateTransition};
pub use ids::{StateKey, TransitionName};
pub use table::{TableError, TableViolation, TransitionTable, Transitions};
