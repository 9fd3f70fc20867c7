//! Domain error taxonomy for booking transitions.
//!
//! Every failed `apply` call ends in exactly one of two kinds:
//!
//! - `EngineError`: something went wrong that is not the caller's fault
//!   (no machine, unreadable machine, collaborator failure)
//! - `TransitionRejected`: the transition is not legal from the booking's
//!   current status
//!
//! Both keep their underlying cause as the error `source` and record the
//! `EngineId` of the engine that raised them.

mod factory;
mod id;
mod kinds;

pub use factory::{DefaultErrorFactory, ErrorFactory};
pub use id::EngineId;
pub use kinds::{codes, Cause, EngineError, TransitionError, TransitionRejected};
