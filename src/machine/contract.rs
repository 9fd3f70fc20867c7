//! Contracts between the engine and a state machine implementation.

use crate::core::{Booking, StateKey, TransitionName, TransitionTable};
use std::fmt::Debug;
use std::sync::Arc;
use thiserror::Error;

/// Errors a state machine can signal when asked to transition.
#[derive(Debug, Error)]
pub enum MachineError {
    /// The transition is not legal from the machine's current state.
    #[error("transition '{transition}' is not allowed from state '{state}'")]
    Rejected {
        state: StateKey,
        transition: TransitionName,
    },

    /// The machine failed for a reason unrelated to the transition's legality.
    #[error("state machine failure: {0}")]
    Internal(String),
}

impl MachineError {
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

/// A state machine that can be asked to perform named transitions.
///
/// Machines are immutable values: a successful [`transition`](Self::transition)
/// returns a new machine holding the resulting state.
pub trait StateMachine: Debug + Send + Sync {
    fn transition(&self, transition: &TransitionName)
        -> Result<Arc<dyn StateMachine>, MachineError>;

    fn can_transition(&self, transition: &TransitionName) -> bool;

    /// View of this machine that can report its current state, if supported.
    fn as_readable(&self) -> Option<&dyn ReadableStateMachine> {
        None
    }
}

/// A state machine whose current state can be queried.
pub trait ReadableStateMachine: StateMachine {
    fn current_state(&self) -> &StateKey;
}

/// Everything a factory needs to seed a machine for one booking.
#[derive(Clone, Copy, Debug)]
pub struct MachineConfig<'a> {
    /// Status of the booking about to be transitioned.
    pub initial_state: &'a StateKey,
    /// Shared transition table.
    pub transitions: &'a Arc<TransitionTable>,
    /// The booking itself, for machines that inspect it.
    pub subject: &'a dyn Booking,
}

/// Builds state machines on demand.
pub trait StateMachineFactory: Send + Sync {
    fn make(&self, config: MachineConfig<'_>) -> Result<Arc<dyn StateMachine>, MachineError>;
}

impl<F> StateMachineFactory for F
where
    F: Fn(MachineConfig<'_>) -> Result<Arc<dyn StateMachine>, MachineError> + Send + Sync,
{
    fn make(&self, config: MachineConfig<'_>) -> Result<Arc<dyn StateMachine>, MachineError> {
        self(config)
    }
}
