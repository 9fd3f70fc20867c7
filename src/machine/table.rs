//! Table-backed state machine.

use super::contract::{
    MachineConfig, MachineError, ReadableStateMachine, StateMachine, StateMachineFactory,
};
use crate::core::{MachineHistory, StateKey, StateTransition, TransitionName, TransitionTable};
use chrono::Utc;
use std::sync::Arc;

/// State machine that looks transitions up in a [`TransitionTable`].
///
/// A transition is legal when the table lists it for the current state.
/// States missing from the table have no legal transitions, and a legal
/// transition whose destination is missing from the table fails as an
/// internal error instead of leaving the table.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use transitioner::core::TransitionTable;
/// use transitioner::machine::{ReadableStateMachine, StateMachine, TableMachine};
///
/// let table = Arc::new(
///     TransitionTable::new()
///         .with_transition("pending", "confirm", "confirmed")
///         .with_state("confirmed"),
/// );
///
/// let machine = TableMachine::new(table, "pending");
/// let next = machine.advance(&"confirm".into()).unwrap();
/// assert_eq!(next.current_state(), "confirmed");
/// assert!(next.advance(&"confirm".into()).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct TableMachine {
    table: Arc<TransitionTable>,
    current: StateKey,
    history: MachineHistory,
}

impl TableMachine {
    pub fn new(table: Arc<TransitionTable>, initial: impl Into<StateKey>) -> Self {
        Self {
            table,
            current: initial.into(),
            history: MachineHistory::new(),
        }
    }

    /// Apply a transition, returning the typed successor machine.
    pub fn advance(&self, transition: &TransitionName) -> Result<TableMachine, MachineError> {
        let Some(to) = self.table.destination(&self.current, transition) else {
            return Err(MachineError::Rejected {
                state: self.current.clone(),
                transition: transition.clone(),
            });
        };

        if !self.table.contains_state(to) {
            return Err(MachineError::Internal(format!(
                "transition '{transition}' from '{}' leads to unknown state '{to}'",
                self.current
            )));
        }

        let history = self.history.record(StateTransition {
            from: self.current.clone(),
            to: to.clone(),
            transition: transition.clone(),
            timestamp: Utc::now(),
        });

        Ok(Self {
            table: Arc::clone(&self.table),
            current: to.clone(),
            history,
        })
    }

    pub fn history(&self) -> &MachineHistory {
        &self.history
    }

    pub fn table(&self) -> &Arc<TransitionTable> {
        &self.table
    }
}

impl StateMachine for TableMachine {
    fn transition(
        &self,
        transition: &TransitionName,
    ) -> Result<Arc<dyn StateMachine>, MachineError> {
        Ok(Arc::new(self.advance(transition)?))
    }

    fn can_transition(&self, transition: &TransitionName) -> bool {
        self.table.destination(&self.current, transition).is_some()
    }

    fn as_readable(&self) -> Option<&dyn ReadableStateMachine> {
        Some(self)
    }
}

impl ReadableStateMachine for TableMachine {
    fn current_state(&self) -> &StateKey {
        &self.current
    }
}

/// Factory seeding a fresh [`TableMachine`] with the booking's status.
#[derive(Clone, Copy, Debug, Default)]
pub struct TableMachineFactory;

impl StateMachineFactory for TableMachineFactory {
    fn make(&self, config: MachineConfig<'_>) -> Result<Arc<dyn StateMachine>, MachineError> {
        Ok(Arc::new(TableMachine::new(
            Arc::clone(config.transitions),
            config.initial_state.clone(),
        )))
    }
}
