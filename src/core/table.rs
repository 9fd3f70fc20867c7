//! The transition table: which transitions are legal from which status.
//!
//! A table maps every known status to the transitions available from it,
//! and each transition to its destination status. Tables are plain data.
//! They are built once (by hand, from the [`transition_table!`] macro, or
//! decoded from JSON/binary configuration) and then shared read-only by
//! every engine and machine that uses them.
//!
//! [`transition_table!`]: crate::transition_table

use super::ids::{StateKey, TransitionName};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// Transitions available from a single status, keyed by transition name.
pub type Transitions = BTreeMap<TransitionName, StateKey>;

/// Problems detected when validating a [`TransitionTable`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TableViolation {
    #[error("transition '{transition}' from '{from}' leads to unknown state '{to}'")]
    UnknownDestination {
        from: StateKey,
        transition: TransitionName,
        to: StateKey,
    },

    #[error("state keys must not be empty")]
    EmptyState,
}

/// Errors raised while decoding or validating a table.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to decode transition table from JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to encode or decode binary transition table: {0}")]
    Binary(#[from] bincode::Error),

    #[error("transition table has {} violation(s)", .0.len())]
    Invalid(Vec<TableViolation>),
}

/// Static mapping `state -> (transition -> destination state)`.
///
/// # Example
///
/// ```rust
/// use transitioner::core::{StateKey, TransitionName, TransitionTable};
///
/// let table = TransitionTable::new()
///     .with_transition("pending", "confirm", "confirmed")
///     .with_state("confirmed");
///
/// let to = table.destination(&StateKey::from("pending"), &TransitionName::from("confirm"));
/// assert_eq!(to, Some(&StateKey::from("confirmed")));
/// assert!(table.validate().is_success());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransitionTable {
    states: BTreeMap<StateKey, Transitions>,
}

impl TransitionTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            states: BTreeMap::new(),
        }
    }

    /// Add a state with no outgoing transitions (no-op if already present).
    pub fn with_state(mut self, state: impl Into<StateKey>) -> Self {
        self.states.entry(state.into()).or_default();
        self
    }

    /// Add a transition, registering its source state if needed.
    ///
    /// The destination is not registered automatically; call
    /// [`with_state`](Self::with_state) for it or [`validate`](Self::validate)
    /// will report it.
    pub fn with_transition(
        mut self,
        from: impl Into<StateKey>,
        transition: impl Into<TransitionName>,
        to: impl Into<StateKey>,
    ) -> Self {
        self.states
            .entry(from.into())
            .or_default()
            .insert(transition.into(), to.into());
        self
    }

    /// Destination of `transition` when applied from `state`, if legal.
    pub fn destination(&self, state: &StateKey, transition: &TransitionName) -> Option<&StateKey> {
        self.states.get(state).and_then(|t| t.get(transition))
    }

    /// All transitions available from `state`.
    pub fn transitions_from(&self, state: &StateKey) -> Option<&Transitions> {
        self.states.get(state)
    }

    pub fn contains_state(&self, state: &StateKey) -> bool {
        self.states.contains_key(state)
    }

    /// Iterate over all known states in key order.
    pub fn states(&self) -> impl Iterator<Item = &StateKey> {
        self.states.keys()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Check the table, accumulating ALL violations.
    ///
    /// Every destination must itself be a state of the table, so that a
    /// booking moved by this table always lands on a known status.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<TableViolation>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<TableViolation>>> = Vec::new();

        for (from, transitions) in &self.states {
            if from.is_empty() {
                checks.push(Validation::fail(TableViolation::EmptyState));
            }

            for (transition, to) in transitions {
                let check = if self.states.contains_key(to) {
                    Validation::success(())
                } else {
                    Validation::fail(TableViolation::UnknownDestination {
                        from: from.clone(),
                        transition: transition.clone(),
                        to: to.clone(),
                    })
                };
                checks.push(check);
            }
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// Validate the table, returning it unchanged when it has no violations.
    pub fn validated(self) -> Result<Self, TableError> {
        match self.validate() {
            Validation::Success(_) => Ok(self),
            Validation::Failure(errors) => {
                Err(TableError::Invalid(errors.iter().cloned().collect()))
            }
        }
    }

    /// Decode a table from its JSON form, e.g.
    /// `{"pending": {"confirm": "confirmed"}, "confirmed": {}}`.
    ///
    /// Decoding does not validate; chain [`validated`](Self::validated).
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode the table into a compact binary blob.
    pub fn to_bytes(&self) -> Result<Vec<u8>, TableError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a table produced by [`to_bytes`](Self::to_bytes).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TableError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

impl From<BTreeMap<StateKey, Transitions>> for TransitionTable {
    fn from(states: BTreeMap<StateKey, Transitions>) -> Self {
        Self { states }
    }
}
