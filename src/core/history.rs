//! Immutable record of the transitions a machine has gone through.

use super::ids::{StateKey, TransitionName};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record of a single applied transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    /// The status being left
    pub from: StateKey,
    /// The status being entered
    pub to: StateKey,
    /// The transition that was applied
    pub transition: TransitionName,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of transitions.
///
/// History is immutable: [`record`](Self::record) returns a new history
/// with the transition appended, leaving the original untouched.
///
/// # Example
///
/// ```rust
/// use chrono::Utc;
/// use transitioner::core::{MachineHistory, StateTransition};
///
/// let history = MachineHistory::new().record(StateTransition {
///     from: "pending".into(),
///     to: "confirmed".into(),
///     transition: "confirm".into(),
///     timestamp: Utc::now(),
/// });
///
/// let path = history.path();
/// assert_eq!(path.len(), 2);
/// assert_eq!(path[1], "confirmed");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MachineHistory {
    transitions: Vec<StateTransition>,
}

impl MachineHistory {
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: StateTransition) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// States traversed: the first `from`, then every `to` in order.
    pub fn path(&self) -> Vec<&StateKey> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    pub fn transitions(&self) -> &[StateTransition] {
        &self.transitions
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(from: &str, transition: &str, to: &str) -> StateTransition {
        StateTransition {
            from: from.into(),
            to: to.into(),
            transition: transition.into(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history = MachineHistory::new();
        assert!(history.is_empty());
        assert!(history.path().is_empty());
    }

    #[test]
    fn record_is_immutable() {
        let history = MachineHistory::new();
        let new_history = history.record(step("pending", "confirm", "confirmed"));

        assert_eq!(history.transitions().len(), 0);
        assert_eq!(new_history.transitions().len(), 1);
    }

    #[test]
    fn path_returns_state_sequence() {
        let history = MachineHistory::new()
            .record(step("pending", "confirm", "confirmed"))
            .record(step("confirmed", "complete", "completed"));

        let path = history.path();
        assert_eq!(path.len(), 3);
        assert_eq!(path[0], "pending");
        assert_eq!(path[1], "confirmed");
        assert_eq!(path[2], "completed");
        assert_eq!(history.transitions()[1].transition, "complete");
    }
}
