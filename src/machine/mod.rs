//! State machine contracts and the table-backed implementation.
//!
//! The engine only talks to machines through the traits in this module:
//!
//! - **StateMachine**: performs a named transition, yielding a new machine
//! - **ReadableStateMachine**: reports the state a machine is in
//! - **StateMachineFactory**: seeds a machine for one booking
//!
//! `TableMachine` is a minimal implementation that answers every question
//! with a single lookup in a shared `TransitionTable`. Any other machine
//! can be plugged in by implementing the traits.

mod contract;
mod table;

pub use contract::{
    MachineConfig, MachineError, ReadableStateMachine, StateMachine, StateMachineFactory,
};
pub use table::{TableMachine, TableMachineFactory};
