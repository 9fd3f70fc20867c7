//! The transition engine and its pluggable parts.
//!
//! One `apply` call runs a single pass:
//!
//! 1. normalize the requested transition name
//! 2. resolve a state machine for the booking
//! 3. submit the transition to the machine
//! 4. read the resulting state and build the new booking's field bag
//! 5. hand the bag to a booking factory
//!
//! Machine rejections surface as `TransitionRejected`; every other failure
//! surfaces as `EngineError`. Both keep the underlying error as their source.

#[allow(clippy::module_inception)]
mod engine;
mod factory;
mod fields;
mod normalize;
mod resolver;

pub use engine::TransitionEngine;
pub use factory::{BookingFactory, FactoryError, FactoryResolver, RecordFactory, StatusFactories};
pub use fields::ExtraFields;
pub use normalize::{AliasNormalizer, IdentityNormalizer, TransitionNormalizer};
pub use resolver::{FixedMachineResolver, MachineResolver, ProviderResolver, TableResolver};
