//! Booking factories: turning a field bag into a new booking.

use crate::core::{BookingData, BookingRecord, StateKey, TransitionName};
use crate::machine::ReadableStateMachine;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Errors a booking factory can report.
#[derive(Debug, Error)]
pub enum FactoryError {
    #[error("invalid booking data: {0}")]
    InvalidData(String),

    #[error("booking factory failed: {0}")]
    Failed(String),
}

/// Creates a booking from a field bag.
pub trait BookingFactory<B>: Send + Sync {
    fn make(&self, data: BookingData) -> Result<B, FactoryError>;
}

impl<B, F> BookingFactory<B> for F
where
    F: Fn(BookingData) -> Result<B, FactoryError> + Send + Sync,
{
    fn make(&self, data: BookingData) -> Result<B, FactoryError> {
        self(data)
    }
}

/// Produces [`BookingRecord`]s by copying the bag as is. Never fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct RecordFactory;

impl BookingFactory<BookingRecord> for RecordFactory {
    fn make(&self, data: BookingData) -> Result<BookingRecord, FactoryError> {
        Ok(BookingRecord::from(data))
    }
}

/// Chooses the booking factory for one transition.
///
/// The choice may depend on the original booking, the transition applied
/// and the machine it produced. `None` means no factory is available.
pub trait FactoryResolver<B>: Send + Sync {
    fn factory_for(
        &self,
        booking: &B,
        transition: &TransitionName,
        machine: &dyn ReadableStateMachine,
    ) -> Option<Arc<dyn BookingFactory<B>>>;
}

impl<B> FactoryResolver<B> for Arc<dyn BookingFactory<B>> {
    fn factory_for(
        &self,
        _booking: &B,
        _transition: &TransitionName,
        _machine: &dyn ReadableStateMachine,
    ) -> Option<Arc<dyn BookingFactory<B>>> {
        Some(Arc::clone(self))
    }
}

impl<B> FactoryResolver<B> for Option<Arc<dyn BookingFactory<B>>> {
    fn factory_for(
        &self,
        _booking: &B,
        _transition: &TransitionName,
        _machine: &dyn ReadableStateMachine,
    ) -> Option<Arc<dyn BookingFactory<B>>> {
        self.clone()
    }
}

/// Picks a factory by the status a booking is moving to.
pub struct StatusFactories<B> {
    by_status: HashMap<StateKey, Arc<dyn BookingFactory<B>>>,
    fallback: Option<Arc<dyn BookingFactory<B>>>,
}

impl<B> StatusFactories<B> {
    pub fn new() -> Self {
        Self {
            by_status: HashMap::new(),
            fallback: None,
        }
    }

    /// Use `factory` for bookings entering `status`.
    pub fn with_status(
        mut self,
        status: impl Into<StateKey>,
        factory: impl BookingFactory<B> + 'static,
    ) -> Self {
        self.by_status.insert(status.into(), Arc::new(factory));
        self
    }

    /// Use `factory` for every status without a dedicated one.
    pub fn with_fallback(mut self, factory: impl BookingFactory<B> + 'static) -> Self {
        self.fallback = Some(Arc::new(factory));
        self
    }
}

impl<B> Default for StatusFactories<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> fmt::Debug for StatusFactories<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatusFactories")
            .field("statuses", &self.by_status.keys().collect::<Vec<_>>())
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}

impl<B> FactoryResolver<B> for StatusFactories<B> {
    fn factory_for(
        &self,
        _booking: &B,
        _transition: &TransitionName,
        machine: &dyn ReadableStateMachine,
    ) -> Option<Arc<dyn BookingFactory<B>>> {
        self.by_status
            .get(machine.current_state())
            .or(self.fallback.as_ref())
            .cloned()
    }
}
