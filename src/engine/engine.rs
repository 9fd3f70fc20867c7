//! The transition engine.

use super::factory::FactoryResolver;
use super::fields::{booking_data, ExtraFields};
use super::normalize::TransitionNormalizer;
use super::resolver::MachineResolver;
use crate::builder::EngineBuilder;
use crate::core::{Booking, TransitionName};
use crate::error::{codes, Cause, EngineError, EngineId, ErrorFactory, TransitionError};
use crate::machine::{MachineError, StateMachine};
use std::fmt;
use std::sync::Arc;

/// Applies named transitions to bookings.
///
/// An engine is assembled from interchangeable parts (see
/// [`EngineBuilder`]):
///
/// - a [`TransitionNormalizer`] rewriting requested transition names
/// - a [`MachineResolver`] supplying the state machine per call
/// - a [`FactoryResolver`] supplying the booking factory per call
/// - an [`ErrorFactory`] building the errors it raises
///
/// `apply` never mutates its input: the updated booking is a new value
/// built by the booking factory.
///
/// # Example
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use transitioner::core::{Booking, BookingRecord};
/// use transitioner::engine::{RecordFactory, TransitionEngine};
/// use transitioner::transition_table;
///
/// let engine = TransitionEngine::builder()
///     .table(transition_table! {
///         "pending" => { "confirm" => "confirmed" },
///         "confirmed" => {},
///     })
///     .booking_factory(RecordFactory)
///     .build()
///     .unwrap();
///
/// let booking = BookingRecord::new(
///     Utc.timestamp_opt(100, 0).unwrap(),
///     Utc.timestamp_opt(200, 0).unwrap(),
///     "pending",
/// );
///
/// let confirmed = engine.apply(&booking, "confirm").unwrap();
/// assert_eq!(confirmed.status(), "confirmed");
/// assert_eq!(booking.status(), "pending");
///
/// let error = engine.apply(&booking, "cancel").unwrap_err();
/// assert!(error.is_rejection());
/// ```
pub struct TransitionEngine<B: Booking + Clone + 'static> {
    pub(crate) id: EngineId,
    pub(crate) normalizer: Arc<dyn TransitionNormalizer<B>>,
    pub(crate) resolver: Arc<dyn MachineResolver<B>>,
    pub(crate) factories: Arc<dyn FactoryResolver<B>>,
    pub(crate) extra_fields: ExtraFields,
    pub(crate) errors: Arc<dyn ErrorFactory<B>>,
}

impl<B: Booking + Clone + 'static> TransitionEngine<B> {
    pub fn builder() -> EngineBuilder<B> {
        EngineBuilder::new()
    }

    /// Identity attached to every error this engine raises.
    pub fn id(&self) -> &EngineId {
        &self.id
    }

    pub fn extra_fields(&self) -> ExtraFields {
        self.extra_fields
    }

    /// Apply `transition` to `booking`, returning the transitioned booking.
    ///
    /// Fails with [`TransitionError::Rejected`] when the state machine
    /// refuses the transition, and with [`TransitionError::Engine`] for every
    /// other failure. Nothing is retried.
    pub fn apply(
        &self,
        booking: &B,
        transition: impl Into<TransitionName>,
    ) -> Result<B, TransitionError<B>> {
        let transition = self.normalizer.normalize(booking, transition.into());
        tracing::debug!(
            engine = %self.id,
            from = %booking.status(),
            transition = %transition,
            "applying transition"
        );

        let result = self.transition(booking, &transition);

        match &result {
            Ok(transitioned) => tracing::info!(
                engine = %self.id,
                from = %booking.status(),
                to = %transitioned.status(),
                transition = %transition,
                "booking transitioned"
            ),
            Err(TransitionError::Rejected(rejected)) => tracing::warn!(
                engine = %self.id,
                from = %booking.status(),
                transition = %transition,
                error = %rejected,
                "transition rejected"
            ),
            Err(TransitionError::Engine(error)) => tracing::error!(
                engine = %self.id,
                from = %booking.status(),
                transition = %transition,
                code = ?error.code(),
                error = %error,
                "transition failed"
            ),
        }

        result
    }

    /// Whether `transition` is currently legal for `booking`.
    ///
    /// Resolves a machine exactly like [`apply`](Self::apply) but neither
    /// transitions it nor builds a booking.
    pub fn can_apply(
        &self,
        booking: &B,
        transition: impl Into<TransitionName>,
    ) -> Result<bool, TransitionError<B>> {
        let transition = self.normalizer.normalize(booking, transition.into());
        let machine = self.resolve(booking, &transition)?;
        Ok(machine.can_transition(&transition))
    }

    fn transition(
        &self,
        booking: &B,
        transition: &TransitionName,
    ) -> Result<B, TransitionError<B>> {
        let machine = self.resolve(booking, transition)?;

        let next = machine
            .transition(transition)
            .map_err(|error| self.machine_failure(booking, transition, error))?;

        let Some(readable) = next.as_readable() else {
            return Err(self
                .engine_error(
                    "State machine is not readable after transition",
                    codes::RESULT_NOT_READABLE,
                    None,
                )
                .into());
        };

        let data = booking_data(booking, readable.current_state().clone(), self.extra_fields)
            .map_err(|error| {
                self.engine_error(
                    "Booking fields could not be read",
                    codes::FIELDS_UNAVAILABLE,
                    Some(error.into()),
                )
            })?;

        let Some(factory) = self.factories.factory_for(booking, transition, readable) else {
            return Err(self
                .engine_error(
                    "No booking factory available",
                    codes::FACTORY_UNAVAILABLE,
                    None,
                )
                .into());
        };

        let transitioned = factory.make(data).map_err(|error| {
            self.engine_error(
                "Booking factory failed to create the booking",
                codes::FACTORY_FAILURE,
                Some(error.into()),
            )
        })?;

        self.resolver
            .advance(Arc::clone(&next))
            .map_err(|error| self.machine_failure(booking, transition, error))?;

        Ok(transitioned)
    }

    fn resolve(
        &self,
        booking: &B,
        transition: &TransitionName,
    ) -> Result<Arc<dyn StateMachine>, TransitionError<B>> {
        let machine = self
            .resolver
            .resolve(booking, transition)
            .map_err(|error| self.machine_failure(booking, transition, error))?;

        machine.ok_or_else(|| {
            self.engine_error("State machine is null", codes::MACHINE_UNAVAILABLE, None)
                .into()
        })
    }

    fn machine_failure(
        &self,
        booking: &B,
        transition: &TransitionName,
        error: MachineError,
    ) -> TransitionError<B> {
        if error.is_rejection() {
            self.errors
                .transition_rejected(
                    &self.id,
                    "Failed to transition booking",
                    Some(codes::TRANSITION_REJECTED),
                    Some(error.into()),
                    Some(booking.clone()),
                    Some(transition.clone()),
                )
                .with_engine(self.id.clone())
                .into()
        } else {
            self.engine_error(
                "An error occurred during transition",
                codes::MACHINE_FAILURE,
                Some(error.into()),
            )
            .into()
        }
    }

    fn engine_error(&self, message: &str, code: i64, cause: Option<Cause>) -> EngineError {
        self.errors
            .engine_error(&self.id, message, Some(code), cause)
            .with_engine(self.id.clone())
    }
}

impl<B: Booking + Clone + 'static> fmt::Debug for TransitionEngine<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionEngine")
            .field("id", &self.id)
            .field("extra_fields", &self.extra_fields)
            .finish_non_exhaustive()
    }
}
