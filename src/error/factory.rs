//! Construction of domain errors on behalf of an engine.

use super::id::EngineId;
use super::kinds::{Cause, EngineError, TransitionRejected};
use crate::core::TransitionName;
use std::fmt::Debug;

/// Builds the errors an engine raises.
///
/// The engine supplies its default message and code; implementations may
/// substitute their own (custom codes, application-specific wording).
/// Whatever an implementation returns, the engine attaches its own
/// [`EngineId`] afterwards if the error carries none.
pub trait ErrorFactory<B: Debug>: Send + Sync {
    fn engine_error(
        &self,
        engine: &EngineId,
        message: &str,
        code: Option<i64>,
        cause: Option<Cause>,
    ) -> EngineError;

    fn transition_rejected(
        &self,
        engine: &EngineId,
        message: &str,
        code: Option<i64>,
        cause: Option<Cause>,
        booking: Option<B>,
        transition: Option<TransitionName>,
    ) -> TransitionRejected<B>;
}

/// Uses the engine's messages and codes unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultErrorFactory;

impl<B: Debug> ErrorFactory<B> for DefaultErrorFactory {
    fn engine_error(
        &self,
        engine: &EngineId,
        message: &str,
        code: Option<i64>,
        cause: Option<Cause>,
    ) -> EngineError {
        let mut error = EngineError::new(message).with_engine(engine.clone());
        if let Some(code) = code {
            error = error.with_code(code);
        }
        if let Some(cause) = cause {
            error = error.with_cause(cause);
        }
        error
    }

    fn transition_rejected(
        &self,
        engine: &EngineId,
        message: &str,
        code: Option<i64>,
        cause: Option<Cause>,
        booking: Option<B>,
        transition: Option<TransitionName>,
    ) -> TransitionRejected<B> {
        let mut rejected = TransitionRejected::new(message).with_engine(engine.clone());
        if let Some(code) = code {
            rejected = rejected.with_code(code);
        }
        if let Some(cause) = cause {
            rejected = rejected.with_cause(cause);
        }
        if let Some(booking) = booking {
            rejected = rejected.with_booking(booking);
        }
        if let Some(transition) = transition {
            rejected = rejected.with_transition(transition);
        }
        rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::codes;
    use crate::machine::MachineError;

    #[test]
    fn default_factory_attaches_engine() {
        let engine = EngineId::new("bookings");
        let error = ErrorFactory::<()>::engine_error(
            &DefaultErrorFactory,
            &engine,
            "State machine is null",
            Some(codes::MACHINE_UNAVAILABLE),
            None,
        );

        assert_eq!(error.engine(), Some(&engine));
        assert_eq!(error.code(), Some(codes::MACHINE_UNAVAILABLE));
        assert!(error.cause().is_none());
    }

    #[test]
    fn default_factory_fills_rejection() {
        let engine = EngineId::new("bookings");
        let cause: Cause = Box::new(MachineError::Rejected {
            state: "confirmed".into(),
            transition: "cancel".into(),
        });

        let rejected = DefaultErrorFactory.transition_rejected(
            &engine,
            "Failed to transition booking",
            None,
            Some(cause),
            Some(42u32),
            Some("cancel".into()),
        );

        assert_eq!(rejected.message(), "Failed to transition booking");
        assert_eq!(rejected.engine(), Some(&engine));
        assert_eq!(rejected.booking(), Some(&42));
        assert_eq!(rejected.transition().map(|t| t.as_str()), Some("cancel"));
        assert!(rejected.cause().is_some());
        assert_eq!(rejected.code(), None);
    }
}
