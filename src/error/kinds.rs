//! The two domain error kinds raised by a transition engine.

use super::id::EngineId;
use crate::core::TransitionName;
use std::error::Error as StdError;
use std::fmt::Debug;
use thiserror::Error;

/// Boxed underlying error kept as the `source` of a domain error.
pub type Cause = Box<dyn StdError + Send + Sync + 'static>;

/// Stable numeric codes attached by the default error factory.
pub mod codes {
    pub const MACHINE_UNAVAILABLE: i64 = 1;
    pub const RESULT_NOT_READABLE: i64 = 2;
    pub const MACHINE_FAILURE: i64 = 3;
    pub const FACTORY_UNAVAILABLE: i64 = 4;
    pub const FACTORY_FAILURE: i64 = 5;
    pub const FIELDS_UNAVAILABLE: i64 = 6;
    pub const TRANSITION_REJECTED: i64 = 100;
}

/// Infrastructural or unexpected failure while transitioning a booking.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct EngineError {
    message: String,
    code: Option<i64>,
    #[source]
    cause: Option<Cause>,
    engine: Option<EngineId>,
}

impl EngineError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            cause: None,
            engine: None,
        }
    }

    pub fn with_code(mut self, code: i64) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_cause(mut self, cause: impl Into<Cause>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Attach the acting engine unless one is already set.
    pub fn with_engine(mut self, engine: EngineId) -> Self {
        self.engine.get_or_insert(engine);
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> Option<i64> {
        self.code
    }

    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    pub fn engine(&self) -> Option<&EngineId> {
        self.engine.as_ref()
    }
}

/// The state machine refused the transition for the booking's current status.
///
/// Carries a copy of the booking as it was before the attempt, and the
/// transition name after normalization.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransitionRejected<B: Debug> {
    message: String,
    code: Option<i64>,
    #[source]
    cause: Option<Cause>,
    engine: Option<EngineId>,
    booking: Option<B>,
    transition: Option<TransitionName>,
}

impl<B: Debug> TransitionRejected<B> {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            cause: None,
            engine: None,
            booking: None,
            transition: None,
        }
    }

    pub fn with_code(mut self, code: i64) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_cause(mut self, cause: impl Into<Cause>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Attach the acting engine unless one is already set.
    pub fn with_engine(mut self, engine: EngineId) -> Self {
        self.engine.get_or_insert(engine);
        self
    }

    pub fn with_booking(mut self, booking: B) -> Self {
        self.booking = Some(booking);
        self
    }

    pub fn with_transition(mut self, transition: TransitionName) -> Self {
        self.transition = Some(transition);
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> Option<i64> {
        self.code
    }

    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    pub fn engine(&self) -> Option<&EngineId> {
        self.engine.as_ref()
    }

    pub fn booking(&self) -> Option<&B> {
        self.booking.as_ref()
    }

    pub fn transition(&self) -> Option<&TransitionName> {
        self.transition.as_ref()
    }

    /// Take the booking back out of the error.
    pub fn into_booking(self) -> Option<B> {
        self.booking
    }
}

/// Failure of a single `apply` call.
#[derive(Debug, Error)]
pub enum TransitionError<B: Debug> {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Rejected(#[from] TransitionRejected<B>),
}

impl<B: Debug> TransitionError<B> {
    /// Whether the transition was refused (as opposed to the engine failing).
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    pub fn as_rejection(&self) -> Option<&TransitionRejected<B>> {
        match self {
            Self::Rejected(rejected) => Some(rejected),
            Self::Engine(_) => None,
        }
    }

    pub fn as_engine_error(&self) -> Option<&EngineError> {
        match self {
            Self::Engine(error) => Some(error),
            Self::Rejected(_) => None,
        }
    }

    pub fn code(&self) -> Option<i64> {
        match self {
            Self::Engine(error) => error.code(),
            Self::Rejected(rejected) => rejected.code(),
        }
    }

    pub fn engine(&self) -> Option<&EngineId> {
        match self {
            Self::Engine(error) => error.engine(),
            Self::Rejected(rejected) => rejected.engine(),
        }
    }
}
