//! Build errors for the engine builder.

use crate::core::TableError;
use thiserror::Error;

/// Errors that can occur when building a transition engine.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("No state machine source specified. Call .table(), .fixed_machine() or .machine_resolver()")]
    MissingMachineResolver,

    #[error("No booking factory specified. Call .booking_factory() or .factory_resolver()")]
    MissingBookingFactory,

    #[error("Invalid transition table: {0}")]
    InvalidTable(#[from] TableError),

    #[error("Invalid engine settings: {0}")]
    InvalidSettings(#[from] serde_json::Error),
}
