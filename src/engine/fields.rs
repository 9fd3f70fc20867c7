//! Construction of the field bag for a transitioned booking.

use crate::core::{Booking, BookingData, FieldsError, StateKey};
use serde::{Deserialize, Serialize};

/// What happens to booking fields beyond `start`, `end`, `duration` and
/// `status` when a booking is transitioned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtraFields {
    /// Only the reserved fields are passed on.
    Discard,

    /// Extra fields are carried over when the booking can enumerate them;
    /// otherwise they are dropped with a warning.
    #[default]
    BestEffort,

    /// Extra fields are carried over, and a booking that cannot enumerate
    /// them fails the transition.
    Strict,
}

/// Build the bag for `booking` moving to `status`.
pub(crate) fn booking_data(
    booking: &dyn Booking,
    status: StateKey,
    policy: ExtraFields,
) -> Result<BookingData, FieldsError> {
    let mut data = BookingData::reserved(booking, status);

    if policy == ExtraFields::Discard {
        return Ok(data);
    }

    match booking.fields() {
        Ok(fields) => {
            let kept = data.merge_extra(fields);
            tracing::debug!(kept, "carried extra booking fields");
        }
        Err(error) if policy == ExtraFields::BestEffort => {
            tracing::warn!(%error, "booking fields unavailable, extra fields dropped");
        }
        Err(error) => return Err(error),
    }

    Ok(data)
}
