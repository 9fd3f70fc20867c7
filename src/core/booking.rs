//! Bookings: the values whose status is governed by transitions.
//!
//! The engine reads bookings through the [`Booking`] trait and never
//! mutates them. A transition produces a [`BookingData`] bag that a
//! booking factory turns into a brand-new booking value.

use super::ids::StateKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::time::Duration;
use thiserror::Error;

/// Open-ended named fields of a booking.
pub type Fields = BTreeMap<String, Value>;

/// Field names with a dedicated slot in [`BookingData`].
pub const RESERVED_FIELDS: [&str; 4] = ["start", "end", "duration", "status"];

/// Whether `key` names one of the [`RESERVED_FIELDS`].
pub fn is_reserved(key: &str) -> bool {
    RESERVED_FIELDS.contains(&key)
}

/// Errors raised when a booking cannot expose its fields.
#[derive(Debug, Error)]
pub enum FieldsError {
    #[error("booking fields cannot be enumerated")]
    NotEnumerable,

    #[error("failed to serialize booking field '{field}': {source}")]
    Serialization {
        field: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Read access to a booking.
///
/// `fields` is optional: bookings that cannot enumerate their fields keep
/// the default, and engines then decide (via
/// [`ExtraFields`](crate::engine::ExtraFields)) whether that is acceptable.
pub trait Booking: Debug + Send + Sync {
    fn start(&self) -> DateTime<Utc>;

    fn end(&self) -> DateTime<Utc>;

    fn duration(&self) -> Duration;

    /// Current status key.
    fn status(&self) -> &StateKey;

    /// Every field of the booking, reserved ones included.
    fn fields(&self) -> Result<Fields, FieldsError> {
        Err(FieldsError::NotEnumerable)
    }
}

/// Argument bag handed to a booking factory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BookingData {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration: Duration,
    pub status: StateKey,
    #[serde(default)]
    pub extra: Fields,
}

impl BookingData {
    /// Reserved fields of `booking`, with `status` replaced.
    pub fn reserved(booking: &dyn Booking, status: StateKey) -> Self {
        Self {
            start: booking.start(),
            end: booking.end(),
            duration: booking.duration(),
            status,
            extra: Fields::new(),
        }
    }

    /// Copy every non-reserved field into `extra`, returning how many were kept.
    pub fn merge_extra(&mut self, fields: Fields) -> usize {
        let before = self.extra.len();
        for (key, value) in fields {
            if is_reserved(&key) {
                continue;
            }
            self.extra.insert(key, value);
        }
        self.extra.len() - before
    }
}

/// Plain booking value, the default product of
/// [`RecordFactory`](crate::engine::RecordFactory).
///
/// # Example
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use transitioner::core::{Booking, BookingRecord};
///
/// let booking = BookingRecord::new(
///     Utc.timestamp_opt(100, 0).unwrap(),
///     Utc.timestamp_opt(200, 0).unwrap(),
///     "pending",
/// )
/// .with_field("notes", "vip");
///
/// assert_eq!(booking.duration().as_secs(), 100);
/// assert_eq!(booking.status(), "pending");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BookingRecord {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    duration: Duration,
    status: StateKey,
    #[serde(flatten, default)]
    extra: Fields,
}

impl BookingRecord {
    /// Create a booking whose duration is the length of the span between
    /// `start` and `end`, whichever comes first.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, status: impl Into<StateKey>) -> Self {
        let duration = end
            .signed_duration_since(start)
            .abs()
            .to_std()
            .unwrap_or(Duration::ZERO);
        Self {
            start,
            end,
            duration,
            status: status.into(),
            extra: Fields::new(),
        }
    }

    /// Override the duration, for bookings whose duration is not `end - start`.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Attach an extra field. Reserved names are ignored.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        if !is_reserved(&key) {
            self.extra.insert(key, value.into());
        }
        self
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// Fields beyond the reserved set.
    pub fn extra(&self) -> &Fields {
        &self.extra
    }
}

impl Booking for BookingRecord {
    fn start(&self) -> DateTime<Utc> {
        self.start
    }

    fn end(&self) -> DateTime<Utc> {
        self.end
    }

    fn duration(&self) -> Duration {
        self.duration
    }

    fn status(&self) -> &StateKey {
        &self.status
    }

    fn fields(&self) -> Result<Fields, FieldsError> {
        let mut fields = self.extra.clone();
        fields.insert("start".to_string(), Value::String(self.start.to_rfc3339()));
        fields.insert("end".to_string(), Value::String(self.end.to_rfc3339()));
        let duration =
            serde_json::to_value(self.duration).map_err(|source| FieldsError::Serialization {
                field: "duration".to_string(),
                source,
            })?;
        fields.insert("duration".to_string(), duration);
        fields.insert(
            "status".to_string(),
            Value::String(self.status.as_str().to_string()),
        );
        Ok(fields)
    }
}

impl From<BookingData> for BookingRecord {
    fn from(data: BookingData) -> Self {
        Self {
            start: data.start,
            end: data.end,
            duration: data.duration,
            status: data.status,
            extra: data
                .extra
                .into_iter()
                .filter(|(key, _)| !is_reserved(key))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn duration_is_derived_from_span() {
        let booking = BookingRecord::new(at(100), at(200), "pending");
        assert_eq!(booking.duration(), Duration::from_secs(100));

        let inverted = BookingRecord::new(at(200), at(100), "pending");
        assert_eq!(inverted.duration(), Duration::from_secs(100));
        assert_eq!(inverted.start(), at(200));
    }

    #[test]
    fn reserved_names_are_not_extra_fields() {
        let booking = BookingRecord::new(at(0), at(10), "pending")
            .with_field("status", "confirmed")
            .with_field("notes", "vip");

        assert_eq!(booking.status(), "pending");
        assert_eq!(booking.extra().len(), 1);
        assert_eq!(booking.field("notes"), Some(&Value::from("vip")));
    }

    #[test]
    fn fields_include_reserved_and_extra() {
        let booking = BookingRecord::new(at(100), at(200), "pending").with_field("room", 12);
        let fields = booking.fields().unwrap();

        assert_eq!(fields.get("status"), Some(&Value::from("pending")));
        assert_eq!(fields.get("room"), Some(&Value::from(12)));
        assert!(fields.contains_key("start"));
        assert!(fields.contains_key("end"));
        assert!(fields.contains_key("duration"));
    }

    #[test]
    fn merge_extra_skips_reserved_keys() {
        let booking = BookingRecord::new(at(100), at(200), "pending").with_field("notes", "vip");
        let mut data = BookingData::reserved(&booking, StateKey::from("confirmed"));

        let kept = data.merge_extra(booking.fields().unwrap());

        assert_eq!(kept, 1);
        assert_eq!(data.status, "confirmed");
        assert_eq!(data.extra.get("notes"), Some(&Value::from("vip")));
        assert!(!data.extra.contains_key("status"));
    }

    #[test]
    fn record_from_data_keeps_all_values() {
        let booking = BookingRecord::new(at(100), at(200), "pending").with_field("notes", "vip");
        let mut data = BookingData::reserved(&booking, StateKey::from("confirmed"));
        data.merge_extra(booking.fields().unwrap());

        let record = BookingRecord::from(data);

        assert_eq!(record.start(), at(100));
        assert_eq!(record.end(), at(200));
        assert_eq!(record.duration(), Duration::from_secs(100));
        assert_eq!(record.status(), "confirmed");
        assert_eq!(record.field("notes"), Some(&Value::from("vip")));
    }

    #[test]
    fn record_serializes_extra_fields_inline() {
        let booking = BookingRecord::new(at(100), at(200), "pending").with_field("notes", "vip");
        let json = serde_json::to_value(&booking).unwrap();

        assert_eq!(json["notes"], Value::from("vip"));
        assert_eq!(json["status"], Value::from("pending"));

        let back: BookingRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, booking);
    }
}
