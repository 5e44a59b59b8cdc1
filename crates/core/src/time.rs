//! Timestamp helpers.
//!
//! Tokens carry epoch seconds; everything above the codec works with
//! `DateTime<Utc>`.

use chrono::{DateTime, Utc};

/// Point in time used by expiry checks.
pub type Timestamp = DateTime<Utc>;

/// Convert epoch seconds into a [`Timestamp`].
///
/// Returns `None` when the value is outside chrono's representable range.
pub fn from_epoch_seconds(secs: i64) -> Option<Timestamp> {
    DateTime::from_timestamp(secs, 0)
}
