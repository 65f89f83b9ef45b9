//! Snowflake cursor math.
//!
//! Discord ids carry their creation time in the upper 42 bits, relative to
//! the Discord epoch. History range bounds are derived from message
//! timestamps through these helpers.

use chrono::{DateTime, Utc};

/// Discord epoch, milliseconds since the Unix epoch (2015-01-01T00:00:00Z).
pub const DISCORD_EPOCH_MS: i64 = 1_420_070_400_000;

const TIMESTAMP_SHIFT: u32 = 22;

/// Builds a synthetic snowflake for a timestamp.
///
/// With `high` false this is the smallest possible id created at `when`;
/// with `high` true the largest. Timestamps before the Discord epoch clamp
/// to zero.
#[must_use]
pub fn time_snowflake(when: DateTime<Utc>, high: bool) -> u64 {
    let ms = (when.timestamp_millis() - DISCORD_EPOCH_MS).max(0);
    #[allow(clippy::cast_sign_loss)]
    let base = (ms as u64) << TIMESTAMP_SHIFT;
    if high { base | ((1 << TIMESTAMP_SHIFT) - 1) } else { base }
}

/// Exclusive lower cursor that includes every message created at or after
/// the boundary message's timestamp.
#[must_use]
pub fn after_cursor(when: DateTime<Utc>) -> u64 {
    time_snowflake(when, false).saturating_sub(1)
}

/// Exclusive upper cursor that includes every message created at or before
/// the boundary message's timestamp.
#[must_use]
pub fn before_cursor(when: DateTime<Utc>) -> u64 {
    time_snowflake(when, true).saturating_add(1)
}
