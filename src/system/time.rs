//! Time keeping module for PineTime

use chrono::{DateTime, NaiveDateTime, TimeDelta};
use embassy_time::Instant;
use pinetime_watchface::ui::{ClockReading, HourMode};

/// Wall-clock time anchored to a system instant
pub struct TimeReference {
    /// Clock time
    time: NaiveDateTime,
    /// Related system time
    instant: Instant,
}

impl TimeReference {
    /// Anchor a Unix timestamp to the current instant.
    pub fn from_timestamp(secs: i64) -> Option<Self> {
        Some(Self {
            time: DateTime::from_timestamp(secs, 0)?.naive_utc(),
            instant: Instant::now(),
        })
    }
}

pub struct TimeManager {
    reference: TimeReference,
    /// Local offset from UTC in seconds
    utc_offset: i32,
    mode: HourMode,
}

impl TimeManager {
    /// Initialize time measurement on boot
    pub fn init(reference: TimeReference, utc_offset: i32, mode: HourMode) -> Self {
        Self {
            reference,
            utc_offset,
            mode,
        }
    }

    /// Current local clock reading
    pub fn reading(&self) -> Option<ClockReading> {
        let elapsed = Instant::now().duration_since(self.reference.instant);
        let utc = self
            .reference
            .time
            .checked_add_signed(TimeDelta::try_seconds(elapsed.as_secs() as i64)?)?;
        ClockReading::from_timestamp(
            utc.and_utc().timestamp(),
            self.utc_offset,
            self.mode,
        )
    }
}
