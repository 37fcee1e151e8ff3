//! Time keeping module for PineTime
//!
//! The wall clock is derived from a reference point (a known UTC time and
//! the system uptime at that moment) plus the uptime elapsed since.

use chrono::{DateTime, NaiveDateTime, TimeDelta, Timelike, Utc};

const MICROS_PER_SEC: u64 = 1_000_000;
const MICROS_PER_MINUTE: u64 = 60 * MICROS_PER_SEC;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeReference {
    /// Clock time (UTC)
    time: NaiveDateTime,
    /// Related system uptime in microseconds
    uptime_us: u64,
}

impl Default for TimeReference {
    fn default() -> Self {
        Self {
            time: DateTime::<Utc>::UNIX_EPOCH.naive_utc(),
            uptime_us: 0,
        }
    }
}

impl TimeReference {
    /// Create new time reference from a UTC time observed at `uptime_us`
    pub fn new(time: NaiveDateTime, uptime_us: u64) -> Self {
        Self { time, uptime_us }
    }

    /// Create new time reference from a UNIX timestamp observed at `uptime_us`
    pub fn from_timestamp(secs: i64, uptime_us: u64) -> Result<Self, Error> {
        let time = DateTime::from_timestamp(secs, 0)
            .ok_or(Error::OutOfRange)?
            .naive_utc();
        Ok(Self::new(time, uptime_us))
    }
}

pub struct TimeManager {
    reference: TimeReference,
    utc_offset: TimeDelta,
}

impl TimeManager {
    /// Initialize time measurement with a reference and the local UTC offset
    pub fn new(reference: TimeReference, utc_offset_secs: i32) -> Self {
        Self {
            reference,
            utc_offset: TimeDelta::seconds(utc_offset_secs.into()),
        }
    }

    /// UTC time at the given uptime
    pub fn utc_at(&self, uptime_us: u64) -> Result<NaiveDateTime, Error> {
        let elapsed = uptime_us
            .checked_sub(self.reference.uptime_us)
            .ok_or(Error::BeforeReference)?;
        let elapsed = i64::try_from(elapsed).map_err(|_| Error::OutOfRange)?;

        self.reference
            .time
            .checked_add_signed(TimeDelta::microseconds(elapsed))
            .ok_or(Error::OutOfRange)
    }

    /// Local wall clock time at the given uptime
    pub fn local_at(&self, uptime_us: u64) -> Result<NaiveDateTime, Error> {
        self.utc_at(uptime_us)?
            .checked_add_signed(self.utc_offset)
            .ok_or(Error::OutOfRange)
    }

    /// Update time reference
    pub fn set_reference(&mut self, reference: TimeReference) {
        self.reference = reference;
    }
}

/// Microseconds from `now` until the next full minute.
///
/// Exactly on a minute boundary this is a whole minute, so a tick at
/// hh:mm:00 schedules the following one at hh:(mm+1):00.
pub fn until_next_minute_us(now: NaiveDateTime) -> u64 {
    // Leap seconds are reported as nanosecond values above one second
    let nanos = u64::from(now.nanosecond().min(999_999_999));
    let into_minute = u64::from(now.second()) * MICROS_PER_SEC + nanos / 1_000;

    MICROS_PER_MINUTE - into_minute
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Queried uptime lies before the reference point
    BeforeReference,
    /// Time not representable
    OutOfRange,
}
