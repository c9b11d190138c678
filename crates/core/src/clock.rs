//! Source of "today".
//!
//! Expiry arithmetic never reads the wall clock itself. Callers hold a
//! [`Clock`] and ask it for the current calendar date in one reference
//! timezone, so expiry dates and "today" are always compared on the same
//! calendar.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};

pub trait Clock: Send + Sync {
    /// Current instant (UTC).
    fn now(&self) -> DateTime<Utc>;

    /// Reference timezone used to turn `now()` into a calendar date.
    fn offset(&self) -> FixedOffset;

    /// Current calendar date in the reference timezone.
    fn today(&self) -> NaiveDate {
        self.now().with_timezone(&self.offset()).date_naive()
    }
}

/// Wall clock with a fixed reference offset (UTC by default).
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    pub fn utc() -> Self {
        Self {
            offset: utc_offset(),
        }
    }

    pub fn with_offset(offset: FixedOffset) -> Self {
        Self { offset }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::utc()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn offset(&self) -> FixedOffset {
        self.offset
    }
}

/// Clock pinned to one instant. Used by tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
    offset: FixedOffset,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now,
            offset: utc_offset(),
        }
    }

    /// Clock pinned to midnight UTC of `date`.
    pub fn on(date: NaiveDate) -> Self {
        Self::new(date.and_time(chrono::NaiveTime::MIN).and_utc())
    }

    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn offset(&self) -> FixedOffset {
        self.offset
    }
}

fn utc_offset() -> FixedOffset {
    Utc.fix()
}
