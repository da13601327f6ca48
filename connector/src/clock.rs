use chrono::{DateTime, FixedOffset, Utc};
use common::{Error, Result};

pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 7;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Wall clock read in a fixed UTC offset.
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    pub fn new(utc_offset_hours: i32) -> Result<Self> {
        let offset = utc_offset_hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                Error::InvalidInput(format!("UTC offset out of range: {} hours", utc_offset_hours))
            })?;
        Ok(Self { offset })
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }
}

pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}
