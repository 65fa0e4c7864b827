use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc};
use chrono_tz::Tz;

/// Source of the current instant. Handlers never read the wall clock directly.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Civil date and time of day (whole seconds) of `now` in `zone`.
pub fn civil_moment(now: DateTime<Utc>, zone: Tz) -> (NaiveDate, NaiveTime) {
    let local = now.with_timezone(&zone);
    let time = local.time();

    (local.date_naive(), time.with_nanosecond(0).unwrap_or(time))
}

#[cfg(test)]
pub struct FixedClock(pub DateTime<Utc>);

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
