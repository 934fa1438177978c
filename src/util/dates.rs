use chrono::{Local, NaiveDate, NaiveDateTime};

/// Source of the current local time
pub trait Clock {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Host clock in the local timezone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock stuck at one instant (tests, replays)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// The date header, formatted once when a session starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDate {
    /// `Saturday, 24 Sep`
    pub long: String,
    /// `Sat, 24 Sep`
    pub short: String,
}

impl SessionDate {
    pub fn from_datetime(now: NaiveDateTime) -> Self {
        SessionDate {
            long: now.format("%A, %-d %b").to_string(),
            short: now.format("%a, %-d %b").to_string(),
        }
    }
}

/// Per-task creation stamp: `3:45 PM, Sat, 24 Sep`
pub fn created_stamp(now: NaiveDateTime, session_short: &str) -> String {
    format!("{}, {}", now.format("%-I:%M %p"), session_short)
}

/// en-US short date, e.g. `9/24/2022`
pub fn format_due_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
pub(crate) fn fixed(y: i32, m: u32, d: u32, h: u32, min: u32) -> FixedClock {
    let dt = NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(h, min, 0))
        .unwrap();
    FixedClock(dt)
}
