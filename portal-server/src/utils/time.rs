//! Time helpers
//!
//! All timestamps are Unix millis; attendance dates/times use the
//! server's local timezone, matching the portal's single-site usage.

use chrono::{Local, NaiveDate, NaiveTime, Timelike, Utc};

/// Current Unix timestamp in milliseconds
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Today's date in the server's local timezone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Current local time, truncated to whole seconds
pub fn now_time() -> NaiveTime {
    let t = Local::now().time();
    t.with_nanosecond(0).unwrap_or(t)
}
