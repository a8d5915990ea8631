//! Display helpers used by the directory view.

use std::time::SystemTime;

use chrono::prelude::*;
use humansize::{format_size, BINARY};

/// Human-readable size using binary units (KiB, MiB).
pub fn human_size(bytes: u64) -> String {
    format_size(bytes, BINARY)
}

/// Local modification time as `YYYY-MM-DD HH:MM`.
pub fn timestamp(time: SystemTime) -> String {
    let datetime: DateTime<Local> = time.into();
    datetime.format("%Y-%m-%d %H:%M").to_string()
}

/// Coarse age of `time` relative to `now`, e.g. "3 hours ago".
pub fn relative_age(time: SystemTime, now: SystemTime) -> String {
    // Timestamps in the future read as "just now".
    let seconds = now
        .duration_since(time)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0);

    const MINUTE: u64 = 60;
    const HOUR: u64 = 60 * MINUTE;
    const DAY: u64 = 24 * HOUR;
    const MONTH: u64 = 30 * DAY;
    const YEAR: u64 = 365 * DAY;

    let (count, unit) = match seconds {
        s if s < MINUTE => return "just now".to_string(),
        s if s < HOUR => (s / MINUTE, "minute"),
        s if s < DAY => (s / HOUR, "hour"),
        s if s < MONTH => (s / DAY, "day"),
        s if s < YEAR => (s / MONTH, "month"),
        s => (s / YEAR, "year"),
    };

    if count == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_human_size() {
        assert_eq!(human_size(0), "0 B");
        assert_eq!(human_size(2048), "2 KiB");
    }

    #[test]
    fn test_relative_age_units() {
        let now = SystemTime::now();
        let ago = |secs| relative_age(now - Duration::from_secs(secs), now);

        assert_eq!(ago(5), "just now");
        assert_eq!(ago(60), "1 minute ago");
        assert_eq!(ago(3 * 3600 + 10), "3 hours ago");
        assert_eq!(ago(2 * 86_400), "2 days ago");
        assert_eq!(ago(400 * 86_400), "1 year ago");
    }

    #[test]
    fn test_relative_age_future_is_just_now() {
        let now = SystemTime::now();
        assert_eq!(relative_age(now + Duration::from_secs(90), now), "just now");
    }
}
