//! Zoned timestamps for console output
//!
//! Only the console transport renders these; the syslog transport stamps
//! its own RFC 3339 time.

use crate::error::{LogError, Result};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// 12-hour clock, matching the console format of the existing services
const FORMAT: &str = "%Y-%m-%d %I:%M:%S";

/// Renders `[YYYY-MM-DD hh:mm:ss]` in a named IANA timezone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampFormatter {
    tz: Tz,
}

impl TimestampFormatter {
    /// Create a formatter for a timezone name such as `Europe/Stockholm`
    pub fn new(timezone: &str) -> Result<Self> {
        let tz = timezone
            .parse::<Tz>()
            .map_err(|_| LogError::Timezone(timezone.to_string()))?;
        Ok(Self { tz })
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Format the current wall-clock time
    pub fn format(&self) -> String {
        self.format_at(Utc::now())
    }

    /// Format a given instant
    pub fn format_at(&self, at: DateTime<Utc>) -> String {
        format!("[{}]", at.with_timezone(&self.tz).format(FORMAT))
    }
}

impl Default for TimestampFormatter {
    fn default() -> Self {
        Self {
            tz: chrono_tz::Europe::Stockholm,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_stockholm_winter() {
        let fmt = TimestampFormatter::new("Europe/Stockholm").unwrap();
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 9, 5, 7).unwrap();
        assert_eq!(fmt.format_at(at), "[2024-01-15 10:05:07]");
    }

    #[test]
    fn test_format_uses_twelve_hour_clock() {
        let fmt = TimestampFormatter::new("UTC").unwrap();
        let at = Utc.with_ymd_and_hms(2024, 7, 1, 15, 30, 0).unwrap();
        assert_eq!(fmt.format_at(at), "[2024-07-01 03:30:00]");
    }

    #[test]
    fn test_format_crosses_date_line() {
        let fmt = TimestampFormatter::new("Pacific/Auckland").unwrap();
        let at = Utc.with_ymd_and_hms(2024, 1, 31, 20, 0, 0).unwrap();
        assert_eq!(fmt.format_at(at), "[2024-02-01 09:00:00]");
    }

    #[test]
    fn test_unknown_timezone() {
        let err = TimestampFormatter::new("Mars/Olympus").unwrap_err();
        assert!(matches!(err, LogError::Timezone(ref tz) if tz == "Mars/Olympus"));
    }

    #[test]
    fn test_format_now_shape() {
        let out = TimestampFormatter::new("Europe/Stockholm").unwrap().format();
        assert_eq!(out.len(), "[YYYY-MM-DD hh:mm:ss]".len());
        assert!(out.starts_with('[') && out.ends_with(']'));
    }
}
