//! Operating-hours gate.
//!
//! Evaluated in the configured IANA timezone against the inbound event's
//! timestamp. Malformed configuration fails open — a typo in the hours
//! must not mute the bot entirely.

use chrono::{DateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use frontdesk_core::config::OperatingHours;
use tracing::warn;

/// Whether `now` falls inside the configured window.
///
/// A closing time at or before the opening time wraps past midnight
/// (e.g. 22:00-06:00). An unparseable timezone or time is treated as
/// always open.
pub fn within_operating_hours(hours: &OperatingHours, now: DateTime<Utc>) -> bool {
    let Ok(tz) = hours.timezone.parse::<Tz>() else {
        warn!(timezone = %hours.timezone, "unknown timezone, treating as open");
        return true;
    };
    let (Ok(opening), Ok(closing)) = (
        NaiveTime::parse_from_str(&hours.opening, "%H:%M"),
        NaiveTime::parse_from_str(&hours.closing, "%H:%M"),
    ) else {
        warn!(
            opening = %hours.opening,
            closing = %hours.closing,
            "unparseable operating hours, treating as open"
        );
        return true;
    };

    let local = now.with_timezone(&tz).time();
    if opening < closing {
        local >= opening && local < closing
    } else {
        // Overnight window; opening == closing degenerates to always open.
        opening == closing || local >= opening || local < closing
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn window(opening: &str, closing: &str, timezone: &str) -> OperatingHours {
        OperatingHours {
            opening: opening.to_owned(),
            closing: closing.to_owned(),
            timezone: timezone.to_owned(),
        }
    }

    fn utc(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, h, m, 0).unwrap()
    }

    #[test]
    fn inside_and_outside_a_daytime_window() {
        let hours = window("09:00", "18:00", "UTC");
        assert!(within_operating_hours(&hours, utc(9, 0)));
        assert!(within_operating_hours(&hours, utc(12, 30)));
        assert!(!within_operating_hours(&hours, utc(20, 0)));
        assert!(!within_operating_hours(&hours, utc(8, 59)));
        // Closing minute is exclusive.
        assert!(!within_operating_hours(&hours, utc(18, 0)));
    }

    #[test]
    fn window_is_evaluated_in_the_configured_timezone() {
        // 20:00 in São Paulo (UTC-3) is 23:00 UTC.
        let hours = window("09:00", "18:00", "America/Sao_Paulo");
        assert!(!within_operating_hours(&hours, utc(23, 0)));
        // 12:00 in São Paulo is 15:00 UTC.
        assert!(within_operating_hours(&hours, utc(15, 0)));
    }

    #[test]
    fn overnight_window_wraps_midnight() {
        let hours = window("22:00", "06:00", "UTC");
        assert!(within_operating_hours(&hours, utc(23, 0)));
        assert!(within_operating_hours(&hours, utc(3, 0)));
        assert!(!within_operating_hours(&hours, utc(12, 0)));
    }

    #[test]
    fn malformed_configuration_fails_open() {
        assert!(within_operating_hours(&window("9am", "6pm", "UTC"), utc(23, 0)));
        assert!(within_operating_hours(
            &window("09:00", "18:00", "Mars/Olympus"),
            utc(23, 0)
        ));
    }
}
