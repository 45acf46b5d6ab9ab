//! Clock helpers shared across host contracts and adapters.

#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

use time::{macros::format_description, Date, Month};

/// Returns the current unix timestamp in milliseconds.
pub fn unix_time_ms_now() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now().max(0.0) as u64
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// Returns today's calendar date in the host's local timezone.
///
/// Native builds have no timezone database here and fall back to UTC.
pub fn local_today() -> Date {
    #[cfg(target_arch = "wasm32")]
    {
        let now = js_sys::Date::new_0();
        let month = Month::try_from(now.get_month() as u8 + 1).unwrap_or(Month::January);
        Date::from_calendar_date(now.get_full_year() as i32, month, now.get_date() as u8)
            .unwrap_or_else(|_| date_from_unix_ms(unix_time_ms_now()))
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        date_from_unix_ms(unix_time_ms_now())
    }
}

/// Converts a unix millisecond timestamp to a UTC calendar date.
pub fn date_from_unix_ms(unix_ms: u64) -> Date {
    let seconds = (unix_ms / 1000) as i64;
    time::OffsetDateTime::from_unix_timestamp(seconds)
        .map(|dt| dt.date())
        .unwrap_or_else(|_| Date::from_calendar_date(1970, Month::January, 1).unwrap_or(Date::MIN))
}

/// Formats a date as `dd.mm.yyyy`.
pub fn format_date_dotted(date: Date) -> String {
    date.format(format_description!("[day].[month].[year]"))
        .unwrap_or_default()
}

/// Formats a date as `m/d/yyyy` (no zero padding).
pub fn format_date_slashed(date: Date) -> String {
    format!("{}/{}/{}", u8::from(date.month()), date.day(), date.year())
}
