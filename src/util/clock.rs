//! Wall-clock source for token expiry checks and date filters.
//!
//! `std::time::SystemTime` is unavailable on `wasm32-unknown-unknown`, so the
//! browser build reads `Date.now()` instead.

#[cfg(test)]
#[path = "clock_test.rs"]
mod clock_test;

/// Current time in Unix seconds.
#[allow(clippy::cast_possible_truncation)]
pub fn now_secs() -> i64 {
    #[cfg(feature = "csr")]
    {
        (js_sys::Date::now() / 1000.0) as i64
    }
    #[cfg(not(feature = "csr"))]
    {
        session::system_now()
    }
}

/// Today's UTC date as `YYYY-MM-DD`, the format appointment dates use.
pub fn today_iso() -> String {
    iso_date(now_secs())
}

/// UTC calendar date of `secs` (Unix seconds) as `YYYY-MM-DD`.
///
/// Days-to-civil conversion over 400-year eras, valid for any `i64` day.
pub(crate) fn iso_date(secs: i64) -> String {
    let z = secs.div_euclid(86_400) + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);
    format!("{year:04}-{month:02}-{day:02}")
}
