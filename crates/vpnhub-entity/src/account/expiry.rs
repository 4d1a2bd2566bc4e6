//! Expiry computation for the different account creation paths.

use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Utc};
use vpnhub_core::AppError;
use vpnhub_core::AppResult;

/// Upper bound for `expiry_days` on provisioning requests (ten years).
pub const MAX_EXPIRY_DAYS: i64 = 3650;

/// Expiry given to admin and reseller accounts: 2099-12-31T00:00:00Z.
pub fn staff_expiry() -> DateTime<Utc> {
    let date = NaiveDate::from_ymd_opt(2099, 12, 31).unwrap_or(NaiveDate::MAX);
    Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN))
}

/// Expiry of a self-service signup: exactly `days` days from `now`.
pub fn expiry_after_days(now: DateTime<Utc>, days: i64) -> AppResult<DateTime<Utc>> {
    let days = u64::try_from(days)
        .map_err(|_| AppError::validation("Package duration must be positive"))?;
    now.checked_add_days(Days::new(days))
        .ok_or_else(|| AppError::validation("Expiry date out of range"))
}

/// Expiry of a provisioned user: `days / 30` calendar months plus
/// `days % 30` days from `now`.
///
/// The month step keeps the day of month and lets it overflow into the
/// following month (Jan 31 plus one month is Mar 2 in a leap year), then the
/// remaining days are added. Time of day is kept.
pub fn expiry_from_months_and_days(
    now: DateTime<Utc>,
    days: i64,
) -> AppResult<DateTime<Utc>> {
    if !(1..=MAX_EXPIRY_DAYS).contains(&days) {
        return Err(AppError::validation(format!(
            "expiry_days must be between 1 and {MAX_EXPIRY_DAYS}"
        )));
    }
    let months = days / 30;
    // Range check above makes the conversion lossless.
    let rest = (days % 30) as u64;

    let today = now.date_naive();
    let month_index = i64::from(today.year()) * 12 + i64::from(today.month0()) + months;
    let year = i32::try_from(month_index.div_euclid(12))
        .map_err(|_| AppError::validation("Expiry date out of range"))?;
    let month = month_index.rem_euclid(12) as u32 + 1;

    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.checked_add_days(Days::new(u64::from(today.day0()) + rest)))
        .map(|date| Utc.from_utc_datetime(&date.and_time(now.time())))
        .ok_or_else(|| AppError::validation("Expiry date out of range"))
}
