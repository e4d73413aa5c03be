//! Due-date computation from a case type's service-level window.
//!
//! The automatic intake path uses plain calendar days. A business-day
//! variant that skips weekends and fixed civic holidays is available for
//! callers that schedule field work.

use chrono::{DateTime, Datelike, Duration, Utc, Weekday};

/// Fixed-date civic holidays, as `(month, day)` pairs, skipped by the
/// business-day calculator.
pub const PUBLIC_HOLIDAYS: &[(u32, u32)] = &[
  (1, 1),   // New Year's Day
  (5, 1),   // Labour Day
  (7, 20),  // Independence Day
  (8, 7),   // Battle of Boyaca
  (12, 8),  // Immaculate Conception
  (12, 25), // Christmas Day
];

/// Add `sla_days` calendar days to `created_at`. This is the deadline the
/// intake path stamps on new cases.
pub fn due_date(created_at: DateTime<Utc>, sla_days: u32) -> DateTime<Utc> {
  created_at + Duration::days(i64::from(sla_days))
}

/// Add `days` business days to `start`, counting only weekdays that are not
/// listed in [`PUBLIC_HOLIDAYS`].
pub fn add_business_days(start: DateTime<Utc>, days: u32) -> DateTime<Utc> {
  let mut current = start;
  let mut remaining = days;
  while remaining > 0 {
    current += Duration::days(1);
    if is_business_day(current) {
      remaining -= 1;
    }
  }
  current
}

fn is_business_day(day: DateTime<Utc>) -> bool {
  let weekday = day.weekday();
  if weekday == Weekday::Sat || weekday == Weekday::Sun {
    return false;
  }
  !PUBLIC_HOLIDAYS.contains(&(day.month(), day.day()))
}
