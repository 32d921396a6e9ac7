//! Daily play streak tracking
//!
//! Streaks compare local calendar days, ignoring the time of day.

use chrono::{DateTime, Local, NaiveDate, Utc};

/// Local calendar day of a timestamp
pub fn local_day(timestamp: DateTime<Utc>) -> NaiveDate {
    timestamp.with_timezone(&Local).date_naive()
}

/// Today's local calendar day
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Next streak value after playing on `today`.
///
/// - never played: 1
/// - already played today: unchanged
/// - played yesterday: +1
/// - anything older (or a date in the future): reset to 1
pub fn update_streak(last_played: Option<NaiveDate>, today: NaiveDate, current_streak: u32) -> u32 {
    let Some(last_day) = last_played else {
        return 1;
    };

    if last_day == today {
        current_streak
    } else if today.pred_opt() == Some(last_day) {
        current_streak.saturating_add(1)
    } else {
        1
    }
}
