// ABOUTME: Drinking window evaluation
// ABOUTME: End-time arithmetic, in-window classification and the 7-day window timeline

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use crate::types::{DailyWindowUsage, DrinkingWindow};

/// Number of days covered by the weekly timeline
pub const TIMELINE_DAYS: i64 = 7;

/// `start + duration_hours`, wrapped on a 24-hour clock
pub fn compute_end_time(start: NaiveTime, duration_hours: i64) -> NaiveTime {
    let (end, _) = start.overflowing_add_signed(Duration::hours(duration_hours));
    end
}

/// Inclusive `start <= time <= end`.
///
/// Windows that cross midnight (`end < start`) are compared linearly as
/// well, so a 22:00-02:00 window never matches anything. Classification of
/// stored logs depends on this, so it is kept as is.
pub fn is_within_window(time: NaiveTime, window: &DrinkingWindow) -> bool {
    window.start_time <= time && time <= window.end_time
}

/// Whether a drink at `timestamp` falls inside the active window. No active
/// window means outside.
pub fn classify_drink(active_window: Option<&DrinkingWindow>, timestamp: DateTime<Utc>) -> bool {
    active_window.is_some_and(|window| is_within_window(timestamp.time(), window))
}

/// Best-effort reconstruction of which window applied on each of the seven
/// days ending at `today`, oldest first.
///
/// Windows are not versioned, so a window counts for a day when it was
/// created on or before that day and is either still active or was last
/// touched on or after it. The newest window wins when several qualify.
pub fn weekly_timeline(windows: &[DrinkingWindow], today: NaiveDate) -> Vec<DailyWindowUsage> {
    (0..TIMELINE_DAYS)
        .rev()
        .map(|offset| {
            let day = today - Duration::days(offset);
            let selected = windows
                .iter()
                .filter(|w| applies_on(w, day))
                .max_by_key(|w| (w.created_at, w.id));
            DailyWindowUsage::new(day, selected)
        })
        .collect()
}

fn applies_on(window: &DrinkingWindow, day: NaiveDate) -> bool {
    window.created_at.date_naive() <= day
        && (window.is_active || window.updated_at.date_naive() >= day)
}
