// ABOUTME: Drinking window type definitions
// ABOUTME: Stored windows, create/update inputs and per-day timeline records

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrinkingWindow {
    pub id: i64,
    pub user_id: i64,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub duration_hours: i64,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub repeat_pattern: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrinkingWindowCreateInput {
    pub start_time: NaiveTime,
    pub duration_hours: i64,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub repeat_pattern: Option<String>,
    /// Defaults to active
    pub is_active: Option<bool>,
}

/// Partial update. The outer `Option` says whether a field was supplied;
/// for nullable columns the inner `Option` carries an explicit null.
#[derive(Debug, Clone, Default)]
pub struct DrinkingWindowUpdateInput {
    pub start_time: Option<NaiveTime>,
    pub duration_hours: Option<i64>,
    pub start_date: Option<Option<DateTime<Utc>>>,
    pub end_date: Option<Option<DateTime<Utc>>>,
    pub repeat_pattern: Option<Option<String>>,
    pub is_active: Option<bool>,
}

impl DrinkingWindowUpdateInput {
    pub fn is_empty(&self) -> bool {
        self.start_time.is_none()
            && self.duration_hours.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.repeat_pattern.is_none()
            && self.is_active.is_none()
    }
}

/// The window that applied on one calendar day; all window fields are null
/// when none did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyWindowUsage {
    pub date: NaiveDate,
    pub window_id: Option<i64>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub duration_hours: Option<i64>,
    pub repeat_pattern: Option<String>,
    pub is_active: Option<bool>,
}

impl DailyWindowUsage {
    pub fn new(date: NaiveDate, window: Option<&DrinkingWindow>) -> Self {
        Self {
            date,
            window_id: window.map(|w| w.id),
            start_time: window.map(|w| w.start_time),
            end_time: window.map(|w| w.end_time),
            duration_hours: window.map(|w| w.duration_hours),
            repeat_pattern: window.and_then(|w| w.repeat_pattern.clone()),
            is_active: window.map(|w| w.is_active),
        }
    }
}
