// ABOUTME: Drink log type definitions
// ABOUTME: Stored logs, the create input and the per-user summary counts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrinkLog {
    pub id: i64,
    pub user_id: i64,
    pub drink_type: String,
    pub quantity: f64,
    pub timestamp: DateTime<Utc>,
    /// Fixed when the log is written; later window edits do not change it
    pub logged_in_window: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrinkLogCreateInput {
    pub drink_type: String,
    pub quantity: f64,
    /// Defaults to the time of the request
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrinkSummary {
    pub total_drinks: i64,
    pub in_window: i64,
    pub out_window: i64,
}

impl DrinkSummary {
    pub fn new(total_drinks: i64, in_window: i64) -> Self {
        Self {
            total_drinks,
            in_window,
            out_window: total_drinks - in_window,
        }
    }
}
