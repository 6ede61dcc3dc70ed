// ABOUTME: Drinking window management for Drinkwise
// ABOUTME: Time-of-day window evaluation, the weekly timeline and window storage

pub mod evaluator;
pub mod storage;
pub mod types;

// Re-export main types
pub use evaluator::{classify_drink, compute_end_time, is_within_window, weekly_timeline};
pub use storage::{fetch_active_window, fetch_window, WindowStorage};
pub use types::{DailyWindowUsage, DrinkingWindow, DrinkingWindowCreateInput, DrinkingWindowUpdateInput};
