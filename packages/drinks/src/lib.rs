// ABOUTME: Drink logging for Drinkwise
// ABOUTME: Logs classified against the active window at insert time, plus summaries

pub mod storage;
pub mod types;

pub use storage::DrinkStorage;
pub use types::{DrinkLog, DrinkLogCreateInput, DrinkSummary};
