// ABOUTME: Configuration constants for Drinkwise
// ABOUTME: Re-exports the environment variable names read at startup

pub mod constants;
