//! Actions - intents from the UI and results from async tasks

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::api::FetchError;
use crate::state::WeatherReading;

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Weather category =====
    /// Intent: look up the weather for a city (Enter, click, or startup)
    WeatherSearch(String),

    /// Intent: repeat the last search
    WeatherRefresh,

    /// Result: fetch `seq` produced a reading
    WeatherDidLoad { seq: u64, reading: WeatherReading },

    /// Result: fetch `seq` failed
    WeatherDidError { seq: u64, error: FetchError },

    // ===== Search query category =====
    /// Search bar text changed
    SearchQueryChange(String),

    // ===== Uncategorized (global) =====
    /// Force a re-render (cursor movement)
    Render,

    /// Spinner tick
    Tick,

    /// Exit the application
    Quit,
}
