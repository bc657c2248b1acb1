//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

use crate::icons::IconKind;

/// City searched once at startup when none is given
pub const DEFAULT_CITY: &str = "New York";

/// Spinner frame interval while a fetch is outstanding
pub const LOADING_ANIM_TICK_MS: u64 = 80;

pub const SPINNER_FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// Normalized weather snapshot, in metric units
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherReading {
    /// Degrees Celsius, floored
    pub temperature: i32,
    pub location: String,
    /// Relative humidity in percent
    pub humidity: u8,
    /// Metres per second, as reported upstream
    pub wind_speed: f64,
    pub icon: IconKind,
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    /// Current contents of the search bar
    #[debug(section = "Search", label = "Query")]
    pub query: String,

    /// Last city a fetch was issued for
    #[debug(section = "Search", label = "Last city", debug_fmt)]
    pub last_city: Option<String>,

    /// Weather lifecycle: Empty → Loading → Loaded/Failed
    #[debug(section = "Weather", label = "Data", debug_fmt)]
    pub weather: DataResource<WeatherReading>,

    /// Id of the most recently issued fetch; older completions are dropped
    #[debug(section = "Weather", label = "Request")]
    pub request_seq: u64,

    #[debug(skip)]
    pub tick_count: u32,
}

impl AppState {
    /// Create state with the search bar prefilled
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            last_city: None,
            weather: DataResource::Empty,
            request_seq: 0,
            tick_count: 0,
        }
    }

    pub fn reading(&self) -> Option<&WeatherReading> {
        self.weather.data()
    }

    pub fn spinner_frame(&self) -> &'static str {
        SPINNER_FRAMES[self.tick_count as usize % SPINNER_FRAMES.len()]
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new("")
    }
}
