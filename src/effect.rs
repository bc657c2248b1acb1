//! Effects - side effects declared by the reducer

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch current weather for a city. `seq` tags the completion so the
    /// reducer can drop results from superseded searches.
    FetchWeather { city: String, seq: u64 },
}
