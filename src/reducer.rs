//! Reducer - pure function: (state, action) -> DispatchResult

use tracing::{debug, info};
use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::api::FetchError;
use crate::effect::Effect;
use crate::state::AppState;

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Weather actions =====
        Action::WeatherSearch(city) => search(state, &city),

        Action::WeatherRefresh => match state.last_city.clone() {
            Some(city) => search(state, &city),
            None => DispatchResult::unchanged(),
        },

        Action::WeatherDidLoad { seq, reading } => {
            if seq != state.request_seq {
                debug!(seq, current = state.request_seq, "dropping stale reading");
                return DispatchResult::unchanged();
            }
            info!(location = %reading.location, "weather loaded");
            state.weather = DataResource::Loaded(reading);
            DispatchResult::changed()
        }

        Action::WeatherDidError { seq, error } => {
            if seq != state.request_seq {
                debug!(seq, current = state.request_seq, "dropping stale error");
                return DispatchResult::unchanged();
            }
            info!(%error, "weather fetch failed");
            state.weather = DataResource::Failed(error.user_message().to_string());
            DispatchResult::changed()
        }

        // ===== Search actions =====
        Action::SearchQueryChange(query) => {
            if query == state.query {
                return DispatchResult::unchanged();
            }
            state.query = query;
            DispatchResult::changed()
        }

        // ===== Global actions =====
        Action::Render => DispatchResult::changed(),

        Action::Tick => {
            if state.weather.is_loading() {
                state.tick_count = state.tick_count.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn search(state: &mut AppState, city: &str) -> DispatchResult<Effect> {
    let city = city.trim();
    // Any search supersedes fetches still in flight, even a rejected one
    state.request_seq += 1;
    if city.is_empty() {
        state.weather = DataResource::Failed(FetchError::EmptyQuery.user_message().to_string());
        return DispatchResult::changed();
    }

    state.last_city = Some(city.to_string());
    state.weather = DataResource::Loading;
    state.tick_count = 0;
    DispatchResult::changed_with(Effect::FetchWeather {
        city: city.to_string(),
        seq: state.request_seq,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{EMPTY_QUERY_MESSAGE, TRANSPORT_FAILURE_MESSAGE};
    use crate::icons::IconKind;
    use crate::state::WeatherReading;

    fn reading(location: &str) -> WeatherReading {
        WeatherReading {
            temperature: 15,
            location: location.into(),
            humidity: 77,
            wind_speed: 4.1,
            icon: IconKind::Rain,
        }
    }

    #[test]
    fn test_search_sets_loading_and_emits_fetch() {
        let mut state = AppState::default();
        state.tick_count = 9;

        let result = reducer(&mut state, Action::WeatherSearch("  London ".into()));

        assert!(result.changed);
        assert!(state.weather.is_loading());
        assert_eq!(state.request_seq, 1);
        assert_eq!(state.tick_count, 0);
        assert_eq!(state.last_city.as_deref(), Some("London"));
        assert_eq!(
            result.effects,
            vec![Effect::FetchWeather {
                city: "London".into(),
                seq: 1
            }]
        );
    }

    #[test]
    fn test_blank_search_fails_without_effect() {
        for input in ["", "   ", "\t\n"] {
            let mut state = AppState {
                weather: DataResource::Loaded(reading("Paris")),
                ..Default::default()
            };

            let result = reducer(&mut state, Action::WeatherSearch(input.into()));

            assert!(result.changed);
            assert!(result.effects.is_empty());
            assert_eq!(state.weather.error(), Some(EMPTY_QUERY_MESSAGE));
            assert_eq!(state.request_seq, 1);
        }
    }

    #[test]
    fn test_blank_search_discards_fetch_in_flight() {
        let mut state = AppState::default();
        reducer(&mut state, Action::WeatherSearch("London".into()));
        reducer(&mut state, Action::WeatherSearch("   ".into()));

        let result = reducer(
            &mut state,
            Action::WeatherDidLoad {
                seq: 1,
                reading: reading("London"),
            },
        );

        assert!(!result.changed);
        assert!(state.reading().is_none());
        assert_eq!(state.weather.error(), Some(EMPTY_QUERY_MESSAGE));
    }

    #[test]
    fn test_search_interrupts_loaded_and_failed() {
        let mut state = AppState {
            weather: DataResource::Failed("boom".into()),
            ..Default::default()
        };
        reducer(&mut state, Action::WeatherSearch("Oslo".into()));
        assert!(state.weather.is_loading());

        reducer(
            &mut state,
            Action::WeatherDidLoad {
                seq: 1,
                reading: reading("Oslo"),
            },
        );
        reducer(&mut state, Action::WeatherSearch("Rome".into()));
        assert!(state.weather.is_loading());
        assert_eq!(state.request_seq, 2);
    }

    #[test]
    fn test_stale_completion_is_ignored() {
        let mut state = AppState::default();
        reducer(&mut state, Action::WeatherSearch("Oslo".into()));
        reducer(&mut state, Action::WeatherSearch("Rome".into()));

        // Oslo resolves after Rome was requested
        let result = reducer(
            &mut state,
            Action::WeatherDidLoad {
                seq: 1,
                reading: reading("Oslo"),
            },
        );
        assert!(!result.changed);
        assert!(state.weather.is_loading());

        let result = reducer(
            &mut state,
            Action::WeatherDidError {
                seq: 1,
                error: FetchError::TransportFailure("late".into()),
            },
        );
        assert!(!result.changed);

        reducer(
            &mut state,
            Action::WeatherDidLoad {
                seq: 2,
                reading: reading("Rome"),
            },
        );
        assert_eq!(state.reading().map(|r| r.location.as_str()), Some("Rome"));
    }

    #[test]
    fn test_error_replaces_previous_reading() {
        let mut state = AppState {
            weather: DataResource::Loaded(reading("Paris")),
            ..Default::default()
        };
        reducer(&mut state, Action::WeatherSearch("Atlantis".into()));
        reducer(
            &mut state,
            Action::WeatherDidError {
                seq: 1,
                error: FetchError::UpstreamRejected("city not found".into()),
            },
        );

        assert!(state.reading().is_none());
        assert_eq!(state.weather.error(), Some("city not found"));
    }

    #[test]
    fn test_transport_failure_leaves_loading() {
        let mut state = AppState::default();
        reducer(&mut state, Action::WeatherSearch("Lima".into()));
        reducer(
            &mut state,
            Action::WeatherDidError {
                seq: 1,
                error: FetchError::TransportFailure("connection refused".into()),
            },
        );

        assert!(!state.weather.is_loading());
        assert_eq!(state.weather.error(), Some(TRANSPORT_FAILURE_MESSAGE));
    }

    #[test]
    fn test_refresh_repeats_last_city() {
        let mut state = AppState::default();
        let result = reducer(&mut state, Action::WeatherRefresh);
        assert!(!result.changed);
        assert!(result.effects.is_empty());

        reducer(&mut state, Action::WeatherSearch("Kyiv".into()));
        state.query = "something else".into();
        let result = reducer(&mut state, Action::WeatherRefresh);
        assert_eq!(
            result.effects,
            vec![Effect::FetchWeather {
                city: "Kyiv".into(),
                seq: 2
            }]
        );
    }

    #[test]
    fn test_tick_only_animates_while_loading() {
        let mut state = AppState::default();
        assert!(!reducer(&mut state, Action::Tick).changed);

        state.weather = DataResource::Loading;
        assert!(reducer(&mut state, Action::Tick).changed);
        assert_eq!(state.tick_count, 1);
    }

    #[test]
    fn test_query_change() {
        let mut state = AppState::default();
        assert!(reducer(&mut state, Action::SearchQueryChange("Ber".into())).changed);
        assert_eq!(state.query, "Ber");
        assert!(!reducer(&mut state, Action::SearchQueryChange("Ber".into())).changed);
    }
}
