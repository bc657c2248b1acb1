//! Render snapshot tests using RenderHarness
//!
//! Each UI state renders exactly one of: hint, spinner, error, weather card.
//! The search bar and help bar are present in all of them.

use tui_dispatch::{DataResource, testing::*};

use cityweather::{
    components::{Component, WeatherDisplay, WeatherDisplayProps},
    icons::IconKind,
    state::{AppState, WeatherReading},
};

fn render_state(state: &AppState, width: u16, height: u16) -> String {
    let mut render = RenderHarness::new(width, height);
    let mut component = WeatherDisplay::new();

    render.render_to_string_plain(|frame| {
        let props = WeatherDisplayProps {
            state,
            is_focused: true,
        };
        component.render(frame, frame.area(), props);
    })
}

fn loaded(reading: WeatherReading) -> AppState {
    AppState {
        weather: DataResource::Loaded(reading),
        ..Default::default()
    }
}

#[test]
fn test_render_initial_state() {
    let output = render_state(&AppState::default(), 60, 20);

    assert!(output.contains("Type a city"), "Should show search prompt");
    assert!(output.contains("Search for a city"), "Search bar placeholder");
}

#[test]
fn test_render_loading_state() {
    let state = AppState {
        weather: DataResource::Loading,
        ..Default::default()
    };
    let output = render_state(&state, 60, 20);

    assert!(output.contains("Loading weather"));
    assert!(!output.contains("Error"));
    assert!(!output.contains("Humidity"));
}

#[test]
fn test_render_error_state() {
    let state = AppState {
        weather: DataResource::Failed("city not found".into()),
        ..Default::default()
    };
    let output = render_state(&state, 60, 20);

    assert!(output.contains("Error"), "Should show error label");
    assert!(output.contains("city not found"), "Should show message");
    assert!(output.contains("search again"), "Should show retry hint");
    assert!(!output.contains("Humidity"));
}

#[test]
fn test_render_loaded_reading() {
    let output = render_state(
        &loaded(WeatherReading {
            temperature: 15,
            location: "London".into(),
            humidity: 77,
            wind_speed: 4.1,
            icon: IconKind::Rain,
        }),
        60,
        24,
    );

    assert!(output.contains("London"));
    assert!(output.contains("77%"));
    assert!(output.contains("Humidity"));
    assert!(output.contains("4.1 m/s"));
    assert!(output.contains("Wind speed"));
    assert!(!output.contains("Loading weather"));
}

#[test]
fn test_render_snow_caption() {
    let output = render_state(
        &loaded(WeatherReading {
            temperature: -4,
            location: "Oslo".into(),
            humidity: 93,
            wind_speed: 6.7,
            icon: IconKind::Snow,
        }),
        50,
        20,
    );

    assert!(output.contains("Snow"));
    assert!(output.contains("Oslo"));
}

#[test]
fn test_render_tiny_terminal_does_not_panic() {
    let state = loaded(WeatherReading {
        location: "Lima".into(),
        ..Default::default()
    });
    let output = render_state(&state, 20, 8);
    assert!(!output.is_empty());
}

#[test]
fn test_render_search_bar_shows_query() {
    let output = render_state(&AppState::new("Buenos Aires"), 60, 20);
    assert!(output.contains("Buenos Aires"));
}

#[test]
fn test_render_help_bar() {
    let output = render_state(&AppState::default(), 80, 24);

    assert!(output.contains("search"), "Should show search hint");
    assert!(output.contains("refresh"), "Should show refresh hint");
    assert!(output.contains("quit"), "Should show quit hint");
}
