//! cityweather - terminal weather widget for OpenWeatherMap
//!
//! The library exposes the app's modules for testing.

pub mod action;
pub mod api;
pub mod components;
pub mod config;
pub mod effect;
pub mod icons;
pub mod reducer;
pub mod state;
