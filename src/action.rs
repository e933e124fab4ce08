//! Actions: user intents and async results

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::location::Coordinates;
use crate::model::{CurrentAirQuality, Place, WeatherResponse};

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Location category =====
    /// Intent: weather for the device's last known position
    LocationFetch,

    /// Intent: location is not permitted, show this city instead
    LocationFallback(String),

    /// Result: last known position
    LocationDidResolve(Coordinates),

    /// Result: no position (permission, no fix, provider error)
    LocationDidError(String),

    // ===== City category =====
    /// Intent: look up a city by name and show its weather
    CitySearch(String),

    // ===== Place category =====
    /// Result: geocoding (forward or reverse) produced a place
    PlaceDidResolve(Place),

    /// Result: geocoding failed
    PlaceDidError(String),

    // ===== Weather category =====
    /// Intent: refresh the forecast for the current place
    WeatherFetch,

    /// Result: forecast loaded for `place`
    WeatherDidLoad {
        place: Place,
        weather: Box<WeatherResponse>,
    },

    /// Result: forecast fetch for `place` failed
    WeatherDidError { place: Place, error: String },

    // ===== Air quality category =====
    /// Result: air-quality snapshot for the given coordinates
    AirQualityDidLoad {
        lat: f64,
        lon: f64,
        air_quality: CurrentAirQuality,
    },

    /// Result: air-quality fetch failed (logged, not shown)
    AirQualityDidError(String),

    // ===== Search category =====
    /// Open city search box
    SearchOpen,

    /// Close search box (cancel)
    SearchClose,

    /// Search box text changed
    SearchQueryChange(String),

    /// Submit the search box
    SearchQuerySubmit(String),

    // ===== Theme category =====
    ThemeDidSave,

    ThemeDidError(String),

    // ===== UI category =====
    /// Flip between light and dark theme
    UiToggleTheme,

    /// Dismiss the error and any notice
    UiClearError,

    /// Force a re-render (for cursor movement, etc.)
    Render,

    // ===== Uncategorized (global) =====
    /// Periodic tick for the loading spinner
    Tick,

    /// Exit the application
    Quit,
}
