//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

use crate::model::{CurrentAirQuality, Place, WeatherResponse};
use crate::preferences::Theme;

/// Name used when reverse geocoding yields nothing.
pub const CURRENT_LOCATION: &str = "Current Location";

/// Spinner timing while a request is in flight.
pub const SPINNER_TICK_MS: u64 = 80;
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Ticks a notice stays visible (about 3.5 s).
pub const NOTICE_TICKS: u32 = 44;

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    /// Place the shown weather belongs to (set once the forecast arrives)
    #[debug(section = "Location", label = "Place", debug_fmt)]
    pub place: Option<Place>,

    /// Forecast lifecycle: Empty → Loading → Loaded/Failed
    #[debug(section = "Weather", label = "Forecast", debug_fmt)]
    pub weather: DataResource<WeatherResponse>,

    /// Place whose forecast is in flight; results for any other place are stale
    #[debug(section = "Weather", label = "Pending", debug_fmt)]
    pub pending_place: Option<Place>,

    /// Refresh of an already loaded place (keeps showing current data)
    #[debug(section = "Weather", label = "Refreshing")]
    pub is_refreshing: bool,

    /// Latest air-quality snapshot for `place`
    #[debug(section = "Air quality", label = "Current", debug_fmt)]
    pub air_quality: Option<CurrentAirQuality>,

    /// Transient message for the status bar
    #[debug(section = "UI", label = "Notice", debug_fmt)]
    pub notice: Option<String>,

    #[debug(skip)]
    pub notice_ttl: u32,

    #[debug(section = "UI", label = "Theme", debug_fmt)]
    pub theme: Theme,

    #[debug(skip)]
    pub tick_count: u32,

    #[debug(skip)]
    pub search_mode: bool,

    #[debug(skip)]
    pub search_query: String,
}

impl AppState {
    pub fn new(theme: Theme) -> Self {
        Self {
            place: None,
            weather: DataResource::Empty,
            pending_place: None,
            is_refreshing: false,
            air_quality: None,
            notice: None,
            notice_ttl: 0,
            theme,
            tick_count: 0,
            search_mode: false,
            search_query: String::new(),
        }
    }

    pub fn location_name(&self) -> Option<&str> {
        self.place.as_ref().map(|p| p.name.as_str())
    }

    pub fn is_loading(&self) -> bool {
        self.weather.is_loading() || self.is_refreshing
    }

    pub fn error(&self) -> Option<&str> {
        self.weather.error()
    }

    pub fn spinner_frame(&self) -> &'static str {
        SPINNER_FRAMES[self.tick_count as usize % SPINNER_FRAMES.len()]
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}
