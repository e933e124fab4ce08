//! Effect handler - runs each effect as a keyed task and maps its outcome to an action

use std::path::PathBuf;
use std::sync::Arc;

use tui_dispatch::{EffectContext, TaskKey, TaskManager};

use crate::action::Action;
use crate::api::{GeocodingClient, WeatherClient};
use crate::effect::Effect;
use crate::location::{Coordinates, LocationHelper};
use crate::model::Place;
use crate::preferences::{self, Preferences, Theme};
use crate::state::CURRENT_LOCATION;

pub const LOCATION_TASK: &str = "location";
pub const GEOCODE_TASK: &str = "geocode";
pub const WEATHER_TASK: &str = "weather";
pub const AIR_QUALITY_TASK: &str = "air_quality";
pub const THEME_TASK: &str = "theme";

/// Clients and paths the effects run against
pub struct Services {
    pub weather: WeatherClient,
    pub geocoding: GeocodingClient,
    pub location: LocationHelper,
    pub preferences_path: PathBuf,
}

impl Services {
    pub async fn resolve_location(&self) -> Action {
        match self.location.last_location().await {
            Ok(coords) => Action::LocationDidResolve(coords),
            Err(e) => Action::LocationDidError(e.to_string()),
        }
    }

    /// Never fails: a missing or unreadable name becomes "Current Location".
    pub async fn reverse_geocode(&self, coords: Coordinates) -> Action {
        let name = match self.geocoding.reverse(coords.lat, coords.lon).await {
            Ok(response) => response.place_name(),
            Err(e) => {
                tracing::warn!(error = %e, "reverse geocoding failed");
                None
            }
        };
        Action::PlaceDidResolve(Place {
            name: name.unwrap_or_else(|| CURRENT_LOCATION.to_string()),
            lat: coords.lat,
            lon: coords.lon,
        })
    }

    pub async fn geocode_city(&self, query: &str) -> Action {
        match self.geocoding.search(query).await {
            Ok(place) => Action::PlaceDidResolve(place),
            Err(e) => {
                tracing::warn!(%query, error = %e, "city search failed");
                Action::PlaceDidError(e.search_message())
            }
        }
    }

    pub async fn fetch_weather(&self, place: Place) -> Action {
        match self.weather.forecast(place.lat, place.lon).await {
            Ok(weather) => Action::WeatherDidLoad {
                place,
                weather: Box::new(weather),
            },
            Err(e) => {
                tracing::warn!(place = %place.name, error = %e, "forecast failed");
                Action::WeatherDidError {
                    error: e.weather_message(),
                    place,
                }
            }
        }
    }

    pub async fn fetch_air_quality(&self, lat: f64, lon: f64) -> Action {
        match self.weather.air_quality(lat, lon).await {
            Ok(response) => Action::AirQualityDidLoad {
                lat,
                lon,
                air_quality: response.current,
            },
            Err(e) => {
                tracing::warn!(lat, lon, error = %e, "air quality failed");
                Action::AirQualityDidError(e.to_string())
            }
        }
    }

    pub async fn save_theme(&self, theme: Theme) -> Action {
        let prefs = Preferences { theme };
        match preferences::save(&self.preferences_path, &prefs).await {
            Ok(()) => {
                tracing::info!(theme = theme.label(), "theme saved");
                Action::ThemeDidSave
            }
            Err(e) => {
                tracing::error!(error = %e, "saving theme failed");
                Action::ThemeDidError(format!("Could not save theme: {e}"))
            }
        }
    }
}

/// Tasks whose results a new lookup makes obsolete.
///
/// A lookup replaces the place, so nothing still running for the old place
/// may report back.
pub fn superseded_tasks(effect: &Effect) -> &'static [&'static str] {
    match effect {
        Effect::ResolveLocation | Effect::GeocodeCity { .. } => {
            &[LOCATION_TASK, GEOCODE_TASK, WEATHER_TASK, AIR_QUALITY_TASK]
        }
        _ => &[],
    }
}

/// Spawn the task for `effect`; a task replaces any running one with the same key.
pub fn run_effect(effect: Effect, tasks: &mut TaskManager<Action>, services: Arc<Services>) {
    for key in superseded_tasks(&effect) {
        tasks.cancel(&TaskKey::new(*key));
    }

    match effect {
        Effect::ResolveLocation => {
            tasks.spawn(LOCATION_TASK, async move { services.resolve_location().await });
        }
        Effect::ReverseGeocode(coords) => {
            tasks.spawn(GEOCODE_TASK, async move {
                services.reverse_geocode(coords).await
            });
        }
        Effect::GeocodeCity { query } => {
            tasks.spawn(GEOCODE_TASK, async move { services.geocode_city(&query).await });
        }
        Effect::FetchWeather { place } => {
            tasks.spawn(WEATHER_TASK, async move { services.fetch_weather(place).await });
        }
        Effect::FetchAirQuality { lat, lon } => {
            tasks.spawn(AIR_QUALITY_TASK, async move {
                services.fetch_air_quality(lat, lon).await
            });
        }
        Effect::SaveTheme(theme) => {
            tasks.spawn(THEME_TASK, async move { services.save_theme(theme).await });
        }
    }
}

pub fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, services: Arc<Services>) {
    run_effect(effect, ctx.tasks(), services);
}
