//! Reducer - pure function: (state, action) -> DispatchResult
//!
//! Requests are chained here: each `*Did*` result issues the next effect,
//! so geocoding always completes before the forecast is requested, and the
//! forecast before air quality.

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, NOTICE_TICKS};

pub const EMPTY_QUERY_NOTICE: &str = "Please enter a city name";
pub const FALLBACK_NOTICE: &str = "Location permission denied. Showing default city.";

/// First action of a session: an explicit city wins, then the device
/// location when permitted, then the default city.
pub fn startup_action(city: Option<&str>, location_permitted: bool, default_city: &str) -> Action {
    match city.map(str::trim).filter(|c| !c.is_empty()) {
        Some(city) => Action::CitySearch(city.to_string()),
        None if location_permitted => Action::LocationFetch,
        None => Action::LocationFallback(default_city.to_string()),
    }
}

fn begin_lookup(state: &mut AppState) {
    state.weather = DataResource::Loading;
    state.place = None;
    state.pending_place = None;
    state.air_quality = None;
    state.is_refreshing = false;
    state.tick_count = 0;
}

fn fail(state: &mut AppState, msg: String) -> DispatchResult<Effect> {
    state.weather = DataResource::Failed(msg);
    state.pending_place = None;
    state.is_refreshing = false;
    DispatchResult::changed()
}

fn search_city(state: &mut AppState, query: String) -> DispatchResult<Effect> {
    begin_lookup(state);
    DispatchResult::changed_with(Effect::GeocodeCity { query })
}

fn show_notice(state: &mut AppState, msg: impl Into<String>) {
    state.notice = Some(msg.into());
    state.notice_ttl = NOTICE_TICKS;
}

fn clear_notice(state: &mut AppState) -> bool {
    state.notice_ttl = 0;
    state.notice.take().is_some()
}

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Location actions =====
        Action::LocationFetch => {
            begin_lookup(state);
            DispatchResult::changed_with(Effect::ResolveLocation)
        }

        Action::LocationFallback(city) => {
            show_notice(state, FALLBACK_NOTICE);
            search_city(state, city)
        }

        // Lookup results only count while that lookup is still the current one
        Action::LocationDidResolve(_) | Action::LocationDidError(_)
            if !state.weather.is_loading() =>
        {
            DispatchResult::unchanged()
        }

        Action::LocationDidResolve(coords) => {
            DispatchResult::changed_with(Effect::ReverseGeocode(coords))
        }

        Action::LocationDidError(msg) => fail(state, msg),

        // ===== City / place actions =====
        Action::CitySearch(city) => search_city(state, city),

        Action::PlaceDidResolve(_) | Action::PlaceDidError(_) if !state.weather.is_loading() => {
            DispatchResult::unchanged()
        }

        Action::PlaceDidResolve(place) => {
            state.pending_place = Some(place.clone());
            DispatchResult::changed_with(Effect::FetchWeather { place })
        }

        Action::PlaceDidError(msg) => fail(state, msg),

        // ===== Weather actions =====
        Action::WeatherFetch => {
            // A lookup or refresh is already on its way
            if state.weather.is_loading() || state.pending_place.is_some() {
                return DispatchResult::unchanged();
            }
            let Some(place) = state.place.clone() else {
                return DispatchResult::unchanged();
            };
            if state.weather.is_loaded() {
                state.is_refreshing = true;
            } else {
                state.weather = DataResource::Loading;
            }
            state.pending_place = Some(place.clone());
            state.tick_count = 0;
            DispatchResult::changed_with(Effect::FetchWeather { place })
        }

        Action::WeatherDidLoad { place, .. } | Action::WeatherDidError { place, .. }
            if state.pending_place.as_ref() != Some(&place) =>
        {
            DispatchResult::unchanged()
        }

        Action::WeatherDidLoad { place, weather } => {
            let moved = state.place.as_ref() != Some(&place);
            if moved {
                state.air_quality = None;
            }
            let (lat, lon) = (place.lat, place.lon);
            state.place = Some(place);
            state.pending_place = None;
            state.weather = DataResource::Loaded(*weather);
            state.is_refreshing = false;
            DispatchResult::changed_with(Effect::FetchAirQuality { lat, lon })
        }

        Action::WeatherDidError { error, .. } => fail(state, error),

        Action::AirQualityDidLoad {
            lat,
            lon,
            air_quality,
        } => {
            // Drop stale snapshots for a place we have since moved away from
            let current = state
                .place
                .as_ref()
                .is_some_and(|p| p.lat == lat && p.lon == lon);
            if !current {
                return DispatchResult::unchanged();
            }
            state.air_quality = Some(air_quality);
            DispatchResult::changed()
        }

        Action::AirQualityDidError(_) => DispatchResult::unchanged(),

        // ===== Search actions =====
        Action::SearchOpen => {
            state.search_mode = true;
            state.search_query.clear();
            clear_notice(state);
            DispatchResult::changed()
        }

        Action::SearchClose => {
            state.search_mode = false;
            state.search_query.clear();
            DispatchResult::changed()
        }

        Action::SearchQueryChange(query) => {
            state.search_query = query;
            clear_notice(state);
            DispatchResult::changed()
        }

        Action::SearchQuerySubmit(query) => {
            let query = query.trim().to_string();
            if query.is_empty() {
                state.search_query.clear();
                show_notice(state, EMPTY_QUERY_NOTICE);
                return DispatchResult::changed();
            }
            state.search_mode = false;
            state.search_query.clear();
            clear_notice(state);
            search_city(state, query)
        }

        // ===== Theme actions =====
        Action::ThemeDidSave => DispatchResult::unchanged(),

        Action::ThemeDidError(msg) => {
            show_notice(state, msg);
            DispatchResult::changed()
        }

        // ===== UI actions =====
        Action::UiToggleTheme => {
            state.theme = state.theme.toggle();
            DispatchResult::changed_with(Effect::SaveTheme(state.theme))
        }

        Action::UiClearError => {
            let had_error = state.weather.is_failed();
            if had_error {
                state.weather = DataResource::Empty;
            }
            if clear_notice(state) || had_error {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Render => DispatchResult::changed(),

        // ===== Global actions =====
        Action::Tick => {
            let mut changed = false;
            if state.notice_ttl > 0 {
                state.notice_ttl -= 1;
                if state.notice_ttl == 0 {
                    changed |= state.notice.take().is_some();
                }
            }
            if state.is_loading() {
                state.tick_count = state.tick_count.wrapping_add(1);
                changed = true;
            }
            if changed {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Coordinates;
    use crate::model::{CurrentAirQuality, CurrentWeather, Place, WeatherResponse};
    use crate::preferences::Theme;

    fn only_effect(result: &DispatchResult<Effect>) -> Effect {
        assert_eq!(result.effects.len(), 1, "expected exactly one effect");
        result.effects[0].clone()
    }

    fn london() -> Place {
        Place {
            name: "London, GB".into(),
            lat: 51.5073,
            lon: -0.1276,
        }
    }

    fn paris() -> Place {
        Place {
            name: "Paris, FR".into(),
            lat: 48.85,
            lon: 2.35,
        }
    }

    fn weather() -> Box<WeatherResponse> {
        Box::new(WeatherResponse {
            latitude: 51.5,
            longitude: -0.12,
            timezone: "Europe/London".into(),
            current: CurrentWeather {
                time: "2025-11-12T19:00".into(),
                temperature: 11.3,
                feels_like: 9.8,
                humidity: 81,
                is_day: 0,
                weather_code: 3,
                wind_speed: 14.2,
            },
            hourly: Default::default(),
            daily: Default::default(),
        })
    }

    fn air(aqi: u16) -> CurrentAirQuality {
        CurrentAirQuality {
            us_aqi: aqi,
            pm2_5: 8.1,
            pm10: 12.4,
            co: 210.0,
            no2: 18.2,
            so2: 2.3,
            o3: 41.0,
        }
    }

    #[test]
    fn test_startup_action() {
        assert_eq!(
            startup_action(Some(" Paris "), true, "London"),
            Action::CitySearch("Paris".into())
        );
        assert_eq!(startup_action(None, true, "London"), Action::LocationFetch);
        assert_eq!(
            startup_action(Some("  "), false, "London"),
            Action::LocationFallback("London".into())
        );
    }

    #[test]
    fn test_location_chain() {
        let mut state = AppState::default();

        let result = reducer(&mut state, Action::LocationFetch);
        assert!(state.weather.is_loading());
        assert_eq!(only_effect(&result), Effect::ResolveLocation);

        let coords = Coordinates {
            lat: 50.45,
            lon: 30.52,
        };
        let result = reducer(&mut state, Action::LocationDidResolve(coords));
        assert_eq!(only_effect(&result), Effect::ReverseGeocode(coords));
        assert!(state.weather.is_loading());
    }

    #[test]
    fn test_location_error_ends_loading() {
        let mut state = AppState::default();
        reducer(&mut state, Action::LocationFetch);
        reducer(
            &mut state,
            Action::LocationDidError("Location permission not granted.".into()),
        );
        assert!(!state.is_loading());
        assert_eq!(state.error(), Some("Location permission not granted."));
    }

    #[test]
    fn test_fallback_sets_notice_and_geocodes() {
        let mut state = AppState::default();
        let result = reducer(&mut state, Action::LocationFallback("London".into()));
        assert_eq!(state.notice.as_deref(), Some(FALLBACK_NOTICE));
        assert_eq!(
            only_effect(&result),
            Effect::GeocodeCity {
                query: "London".into()
            }
        );
    }

    #[test]
    fn test_weather_did_load_requests_air_quality() {
        let mut state = AppState::default();
        reducer(&mut state, Action::CitySearch("London".into()));
        let result = reducer(&mut state, Action::PlaceDidResolve(london()));
        assert_eq!(only_effect(&result), Effect::FetchWeather { place: london() });

        let result = reducer(
            &mut state,
            Action::WeatherDidLoad {
                place: london(),
                weather: weather(),
            },
        );
        assert!(state.weather.is_loaded());
        assert_eq!(state.location_name(), Some("London, GB"));
        assert_eq!(
            only_effect(&result),
            Effect::FetchAirQuality {
                lat: 51.5073,
                lon: -0.1276
            }
        );
    }

    #[test]
    fn test_air_quality_for_other_place_is_ignored() {
        let mut state = AppState {
            place: Some(london()),
            ..Default::default()
        };
        let result = reducer(
            &mut state,
            Action::AirQualityDidLoad {
                lat: 48.85,
                lon: 2.35,
                air_quality: air(40),
            },
        );
        assert!(!result.changed);
        assert!(state.air_quality.is_none());

        reducer(
            &mut state,
            Action::AirQualityDidLoad {
                lat: 51.5073,
                lon: -0.1276,
                air_quality: air(40),
            },
        );
        assert_eq!(state.air_quality.as_ref().map(|a| a.us_aqi), Some(40));
    }

    #[test]
    fn test_air_quality_error_keeps_weather() {
        let mut state = AppState {
            place: Some(london()),
            weather: DataResource::Loaded(*weather()),
            air_quality: Some(air(12)),
            ..Default::default()
        };
        let result = reducer(&mut state, Action::AirQualityDidError("timeout".into()));
        assert!(!result.changed);
        assert!(state.weather.is_loaded());
        assert!(state.error().is_none());
        assert!(state.air_quality.is_some());
    }

    #[test]
    fn test_new_place_clears_air_quality() {
        let mut state = AppState {
            place: Some(london()),
            air_quality: Some(air(12)),
            ..Default::default()
        };
        reducer(&mut state, Action::CitySearch("Paris".into()));
        reducer(&mut state, Action::PlaceDidResolve(paris()));
        reducer(
            &mut state,
            Action::WeatherDidLoad {
                place: paris(),
                weather: weather(),
            },
        );
        assert!(state.air_quality.is_none());
        assert_eq!(state.location_name(), Some("Paris, FR"));
    }

    #[test]
    fn test_refresh_during_search_does_not_fetch_old_place() {
        let mut state = AppState {
            place: Some(london()),
            weather: DataResource::Loaded(*weather()),
            ..Default::default()
        };
        reducer(&mut state, Action::CitySearch("Paris".into()));
        let result = reducer(&mut state, Action::WeatherFetch);
        assert!(!result.changed);
        assert!(result.effects.is_empty());

        reducer(&mut state, Action::PlaceDidResolve(paris()));
        let result = reducer(&mut state, Action::WeatherFetch);
        assert!(result.effects.is_empty());
        assert_eq!(state.pending_place, Some(paris()));
    }

    #[test]
    fn test_second_refresh_waits_for_first() {
        let mut state = AppState {
            place: Some(london()),
            weather: DataResource::Loaded(*weather()),
            ..Default::default()
        };
        assert_eq!(
            only_effect(&reducer(&mut state, Action::WeatherFetch)),
            Effect::FetchWeather { place: london() }
        );
        assert!(reducer(&mut state, Action::WeatherFetch).effects.is_empty());
    }

    #[test]
    fn test_late_weather_after_failed_search_is_dropped() {
        let mut state = AppState {
            place: Some(london()),
            weather: DataResource::Loaded(*weather()),
            ..Default::default()
        };
        reducer(&mut state, Action::WeatherFetch);
        reducer(&mut state, Action::CitySearch("Atlantis".into()));
        reducer(
            &mut state,
            Action::PlaceDidError("City not found: Atlantis".into()),
        );

        let result = reducer(
            &mut state,
            Action::WeatherDidLoad {
                place: london(),
                weather: weather(),
            },
        );
        assert!(!result.changed);
        assert!(result.effects.is_empty());
        assert_eq!(state.error(), Some("City not found: Atlantis"));
        assert_ne!(state.location_name(), Some("London, GB"));
    }

    #[test]
    fn test_weather_for_superseded_place_is_dropped() {
        let mut state = AppState::default();
        reducer(&mut state, Action::CitySearch("Paris".into()));
        reducer(&mut state, Action::PlaceDidResolve(paris()));

        let result = reducer(
            &mut state,
            Action::WeatherDidError {
                place: london(),
                error: "Network error: timed out".into(),
            },
        );
        assert!(!result.changed);
        assert!(state.weather.is_loading());

        reducer(
            &mut state,
            Action::WeatherDidLoad {
                place: paris(),
                weather: weather(),
            },
        );
        assert!(state.weather.is_loaded());
        assert!(state.pending_place.is_none());
    }

    #[test]
    fn test_place_result_after_lookup_ended_is_dropped() {
        let mut state = AppState::default();
        reducer(&mut state, Action::CitySearch("Paris".into()));
        reducer(&mut state, Action::PlaceDidError("City not found: Paris".into()));
        reducer(&mut state, Action::UiClearError);

        let result = reducer(&mut state, Action::PlaceDidResolve(paris()));
        assert!(result.effects.is_empty());
        assert!(state.weather.is_empty());
    }

    #[test]
    fn test_refresh_without_place_is_noop() {
        let mut state = AppState::default();
        let result = reducer(&mut state, Action::WeatherFetch);
        assert!(!result.changed);
        assert!(result.effects.is_empty());
    }

    #[test]
    fn test_refresh_keeps_loaded_data() {
        let mut state = AppState {
            place: Some(london()),
            weather: DataResource::Loaded(*weather()),
            ..Default::default()
        };
        let result = reducer(&mut state, Action::WeatherFetch);
        assert!(state.weather.is_loaded());
        assert!(state.is_refreshing);
        assert_eq!(only_effect(&result), Effect::FetchWeather { place: london() });
    }

    #[test]
    fn test_empty_search_submit_shows_notice() {
        let mut state = AppState::default();
        reducer(&mut state, Action::SearchOpen);
        let result = reducer(&mut state, Action::SearchQuerySubmit("   ".into()));
        assert!(result.effects.is_empty());
        assert!(state.search_mode);
        assert_eq!(state.notice.as_deref(), Some(EMPTY_QUERY_NOTICE));
        assert!(state.weather.is_empty());
    }

    #[test]
    fn test_search_submit_closes_box() {
        let mut state = AppState::default();
        reducer(&mut state, Action::SearchOpen);
        reducer(&mut state, Action::SearchQueryChange("Tokyo".into()));
        let result = reducer(&mut state, Action::SearchQuerySubmit(" Tokyo ".into()));
        assert!(!state.search_mode);
        assert!(state.search_query.is_empty());
        assert!(state.weather.is_loading());
        assert_eq!(
            only_effect(&result),
            Effect::GeocodeCity {
                query: "Tokyo".into()
            }
        );
    }

    #[test]
    fn test_toggle_theme_persists() {
        let mut state = AppState::default();
        let result = reducer(&mut state, Action::UiToggleTheme);
        assert_eq!(state.theme, Theme::Dark);
        assert_eq!(only_effect(&result), Effect::SaveTheme(Theme::Dark));
    }

    #[test]
    fn test_clear_error() {
        let mut state = AppState {
            weather: DataResource::Failed("City not found: Atlantis".into()),
            ..Default::default()
        };
        assert!(reducer(&mut state, Action::UiClearError).changed);
        assert!(state.weather.is_empty());
        assert!(!reducer(&mut state, Action::UiClearError).changed);
    }

    #[test]
    fn test_tick_only_while_loading() {
        let mut state = AppState::default();
        assert!(!reducer(&mut state, Action::Tick).changed);

        state.weather = DataResource::Loading;
        assert!(reducer(&mut state, Action::Tick).changed);
        assert_eq!(state.tick_count, 1);
    }

    #[test]
    fn test_notice_expires_after_ticks() {
        let mut state = AppState::default();
        reducer(&mut state, Action::ThemeDidError("Permission denied".into()));
        assert_eq!(state.notice.as_deref(), Some("Permission denied"));

        for _ in 1..NOTICE_TICKS {
            reducer(&mut state, Action::Tick);
        }
        assert!(state.notice.is_some());

        assert!(reducer(&mut state, Action::Tick).changed);
        assert!(state.notice.is_none());
        assert!(!reducer(&mut state, Action::Tick).changed);
    }

    #[test]
    fn test_fallback_notice_outlives_the_lookup_then_clears() {
        let mut state = AppState::default();
        reducer(&mut state, Action::LocationFallback("London".into()));
        reducer(&mut state, Action::PlaceDidResolve(london()));
        reducer(
            &mut state,
            Action::WeatherDidLoad {
                place: london(),
                weather: weather(),
            },
        );
        assert_eq!(state.notice.as_deref(), Some(FALLBACK_NOTICE));

        for _ in 0..NOTICE_TICKS {
            reducer(&mut state, Action::Tick);
        }
        assert!(state.notice.is_none());
    }
}
