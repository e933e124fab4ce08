//! Effects - side effects declared by the reducer

use crate::location::Coordinates;
use crate::model::Place;
use crate::preferences::Theme;

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Ask the location provider for the last known position
    ResolveLocation,
    /// Turn coordinates into a place name (falls back to "Current Location")
    ReverseGeocode(Coordinates),
    /// Resolve a city name to its top match
    GeocodeCity { query: String },
    /// Fetch the forecast for a resolved place
    FetchWeather { place: Place },
    /// Fetch current air quality for the given coordinates
    FetchAirQuality { lat: f64, lon: f64 },
    /// Persist the theme preference
    SaveTheme(Theme),
}
