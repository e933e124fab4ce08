//! Data-transfer objects for Open-Meteo and Nominatim, plus display rows

use ratatui::style::Color;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Number of hourly rows shown (the next 24 hours).
pub const HOURLY_ROW_LIMIT: usize = 24;

/// Upper bound of the AQI gauge; covers most real-world readings.
pub const AQI_GAUGE_MAX: u16 = 300;

// ============================================================================
// Open-Meteo forecast
// ============================================================================

/// Forecast response for one coordinate query
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
    pub current: CurrentWeather,
    pub hourly: HourlyForecast,
    pub daily: DailyForecast,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CurrentWeather {
    pub time: String,
    #[serde(rename = "temperature_2m")]
    pub temperature: f64,
    #[serde(rename = "apparent_temperature")]
    pub feels_like: f64,
    #[serde(rename = "relative_humidity_2m")]
    pub humidity: u8,
    pub is_day: u8,
    pub weather_code: u8,
    #[serde(rename = "wind_speed_10m")]
    pub wind_speed: f64,
}

/// Hourly series; arrays are positionally correlated.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HourlyForecast {
    pub time: Vec<String>,
    #[serde(rename = "temperature_2m")]
    pub temperatures: Vec<f64>,
    #[serde(rename = "weather_code")]
    pub weather_codes: Vec<u8>,
    pub is_day: Vec<u8>,
}

/// Daily series; index 0 is today.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DailyForecast {
    pub time: Vec<String>,
    #[serde(rename = "weather_code")]
    pub weather_codes: Vec<u8>,
    #[serde(rename = "temperature_2m_max")]
    pub max_temps: Vec<f64>,
    #[serde(rename = "temperature_2m_min")]
    pub min_temps: Vec<f64>,
}

/// One hour of the forecast strip
#[derive(Clone, Debug, PartialEq)]
pub struct HourlyRow {
    pub time: String,
    pub temperature: f64,
    pub weather_code: u8,
    pub is_day: bool,
}

/// One upcoming day of the forecast list
#[derive(Clone, Debug, PartialEq)]
pub struct DailyRow {
    pub date: String,
    pub max_temp: f64,
    pub min_temp: f64,
    pub weather_code: u8,
}

impl CurrentWeather {
    pub fn is_daytime(&self) -> bool {
        self.is_day == 1
    }
}

impl WeatherResponse {
    /// Merge the hourly arrays into at most [`HOURLY_ROW_LIMIT`] rows.
    pub fn hourly_rows(&self) -> Vec<HourlyRow> {
        let hourly = &self.hourly;
        hourly
            .time
            .iter()
            .zip(&hourly.temperatures)
            .zip(&hourly.weather_codes)
            .zip(&hourly.is_day)
            .take(HOURLY_ROW_LIMIT)
            .map(|(((time, &temperature), &weather_code), &is_day)| HourlyRow {
                time: time.clone(),
                temperature,
                weather_code,
                is_day: is_day == 1,
            })
            .collect()
    }

    /// Merge the daily arrays, skipping today.
    pub fn upcoming_days(&self) -> Vec<DailyRow> {
        let daily = &self.daily;
        daily
            .time
            .iter()
            .zip(&daily.max_temps)
            .zip(&daily.min_temps)
            .zip(&daily.weather_codes)
            .skip(1)
            .map(|(((date, &max_temp), &min_temp), &weather_code)| DailyRow {
                date: date.clone(),
                max_temp,
                min_temp,
                weather_code,
            })
            .collect()
    }

    /// Today's `(max, min)`, if the daily series is not empty.
    pub fn today_high_low(&self) -> Option<(f64, f64)> {
        let max = self.daily.max_temps.first()?;
        let min = self.daily.min_temps.first()?;
        Some((*max, *min))
    }
}

// ============================================================================
// Open-Meteo air quality
// ============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AirQualityResponse {
    pub current: CurrentAirQuality,
}

/// Current air-quality snapshot (US AQI scale, concentrations in μg/m³)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CurrentAirQuality {
    pub us_aqi: u16,
    pub pm2_5: f64,
    pub pm10: f64,
    #[serde(rename = "carbon_monoxide")]
    pub co: f64,
    #[serde(rename = "nitrogen_dioxide")]
    pub no2: f64,
    #[serde(rename = "sulphur_dioxide")]
    pub so2: f64,
    #[serde(rename = "ozone")]
    pub o3: f64,
}

impl CurrentAirQuality {
    pub fn level(&self) -> AqiLevel {
        AqiLevel::from_us_aqi(self.us_aqi)
    }

    /// Fraction of the gauge to fill, clamped to `0.0..=1.0`.
    pub fn gauge_ratio(&self) -> f64 {
        (f64::from(self.us_aqi) / f64::from(AQI_GAUGE_MAX)).clamp(0.0, 1.0)
    }
}

/// US AQI bands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AqiLevel {
    Good,
    Moderate,
    UnhealthyForSensitive,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AqiLevel {
    pub fn from_us_aqi(aqi: u16) -> Self {
        match aqi {
            0..=50 => AqiLevel::Good,
            51..=100 => AqiLevel::Moderate,
            101..=150 => AqiLevel::UnhealthyForSensitive,
            151..=200 => AqiLevel::Unhealthy,
            201..=300 => AqiLevel::VeryUnhealthy,
            _ => AqiLevel::Hazardous,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AqiLevel::Good => "Good",
            AqiLevel::Moderate => "Moderate",
            // The two middle bands share a label and differ only in color
            AqiLevel::UnhealthyForSensitive | AqiLevel::Unhealthy => "Unhealthy",
            AqiLevel::VeryUnhealthy => "Very Unhealthy",
            AqiLevel::Hazardous => "Hazardous",
        }
    }

    pub fn color(self) -> Color {
        match self {
            AqiLevel::Good => Color::Rgb(0x4C, 0xAF, 0x50),
            AqiLevel::Moderate => Color::Rgb(0xFF, 0xC1, 0x07),
            AqiLevel::UnhealthyForSensitive => Color::Rgb(0xFF, 0x98, 0x00),
            AqiLevel::Unhealthy => Color::Rgb(0xF4, 0x43, 0x36),
            AqiLevel::VeryUnhealthy => Color::Rgb(0x9C, 0x27, 0xB0),
            AqiLevel::Hazardous => Color::Rgb(0x88, 0x0E, 0x4F),
        }
    }
}

// ============================================================================
// Nominatim
// ============================================================================

/// One item of a Nominatim search result list
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GeocodingResponse {
    #[serde(rename = "lat")]
    pub latitude: String,
    #[serde(rename = "lon")]
    pub longitude: String,
    pub display_name: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ReverseGeocodingResponse {
    #[serde(default)]
    pub address: Option<Address>,
    pub display_name: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Address {
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub country_code: Option<String>,
}

impl ReverseGeocodingResponse {
    /// The display name as Nominatim returns it. Only when that is missing
    /// is a short name built from the address (city > town > village).
    pub fn place_name(&self) -> Option<String> {
        let display = self
            .display_name
            .clone()
            .filter(|name| !name.trim().is_empty());
        display.or_else(|| self.short_name())
    }

    fn short_name(&self) -> Option<String> {
        let addr = self.address.as_ref()?;
        let place = addr
            .city
            .as_deref()
            .or(addr.town.as_deref())
            .or(addr.village.as_deref())
            .filter(|p| !p.is_empty())?;
        Some(match addr.country_code.as_deref().filter(|c| !c.is_empty()) {
            Some(code) => format!("{}, {}", place, code.to_uppercase()),
            None => place.to_string(),
        })
    }
}

/// A resolved place: the hand-off from geocoding to the weather fetch
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Place {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

/// Nominatim returned coordinates that are not decimal numbers
#[derive(thiserror::Error, Debug, PartialEq)]
#[error("invalid coordinates: {lat}, {lon}")]
pub struct InvalidCoordinates {
    pub lat: String,
    pub lon: String,
}

impl TryFrom<GeocodingResponse> for Place {
    type Error = InvalidCoordinates;

    fn try_from(result: GeocodingResponse) -> Result<Self, Self::Error> {
        match (
            result.latitude.trim().parse::<f64>(),
            result.longitude.trim().parse::<f64>(),
        ) {
            (Ok(lat), Ok(lon)) => Ok(Place {
                name: result.display_name,
                lat,
                lon,
            }),
            _ => Err(InvalidCoordinates {
                lat: result.latitude,
                lon: result.longitude,
            }),
        }
    }
}
