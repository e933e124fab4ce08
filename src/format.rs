//! Display formatting: timestamps, temperatures and WMO weather codes

use chrono::{NaiveDate, NaiveDateTime};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Placeholder shown when an upstream timestamp cannot be parsed.
pub const NOT_AVAILABLE: &str = "N/A";

fn parse_iso_date_time(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}

/// `"2025-11-12T19:00"` -> `"7 PM"`
pub fn format_iso_to_hour(value: &str) -> String {
    match parse_iso_date_time(value) {
        Some(time) => time.format("%-I %p").to_string().to_uppercase(),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// `"2025-11-12"` -> `"Wednesday"`
pub fn format_iso_to_day(value: &str) -> String {
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => date.format("%A").to_string(),
        Err(_) => NOT_AVAILABLE.to_string(),
    }
}

/// Round half up and append the degree sign: `15.7` -> `"16°"`.
pub fn format_temp(temp: f64) -> String {
    format!("{}°", round_half_up(temp))
}

// `temp + 0.5` is inexact just below a half, so only exact halves go up.
fn round_half_up(value: f64) -> i64 {
    let nearest = value.round();
    if (nearest - value).abs() == 0.5 {
        (value + 0.5).floor() as i64
    } else {
        nearest as i64
    }
}

/// Pollutant concentration with one decimal place.
pub fn format_reading(value: f64) -> String {
    format!("{value:.1}")
}

/// Icon set for WMO weather codes, day/night aware for clear skies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum WeatherIcon {
    Sun,
    Moon,
    SunCloud,
    MoonCloud,
    Cloud,
    CloudHeavy,
    Fog,
    Drizzle,
    Rain,
    RainHeavy,
    Snow,
    SnowHeavy,
    Thunderstorm,
    ThunderstormRain,
}

impl WeatherIcon {
    /// Stable identifier, e.g. for theming or scripting.
    pub fn id(self) -> &'static str {
        match self {
            WeatherIcon::Sun => "sun",
            WeatherIcon::Moon => "moon",
            WeatherIcon::SunCloud => "sun_cloud",
            WeatherIcon::MoonCloud => "moon_cloud",
            WeatherIcon::Cloud => "cloud",
            WeatherIcon::CloudHeavy => "cloud_heavy",
            WeatherIcon::Fog => "fog",
            WeatherIcon::Drizzle => "drizzle",
            WeatherIcon::Rain => "rain",
            WeatherIcon::RainHeavy => "rain_heavy",
            WeatherIcon::Snow => "snow",
            WeatherIcon::SnowHeavy => "snow_heavy",
            WeatherIcon::Thunderstorm => "thunderstorm",
            WeatherIcon::ThunderstormRain => "thunderstorm_rain",
        }
    }

    /// Terminal glyph
    pub fn glyph(self) -> &'static str {
        match self {
            WeatherIcon::Sun => "\u{2600}\u{fe0f}",
            WeatherIcon::Moon => "\u{1f319}",
            WeatherIcon::SunCloud => "\u{1f324}\u{fe0f}",
            WeatherIcon::MoonCloud => "\u{1f303}",
            WeatherIcon::Cloud => "\u{26c5}",
            WeatherIcon::CloudHeavy => "\u{2601}\u{fe0f}",
            WeatherIcon::Fog => "\u{1f32b}\u{fe0f}",
            WeatherIcon::Drizzle => "\u{1f326}\u{fe0f}",
            WeatherIcon::Rain => "\u{1f327}\u{fe0f}",
            WeatherIcon::RainHeavy => "\u{2614}",
            WeatherIcon::Snow => "\u{1f328}\u{fe0f}",
            WeatherIcon::SnowHeavy => "\u{2744}\u{fe0f}",
            WeatherIcon::Thunderstorm => "\u{1f329}\u{fe0f}",
            WeatherIcon::ThunderstormRain => "\u{26c8}\u{fe0f}",
        }
    }
}

/// Map a WMO weather code to an icon. Unknown codes fall back to a cloud.
pub fn weather_icon(code: u8, is_day: bool) -> WeatherIcon {
    match code {
        0 if is_day => WeatherIcon::Sun,
        0 => WeatherIcon::Moon,
        1 if is_day => WeatherIcon::SunCloud,
        1 => WeatherIcon::MoonCloud,
        2 => WeatherIcon::Cloud,
        3 => WeatherIcon::CloudHeavy,
        45 | 48 => WeatherIcon::Fog,
        51 | 53 | 55 | 56 | 57 => WeatherIcon::Drizzle,
        61 | 63 | 65 | 66 | 67 => WeatherIcon::Rain,
        71 | 73 | 75 | 77 => WeatherIcon::Snow,
        80..=82 => WeatherIcon::RainHeavy,
        85 | 86 => WeatherIcon::SnowHeavy,
        95 => WeatherIcon::Thunderstorm,
        96 | 99 => WeatherIcon::ThunderstormRain,
        _ => WeatherIcon::Cloud,
    }
}

/// Convert WMO weather code to human-readable description
pub fn weather_description(code: u8) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 | 48 => "Fog",
        51 | 53 | 55 => "Drizzle",
        56 | 57 => "Freezing Drizzle",
        61 | 63 | 65 => "Rain",
        66 | 67 => "Freezing Rain",
        71 | 73 | 75 => "Snow",
        77 => "Snow grains",
        80..=82 => "Rain showers",
        85 | 86 => "Snow showers",
        95 => "Thunderstorm",
        96 | 99 => "Thunderstorm with rain",
        _ => "Cloudy",
    }
}
