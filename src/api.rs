//! HTTP clients for Open-Meteo (weather, air quality) and Nominatim (geocoding)

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::model::{
    AirQualityResponse, GeocodingResponse, InvalidCoordinates, Place, ReverseGeocodingResponse,
    WeatherResponse,
};

pub const OPEN_METEO_URL: &str = "https://api.open-meteo.com";
pub const AIR_QUALITY_URL: &str = "https://air-quality-api.open-meteo.com";
pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

/// Nominatim blocks requests without an identifying User-Agent.
pub const USER_AGENT: &str = concat!("skycast/", env!("CARGO_PKG_VERSION"));

const CURRENT_FIELDS: &str =
    "temperature_2m,relative_humidity_2m,apparent_temperature,is_day,weather_code,wind_speed_10m";
const HOURLY_FIELDS: &str = "temperature_2m,weather_code,is_day";
const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min";
const AIR_QUALITY_FIELDS: &str =
    "us_aqi,pm2_5,pm10,carbon_monoxide,nitrogen_dioxide,sulphur_dioxide,ozone";

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("{}", status_text(*.0))]
    Status(StatusCode),
    #[error("invalid response: {0}")]
    Decode(#[source] reqwest::Error),
    #[error("City not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    InvalidPlace(#[from] InvalidCoordinates),
}

impl ApiError {
    /// User-facing text for a failed city search.
    pub fn search_message(&self) -> String {
        match self {
            ApiError::Request(e) => format!("Search network error: {e}"),
            ApiError::NotFound(_) => self.to_string(),
            other => format!("Search error: {other}"),
        }
    }

    /// User-facing text for a failed forecast fetch.
    pub fn weather_message(&self) -> String {
        match self {
            ApiError::Request(e) => format!("Network error: {e}"),
            other => format!("Error: {other}"),
        }
    }
}

fn status_text(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}

fn join(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path)
}

async fn get_json<T: DeserializeOwned>(client: &reqwest::Client, url: &str) -> Result<T, ApiError> {
    tracing::debug!(%url, "GET");
    let response = client.get(url).send().await.map_err(ApiError::Request)?;
    let status = response.status();
    if !status.is_success() {
        tracing::warn!(%url, %status, "upstream returned error status");
        return Err(ApiError::Status(status));
    }
    response.json().await.map_err(ApiError::Decode)
}

// ============================================================================
// Open-Meteo
// ============================================================================

/// Open-Meteo client: forecast and air quality live on different hosts.
#[derive(Clone, Debug)]
pub struct WeatherClient {
    client: reqwest::Client,
    base_url: String,
    air_quality_url: String,
}

impl WeatherClient {
    pub fn new(base_url: impl Into<String>, air_quality_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            air_quality_url: air_quality_url.into(),
        }
    }

    /// Current conditions plus hourly and daily series in the location's timezone.
    pub async fn forecast(&self, lat: f64, lon: f64) -> Result<WeatherResponse, ApiError> {
        let url = format!(
            "{}?latitude={}&longitude={}&current={}&hourly={}&daily={}&timezone=auto",
            join(&self.base_url, "v1/forecast"),
            lat,
            lon,
            CURRENT_FIELDS,
            HOURLY_FIELDS,
            DAILY_FIELDS,
        );
        get_json(&self.client, &url).await
    }

    pub async fn air_quality(&self, lat: f64, lon: f64) -> Result<AirQualityResponse, ApiError> {
        let url = format!(
            "{}?latitude={}&longitude={}&current={}",
            join(&self.air_quality_url, "v1/air-quality"),
            lat,
            lon,
            AIR_QUALITY_FIELDS,
        );
        get_json(&self.client, &url).await
    }
}

impl Default for WeatherClient {
    fn default() -> Self {
        Self::new(OPEN_METEO_URL, AIR_QUALITY_URL)
    }
}

// ============================================================================
// Nominatim
// ============================================================================

#[derive(Clone, Debug)]
pub struct GeocodingClient {
    client: reqwest::Client,
    base_url: String,
}

impl GeocodingClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(ApiError::Request)?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Resolve a city name to its top match.
    pub async fn search(&self, city: &str) -> Result<Place, ApiError> {
        let url = format!(
            "{}?q={}&format=jsonv2&limit=1",
            join(&self.base_url, "search"),
            urlencoding::encode(city)
        );
        let results: Vec<GeocodingResponse> = get_json(&self.client, &url).await?;
        let top = results
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::NotFound(city.to_string()))?;
        Ok(Place::try_from(top)?)
    }

    pub async fn reverse(&self, lat: f64, lon: f64) -> Result<ReverseGeocodingResponse, ApiError> {
        let url = format!(
            "{}?lat={}&lon={}&format=jsonv2",
            join(&self.base_url, "reverse"),
            lat,
            lon
        );
        get_json(&self.client, &url).await
    }
}
