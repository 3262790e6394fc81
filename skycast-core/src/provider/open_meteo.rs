use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{
    error::RequestError,
    model::{Coordinate, DailyForecast, Forecast, WeatherReport, celsius_to_fahrenheit},
    provider::{WeatherProvider, truncate_body},
};

const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com/v1";

const CURRENT_FIELDS: &str =
    "temperature_2m,relative_humidity_2m,apparent_temperature,weather_code,wind_speed_10m";
const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min,precipitation_sum";

/// Open-Meteo supports at most 16 forecast days; requests are clamped.
pub const MAX_FORECAST_DAYS: u8 = 16;

/// Weather client backed by the Open-Meteo forecast API.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    base_url: String,
    http: Client,
}

impl Default for OpenMeteoClient {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenMeteoClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Client pointed at a custom endpoint, used by the mock-server tests.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: Client::new(),
        }
    }

    async fn fetch(&self, params: &[(&str, String)]) -> Result<String, RequestError> {
        let url = format!("{}/forecast", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| RequestError::NetworkFailure(e.to_string()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| RequestError::NetworkFailure(e.to_string()))?;

        if !status.is_success() {
            return Err(RequestError::NetworkFailure(format!(
                "weather request failed with status {status}: {}",
                truncate_body(&body),
            )));
        }

        Ok(body)
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoClient {
    #[instrument(skip(self, coordinate), fields(lat = coordinate.latitude, lon = coordinate.longitude))]
    async fn current(&self, coordinate: Coordinate) -> Result<WeatherReport, RequestError> {
        debug!("fetching current conditions");

        let body = self
            .fetch(&[
                ("latitude", coordinate.latitude.to_string()),
                ("longitude", coordinate.longitude.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
                ("timezone", "UTC".to_string()),
            ])
            .await?;

        let parsed: ForecastResponse = serde_json::from_str(&body)
            .map_err(|e| RequestError::MalformedResponse(format!("weather response: {e}")))?;

        let current = parsed.current.ok_or_else(|| {
            RequestError::MalformedResponse("no current section in weather response".to_string())
        })?;

        Ok(WeatherReport {
            temperature_c: current.temperature_2m,
            temperature_f: celsius_to_fahrenheit(current.temperature_2m),
            feels_like_c: current.apparent_temperature,
            condition: describe_weather_code(current.weather_code).to_string(),
            humidity_pct: current.relative_humidity_2m,
            wind_speed_kmh: current.wind_speed_10m,
            observation_time: parse_observation_time(&current.time)?,
        })
    }

    #[instrument(skip(self, coordinate), fields(lat = coordinate.latitude, lon = coordinate.longitude))]
    async fn forecast(&self, coordinate: Coordinate, days: u8) -> Result<Forecast, RequestError> {
        let days = days.clamp(1, MAX_FORECAST_DAYS);
        debug!(days, "fetching daily forecast");

        let body = self
            .fetch(&[
                ("latitude", coordinate.latitude.to_string()),
                ("longitude", coordinate.longitude.to_string()),
                ("daily", DAILY_FIELDS.to_string()),
                ("forecast_days", days.to_string()),
                ("timezone", "UTC".to_string()),
            ])
            .await?;

        let parsed: ForecastResponse = serde_json::from_str(&body)
            .map_err(|e| RequestError::MalformedResponse(format!("weather response: {e}")))?;

        let daily = parsed.daily.ok_or_else(|| {
            RequestError::MalformedResponse("no daily section in weather response".to_string())
        })?;

        let len = daily.time.len();
        if daily.weather_code.len() != len
            || daily.temperature_2m_max.len() != len
            || daily.temperature_2m_min.len() != len
            || daily.precipitation_sum.len() != len
        {
            return Err(RequestError::MalformedResponse(
                "daily arrays have mismatched lengths".to_string(),
            ));
        }

        let mut rows = Vec::with_capacity(len);
        for (i, raw_date) in daily.time.iter().enumerate() {
            let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d").map_err(|e| {
                RequestError::MalformedResponse(format!("daily date '{raw_date}': {e}"))
            })?;

            rows.push(DailyForecast {
                date,
                condition: describe_weather_code(daily.weather_code[i]).to_string(),
                temperature_max_c: daily.temperature_2m_max[i],
                temperature_min_c: daily.temperature_2m_min[i],
                precipitation_mm: daily.precipitation_sum[i],
            });
        }

        Ok(Forecast { days: rows })
    }
}

/// Open-Meteo timestamps are ISO 8601 with minute precision ("2026-08-07T12:00").
fn parse_observation_time(raw: &str) -> Result<DateTime<Utc>, RequestError> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .map(|ndt| Utc.from_utc_datetime(&ndt))
        .map_err(|_| RequestError::MalformedResponse(format!("observation time '{raw}'")))
}

/// WMO weather interpretation codes, per the Open-Meteo docs.
fn describe_weather_code(code: u8) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 | 48 => "Fog",
        51 | 53 | 55 => "Drizzle",
        56 | 57 => "Freezing drizzle",
        61 | 63 | 65 => "Rain",
        66 | 67 => "Freezing rain",
        71 | 73 | 75 => "Snow",
        77 => "Snow grains",
        80..=82 => "Rain showers",
        85 | 86 => "Snow showers",
        95 => "Thunderstorm",
        96 | 99 => "Thunderstorm with hail",
        _ => "Unknown",
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: Option<CurrentSection>,
    daily: Option<DailySection>,
}

#[derive(Debug, Deserialize)]
struct CurrentSection {
    time: String,
    temperature_2m: f64,
    relative_humidity_2m: u8,
    apparent_temperature: f64,
    weather_code: u8,
    wind_speed_10m: f64,
}

#[derive(Debug, Deserialize)]
struct DailySection {
    time: Vec<String>,
    weather_code: Vec<u8>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
    precipitation_sum: Vec<f64>,
}
