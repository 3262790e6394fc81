use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RequestError;

/// A latitude/longitude pair identifying a point on Earth's surface.
///
/// Can only be constructed with in-range values; immutable once produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Latitude must be in [-90, 90], longitude in [-180, 180].
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, RequestError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(RequestError::MalformedResponse(format!(
                "latitude {latitude} outside [-90, 90]"
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(RequestError::MalformedResponse(format!(
                "longitude {longitude} outside [-180, 180]"
            )));
        }

        Ok(Self { latitude, longitude })
    }
}

/// Current conditions for one location, used only for display.
///
/// Temperatures are carried in both scales so the formatted output serves
/// either audience without a second request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub temperature_c: f64,
    pub temperature_f: f64,
    pub feels_like_c: f64,
    pub condition: String,
    pub humidity_pct: u8,
    pub wind_speed_kmh: f64,
    pub observation_time: DateTime<Utc>,
}

/// One day of forecast data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub condition: String,
    pub temperature_max_c: f64,
    pub temperature_min_c: f64,
    pub precipitation_mm: f64,
}

/// Daily forecast rows, earliest day first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast {
    pub days: Vec<DailyForecast>,
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_accepts_valid_ranges() {
        assert!(Coordinate::new(0.0, 0.0).is_ok());
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
        assert!(Coordinate::new(38.8977, -77.0365).is_ok());
    }

    #[test]
    fn coordinate_rejects_out_of_range_values() {
        assert!(Coordinate::new(90.1, 0.0).is_err());
        assert!(Coordinate::new(-90.1, 0.0).is_err());
        assert!(Coordinate::new(0.0, 180.1).is_err());
        assert!(Coordinate::new(0.0, -180.1).is_err());
    }

    #[test]
    fn coordinate_error_is_malformed_response() {
        let err = Coordinate::new(123.0, 0.0).unwrap_err();
        assert!(matches!(err, RequestError::MalformedResponse(_)));
    }

    #[test]
    fn temperature_conversions() {
        assert_eq!(celsius_to_fahrenheit(0.0), 32.0);
        assert_eq!(celsius_to_fahrenheit(100.0), 212.0);
        assert_eq!(fahrenheit_to_celsius(32.0), 0.0);

        let roundtrip = fahrenheit_to_celsius(celsius_to_fahrenheit(15.0));
        assert!((roundtrip - 15.0).abs() < 1e-9);
    }

    #[test]
    fn report_serializes_without_coordinates() {
        let report = WeatherReport {
            temperature_c: 15.0,
            temperature_f: celsius_to_fahrenheit(15.0),
            feels_like_c: 14.2,
            condition: "Clear sky".to_string(),
            humidity_pct: 53,
            wind_speed_kmh: 9.7,
            observation_time: Utc::now(),
        };

        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("latitude").is_none());
        assert!(json.get("longitude").is_none());
        assert_eq!(json["condition"], "Clear sky");
    }
}
