use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::RequestError,
    model::{Coordinate, Forecast, WeatherReport},
};

pub mod nominatim;
pub mod open_meteo;

/// Resolves a free-form address to a coordinate.
#[async_trait]
pub trait GeocodeProvider: Send + Sync + Debug {
    async fn resolve(&self, address: &str) -> Result<Coordinate, RequestError>;
}

/// Fetches weather data for a coordinate.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, coordinate: Coordinate) -> Result<WeatherReport, RequestError>;

    async fn forecast(&self, coordinate: Coordinate, days: u8) -> Result<Forecast, RequestError>;
}

/// Keeps upstream error bodies readable when they are echoed into messages.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}
