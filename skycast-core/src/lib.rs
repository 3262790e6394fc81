//! Core library for the `skycast` CLI.
//!
//! This crate defines:
//! - The error taxonomy shared by every pipeline stage
//! - Domain models (coordinates, weather reports, forecasts)
//! - Clients for the external geocoding and weather services
//! - The sequential pipeline composing the two clients
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod error;
pub mod model;
pub mod pipeline;
pub mod provider;

pub use error::RequestError;
pub use model::{Coordinate, DailyForecast, Forecast, WeatherReport};
pub use pipeline::Pipeline;
pub use provider::{GeocodeProvider, WeatherProvider};
pub use provider::{nominatim::NominatimClient, open_meteo::OpenMeteoClient};
