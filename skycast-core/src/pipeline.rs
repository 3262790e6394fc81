use tracing::debug;

use crate::{
    error::RequestError,
    model::{Forecast, WeatherReport},
    provider::{GeocodeProvider, WeatherProvider},
};

/// The fixed, sequential chain of stages executed per invocation.
///
/// The geocoding result feeds the weather call; the first error stops
/// everything downstream, so the weather provider is never contacted after a
/// failed resolution.
#[derive(Debug)]
pub struct Pipeline<G, W> {
    geocoder: G,
    weather: W,
}

impl<G, W> Pipeline<G, W>
where
    G: GeocodeProvider,
    W: WeatherProvider,
{
    pub fn new(geocoder: G, weather: W) -> Self {
        Self { geocoder, weather }
    }

    /// Current conditions for a free-form address.
    pub async fn current(&self, address: &str) -> Result<WeatherReport, RequestError> {
        let coordinate = self.geocoder.resolve(address).await?;
        debug!(lat = coordinate.latitude, lon = coordinate.longitude, "handing off to weather");
        self.weather.current(coordinate).await
    }

    /// Daily forecast for a free-form address.
    pub async fn forecast(&self, address: &str, days: u8) -> Result<Forecast, RequestError> {
        let coordinate = self.geocoder.resolve(address).await?;
        self.weather.forecast(coordinate, days).await
    }
}
