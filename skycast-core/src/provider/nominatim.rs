use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{
    error::RequestError,
    model::Coordinate,
    provider::{GeocodeProvider, truncate_body},
};

const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

// Nominatim's usage policy requires an identifying user agent.
const USER_AGENT: &str = concat!("skycast/", env!("CARGO_PKG_VERSION"));

/// Geocoding client backed by the Nominatim (OpenStreetMap) search API.
///
/// One request per lookup, no retries, no caching; the transport default is
/// the only timeout in play.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    base_url: String,
    http: Client,
}

impl NominatimClient {
    pub fn new() -> Result<Self, RequestError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Client pointed at a custom endpoint, used by the mock-server tests.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, RequestError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| RequestError::NetworkFailure(e.to_string()))?;

        Ok(Self { base_url: base_url.into(), http })
    }
}

#[async_trait]
impl GeocodeProvider for NominatimClient {
    #[instrument(skip(self))]
    async fn resolve(&self, address: &str) -> Result<Coordinate, RequestError> {
        if address.trim().is_empty() {
            return Err(RequestError::AddressNotFound(
                "address must not be empty".to_string(),
            ));
        }

        let url = format!("{}/search", self.base_url);

        debug!(%address, "resolving address");

        let res = self
            .http
            .get(&url)
            .query(&[("q", address), ("format", "jsonv2"), ("limit", "1")])
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
                "geocoding request failed with status {status}: {}",
                truncate_body(&body),
            )));
        }

        let candidates: Vec<SearchResult> = serde_json::from_str(&body)
            .map_err(|e| RequestError::MalformedResponse(format!("geocoding response: {e}")))?;

        let hit = candidates
            .first()
            .ok_or_else(|| RequestError::AddressNotFound(address.to_string()))?;

        let latitude: f64 = hit.lat.parse().map_err(|_| {
            RequestError::MalformedResponse(format!("latitude '{}' is not numeric", hit.lat))
        })?;
        let longitude: f64 = hit.lon.parse().map_err(|_| {
            RequestError::MalformedResponse(format!("longitude '{}' is not numeric", hit.lon))
        })?;

        let coordinate = Coordinate::new(latitude, longitude)?;
        debug!(lat = coordinate.latitude, lon = coordinate.longitude, "address resolved");

        Ok(coordinate)
    }
}

/// Candidate entry in a Nominatim search response. Latitude and longitude
/// arrive as strings on the wire.
#[derive(Debug, Deserialize)]
struct SearchResult {
    lat: String,
    lon: String,
}
