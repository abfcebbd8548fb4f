use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{error::LookupError, model::Coordinate};

use super::{Geocoder, truncate_body};

const STATUS_OK: &str = "OK";

/// Google Maps Geocoding API client.
#[derive(Debug, Clone)]
pub struct GoogleGeocoder {
    api_key: String,
    base_url: String,
    http: Client,
}

impl GoogleGeocoder {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            http: Client::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[async_trait]
impl Geocoder for GoogleGeocoder {
    async fn geocode(&self, address: &str) -> Result<Coordinate, LookupError> {
        let url = format!("{}/maps/api/geocode/json", self.base_url);
        tracing::debug!(%address, "requesting geocode");

        let res = self
            .http
            .get(&url)
            .query(&[("address", address), ("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        let parsed: GeocodeResponse = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(_) if !status.is_success() => {
                return Err(LookupError::Geocoding {
                    status: status.as_u16().to_string(),
                    message: Some(truncate_body(&body)),
                });
            }
            Err(err) => return Err(err.into()),
        };

        if parsed.status != STATUS_OK {
            tracing::debug!(status = %parsed.status, "geocoding rejected");
            return Err(LookupError::Geocoding {
                status: parsed.status,
                message: parsed.error_message,
            });
        }

        let location = parsed
            .results
            .into_iter()
            .next()
            .ok_or(LookupError::NoResults)?
            .geometry
            .location;

        Ok(Coordinate {
            latitude: location.lat,
            longitude: location.lng,
        })
    }
}
