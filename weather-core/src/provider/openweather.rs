use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::LookupError,
    model::{Coordinate, Observation},
};

use super::WeatherProvider;

/// OpenWeather current-weather client, metric units.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            http: Client::new(),
        }
    }
}

/// Error body, e.g. `{"cod": 401, "message": "Invalid API key. ..."}`.
#[derive(Debug, Deserialize)]
struct OwError {
    message: Option<String>,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, at: Coordinate) -> Result<Observation, LookupError> {
        let url = format!("{}/data/2.5/weather", self.base_url);
        tracing::debug!(lat = at.latitude, lon = at.longitude, "requesting current weather");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("lat", at.latitude.to_string()),
                ("lon", at.longitude.to_string()),
                ("appid", self.api_key.clone()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<OwError>(&body)
                .ok()
                .and_then(|e| e.message)
                .filter(|m| !m.is_empty());

            return Err(LookupError::Weather {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
