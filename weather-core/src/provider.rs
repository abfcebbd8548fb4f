use crate::{
    Config,
    error::LookupError,
    model::{Coordinate, Observation},
    provider::{google::GoogleGeocoder, openweather::OpenWeatherProvider},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod google;
pub mod openweather;

/// Resolves a free-text address to a position.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    async fn geocode(&self, address: &str) -> Result<Coordinate, LookupError>;
}

/// Reports the current conditions at a position.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, at: Coordinate) -> Result<Observation, LookupError>;
}

/// Construct the geocoder from config.
pub fn geocoder_from_config(config: &Config) -> Box<dyn Geocoder> {
    Box::new(GoogleGeocoder::new(
        config.maps_api_key.clone(),
        config.geocoding_base_url.clone(),
    ))
}

/// Construct the weather provider from config.
pub fn weather_provider_from_config(config: &Config) -> Box<dyn WeatherProvider> {
    Box::new(OpenWeatherProvider::new(
        config.weather_api_key.clone(),
        config.weather_base_url.clone(),
    ))
}

/// Shorten an upstream body before it ends up in an error message.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let cut = (0..=MAX).rev().find(|&i| body.is_char_boundary(i)).unwrap_or(0);
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}
