use chrono::Local;

use crate::{
    Config,
    error::LookupError,
    model::{Coordinate, CoordinatesReport, WeatherReport},
    provider::{Geocoder, WeatherProvider, geocoder_from_config, weather_provider_from_config},
};

/// The geocode -> weather pipeline behind both endpoints.
#[derive(Debug)]
pub struct Lookup {
    geocoder: Box<dyn Geocoder>,
    weather: Box<dyn WeatherProvider>,
}

impl Lookup {
    pub fn new(geocoder: Box<dyn Geocoder>, weather: Box<dyn WeatherProvider>) -> Self {
        Self { geocoder, weather }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            geocoder_from_config(config),
            weather_provider_from_config(config),
        )
    }

    pub async fn resolve(&self, address: &str) -> Result<Coordinate, LookupError> {
        self.geocoder.geocode(address).await
    }

    pub async fn coordinates(&self, address: &str) -> Result<CoordinatesReport, LookupError> {
        let coordinate = self.resolve(address).await?;
        Ok(CoordinatesReport::new(address, coordinate))
    }

    /// Resolve `address`, then fetch and flatten its current weather.
    ///
    /// Times of day are rendered in the server's local timezone.
    pub async fn weather(&self, address: &str) -> Result<WeatherReport, LookupError> {
        let coordinate = self.resolve(address).await?;
        let observation = self.weather.current(coordinate).await?;
        Ok(WeatherReport::from_observation(address, observation, &Local))
    }
}
