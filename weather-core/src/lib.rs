//! Core library for the weather proxy.
//!
//! This crate defines:
//! - Configuration loading and validation
//! - Geocoding and weather provider clients
//! - The geocode -> weather lookup pipeline and its report models
//!
//! It is used by `weather-server`, but can also be reused by other binaries.

pub mod config;
pub mod error;
pub mod lookup;
pub mod model;
pub mod provider;
pub mod report;

pub use config::{Config, Settings};
pub use error::{ConfigError, LookupError};
pub use lookup::Lookup;
pub use model::{Coordinate, CoordinatesReport, Reading, WeatherReport};
pub use provider::{Geocoder, WeatherProvider};
