use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use std::sync::Arc;
use weather_core::{CoordinatesReport, Lookup, LookupError, WeatherReport};

pub const MISSING_ADDRESS: &str = "Address parameter is required";

#[derive(Debug, Deserialize)]
pub struct AddressQuery {
    address: Option<String>,
}

impl AddressQuery {
    /// The address, if present and non-empty.
    fn require(self) -> Result<String, ApiError> {
        self.address
            .filter(|a| !a.is_empty())
            .ok_or(ApiError::MissingAddress)
    }
}

/// Everything a handler can fail with, rendered as `{"error": "..."}`.
#[derive(Debug)]
pub enum ApiError {
    MissingAddress,
    BadQuery(QueryRejection),
    Lookup(LookupError),
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadQuery(rejection)
    }
}

impl From<LookupError> for ApiError {
    fn from(err: LookupError) -> Self {
        Self::Lookup(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::MissingAddress => (StatusCode::BAD_REQUEST, MISSING_ADDRESS.to_string()),
            Self::BadQuery(rejection) => (StatusCode::BAD_REQUEST, rejection.body_text()),
            Self::Lookup(err) => {
                tracing::warn!(error = %err, "lookup failed");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

pub fn router(lookup: Arc<Lookup>) -> Router {
    Router::new()
        .route("/getCoordinates", get(get_coordinates))
        .route("/getWeather", get(get_weather))
        .with_state(lookup)
}

async fn get_coordinates(
    State(lookup): State<Arc<Lookup>>,
    query: Result<Query<AddressQuery>, QueryRejection>,
) -> Result<Json<CoordinatesReport>, ApiError> {
    let Query(query) = query?;
    let address = query.require()?;
    tracing::debug!(%address, "coordinates requested");

    Ok(Json(lookup.coordinates(&address).await?))
}

async fn get_weather(
    State(lookup): State<Arc<Lookup>>,
    query: Result<Query<AddressQuery>, QueryRejection>,
) -> Result<Json<WeatherReport>, ApiError> {
    let Query(query) = query?;
    let address = query.require()?;
    tracing::debug!(%address, "weather requested");

    Ok(Json(lookup.weather(&address).await?))
}
