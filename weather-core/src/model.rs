use serde::{Deserialize, Serialize, Serializer};
use serde_json::Number;

/// Placeholder rendered for any report field without a usable value.
pub const PLACEHOLDER: &str = "N/A";

/// A resolved position, handed from the geocoder to the weather provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Body of `/getCoordinates`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinatesReport {
    pub message: String,
    #[serde(serialize_with = "plain_number")]
    pub latitude: f64,
    #[serde(serialize_with = "plain_number")]
    pub long: f64,
}

/// Whole values are written without a fraction, `-74.0` as `-74`.
fn plain_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    const EXACT: f64 = 9_007_199_254_740_992.0; // 2^53

    if value.fract() == 0.0 && value.abs() < EXACT {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

impl CoordinatesReport {
    pub fn new(address: &str, coordinate: Coordinate) -> Self {
        Self {
            message: format!("Coordinates for {address} are: "),
            latitude: coordinate.latitude,
            long: coordinate.longitude,
        }
    }
}

/// One cell of a [`WeatherReport`]: either the provider's value or the placeholder.
///
/// Numbers keep the representation the provider sent, so `65` is echoed as
/// `65` and not `65.0`.
#[derive(Debug, Clone, PartialEq)]
pub enum Reading {
    Number(Number),
    Text(String),
    Missing,
}

impl Reading {
    /// Absent values and zero both collapse to [`Reading::Missing`].
    ///
    /// Zero is indistinguishable from "not reported" in the report format, so a
    /// genuine 0% humidity or calm wind also renders as the placeholder.
    pub fn number(value: Option<Number>) -> Self {
        match value {
            Some(n) if n.as_f64() != Some(0.0) => Self::Number(n),
            _ => Self::Missing,
        }
    }

    /// Absent and empty strings collapse to [`Reading::Missing`].
    pub fn text(value: Option<String>) -> Self {
        match value {
            Some(s) if !s.is_empty() => Self::Text(s),
            _ => Self::Missing,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl Serialize for Reading {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Number(n) => n.serialize(serializer),
            Self::Text(s) => serializer.serialize_str(s),
            Self::Missing => serializer.serialize_str(PLACEHOLDER),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationReadings {
    #[serde(rename = "Latitude")]
    pub latitude: Reading,
    #[serde(rename = "Longitude")]
    pub longitude: Reading,
    #[serde(rename = "Name")]
    pub name: Reading,
    #[serde(rename = "Country")]
    pub country: Reading,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindReadings {
    #[serde(rename = "Speed")]
    pub speed: Reading,
    #[serde(rename = "Direction")]
    pub direction: Reading,
    #[serde(rename = "Gust")]
    pub gust: Reading,
}

/// Body of `/getWeather`: current conditions flattened into display fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub message: String,
    #[serde(rename = "Location")]
    pub location: LocationReadings,
    #[serde(rename = "Weather")]
    pub weather: Reading,
    #[serde(rename = "Temperature")]
    pub temperature: Reading,
    #[serde(rename = "Feels Like")]
    pub feels_like: Reading,
    #[serde(rename = "Min Temperature")]
    pub min_temperature: Reading,
    #[serde(rename = "Max Temperature")]
    pub max_temperature: Reading,
    #[serde(rename = "Air Pressure")]
    pub air_pressure: Reading,
    #[serde(rename = "Humidity")]
    pub humidity: Reading,
    #[serde(rename = "Sea Level")]
    pub sea_level: Reading,
    #[serde(rename = "Ground Level")]
    pub ground_level: Reading,
    #[serde(rename = "Visibility")]
    pub visibility: Reading,
    #[serde(rename = "Wind")]
    pub wind: WindReadings,
    #[serde(rename = "Clouds")]
    pub clouds: Reading,
    #[serde(rename = "Sunrise")]
    pub sunrise: Reading,
    #[serde(rename = "Sunset")]
    pub sunset: Reading,
    #[serde(rename = "Time of Data Calculation")]
    pub calculated_at: Reading,
    #[serde(rename = "Timezone Offset")]
    pub timezone_offset: Reading,
}

/// Current conditions as returned by the weather provider.
///
/// Every field is optional; anything the provider leaves out becomes a
/// placeholder in the report instead of failing the request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Observation {
    pub coord: ObservedCoord,
    pub name: Option<String>,
    pub sys: ObservedSys,
    pub weather: Vec<ObservedCondition>,
    pub main: ObservedMain,
    pub visibility: Option<Number>,
    pub wind: ObservedWind,
    pub clouds: ObservedClouds,
    pub dt: Option<i64>,
    pub timezone: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ObservedCoord {
    pub lat: Option<Number>,
    pub lon: Option<Number>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ObservedSys {
    pub country: Option<String>,
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ObservedCondition {
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ObservedMain {
    pub temp: Option<Number>,
    pub feels_like: Option<Number>,
    pub temp_min: Option<Number>,
    pub temp_max: Option<Number>,
    pub pressure: Option<Number>,
    pub humidity: Option<Number>,
    pub sea_level: Option<Number>,
    pub grnd_level: Option<Number>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ObservedWind {
    pub speed: Option<Number>,
    pub deg: Option<Number>,
    pub gust: Option<Number>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ObservedClouds {
    pub all: Option<Number>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coordinates_report_uses_display_names() {
        let report = CoordinatesReport::new(
            "NYC",
            Coordinate {
                latitude: 40.7,
                longitude: -74.0,
            },
        );

        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({ "message": "Coordinates for NYC are: ", "latitude": 40.7, "long": -74 })
        );
        assert_eq!(
            serde_json::to_string(&report).unwrap(),
            r#"{"message":"Coordinates for NYC are: ","latitude":40.7,"long":-74}"#
        );
    }

    #[test]
    fn zero_and_absent_numbers_become_placeholder() {
        assert!(Reading::number(None).is_missing());
        assert!(Reading::number(Some(Number::from(0))).is_missing());
        assert!(Reading::number(Number::from_f64(0.0)).is_missing());
        assert!(!Reading::number(Number::from_f64(-0.5)).is_missing());
    }

    #[test]
    fn empty_text_becomes_placeholder() {
        assert!(Reading::text(Some(String::new())).is_missing());
        assert_eq!(
            Reading::text(Some("GB".into())),
            Reading::Text("GB".into())
        );
    }

    #[test]
    fn readings_serialize_as_value_or_placeholder() {
        let value = serde_json::to_value([
            Reading::number(Some(Number::from(65))),
            Reading::number(Number::from_f64(21.5)),
            Reading::text(Some("clear sky".into())),
            Reading::Missing,
        ])
        .unwrap();

        assert_eq!(value, json!([65, 21.5, "clear sky", "N/A"]));
    }

    #[test]
    fn observation_tolerates_missing_sections() {
        let obs: Observation = serde_json::from_value(json!({
            "name": "London",
            "main": { "temp": 12.3, "humidity": null }
        }))
        .unwrap();

        assert_eq!(obs.name.as_deref(), Some("London"));
        assert_eq!(obs.main.temp, Number::from_f64(12.3));
        assert!(obs.main.humidity.is_none());
        assert!(obs.weather.is_empty());
        assert!(obs.sys.sunrise.is_none());
    }
}
