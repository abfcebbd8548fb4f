//! Flattening of provider observations into [`WeatherReport`]s.

use chrono::{DateTime, TimeZone};
use std::fmt::Display;

use crate::model::{LocationReadings, Observation, Reading, WeatherReport, WindReadings};

const TIME_OF_DAY_FORMAT: &str = "%-I:%M:%S %p";

impl WeatherReport {
    /// Build the report for `address`, rendering timestamps as times of day in `tz`.
    pub fn from_observation<Tz>(address: &str, obs: Observation, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let description = obs.weather.into_iter().next().and_then(|w| w.description);

        Self {
            message: format!("Weather info for {address}"),
            location: LocationReadings {
                latitude: Reading::number(obs.coord.lat),
                longitude: Reading::number(obs.coord.lon),
                name: Reading::text(obs.name),
                country: Reading::text(obs.sys.country),
            },
            weather: Reading::text(description),
            temperature: Reading::number(obs.main.temp),
            feels_like: Reading::number(obs.main.feels_like),
            min_temperature: Reading::number(obs.main.temp_min),
            max_temperature: Reading::number(obs.main.temp_max),
            air_pressure: Reading::number(obs.main.pressure),
            humidity: Reading::number(obs.main.humidity),
            sea_level: Reading::number(obs.main.sea_level),
            ground_level: Reading::number(obs.main.grnd_level),
            visibility: Reading::number(obs.visibility),
            wind: WindReadings {
                speed: Reading::number(obs.wind.speed),
                direction: Reading::number(obs.wind.deg),
                gust: Reading::number(obs.wind.gust),
            },
            clouds: Reading::number(obs.clouds.all),
            sunrise: time_reading(obs.sys.sunrise, tz),
            sunset: time_reading(obs.sys.sunset, tz),
            calculated_at: time_reading(obs.dt, tz),
            timezone_offset: Reading::text(obs.timezone.map(offset_hours)),
        }
    }
}

/// Render epoch seconds as a 12-hour time of day (`6:03:09 AM`) in `tz`.
pub fn time_of_day<Tz>(epoch_secs: i64, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let utc = DateTime::from_timestamp(epoch_secs, 0)?;
    Some(utc.with_timezone(tz).format(TIME_OF_DAY_FORMAT).to_string())
}

fn time_reading<Tz>(epoch_secs: Option<i64>, tz: &Tz) -> Reading
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    Reading::text(epoch_secs.and_then(|secs| time_of_day(secs, tz)))
}

/// `19800` -> `"5.5 hours"`.
fn offset_hours(shift_secs: i64) -> String {
    format!("{} hours", shift_secs as f64 / 3600.0)
}
