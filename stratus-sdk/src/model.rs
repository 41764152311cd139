//! Data model for geocoding results and normalized weather observations

use serde::{Deserialize, Serialize};

/// Resolved geocoding result for a city query.
///
/// Produced by the geocoding stage and consumed by the weather stage.
/// Never stored beyond a single fetch operation.
#[derive(Debug, Clone, Deserialize)]
pub struct Location {
    /// Canonical place name as known to the provider
    #[serde(default)]
    pub name: String,

    /// Latitude in decimal degrees
    pub lat: f64,

    /// Longitude in decimal degrees
    pub lon: f64,

    /// ISO country code
    #[serde(default)]
    pub country: String,

    /// Region or state, where the provider reports one
    #[serde(default)]
    pub state: Option<String>,
}

/// Normalized weather record for a single city.
///
/// Immutable once constructed; this is the value stored in the cache and
/// returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Condition summary, e.g. "Clouds"
    pub condition: String,

    /// Longer condition description, e.g. "overcast clouds"
    pub description: String,

    /// Air temperature in degrees Celsius
    pub temperature: f64,

    /// Perceived temperature in degrees Celsius
    pub feels_like: f64,

    /// Visibility in meters, where reported
    pub visibility: Option<u32>,

    /// Wind speed in meters per second
    pub wind_speed: f64,

    /// Sunrise as epoch seconds, where reported
    pub sunrise: Option<i64>,

    /// Sunset as epoch seconds, where reported
    pub sunset: Option<i64>,

    /// Offset from UTC in seconds, where reported
    pub utc_offset_secs: Option<i32>,

    /// Location name as resolved by the provider
    pub location_name: String,
}

/// Raw current-weather payload as the provider sends it.
///
/// The `main` block is required: an observation without a temperature is
/// treated as malformed. Everything else degrades to defaults, matching
/// the provider's habit of omitting blocks it has no data for.
#[derive(Debug, Deserialize)]
pub(crate) struct CurrentWeatherPayload {
    #[serde(default)]
    weather: Vec<ConditionBlock>,
    main: MainBlock,
    visibility: Option<u32>,
    wind: Option<WindBlock>,
    sys: Option<SysBlock>,
    timezone: Option<i32>,
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct ConditionBlock {
    #[serde(default)]
    main: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f64,
    #[serde(default)]
    feels_like: f64,
}

#[derive(Debug, Deserialize)]
struct WindBlock {
    #[serde(default)]
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct SysBlock {
    sunrise: Option<i64>,
    sunset: Option<i64>,
}

impl From<CurrentWeatherPayload> for Observation {
    fn from(payload: CurrentWeatherPayload) -> Self {
        let (condition, description) = payload
            .weather
            .into_iter()
            .next()
            .map(|c| (c.main, c.description))
            .unwrap_or_default();
        let (sunrise, sunset) = payload
            .sys
            .map(|s| (s.sunrise, s.sunset))
            .unwrap_or_default();

        Self {
            condition,
            description,
            temperature: payload.main.temp,
            feels_like: payload.main.feels_like,
            visibility: payload.visibility,
            wind_speed: payload.wind.map(|w| w.speed).unwrap_or_default(),
            sunrise,
            sunset,
            utc_offset_secs: payload.timezone,
            location_name: payload.name,
        }
    }
}
