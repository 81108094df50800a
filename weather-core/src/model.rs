use serde::{Deserialize, Serialize};

/// One normalized hourly observation.
///
/// `datetime` is kept verbatim from upstream; see
/// [`crate::aggregate::parse_observation_time`] for how it is interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub datetime: String,
    pub temperature: f64,
    pub unit: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AverageTemperature {
    pub average_temperature: f64,
    pub unit: String,
}

/// One day of the 5-day forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: String,
    pub temperature_max: f64,
    pub temperature_min: f64,
    pub day: String,
    pub night: String,
}
