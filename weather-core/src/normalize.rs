//! Conversion of raw AccuWeather payloads into [`Observation`] and
//! [`ForecastDay`] records.
//!
//! Field access goes through explicit JSON-pointer lookups so that a missing
//! or mistyped key surfaces as a [`NormalizeError`] naming the entry and field.

use serde_json::Value;

use crate::{
    error::NormalizeError,
    model::{ForecastDay, Observation},
};

/// Normalize the `historical/24` payload, preserving upstream order.
pub fn normalize_historical(entries: &[Value]) -> Result<Vec<Observation>, NormalizeError> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let fields = Fields { index, value: entry };
            Ok(Observation {
                datetime: fields.string("/LocalObservationDateTime", "LocalObservationDateTime")?,
                temperature: fields.number("/Temperature/Metric/Value", "Temperature.Metric.Value")?,
                unit: fields.string("/Temperature/Metric/Unit", "Temperature.Metric.Unit")?,
                description: fields.string("/WeatherText", "WeatherText")?,
            })
        })
        .collect()
}

/// Reshape a `forecasts/v1/daily/5day` payload into one record per day.
pub fn reshape_forecast(payload: &Value) -> Result<Vec<ForecastDay>, NormalizeError> {
    let days = payload
        .get("DailyForecasts")
        .ok_or(NormalizeError::MissingField {
            index: 0,
            field: "DailyForecasts",
        })?
        .as_array()
        .ok_or(NormalizeError::InvalidField {
            index: 0,
            field: "DailyForecasts",
            expected: "array",
        })?;

    days.iter()
        .enumerate()
        .map(|(index, day)| {
            let fields = Fields { index, value: day };
            Ok(ForecastDay {
                date: fields.string("/Date", "Date")?,
                temperature_max: fields
                    .number("/Temperature/Maximum/Value", "Temperature.Maximum.Value")?,
                temperature_min: fields
                    .number("/Temperature/Minimum/Value", "Temperature.Minimum.Value")?,
                day: fields.string("/Day/IconPhrase", "Day.IconPhrase")?,
                night: fields.string("/Night/IconPhrase", "Night.IconPhrase")?,
            })
        })
        .collect()
}

struct Fields<'a> {
    index: usize,
    value: &'a Value,
}

impl Fields<'_> {
    fn lookup(&self, pointer: &str, field: &'static str) -> Result<&Value, NormalizeError> {
        self.value
            .pointer(pointer)
            .ok_or(NormalizeError::MissingField {
                index: self.index,
                field,
            })
    }

    fn string(&self, pointer: &str, field: &'static str) -> Result<String, NormalizeError> {
        self.lookup(pointer, field)?
            .as_str()
            .map(str::to_owned)
            .ok_or(NormalizeError::InvalidField {
                index: self.index,
                field,
                expected: "string",
            })
    }

    fn number(&self, pointer: &str, field: &'static str) -> Result<f64, NormalizeError> {
        self.lookup(pointer, field)?
            .as_f64()
            .ok_or(NormalizeError::InvalidField {
                index: self.index,
                field,
                expected: "number",
            })
    }
}
