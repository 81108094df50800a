//! Aggregates over a cached observation list.
//!
//! All functions are pure. Ties always resolve to the earliest record in list
//! order, and an empty slice yields `None`.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};

use crate::{
    error::AggregateError,
    model::{AverageTemperature, Observation},
};

/// Largest distance between a requested instant and a matching observation.
pub const DEFAULT_MATCH_WINDOW: Duration = Duration::seconds(3600);

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

pub fn max_by_temperature(records: &[Observation]) -> Option<&Observation> {
    records.iter().reduce(|best, candidate| {
        if candidate.temperature > best.temperature {
            candidate
        } else {
            best
        }
    })
}

pub fn min_by_temperature(records: &[Observation]) -> Option<&Observation> {
    records.iter().reduce(|best, candidate| {
        if candidate.temperature < best.temperature {
            candidate
        } else {
            best
        }
    })
}

/// Mean temperature rounded to two decimals, in the unit of the first record.
pub fn average_temperature(records: &[Observation]) -> Option<AverageTemperature> {
    let first = records.first()?;
    let sum: f64 = records.iter().map(|r| r.temperature).sum();
    let mean = sum / records.len() as f64;

    Some(AverageTemperature {
        average_temperature: round_to_hundredths(mean),
        unit: first.unit.clone(),
    })
}

/// Record whose `datetime` is nearest to `target`, if it lies within `max_window`.
///
/// Returns `Ok(None)` for an empty list or when even the nearest record is
/// further away than the window. A delta equal to the window still matches.
pub fn closest_to_timestamp(
    records: &[Observation],
    target: DateTime<Utc>,
    max_window: Duration,
) -> Result<Option<&Observation>, AggregateError> {
    let mut best: Option<(&Observation, Duration)> = None;

    for record in records {
        let delta = (parse_observation_time(&record.datetime)? - target).abs();
        match best {
            Some((_, best_delta)) if delta >= best_delta => {}
            _ => best = Some((record, delta)),
        }
    }

    Ok(best
        .filter(|(_, delta)| *delta <= max_window)
        .map(|(record, _)| record))
}

/// Interpret an observation timestamp as a UTC instant.
///
/// An explicit offset, as AccuWeather sends in `LocalObservationDateTime`,
/// is applied. Strings without an offset are taken as UTC wall-clock time.
pub fn parse_observation_time(value: &str) -> Result<DateTime<Utc>, AggregateError> {
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(value) {
        return Ok(with_offset.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| AggregateError::InvalidDatetime(value.to_string()))
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
