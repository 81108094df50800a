//! Core library for the `weather-server` backend.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The AccuWeather client behind the [`WeatherProvider`] trait
//! - Normalization of upstream payloads into typed records
//! - Aggregates over the cached 24-hour history
//! - A TTL cache injected into request handlers

pub mod aggregate;
pub mod cache;
pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod provider;
pub mod retry;

pub use cache::TtlCache;
pub use config::Config;
pub use error::{AggregateError, NormalizeError, WeatherError};
pub use model::{AverageTemperature, ForecastDay, Observation};
pub use provider::{WeatherProvider, provider_from_config};
