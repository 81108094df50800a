//! HTTP routes and their handlers.
//!
//! Each handler validates its input, consults the cache or the upstream
//! provider, and maps the outcome to a JSON body via [`ApiError`].

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    routing::get,
};
use chrono::DateTime;
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;
use weather_core::{
    AverageTemperature, ForecastDay, Observation,
    aggregate::{self, DEFAULT_MATCH_WINDOW},
    normalize,
};

use crate::{error::ApiError, state::AppState};

type ApiResult<T> = Result<Json<T>, ApiError>;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health/", get(health))
        .route("/weather/current/", get(current_weather))
        .route("/weather/historical/", get(historical_weather))
        .route("/weather/historical/max/", get(historical_max))
        .route("/weather/historical/min/", get(historical_min))
        .route("/weather/historical/avg/", get(historical_avg))
        .route("/weather/by_time/", get(weather_by_time))
        .route("/weather/forecast/", get(weather_forecast))
        .route("/forecast/", get(weather_forecast))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "OK" }))
}

#[derive(Debug, Deserialize)]
struct CurrentQuery {
    city: Option<String>,
}

async fn current_weather(
    State(state): State<AppState>,
    query: Result<Query<CurrentQuery>, QueryRejection>,
) -> ApiResult<Value> {
    let Query(query) = query.map_err(|e| ApiError::InvalidQuery(e.body_text()))?;

    let body = state
        .provider
        .current_conditions(&state.location_key, query.city.as_deref())
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "current conditions request failed"))?;

    if body.is_null() {
        return Err(ApiError::NoData);
    }
    Ok(Json(body))
}

async fn historical_weather(State(state): State<AppState>) -> ApiResult<Vec<Observation>> {
    if let Some(records) = state.cached_history() {
        tracing::debug!(location_key = %state.location_key, "historical cache hit");
        return Ok(Json(records));
    }
    tracing::debug!(location_key = %state.location_key, "historical cache miss");

    let entries = state
        .provider
        .historical_24h(&state.location_key)
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "historical request failed"))?
        .filter(|entries| !entries.is_empty())
        .ok_or(ApiError::NoData)?;

    let records = normalize::normalize_historical(&entries)
        .inspect_err(|e| tracing::warn!(error = %e, "historical payload rejected"))?;

    state.store_history(records.clone());
    Ok(Json(records))
}

async fn historical_max(State(state): State<AppState>) -> ApiResult<Observation> {
    let records = state.cached_history().ok_or(ApiError::HistoricalUnavailable)?;
    aggregate::max_by_temperature(&records)
        .cloned()
        .map(Json)
        .ok_or(ApiError::HistoricalUnavailable)
}

async fn historical_min(State(state): State<AppState>) -> ApiResult<Observation> {
    let records = state.cached_history().ok_or(ApiError::HistoricalUnavailable)?;
    aggregate::min_by_temperature(&records)
        .cloned()
        .map(Json)
        .ok_or(ApiError::HistoricalUnavailable)
}

async fn historical_avg(State(state): State<AppState>) -> ApiResult<AverageTemperature> {
    let records = state.cached_history().ok_or(ApiError::HistoricalUnavailable)?;
    aggregate::average_temperature(&records)
        .map(Json)
        .ok_or(ApiError::HistoricalUnavailable)
}

#[derive(Debug, Deserialize)]
struct ByTimeQuery {
    timestamp: Option<String>,
}

async fn weather_by_time(
    State(state): State<AppState>,
    query: Result<Query<ByTimeQuery>, QueryRejection>,
) -> ApiResult<Observation> {
    let Query(query) = query.map_err(|_| ApiError::InvalidTimestamp)?;

    let raw = query
        .timestamp
        .filter(|t| !t.is_empty())
        .ok_or(ApiError::MissingTimestamp)?;

    let requested = raw
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .ok_or(ApiError::InvalidTimestamp)?;

    let records = state.cached_history().ok_or(ApiError::HistoricalUnavailable)?;

    aggregate::closest_to_timestamp(&records, requested, DEFAULT_MATCH_WINDOW)?
        .cloned()
        .map(Json)
        .ok_or(ApiError::NoMatchWithinHour)
}

async fn weather_forecast(State(state): State<AppState>) -> ApiResult<Vec<ForecastDay>> {
    let days = async {
        let payload = state.provider.daily_forecast(&state.location_key).await?;
        Ok::<_, anyhow::Error>(normalize::reshape_forecast(&payload)?)
    }
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "Error fetching weather forecast");
        ApiError::Forecast(e.to_string())
    })?;

    Ok(Json(days))
}
