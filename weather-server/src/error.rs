use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use weather_core::{AggregateError, NormalizeError, WeatherError};

/// Every failure a handler can report, with its status code and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    NoData,
    HistoricalUnavailable,
    MissingTimestamp,
    InvalidTimestamp,
    NoMatchWithinHour,
    /// Query string that could not be decoded.
    InvalidQuery(String),
    /// Upstream or payload failure; the message is returned as-is.
    Internal(String),
    /// Forecast failure, reported with a fixed message plus details.
    Forecast(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NoData | ApiError::HistoricalUnavailable | ApiError::NoMatchWithinHour => {
                StatusCode::NOT_FOUND
            }
            ApiError::MissingTimestamp | ApiError::InvalidTimestamp | ApiError::InvalidQuery(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Internal(_) | ApiError::Forecast(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> serde_json::Value {
        match self {
            ApiError::NoData => json!({ "error": "No data found" }),
            ApiError::HistoricalUnavailable => json!({ "error": "Historical data not available" }),
            ApiError::MissingTimestamp => json!({ "error": "Timestamp parameter is required" }),
            ApiError::InvalidTimestamp => json!({ "error": "Invalid timestamp" }),
            ApiError::NoMatchWithinHour => {
                json!({ "error": "No matching time found within 1 hour" })
            }
            ApiError::InvalidQuery(message) | ApiError::Internal(message) => {
                json!({ "error": message })
            }
            ApiError::Forecast(details) => json!({
                "error": "Failed to retrieve data from the weather API",
                "details": details,
            }),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

impl From<WeatherError> for ApiError {
    fn from(e: WeatherError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<NormalizeError> for ApiError {
    fn from(e: NormalizeError) -> Self {
        ApiError::Internal(format!("Unexpected upstream payload: {e}"))
    }
}

impl From<AggregateError> for ApiError {
    fn from(e: AggregateError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_the_error_table() {
        assert_eq!(ApiError::NoData.status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::HistoricalUnavailable.status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::NoMatchWithinHour.status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::MissingTimestamp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::InvalidTimestamp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::InvalidQuery("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Internal("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn forecast_error_carries_details() {
        let body = ApiError::Forecast("timeout".into()).body();
        assert_eq!(body["error"], "Failed to retrieve data from the weather API");
        assert_eq!(body["details"], "timeout");
    }

    #[test]
    fn normalize_error_becomes_internal() {
        let err: ApiError = NormalizeError::MissingField {
            index: 0,
            field: "WeatherText",
        }
        .into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
