use reqwest::StatusCode;

/// Failure talking to the upstream weather API.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Failed to send request to {endpoint}: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} request failed with status {status}: {body}")]
    Status {
        endpoint: String,
        status: StatusCode,
        body: String,
    },

    #[error("Failed to parse JSON from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Upstream JSON that does not match the expected schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    #[error("entry {index}: missing field `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error("entry {index}: field `{field}` is not a {expected}")]
    InvalidField {
        index: usize,
        field: &'static str,
        expected: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AggregateError {
    #[error("invalid observation datetime '{0}'")]
    InvalidDatetime(String),
}
