use std::{sync::Arc, time::Duration};

use weather_core::{Observation, TtlCache, WeatherProvider, cache::historical_cache_key};

pub type HistoryCache = TtlCache<String, Vec<Observation>>;

/// Shared handler dependencies.
#[derive(Debug, Clone)]
pub struct AppState {
    pub provider: Arc<dyn WeatherProvider>,
    pub cache: Arc<HistoryCache>,
    pub location_key: String,
    pub cache_ttl: Duration,
}

impl AppState {
    pub fn new(provider: Arc<dyn WeatherProvider>, location_key: String, cache_ttl: Duration) -> Self {
        Self {
            provider,
            cache: Arc::new(HistoryCache::new()),
            location_key,
            cache_ttl,
        }
    }

    pub fn history_key(&self) -> String {
        historical_cache_key(&self.location_key)
    }

    /// Cached history for the configured location, if present and non-empty.
    pub fn cached_history(&self) -> Option<Vec<Observation>> {
        self.cache
            .get(&self.history_key())
            .filter(|records| !records.is_empty())
    }

    pub fn store_history(&self, records: Vec<Observation>) {
        self.cache.set(self.history_key(), records, self.cache_ttl);
    }
}
