use crate::{KararService, StatsSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreStatus {
	Connected,
	Disconnected,
	Disabled,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DatabaseStats {
	pub decisions_count: i64,
	pub queries_count: i64,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct StatsResponse {
	pub search_stats: StatsSnapshot,
	pub cache_size: usize,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub database: Option<DatabaseStats>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ClearCacheResponse {
	pub cleared_entries: usize,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct HealthResponse {
	pub status: String,
	pub store: StoreStatus,
	pub stats: StatsSnapshot,
}

impl KararService {
	pub async fn stats(&self) -> StatsResponse {
		let database = match self.collaborators.store.as_ref() {
			Some(store) => match store.counts().await {
				Ok(counts) => Some(DatabaseStats {
					decisions_count: counts.decisions,
					queries_count: counts.queries,
				}),
				Err(err) => {
					tracing::warn!(error = %err, "Failed to read decision store counts.");

					None
				},
			},
			None => None,
		};

		StatsResponse { search_stats: self.stats.snapshot(), cache_size: self.cache.size(), database }
	}

	pub fn clear_cache(&self) -> ClearCacheResponse {
		let cleared_entries = self.cache.clear();

		tracing::info!(cleared_entries, "Search cache cleared.");

		ClearCacheResponse { cleared_entries }
	}

	pub async fn health(&self) -> HealthResponse {
		let store = match self.collaborators.store.as_ref() {
			None => StoreStatus::Disabled,
			Some(store) => match store.ping().await {
				Ok(()) => StoreStatus::Connected,
				Err(err) => {
					tracing::warn!(error = %err, "Decision store health check failed.");

					StoreStatus::Disconnected
				},
			},
		};

		HealthResponse { status: "healthy".to_string(), store, stats: self.stats.snapshot() }
	}
}
