use std::sync::Arc;

use karar_service::{Collaborators, DecisionStore, KararService, PgDecisionStore};
use karar_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<KararService>,
}
impl AppState {
	/// Wires the HTTP scraper and, when storage is enabled and reachable, the Postgres store.
	///
	/// An unreachable store is logged and the service starts without one.
	pub async fn new(config: karar_config::Config) -> color_eyre::Result<Self> {
		let store = if config.storage.enabled { connect_store(&config).await } else { None };
		let collaborators = Collaborators::http(&config, store);

		Ok(Self::from_service(KararService::new(config, collaborators)))
	}

	pub fn from_service(service: KararService) -> Self {
		Self { service: Arc::new(service) }
	}
}

async fn connect_store(config: &karar_config::Config) -> Option<Arc<dyn DecisionStore>> {
	let db = match Db::connect(&config.storage.postgres).await {
		Ok(db) => db,
		Err(err) => {
			tracing::warn!(error = %err, "Decision store unavailable; continuing without it.");

			return None;
		},
	};

	if let Err(err) = db.ensure_schema().await {
		tracing::warn!(error = %err, "Decision store schema bootstrap failed; continuing without it.");

		return None;
	}

	tracing::info!("Decision store connected.");

	Some(Arc::new(PgDecisionStore::new(db, config.storage.lookup_limit)))
}
