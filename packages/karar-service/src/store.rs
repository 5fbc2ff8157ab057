use std::collections::HashMap;

use time::OffsetDateTime;

use karar_domain::{DecisionRecord, SearchSource};
use karar_storage::{db::Db, models::StoreCounts, queries};

use crate::{BoxFuture, DecisionStore};

/// [`DecisionStore`] backed by Postgres.
pub struct PgDecisionStore {
	db: Db,
	lookup_limit: i64,
}
impl PgDecisionStore {
	pub fn new(db: Db, lookup_limit: u32) -> Self {
		Self { db, lookup_limit: i64::from(lookup_limit) }
	}

	async fn save(
		&self,
		records: &[DecisionRecord],
		keywords_by_url: &HashMap<String, Vec<String>>,
	) -> color_eyre::Result<usize> {
		let now = OffsetDateTime::now_utc();
		let mut tx = self.db.pool.begin().await?;
		let mut inserted = 0;

		for record in records {
			let keywords = keywords_by_url.get(&record.url).map(Vec::as_slice).unwrap_or_default();

			if queries::upsert_decision(&mut *tx, record, keywords, now).await? {
				inserted += 1;
			}
		}

		tx.commit().await?;

		Ok(inserted)
	}
}

impl DecisionStore for PgDecisionStore {
	fn search_decisions<'a>(
		&'a self,
		keywords: &'a [String],
	) -> BoxFuture<'a, color_eyre::Result<Vec<DecisionRecord>>> {
		Box::pin(async move {
			Ok(queries::search_decisions(&self.db.pool, keywords, self.lookup_limit).await?)
		})
	}

	fn save_decisions<'a>(
		&'a self,
		records: &'a [DecisionRecord],
		keywords_by_url: &'a HashMap<String, Vec<String>>,
	) -> BoxFuture<'a, color_eyre::Result<usize>> {
		Box::pin(self.save(records, keywords_by_url))
	}

	fn record_search_query<'a>(
		&'a self,
		keywords: &'a [String],
		results_count: usize,
		source: SearchSource,
	) -> BoxFuture<'a, color_eyre::Result<()>> {
		Box::pin(async move {
			queries::insert_search_query(
				&self.db.pool,
				keywords,
				results_count,
				source,
				OffsetDateTime::now_utc(),
			)
			.await?;

			Ok(())
		})
	}

	fn ping(&self) -> BoxFuture<'_, color_eyre::Result<()>> {
		Box::pin(async move { Ok(self.db.ping().await?) })
	}

	fn counts(&self) -> BoxFuture<'_, color_eyre::Result<StoreCounts>> {
		Box::pin(async move { Ok(queries::counts(&self.db.pool).await?) })
	}
}
