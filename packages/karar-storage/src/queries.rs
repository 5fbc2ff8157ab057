use sqlx::PgExecutor;
use time::OffsetDateTime;
use uuid::Uuid;

use karar_domain::{DecisionRecord, SearchSource};

use crate::{
	Error, Result,
	models::{SearchQueryRow, StoreCounts, StoredDecision},
};

/// Returns stored decisions indexed under any of `keywords`, newest first.
pub async fn search_decisions<'e, E>(
	executor: E,
	keywords: &[String],
	limit: i64,
) -> Result<Vec<DecisionRecord>>
where
	E: PgExecutor<'e>,
{
	if limit <= 0 {
		return Err(Error::InvalidArgument("limit must be greater than zero.".to_string()));
	}

	let rows: Vec<StoredDecision> = sqlx::query_as(
		"\
SELECT url, keywords, record, created_at, updated_at
FROM court_decisions
WHERE keywords && $1
ORDER BY updated_at DESC, url ASC
LIMIT $2",
	)
	.bind(keywords)
	.bind(limit)
	.fetch_all(executor)
	.await?;

	let mut out = Vec::with_capacity(rows.len());

	for row in rows {
		let mut record: DecisionRecord = serde_json::from_value(row.record)?;

		// The row key is authoritative even if the stored payload drifted.
		record.url = row.url;

		out.push(record);
	}

	Ok(out)
}

/// Inserts one decision indexed under `keywords`, merging them into an existing row with the same
/// url. The stored payload of an existing row is left untouched. Returns true when a new row was
/// created.
pub async fn upsert_decision<'e, E>(
	executor: E,
	record: &DecisionRecord,
	keywords: &[String],
	now: OffsetDateTime,
) -> Result<bool>
where
	E: PgExecutor<'e>,
{
	let payload = serde_json::to_value(record)?;
	let inserted: bool = sqlx::query_scalar(
		"\
INSERT INTO court_decisions (url, keywords, record, created_at, updated_at)
VALUES ($1, $2, $3, $4, $4)
ON CONFLICT (url) DO UPDATE
SET keywords = ARRAY(
		SELECT DISTINCT k FROM unnest(court_decisions.keywords || EXCLUDED.keywords) AS k
	),
	updated_at = EXCLUDED.updated_at
RETURNING (xmax = 0)",
	)
	.bind(record.url.as_str())
	.bind(keywords)
	.bind(payload)
	.bind(now)
	.fetch_one(executor)
	.await?;

	Ok(inserted)
}

pub async fn insert_search_query<'e, E>(
	executor: E,
	keywords: &[String],
	results_count: usize,
	source: SearchSource,
	now: OffsetDateTime,
) -> Result<Uuid>
where
	E: PgExecutor<'e>,
{
	let query_id = Uuid::new_v4();
	let results_count = i32::try_from(results_count)
		.map_err(|_| Error::InvalidArgument("results_count does not fit in i32.".to_string()))?;

	sqlx::query(
		"\
INSERT INTO search_queries (query_id, keywords, results_count, source, created_at)
VALUES ($1, $2, $3, $4, $5)",
	)
	.bind(query_id)
	.bind(keywords)
	.bind(results_count)
	.bind(source.as_str())
	.bind(now)
	.execute(executor)
	.await?;

	Ok(query_id)
}

pub async fn recent_search_queries<'e, E>(executor: E, limit: i64) -> Result<Vec<SearchQueryRow>>
where
	E: PgExecutor<'e>,
{
	let rows = sqlx::query_as(
		"\
SELECT query_id, keywords, results_count, source, created_at
FROM search_queries
ORDER BY created_at DESC
LIMIT $1",
	)
	.bind(limit)
	.fetch_all(executor)
	.await?;

	Ok(rows)
}

pub async fn counts<'e, E>(executor: E) -> Result<StoreCounts>
where
	E: PgExecutor<'e>,
{
	let (decisions, queries): (i64, i64) = sqlx::query_as(
		"\
SELECT
	(SELECT count(*) FROM court_decisions),
	(SELECT count(*) FROM search_queries)",
	)
	.fetch_one(executor)
	.await?;

	Ok(StoreCounts { decisions, queries })
}
