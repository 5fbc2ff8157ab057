use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, sqlx::FromRow)]
pub struct StoredDecision {
	pub url: String,
	pub keywords: Vec<String>,
	pub record: Value,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}

#[derive(Debug, sqlx::FromRow)]
pub struct SearchQueryRow {
	pub query_id: Uuid,
	pub keywords: Vec<String>,
	pub results_count: i32,
	pub source: String,
	pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreCounts {
	pub decisions: i64,
	pub queries: i64,
}
