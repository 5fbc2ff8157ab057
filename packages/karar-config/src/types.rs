use serde::Deserialize;
use serde_json::{Map, Value};

/// Upper bound on keywords per search request. Configuration may lower it, never raise it.
pub const MAX_KEYWORDS_LIMIT: usize = 10;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub scraper: Scraper,
	#[serde(default)]
	pub search: Search,
	#[serde(default)]
	pub cache: Cache,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
	#[serde(default = "default_request_timeout_ms")]
	pub request_timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Storage {
	/// When false the service runs without a persistent store and serves from cache and scrape
	/// only.
	#[serde(default = "default_true")]
	pub enabled: bool,
	/// Maximum rows returned by a single store lookup.
	#[serde(default = "default_lookup_limit")]
	pub lookup_limit: u32,
	pub postgres: Postgres,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scraper {
	pub api_base: String,
	pub path: String,
	#[serde(default)]
	pub api_key: Option<String>,
	/// Per-keyword task timeout.
	pub timeout_ms: u64,
	#[serde(default = "default_max_results_per_keyword")]
	pub max_results_per_keyword: u32,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Search {
	pub max_workers: usize,
	pub max_keywords: usize,
	pub default_max_results: usize,
}
impl Default for Search {
	fn default() -> Self {
		Self { max_workers: 4, max_keywords: MAX_KEYWORDS_LIMIT, default_max_results: 10 }
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Cache {
	pub enabled: bool,
}
impl Default for Cache {
	fn default() -> Self {
		Self { enabled: true }
	}
}

fn default_true() -> bool {
	true
}

fn default_lookup_limit() -> u32 {
	100
}

fn default_request_timeout_ms() -> u64 {
	30_000
}

fn default_max_results_per_keyword() -> u32 {
	3
}
