pub mod admin;
pub mod cache;
pub mod merger;
pub mod search;
pub mod stats;
pub mod store;

mod error;

pub use admin::{ClearCacheResponse, DatabaseStats, HealthResponse, StatsResponse, StoreStatus};
pub use cache::SearchCache;
pub use error::{Error, Result};
pub use merger::{MergedResults, ResultMerger};
pub use search::{SearchRequest, SearchResponse};
pub use stats::{SearchStatistics, StatsSnapshot};
pub use store::PgDecisionStore;

use std::{collections::HashMap, future::Future, pin::Pin, sync::Arc};

use karar_config::Config;
use karar_domain::{DecisionRecord, SearchSource};
use karar_storage::models::StoreCounts;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Resolves one keyword to the decisions the scraper finds for it.
pub trait ScrapeProvider
where
	Self: Send + Sync,
{
	fn search_by_keyword<'a>(
		&'a self,
		keyword: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<Vec<DecisionRecord>>>;
}

/// Durable decision store consulted before scraping and written to after it.
pub trait DecisionStore
where
	Self: Send + Sync,
{
	/// Returns an empty list when nothing matches.
	fn search_decisions<'a>(
		&'a self,
		keywords: &'a [String],
	) -> BoxFuture<'a, color_eyre::Result<Vec<DecisionRecord>>>;

	/// Stores each record indexed under the keywords listed for its url in `keywords_by_url`.
	/// Returns how many records were newly stored.
	fn save_decisions<'a>(
		&'a self,
		records: &'a [DecisionRecord],
		keywords_by_url: &'a HashMap<String, Vec<String>>,
	) -> BoxFuture<'a, color_eyre::Result<usize>>;

	fn record_search_query<'a>(
		&'a self,
		keywords: &'a [String],
		results_count: usize,
		source: SearchSource,
	) -> BoxFuture<'a, color_eyre::Result<()>>;

	fn ping(&self) -> BoxFuture<'_, color_eyre::Result<()>>;

	fn counts(&self) -> BoxFuture<'_, color_eyre::Result<StoreCounts>>;
}

#[derive(Clone)]
pub struct Collaborators {
	pub scraper: Arc<dyn ScrapeProvider>,
	pub store: Option<Arc<dyn DecisionStore>>,
}

pub struct KararService {
	pub cfg: Config,
	pub collaborators: Collaborators,
	pub cache: Arc<SearchCache>,
	pub stats: Arc<SearchStatistics>,
	pub merger: ResultMerger,
}

struct HttpScraper {
	cfg: karar_config::Scraper,
}

impl ScrapeProvider for HttpScraper {
	fn search_by_keyword<'a>(
		&'a self,
		keyword: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<Vec<DecisionRecord>>> {
		Box::pin(karar_providers::scrape::search_by_keyword(&self.cfg, keyword))
	}
}

impl Collaborators {
	pub fn new(scraper: Arc<dyn ScrapeProvider>, store: Option<Arc<dyn DecisionStore>>) -> Self {
		Self { scraper, store }
	}

	/// The HTTP scraper client configured by `cfg.scraper`, plus an optional store.
	pub fn http(cfg: &Config, store: Option<Arc<dyn DecisionStore>>) -> Self {
		Self::new(Arc::new(HttpScraper { cfg: cfg.scraper.clone() }), store)
	}
}

impl KararService {
	pub fn new(cfg: Config, collaborators: Collaborators) -> Self {
		let cache = Arc::new(SearchCache::new(cfg.cache.enabled));
		let stats = Arc::new(SearchStatistics::new());

		Self::with_state(cfg, collaborators, cache, stats)
	}

	/// Builds a service around cache and statistics handles owned by the caller.
	pub fn with_state(
		cfg: Config,
		collaborators: Collaborators,
		cache: Arc<SearchCache>,
		stats: Arc<SearchStatistics>,
	) -> Self {
		let merger = ResultMerger::new(
			cfg.search.max_workers,
			std::time::Duration::from_millis(cfg.scraper.timeout_ms),
		);

		Self { cfg, collaborators, cache, stats, merger }
	}
}
