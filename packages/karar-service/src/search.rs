use std::{collections::HashMap, time::Instant};

use karar_domain::{
	DecisionRecord, SearchSource, cache_key_prefix, derive_cache_key, validate_keywords,
};

use crate::{DecisionStore, Error, KararService, Result};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SearchRequest {
	pub keywords: Vec<String>,
	#[serde(default)]
	pub max_results: Option<usize>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SearchResponse {
	pub keywords: Vec<String>,
	pub results: Vec<DecisionRecord>,
	/// Result count before truncation to `max_results`.
	pub total_results: usize,
	/// Seconds spent resolving the request.
	pub search_time: f64,
	pub from_cache: bool,
	pub source: SearchSource,
}

impl KararService {
	/// Resolves a keyword set through the cache, the store, and finally a live scrape.
	pub async fn search(&self, req: SearchRequest) -> Result<SearchResponse> {
		let started = Instant::now();

		validate_keywords(&req.keywords, self.cfg.search.max_keywords)
			.map_err(|reject| Error::InvalidRequest { message: reject.message() })?;

		let max_results = match req.max_results {
			Some(0) => {
				return Err(Error::InvalidRequest {
					message: "max_results must be greater than zero.".to_string(),
				});
			},
			Some(value) => value,
			None => self.cfg.search.default_max_results,
		};
		let cache_key = derive_cache_key(&req.keywords);

		if let Some(cached) = self.cache.get(&cache_key) {
			tracing::info!(
				keywords = ?req.keywords,
				cache_key = cache_key_prefix(&cache_key),
				"Cache hit."
			);

			return Ok(cached);
		}

		self.resolve_uncached(req.keywords, max_results, cache_key, started).await.map_err(|err| {
			tracing::error!(error = %err, "Search failed.");

			match err {
				Error::InternalSearch { .. } => err,
				other => Error::InternalSearch { message: other.to_string() },
			}
		})
	}

	async fn resolve_uncached(
		&self,
		keywords: Vec<String>,
		max_results: usize,
		cache_key: String,
		started: Instant,
	) -> Result<SearchResponse> {
		if let Some(store) = self.collaborators.store.as_ref() {
			match store.search_decisions(&keywords).await {
				Ok(records) if !records.is_empty() => {
					tracing::info!(
						keywords = ?keywords,
						count = records.len(),
						"Resolved from the decision store."
					);

					record_query(store.as_ref(), &keywords, records.len(), SearchSource::Store)
						.await;

					let response = SearchResponse {
						keywords,
						total_results: records.len(),
						results: records,
						search_time: started.elapsed().as_secs_f64(),
						from_cache: false,
						source: SearchSource::Store,
					};

					self.cache.put(cache_key, response.clone());

					return Ok(response);
				},
				Ok(_) => {},
				Err(err) => {
					let err = Error::from(err);

					tracing::warn!(
						error = %err,
						"Decision store lookup failed; falling back to scraping."
					);
				},
			}
		}

		tracing::info!(keywords = ?keywords, "No stored decisions; scraping.");

		let scraped =
			self.merger.merge(&distinct(&keywords), self.collaborators.scraper.clone()).await?;
		let mut unique = scraped.records;
		let total_results = unique.len();

		if let Some(store) = self.collaborators.store.as_ref() {
			save_scraped(store.as_ref(), &unique, &scraped.keywords_by_url).await;
			record_query(store.as_ref(), &keywords, total_results, SearchSource::Scraping).await;
		}

		self.stats.increment_searches(1);
		self.stats.increment_results(total_results as u64);

		unique.truncate(max_results);

		let response = SearchResponse {
			keywords,
			results: unique,
			total_results,
			search_time: started.elapsed().as_secs_f64(),
			from_cache: false,
			source: SearchSource::Scraping,
		};

		self.cache.put(cache_key, response.clone());

		tracing::info!(
			total_results,
			returned = response.results.len(),
			search_time = response.search_time,
			"Search completed."
		);

		Ok(response)
	}
}

// Repeated keywords share a cache key, so they must not cost extra scrapes.
fn distinct(keywords: &[String]) -> Vec<String> {
	let mut out: Vec<String> = Vec::with_capacity(keywords.len());

	for keyword in keywords {
		if !out.contains(keyword) {
			out.push(keyword.clone());
		}
	}

	out
}

async fn save_scraped(
	store: &dyn DecisionStore,
	records: &[DecisionRecord],
	keywords_by_url: &HashMap<String, Vec<String>>,
) {
	if records.is_empty() {
		return;
	}

	match store.save_decisions(records, keywords_by_url).await {
		Ok(saved) => tracing::info!(saved, "Stored newly scraped decisions."),
		Err(err) => tracing::warn!(error = %err, "Failed to store scraped decisions."),
	}
}

async fn record_query(
	store: &dyn DecisionStore,
	keywords: &[String],
	results_count: usize,
	source: SearchSource,
) {
	if let Err(err) = store.record_search_query(keywords, results_count, source).await {
		tracing::warn!(error = %err, source = source.as_str(), "Failed to record search query.");
	}
}
