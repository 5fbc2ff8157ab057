use std::{
	collections::HashMap,
	sync::{Mutex, MutexGuard},
};

use crate::search::SearchResponse;

/// Process-wide map from cache key to a resolved search response.
///
/// Entries never expire; only [`SearchCache::clear`] removes them. Concurrent resolutions of the
/// same key may both write, and the last write wins.
pub struct SearchCache {
	enabled: bool,
	entries: Mutex<HashMap<String, SearchResponse>>,
}
impl SearchCache {
	pub fn new(enabled: bool) -> Self {
		Self { enabled, entries: Mutex::new(HashMap::new()) }
	}

	/// Returns a copy of the cached response with `from_cache` set, whatever the stored flag.
	pub fn get(&self, key: &str) -> Option<SearchResponse> {
		if !self.enabled {
			return None;
		}

		let mut hit = self.lock().get(key).cloned()?;

		hit.from_cache = true;

		Some(hit)
	}

	pub fn put(&self, key: String, response: SearchResponse) {
		if !self.enabled {
			return;
		}

		self.lock().insert(key, response);
	}

	/// Removes every entry and returns how many were removed.
	pub fn clear(&self) -> usize {
		let mut entries = self.lock();
		let removed = entries.len();

		entries.clear();

		removed
	}

	pub fn size(&self) -> usize {
		self.lock().len()
	}

	fn lock(&self) -> MutexGuard<'_, HashMap<String, SearchResponse>> {
		self.entries.lock().unwrap_or_else(|err| err.into_inner())
	}
}
impl Default for SearchCache {
	fn default() -> Self {
		Self::new(true)
	}
}

#[cfg(test)]
mod tests {
	use std::{sync::Arc, thread};

	use karar_domain::{DecisionRecord, SearchSource};

	use super::*;

	fn response(urls: &[&str]) -> SearchResponse {
		let results: Vec<DecisionRecord> = urls.iter().map(|url| DecisionRecord::new(*url)).collect();

		SearchResponse {
			keywords: vec!["kira".to_string()],
			total_results: results.len(),
			results,
			search_time: 0.5,
			from_cache: false,
			source: SearchSource::Scraping,
		}
	}

	#[test]
	fn hit_is_marked_from_cache() {
		let cache = SearchCache::default();

		cache.put("k".to_string(), response(&["a"]));

		let hit = cache.get("k").expect("Expected cache hit.");

		assert!(hit.from_cache);
		assert_eq!(hit.results.len(), 1);
		assert!(cache.get("missing").is_none());
	}

	#[test]
	fn put_overwrites_existing_entry() {
		let cache = SearchCache::default();

		cache.put("k".to_string(), response(&["a"]));
		cache.put("k".to_string(), response(&["b", "c"]));

		assert_eq!(cache.size(), 1);
		assert_eq!(cache.get("k").map(|hit| hit.total_results), Some(2));
	}

	#[test]
	fn clear_returns_previous_size() {
		let cache = SearchCache::default();

		cache.put("a".to_string(), response(&["a"]));
		cache.put("b".to_string(), response(&["b"]));

		assert_eq!(cache.clear(), 2);
		assert_eq!(cache.size(), 0);
		assert_eq!(cache.clear(), 0);
	}

	#[test]
	fn disabled_cache_never_stores() {
		let cache = SearchCache::new(false);

		cache.put("k".to_string(), response(&["a"]));

		assert!(cache.get("k").is_none());
		assert_eq!(cache.size(), 0);
	}

	#[test]
	fn concurrent_puts_are_not_lost() {
		let cache = Arc::new(SearchCache::default());
		let handles: Vec<_> = (0..8)
			.map(|worker| {
				let cache = cache.clone();

				thread::spawn(move || {
					for i in 0..250 {
						let key = format!("{worker}-{i}");

						cache.put(key.clone(), response(&["a"]));

						assert!(cache.get(&key).is_some());
					}
				})
			})
			.collect();

		for handle in handles {
			handle.join().expect("Cache thread panicked.");
		}

		assert_eq!(cache.size(), 8 * 250);
	}
}
