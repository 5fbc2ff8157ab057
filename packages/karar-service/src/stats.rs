use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct StatsSnapshot {
	pub total_searches: u64,
	pub total_results: u64,
}

/// Monotonic process-wide search counters.
#[derive(Debug, Default)]
pub struct SearchStatistics {
	total_searches: AtomicU64,
	total_results: AtomicU64,
}
impl SearchStatistics {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn increment_searches(&self, count: u64) {
		self.total_searches.fetch_add(count, Ordering::Relaxed);
	}

	pub fn increment_results(&self, count: u64) {
		self.total_results.fetch_add(count, Ordering::Relaxed);
	}

	pub fn snapshot(&self) -> StatsSnapshot {
		StatsSnapshot {
			total_searches: self.total_searches.load(Ordering::Relaxed),
			total_results: self.total_results.load(Ordering::Relaxed),
		}
	}
}

#[cfg(test)]
mod tests {
	use std::{sync::Arc, thread};

	use super::*;

	#[test]
	fn concurrent_increments_are_not_lost() {
		let stats = Arc::new(SearchStatistics::new());
		let handles: Vec<_> = (0..8)
			.map(|_| {
				let stats = stats.clone();

				thread::spawn(move || {
					for _ in 0..1_000 {
						stats.increment_searches(1);
						stats.increment_results(3);
					}
				})
			})
			.collect();

		for handle in handles {
			handle.join().expect("Counter thread panicked.");
		}

		assert_eq!(stats.snapshot(), StatsSnapshot { total_searches: 8_000, total_results: 24_000 });
	}
}
