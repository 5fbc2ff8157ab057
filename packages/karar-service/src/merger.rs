use std::{collections::HashMap, sync::Arc, time::Duration};

use tokio::{sync::Semaphore, task::JoinSet, time};

use karar_domain::{DecisionRecord, dedup_by_url};

use crate::{Error, Result, ScrapeProvider};

enum TaskOutcome {
	Found(Vec<DecisionRecord>),
	Failed(Error),
	TimedOut,
}

/// Deduplicated scrape results plus, for each url, every keyword whose search returned it.
#[derive(Debug, Default)]
pub struct MergedResults {
	pub records: Vec<DecisionRecord>,
	pub keywords_by_url: HashMap<String, Vec<String>>,
}

/// Fans a keyword set out to the scraper, one task per keyword, and merges the results.
///
/// At most `max_workers` keyword searches run at once. Each task carries its own timeout; a task
/// that fails, panics, or times out is logged and contributes nothing.
pub struct ResultMerger {
	max_workers: usize,
	task_timeout: Duration,
}
impl ResultMerger {
	pub fn new(max_workers: usize, task_timeout: Duration) -> Self {
		Self { max_workers: max_workers.max(1), task_timeout }
	}

	/// Results are concatenated in task completion order, then deduplicated by url with the
	/// first occurrence kept. Records are passed through untouched. Returns empty results when
	/// every task fails.
	pub async fn merge(
		&self,
		keywords: &[String],
		scraper: Arc<dyn ScrapeProvider>,
	) -> Result<MergedResults> {
		let permits = Arc::new(Semaphore::new(self.max_workers));
		let mut tasks = JoinSet::new();

		for keyword in keywords {
			let keyword = keyword.clone();
			let scraper = scraper.clone();
			let permits = permits.clone();
			let task_timeout = self.task_timeout;

			tasks.spawn(async move {
				let outcome = match permits.acquire_owned().await {
					Ok(_permit) => search_one(scraper.as_ref(), &keyword, task_timeout).await,
					Err(err) => TaskOutcome::Failed(Error::Collaborator { message: err.to_string() }),
				};

				(keyword, outcome)
			});
		}

		let mut merged = Vec::new();
		let mut keywords_by_url: HashMap<String, Vec<String>> = HashMap::new();
		let mut failed = 0_usize;

		while let Some(joined) = tasks.join_next().await {
			let (keyword, outcome) = match joined {
				Ok(pair) => pair,
				Err(err) if err.is_panic() => {
					tracing::error!(error = %err, "Keyword search task panicked.");

					failed += 1;

					continue;
				},
				Err(err) => {
					return Err(Error::InternalSearch {
						message: format!("Keyword search task was cancelled: {err}"),
					});
				},
			};

			match outcome {
				TaskOutcome::Found(records) => {
					tracing::info!(
						keyword = %keyword,
						count = records.len(),
						"Keyword search finished."
					);

					for record in &records {
						let found_by = keywords_by_url.entry(record.url.clone()).or_default();

						if !found_by.contains(&keyword) {
							found_by.push(keyword.clone());
						}
					}

					merged.extend(records);
				},
				TaskOutcome::Failed(err) => {
					tracing::warn!(keyword = %keyword, error = %err, "Keyword search failed.");

					failed += 1;
				},
				TaskOutcome::TimedOut => {
					tracing::warn!(
						keyword = %keyword,
						timeout_ms = self.task_timeout.as_millis() as u64,
						"Keyword search timed out."
					);

					failed += 1;
				},
			}
		}

		if failed > 0 && failed == keywords.len() {
			tracing::warn!(keywords = ?keywords, "Every keyword search failed.");
		}

		Ok(MergedResults { records: dedup_by_url(merged), keywords_by_url })
	}
}

async fn search_one(
	scraper: &dyn ScrapeProvider,
	keyword: &str,
	timeout: Duration,
) -> TaskOutcome {
	match time::timeout(timeout, scraper.search_by_keyword(keyword)).await {
		Ok(Ok(records)) => TaskOutcome::Found(records),
		Ok(Err(err)) => TaskOutcome::Failed(Error::from(err)),
		Err(_) => TaskOutcome::TimedOut,
	}
}
