use std::time::Duration;

use color_eyre::{Result, eyre};
use reqwest::Client;
use serde_json::Value;

use karar_domain::DecisionRecord;

/// Asks the scraper service for the decisions matching a single keyword.
pub async fn search_by_keyword(
	cfg: &karar_config::Scraper,
	keyword: &str,
) -> Result<Vec<DecisionRecord>> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({
		"keyword": keyword,
		"max_results": cfg.max_results_per_keyword,
	});
	let res = client
		.post(url)
		.headers(crate::auth_headers(cfg.api_key.as_deref(), &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_scrape_response(json, keyword)
}

fn parse_scrape_response(json: Value, keyword: &str) -> Result<Vec<DecisionRecord>> {
	let items = match json {
		Value::Array(items) => items,
		Value::Object(mut object) => match object.remove("results") {
			Some(Value::Array(items)) => items,
			_ => return Err(eyre::eyre!("Scrape response is missing results array.")),
		},
		_ => return Err(eyre::eyre!("Scrape response must be an array or an object.")),
	};
	let total = items.len();
	let records: Vec<DecisionRecord> =
		items.into_iter().filter_map(DecisionRecord::from_value).collect();

	if records.len() < total {
		tracing::warn!(
			keyword,
			skipped = total - records.len(),
			"Dropped scraped items without a url."
		);
	}

	Ok(records)
}
