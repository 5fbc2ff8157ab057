use std::collections::HashMap;

use serde_json::json;

use karar_config::Postgres;
use karar_domain::{DecisionRecord, SearchSource};
use karar_service::{DecisionStore, PgDecisionStore};
use karar_storage::db::Db;
use karar_testkit::Error;

fn decision(url: &str) -> DecisionRecord {
	DecisionRecord::new(url).with_field("title", json!(format!("Karar {url}")))
}

fn index(entries: &[(&str, Vec<&str>)]) -> HashMap<String, Vec<String>> {
	entries
		.iter()
		.map(|(url, keywords)| {
			(url.to_string(), keywords.iter().map(|keyword| keyword.to_string()).collect())
		})
		.collect()
}

fn message(err: impl std::fmt::Display) -> Error {
	Error::Message(err.to_string())
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set KARAR_PG_DSN to run."]
async fn pg_store_round_trips_through_the_trait() {
	let Some(base_dsn) = karar_testkit::env_dsn() else {
		eprintln!("Skipping store tests; set KARAR_PG_DSN to run this test.");

		return;
	};

	karar_testkit::with_test_db(&base_dsn, |test_db| {
		let dsn = test_db.dsn().to_string();

		async move {
			let db = Db::connect(&Postgres { dsn, pool_max_conns: 2 }).await.map_err(message)?;

			db.ensure_schema().await.map_err(message)?;

			let store = PgDecisionStore::new(db, 10);
			let batch = vec![decision("u1"), decision("u2")];
			let first = index(&[("u1", vec!["kira"]), ("u2", vec!["tahliye"])]);
			let second = index(&[("u2", vec!["kira", "tahliye"])]);

			assert_eq!(store.save_decisions(&batch, &first).await.map_err(message)?, 2);
			assert_eq!(store.save_decisions(&batch[1..], &second).await.map_err(message)?, 0);

			let found =
				store.search_decisions(&["kira".to_string()]).await.map_err(message)?;
			let mut urls: Vec<&str> = found.iter().map(|record| record.url.as_str()).collect();

			urls.sort();

			assert_eq!(urls, vec!["u1", "u2"]);

			store
				.record_search_query(&["kira".to_string()], found.len(), SearchSource::Store)
				.await
				.map_err(message)?;
			store.ping().await.map_err(message)?;

			let counts = store.counts().await.map_err(message)?;

			assert_eq!(counts.decisions, 2);
			assert_eq!(counts.queries, 1);

			Ok(())
		}
	})
	.await
	.expect("Store round trip failed.");
}
