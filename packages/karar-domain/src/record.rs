use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single court decision. Only `url` is interpreted; every other field is carried through
/// untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
	pub url: String,
	#[serde(flatten)]
	pub fields: Map<String, Value>,
}
impl DecisionRecord {
	pub fn new(url: impl Into<String>) -> Self {
		Self { url: url.into(), fields: Map::new() }
	}

	pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
		self.fields.insert(key.into(), value);

		self
	}

	/// Builds a record from an arbitrary JSON value. Returns `None` when the value is not an
	/// object with a string `url`.
	pub fn from_value(value: Value) -> Option<Self> {
		let Value::Object(mut fields) = value else {
			return None;
		};
		let url = match fields.remove("url") {
			Some(Value::String(url)) if !url.trim().is_empty() => url,
			_ => return None,
		};

		Some(Self { url, fields })
	}
}

/// Where a search response was resolved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchSource {
	// Wire value kept for existing API clients.
	#[serde(rename = "mongodb")]
	Store,
	#[serde(rename = "scraping")]
	Scraping,
}
impl SearchSource {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Store => "mongodb",
			Self::Scraping => "scraping",
		}
	}
}

/// Drops every record whose url was already seen. The first occurrence wins and the relative
/// order of survivors is preserved.
pub fn dedup_by_url(records: Vec<DecisionRecord>) -> Vec<DecisionRecord> {
	let mut seen = HashSet::with_capacity(records.len());

	records.into_iter().filter(|record| seen.insert(record.url.clone())).collect()
}
