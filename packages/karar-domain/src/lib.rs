pub mod cache_key;
pub mod keywords;
pub mod record;

pub use cache_key::{cache_key_prefix, derive_cache_key};
pub use keywords::{KeywordReject, validate_keywords};
pub use record::{DecisionRecord, SearchSource, dedup_by_url};
