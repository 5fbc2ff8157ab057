mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Cache, Config, MAX_KEYWORDS_LIMIT, Postgres, Scraper, Search, Service, Storage};

use std::{fs, net::SocketAddr, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.parse::<SocketAddr>().is_err() {
		return Err(Error::Validation {
			message: "service.http_bind must be a socket address.".to_string(),
		});
	}
	if cfg.service.request_timeout_ms == 0 {
		return Err(Error::Validation {
			message: "service.request_timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.storage.enabled && cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty when storage is enabled.".to_string(),
		});
	}
	if cfg.storage.lookup_limit == 0 {
		return Err(Error::Validation {
			message: "storage.lookup_limit must be greater than zero.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.scraper.api_base.trim().is_empty() {
		return Err(Error::Validation {
			message: "scraper.api_base must be non-empty.".to_string(),
		});
	}
	if cfg.scraper.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "scraper.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.scraper.max_results_per_keyword == 0 {
		return Err(Error::Validation {
			message: "scraper.max_results_per_keyword must be greater than zero.".to_string(),
		});
	}
	if cfg.scraper.default_headers.values().any(|value| !value.is_string()) {
		return Err(Error::Validation {
			message: "scraper.default_headers values must be strings.".to_string(),
		});
	}
	if cfg.search.max_workers == 0 {
		return Err(Error::Validation {
			message: "search.max_workers must be greater than zero.".to_string(),
		});
	}
	if !(1..=MAX_KEYWORDS_LIMIT).contains(&cfg.search.max_keywords) {
		return Err(Error::Validation {
			message: format!("search.max_keywords must be in the range 1-{MAX_KEYWORDS_LIMIT}."),
		});
	}
	if cfg.search.default_max_results == 0 {
		return Err(Error::Validation {
			message: "search.default_max_results must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg.scraper.api_key.as_deref().map(|key| key.trim().is_empty()).unwrap_or(false) {
		cfg.scraper.api_key = None;
	}

	let trimmed = cfg.scraper.api_base.trim_end_matches('/').len();

	cfg.scraper.api_base.truncate(trimmed);
}
