mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Config, EmbeddingProviderConfig, Excerpt, Providers, Qdrant, Search, Service, Sqlite, Storage,
};

use std::{fs, path::Path};

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
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.service.admin_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.admin_bind must be non-empty.".to_string(),
		});
	}
	if cfg.storage.sqlite.path.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.sqlite.path must be non-empty.".to_string(),
		});
	}
	if cfg.storage.sqlite.max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.sqlite.max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.storage.qdrant.vector_dim == 0 {
		return Err(Error::Validation {
			message: "storage.qdrant.vector_dim must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.embedding.dimensions != cfg.storage.qdrant.vector_dim {
		return Err(Error::Validation {
			message: "providers.embedding.dimensions must match storage.qdrant.vector_dim."
				.to_string(),
		});
	}
	if cfg.providers.embedding.api_key.trim().is_empty() {
		return Err(Error::Validation {
			message: "providers.embedding.api_key must be non-empty.".to_string(),
		});
	}
	if cfg.providers.embedding.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "providers.embedding.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.search.top_k == 0 {
		return Err(Error::Validation {
			message: "search.top_k must be greater than zero.".to_string(),
		});
	}
	if cfg.search.budget_ms == 0 {
		return Err(Error::Validation {
			message: "search.budget_ms must be greater than zero.".to_string(),
		});
	}

	for (label, threshold) in [
		("search.high_threshold", cfg.search.high_threshold),
		("search.low_threshold", cfg.search.low_threshold),
	] {
		if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
			return Err(Error::Validation {
				message: format!("{label} must be in the range 0.0-1.0."),
			});
		}
	}

	if cfg.search.low_threshold > cfg.search.high_threshold {
		return Err(Error::Validation {
			message: "search.low_threshold must not exceed search.high_threshold.".to_string(),
		});
	}
	if cfg.search.excerpt.window_chars == 0 {
		return Err(Error::Validation {
			message: "search.excerpt.window_chars must be greater than zero.".to_string(),
		});
	}
	if cfg.search.excerpt.step_chars == 0
		|| cfg.search.excerpt.step_chars > cfg.search.excerpt.window_chars
	{
		return Err(Error::Validation {
			message: "search.excerpt.step_chars must be between one and window_chars.".to_string(),
		});
	}
	if cfg.search.excerpt.min_term_chars == 0 {
		return Err(Error::Validation {
			message: "search.excerpt.min_term_chars must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	// A trailing slash on the base would double up with the request path.
	while cfg.providers.embedding.api_base.ends_with('/') {
		cfg.providers.embedding.api_base.pop();
	}
}
