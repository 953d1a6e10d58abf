mod error;

pub use error::{Error, Result};

use serde_json::Map;

use verdict_config::{
	Config, EmbeddingProviderConfig, Excerpt, Providers, Qdrant, Search, Service, Sqlite, Storage,
};
use verdict_storage::db::Db;

/// Opens a transient single-connection SQLite store with the schema applied.
pub async fn memory_db() -> Result<Db> {
	let cfg = Sqlite { path: ":memory:".to_string(), max_conns: 1 };
	let db = Db::connect(&cfg)
		.await
		.map_err(|err| Error::Message(format!("Failed to open in-memory store: {err}.")))?;

	db.ensure_schema()
		.await
		.map_err(|err| Error::Message(format!("Failed to apply schema: {err}.")))?;

	Ok(db)
}

/// A config small enough for tests: four-dimensional vectors, local binds,
/// production search defaults.
pub fn test_config() -> Config {
	Config {
		service: Service {
			http_bind: "127.0.0.1:0".to_string(),
			admin_bind: "127.0.0.1:0".to_string(),
			log_level: "info".to_string(),
		},
		storage: Storage {
			sqlite: Sqlite { path: ":memory:".to_string(), max_conns: 1 },
			qdrant: Qdrant {
				url: "http://localhost:6334".to_string(),
				collection: "court_decisions_test".to_string(),
				vector_dim: 4,
			},
		},
		providers: Providers {
			embedding: EmbeddingProviderConfig {
				provider_id: "test".to_string(),
				api_base: "http://localhost".to_string(),
				api_key: "key".to_string(),
				path: "/v1/embeddings".to_string(),
				model: "test-embedding".to_string(),
				dimensions: 4,
				timeout_ms: 1_000,
				default_headers: Map::new(),
			},
		},
		search: Search {
			top_k: 5,
			high_threshold: 0.6,
			low_threshold: 0.4,
			budget_ms: 10_000,
			excerpt: Excerpt { window_chars: 300, step_chars: 50, min_term_chars: 3 },
		},
	}
}
