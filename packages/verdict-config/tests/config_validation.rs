use serde_json::Map;

use verdict_config::{
	Config, EmbeddingProviderConfig, Error, Excerpt, Providers, Qdrant, Search, Service, Sqlite,
	Storage,
};

fn base_config() -> Config {
	Config {
		service: Service {
			http_bind: "127.0.0.1:8080".to_string(),
			admin_bind: "127.0.0.1:8081".to_string(),
			log_level: "info".to_string(),
		},
		storage: Storage {
			sqlite: Sqlite { path: "tmp/sessions.db".to_string(), max_conns: 4 },
			qdrant: Qdrant {
				url: "http://localhost:6334".to_string(),
				collection: "court_decisions".to_string(),
				vector_dim: 1_536,
			},
		},
		providers: Providers {
			embedding: EmbeddingProviderConfig {
				provider_id: "openai".to_string(),
				api_base: "https://api.openai.com".to_string(),
				api_key: "key".to_string(),
				path: "/v1/embeddings".to_string(),
				model: "text-embedding-3-small".to_string(),
				dimensions: 1_536,
				timeout_ms: 5_000,
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

fn validation_message(result: verdict_config::Result<()>) -> String {
	match result {
		Err(Error::Validation { message }) => message,
		other => panic!("Expected a validation error, got {other:?}."),
	}
}

#[test]
fn accepts_base_config() {
	assert!(verdict_config::validate(&base_config()).is_ok());
}

#[test]
fn rejects_zero_max_conns() {
	let mut cfg = base_config();

	cfg.storage.sqlite.max_conns = 0;

	let message = validation_message(verdict_config::validate(&cfg));

	assert!(message.contains("max_conns"));
}

#[test]
fn rejects_dimension_mismatch() {
	let mut cfg = base_config();

	cfg.providers.embedding.dimensions = 768;

	let message = validation_message(verdict_config::validate(&cfg));

	assert!(message.contains("dimensions"));
}

#[test]
fn rejects_empty_api_key() {
	let mut cfg = base_config();

	cfg.providers.embedding.api_key = "   ".to_string();

	let message = validation_message(verdict_config::validate(&cfg));

	assert!(message.contains("api_key"));
}

#[test]
fn rejects_out_of_range_threshold() {
	let mut cfg = base_config();

	cfg.search.high_threshold = 1.2;

	let message = validation_message(verdict_config::validate(&cfg));

	assert!(message.contains("high_threshold"));
}

#[test]
fn rejects_non_finite_threshold() {
	let mut cfg = base_config();

	cfg.search.low_threshold = f32::NAN;

	let message = validation_message(verdict_config::validate(&cfg));

	assert!(message.contains("low_threshold"));
}

#[test]
fn rejects_inverted_thresholds() {
	let mut cfg = base_config();

	cfg.search.high_threshold = 0.3;
	cfg.search.low_threshold = 0.5;

	let message = validation_message(verdict_config::validate(&cfg));

	assert!(message.contains("low_threshold"));
}

#[test]
fn rejects_zero_top_k() {
	let mut cfg = base_config();

	cfg.search.top_k = 0;

	let message = validation_message(verdict_config::validate(&cfg));

	assert!(message.contains("top_k"));
}

#[test]
fn rejects_zero_budget() {
	let mut cfg = base_config();

	cfg.search.budget_ms = 0;

	let message = validation_message(verdict_config::validate(&cfg));

	assert!(message.contains("budget_ms"));
}

#[test]
fn rejects_step_larger_than_window() {
	let mut cfg = base_config();

	cfg.search.excerpt.step_chars = 400;

	let message = validation_message(verdict_config::validate(&cfg));

	assert!(message.contains("step_chars"));
}

#[test]
fn rejects_zero_min_term_chars() {
	let mut cfg = base_config();

	cfg.search.excerpt.min_term_chars = 0;

	let message = validation_message(verdict_config::validate(&cfg));

	assert!(message.contains("min_term_chars"));
}

#[test]
fn parses_full_document_with_defaults() {
	let raw = r#"
[service]
http_bind = "127.0.0.1:8080"
admin_bind = "127.0.0.1:8081"
log_level = "info"

[storage.sqlite]
path = ":memory:"
max_conns = 1

[storage.qdrant]
url = "http://localhost:6334"
collection = "court_decisions"
vector_dim = 1536

[providers.embedding]
provider_id = "openai"
api_base = "https://api.openai.com/"
api_key = "key"
path = "/v1/embeddings"
model = "text-embedding-3-small"
dimensions = 1536
timeout_ms = 5000
default_headers = {}

[search]
"#;
	let cfg: Config = toml::from_str(raw).expect("Failed to parse config document.");

	assert_eq!(cfg.search.top_k, 5);
	assert_eq!(cfg.search.high_threshold, 0.6);
	assert_eq!(cfg.search.low_threshold, 0.4);
	assert_eq!(cfg.search.budget_ms, 10_000);
	assert_eq!(cfg.search.excerpt.window_chars, 300);
	assert_eq!(cfg.search.excerpt.step_chars, 50);
	assert_eq!(cfg.search.excerpt.min_term_chars, 3);
}
