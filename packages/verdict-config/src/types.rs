use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub providers: Providers,
	pub search: Search,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub admin_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub sqlite: Sqlite,
	pub qdrant: Qdrant,
}

#[derive(Debug, Deserialize)]
pub struct Sqlite {
	/// Database file path; `:memory:` opens a transient store.
	pub path: String,
	pub max_conns: u32,
}

#[derive(Debug, Deserialize)]
pub struct Qdrant {
	pub url: String,
	pub collection: String,
	pub vector_dim: u32,
}

#[derive(Debug, Deserialize)]
pub struct Providers {
	pub embedding: EmbeddingProviderConfig,
}

#[derive(Debug, Deserialize)]
pub struct EmbeddingProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub dimensions: u32,
	pub timeout_ms: u64,
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct Search {
	/// Default result cap when a request does not carry one.
	#[serde(default = "default_top_k")]
	pub top_k: u32,
	#[serde(default = "default_high_threshold")]
	pub high_threshold: f32,
	#[serde(default = "default_low_threshold")]
	pub low_threshold: f32,
	/// Wall-clock budget for one embed-plus-retrieval sequence.
	#[serde(default = "default_budget_ms")]
	pub budget_ms: u64,
	#[serde(default)]
	pub excerpt: Excerpt,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Excerpt {
	pub window_chars: usize,
	pub step_chars: usize,
	pub min_term_chars: usize,
}
impl Default for Excerpt {
	fn default() -> Self {
		Self { window_chars: 300, step_chars: 50, min_term_chars: 3 }
	}
}

fn default_top_k() -> u32 {
	5
}

fn default_high_threshold() -> f32 {
	0.6
}

fn default_low_threshold() -> f32 {
	0.4
}

fn default_budget_ms() -> u64 {
	10_000
}
