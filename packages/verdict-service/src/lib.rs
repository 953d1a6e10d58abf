pub mod cache;
pub mod format;
pub mod search;

use std::{future::Future, pin::Pin, sync::Arc};

pub use cache::{OperationKind, SessionCache};
pub use search::{
	DecisionInput, IndexDecisionsRequest, IndexDecisionsResponse, SearchRequest, SearchResponse,
};

use verdict_config::{Config, EmbeddingProviderConfig};
use verdict_domain::Candidate;
use verdict_providers::embedding;
use verdict_storage::{db::Db, qdrant::QdrantStore};

pub type ServiceResult<T> = Result<T, ServiceError>;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Seam to the embedding provider; the default implementation calls the
/// configured HTTP endpoint.
pub trait EmbeddingProvider
where
	Self: Send + Sync,
{
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, verdict_providers::Result<Vec<Vec<f32>>>>;
}

/// Seam to the vector-search backend; the default implementation queries the
/// Qdrant collection.
pub trait SearchBackend
where
	Self: Send + Sync,
{
	fn similarity_search<'a>(
		&'a self,
		vector: &'a [f32],
		threshold: f32,
		limit: u64,
	) -> BoxFuture<'a, verdict_storage::Result<Vec<Candidate>>>;

	fn index_decisions<'a>(
		&'a self,
		decisions: &'a [DecisionInput],
		vectors: &'a [Vec<f32>],
	) -> BoxFuture<'a, verdict_storage::Result<()>>;
}

#[derive(Debug)]
pub enum ServiceError {
	InvalidRequest { message: String },
	Provider { message: String },
	Backend { message: String },
	Storage { message: String },
	/// The result was computed but could not be saved durably. Kept apart
	/// from retrieval failures so callers can tell "no matches" from "not
	/// persisted".
	CacheStore { message: String },
}

#[derive(Clone)]
pub struct Providers {
	pub embedding: Arc<dyn EmbeddingProvider>,
}

pub struct VerdictService {
	pub cfg: Config,
	pub db: Db,
	pub backend: Arc<dyn SearchBackend>,
	pub providers: Providers,
	pub cache: SessionCache,
}

struct DefaultProviders;

impl std::fmt::Display for ServiceError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::InvalidRequest { message } => write!(f, "Invalid request: {message}"),
			Self::Provider { message } => write!(f, "Provider error: {message}"),
			Self::Backend { message } => write!(f, "Backend error: {message}"),
			Self::Storage { message } => write!(f, "Storage error: {message}"),
			Self::CacheStore { message } => write!(f, "Cache store error: {message}"),
		}
	}
}

impl std::error::Error for ServiceError {}

impl From<verdict_providers::Error> for ServiceError {
	fn from(err: verdict_providers::Error) -> Self {
		Self::Provider { message: err.to_string() }
	}
}

impl From<verdict_storage::Error> for ServiceError {
	fn from(err: verdict_storage::Error) -> Self {
		match err {
			verdict_storage::Error::Qdrant(_) => Self::Backend { message: err.to_string() },
			_ => Self::Storage { message: err.to_string() },
		}
	}
}

impl EmbeddingProvider for DefaultProviders {
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, verdict_providers::Result<Vec<Vec<f32>>>> {
		Box::pin(embedding::embed(cfg, texts))
	}
}

impl Providers {
	pub fn new(embedding: Arc<dyn EmbeddingProvider>) -> Self {
		Self { embedding }
	}
}

impl Default for Providers {
	fn default() -> Self {
		Self { embedding: Arc::new(DefaultProviders) }
	}
}

impl VerdictService {
	pub fn new(cfg: Config, db: Db, qdrant: QdrantStore) -> Self {
		Self::with_components(cfg, db, Arc::new(qdrant), Providers::default())
	}

	pub fn with_components(
		cfg: Config,
		db: Db,
		backend: Arc<dyn SearchBackend>,
		providers: Providers,
	) -> Self {
		Self { cfg, db, backend, providers, cache: SessionCache::default() }
	}

	/// Drops the session's memoized results, in memory and in the store.
	pub async fn clear_session(&self, session_id: &str) -> ServiceResult<()> {
		self.cache.clear(&self.db, session_id).await
	}
}
