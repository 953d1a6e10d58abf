pub mod ranking;

mod retrieval;

use std::time::Instant;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::time::{self, Duration};
use uuid::Uuid;

use verdict_domain::{Candidate, DecisionFields, NormalizedQuery, ScoredResult};

use crate::{OperationKind, ServiceError, ServiceResult, VerdictService, format};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
	pub session_id: String,
	pub query: String,
	pub top_k: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
	pub items: Vec<ScoredResult>,
	pub formatted: String,
}

/// One decision record to embed and upsert into the vector collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionInput {
	pub id: Uuid,
	pub title: String,
	pub content: String,
	pub category: Option<String>,
	#[serde(default)]
	pub metadata: Map<String, Value>,
	pub file_url: Option<String>,
	pub document_link: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexDecisionsRequest {
	pub decisions: Vec<DecisionInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexDecisionsResponse {
	pub indexed: usize,
}

impl VerdictService {
	/// Finds court decisions relevant to a free-text query.
	///
	/// Identical (session, query) pairs are answered from the session cache
	/// without touching the embedding provider or the search backend.
	/// Provider, backend, and deadline failures degrade to an empty response;
	/// only a failure to persist the session surfaces as an error.
	pub async fn search(&self, req: SearchRequest) -> ServiceResult<SearchResponse> {
		let normalized = NormalizedQuery::new(&req.query);

		if normalized.is_empty() {
			return Ok(SearchResponse::default());
		}

		if let Some(cached) = self
			.cache
			.lookup(&self.db, &req.session_id, OperationKind::DecisionSearch, &req.query)
			.await?
		{
			tracing::info!(
				session_id = %req.session_id,
				operation = OperationKind::DecisionSearch.as_str(),
				hit = true,
				"Cache hit."
			);

			return serde_json::from_value(cached).map_err(|err| ServiceError::Storage {
				message: format!("Failed to decode cached payload: {err}"),
			});
		}

		tracing::debug!(
			session_id = %req.session_id,
			operation = OperationKind::DecisionSearch.as_str(),
			hit = false,
			"Cache miss."
		);

		let started = Instant::now();
		let top_k = req.top_k.unwrap_or(self.cfg.search.top_k).max(1);
		let budget = Duration::from_millis(self.cfg.search.budget_ms);
		let items = match time::timeout(budget, self.run_pipeline(&normalized, top_k)).await {
			Ok(Ok(items)) => items,
			Ok(Err(err)) => {
				tracing::warn!(error = %err, query = %normalized.text, "Decision search failed.");

				return Ok(SearchResponse::default());
			},
			Err(_) => {
				tracing::warn!(
					budget_ms = self.cfg.search.budget_ms,
					query = %normalized.text,
					"Decision search timed out."
				);

				return Ok(SearchResponse::default());
			},
		};
		let formatted = format::render_decisions(&items);
		let response = SearchResponse { items, formatted };
		let payload = serde_json::to_value(&response).map_err(|err| ServiceError::CacheStore {
			message: format!("Failed to encode result payload: {err}"),
		})?;

		self.cache
			.record(&self.db, &req.session_id, OperationKind::DecisionSearch, &req.query, payload)
			.await?;

		tracing::info!(
			result_count = response.items.len(),
			total_ms = started.elapsed().as_millis() as u64,
			"Decision search completed."
		);

		Ok(response)
	}

	/// Embeds and upserts decision records into the vector collection.
	pub async fn index_decisions(
		&self,
		req: IndexDecisionsRequest,
	) -> ServiceResult<IndexDecisionsResponse> {
		if req.decisions.is_empty() {
			return Err(ServiceError::InvalidRequest {
				message: "decisions must be non-empty.".to_string(),
			});
		}

		for decision in &req.decisions {
			if decision.content.trim().is_empty() {
				return Err(ServiceError::InvalidRequest {
					message: format!("Decision {} has empty content.", decision.id),
				});
			}
		}

		let texts: Vec<String> =
			req.decisions.iter().map(|decision| decision.content.clone()).collect();
		let vectors =
			self.providers.embedding.embed(&self.cfg.providers.embedding, &texts).await?;

		if vectors.len() != texts.len() {
			return Err(ServiceError::Provider {
				message: "Embedding provider returned mismatched vector count.".to_string(),
			});
		}

		let dim = self.cfg.storage.qdrant.vector_dim as usize;

		if vectors.iter().any(|vector| vector.len() != dim) {
			return Err(ServiceError::Provider {
				message: "Embedding vector dimension mismatch.".to_string(),
			});
		}

		self.backend.index_decisions(&req.decisions, &vectors).await?;

		tracing::info!(indexed = req.decisions.len(), "Indexed decision records.");

		Ok(IndexDecisionsResponse { indexed: req.decisions.len() })
	}

	async fn run_pipeline(
		&self,
		query: &NormalizedQuery,
		top_k: u32,
	) -> ServiceResult<Vec<ScoredResult>> {
		let embed_started = Instant::now();
		let texts = [query.text.clone()];
		let embedded =
			self.providers.embedding.embed(&self.cfg.providers.embedding, &texts).await?;
		let Some(vector) = embedded.into_iter().next() else {
			return Err(ServiceError::Provider {
				message: "Embedding provider returned no vectors.".to_string(),
			});
		};

		if vector.len() != self.cfg.storage.qdrant.vector_dim as usize {
			return Err(ServiceError::Provider {
				message: "Embedding vector dimension mismatch.".to_string(),
			});
		}

		let embed_ms = embed_started.elapsed().as_millis() as u64;
		let search_started = Instant::now();
		let search_cfg = &self.cfg.search;
		let mut candidates = self
			.backend
			.similarity_search(&vector, search_cfg.high_threshold, u64::from(top_k))
			.await?;

		if candidates.is_empty() {
			tracing::debug!(
				threshold = search_cfg.low_threshold,
				"No candidates above the high threshold; relaxing once."
			);

			candidates = self
				.backend
				.similarity_search(&vector, search_cfg.low_threshold, u64::from(top_k))
				.await?;
		}

		let search_ms = search_started.elapsed().as_millis() as u64;
		let fetched = candidates.len();
		let terms = ranking::query_terms(&query.text, search_cfg.excerpt.min_term_chars);
		let mut items: Vec<ScoredResult> = candidates
			.into_iter()
			.map(|candidate| score_candidate(candidate, &terms, &search_cfg.excerpt))
			.collect();

		// Relevance percentage is the only sort key; the window score merely
		// picked each excerpt. Stable sort keeps backend order on ties.
		items.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));
		items.truncate(top_k as usize);

		tracing::debug!(embed_ms, search_ms, fetched, "Pipeline stages finished.");

		Ok(items)
	}
}

fn score_candidate(
	candidate: Candidate,
	terms: &[String],
	cfg: &verdict_config::Excerpt,
) -> ScoredResult {
	let excerpt =
		match ranking::best_window(&candidate.content, terms, cfg.window_chars, cfg.step_chars) {
			Some(window) => {
				let mut highlighted = ranking::highlight(window, terms);

				highlighted.push_str("...");

				highlighted
			},
			None => String::new(),
		};
	let fields = DecisionFields::from_candidate(&candidate);

	ScoredResult {
		relevance_score: ranking::relevance_percent(candidate.similarity),
		id: candidate.id,
		title: candidate.title,
		content: candidate.content,
		category: candidate.category,
		metadata: candidate.metadata,
		excerpt,
		fields,
	}
}
