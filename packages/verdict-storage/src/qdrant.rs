use qdrant_client::qdrant::{
	CreateCollectionBuilder, Distance, PointStruct, Query, QueryPointsBuilder, ScoredPoint,
	UpsertPointsBuilder, VectorParamsBuilder,
};

use crate::Result;

pub struct QdrantStore {
	pub client: qdrant_client::Qdrant,
	pub collection: String,
	pub vector_dim: u32,
}
impl QdrantStore {
	pub fn new(cfg: &verdict_config::Qdrant) -> Result<Self> {
		let client = qdrant_client::Qdrant::from_url(&cfg.url).build()?;

		Ok(Self { client, collection: cfg.collection.clone(), vector_dim: cfg.vector_dim })
	}

	pub async fn ensure_collection(&self) -> Result<()> {
		if self.client.collection_exists(&self.collection).await? {
			return Ok(());
		}

		self.client
			.create_collection(
				CreateCollectionBuilder::new(self.collection.as_str())
					.vectors_config(VectorParamsBuilder::new(
						u64::from(self.vector_dim),
						Distance::Cosine,
					))
					.on_disk_payload(true),
			)
			.await?;

		Ok(())
	}

	/// One scored similarity query; candidates below `threshold` are filtered
	/// server side.
	pub async fn similarity_search(
		&self,
		vector: Vec<f32>,
		threshold: f32,
		limit: u64,
	) -> Result<Vec<ScoredPoint>> {
		let query = QueryPointsBuilder::new(self.collection.clone())
			.query(Query::new_nearest(vector))
			.score_threshold(threshold)
			.with_payload(true)
			.limit(limit);
		let response = self.client.query(query).await?;

		Ok(response.result)
	}

	pub async fn upsert_points(&self, points: Vec<PointStruct>) -> Result<()> {
		if points.is_empty() {
			return Ok(());
		}

		self.client
			.upsert_points(UpsertPointsBuilder::new(self.collection.clone(), points).wait(true))
			.await?;

		Ok(())
	}
}
