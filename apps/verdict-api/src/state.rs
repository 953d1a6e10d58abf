use std::sync::Arc;

use verdict_service::VerdictService;
use verdict_storage::{db::Db, qdrant::QdrantStore};

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<VerdictService>,
}
impl AppState {
	pub async fn new(config: verdict_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.sqlite).await?;

		db.ensure_schema().await?;

		let qdrant = QdrantStore::new(&config.storage.qdrant)?;

		qdrant.ensure_collection().await?;

		let service = VerdictService::new(config, db, qdrant);

		Ok(Self { service: Arc::new(service) })
	}
}
