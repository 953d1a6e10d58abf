use sqlx::{
	SqlitePool,
	sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

use crate::{Result, schema};

pub struct Db {
	pub pool: SqlitePool,
}
impl Db {
	pub async fn connect(cfg: &verdict_config::Sqlite) -> Result<Self> {
		let options = SqliteConnectOptions::new().filename(&cfg.path).create_if_missing(true);
		let pool = SqlitePoolOptions::new()
			.max_connections(cfg.max_conns)
			.connect_with(options)
			.await?;

		Ok(Self { pool })
	}

	pub async fn ensure_schema(&self) -> Result<()> {
		for statement in schema::render_schema().split(';') {
			let trimmed = statement.trim();

			if trimmed.is_empty() {
				continue;
			}

			sqlx::query(trimmed).execute(&self.pool).await?;
		}

		Ok(())
	}
}
