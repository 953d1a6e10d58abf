use sqlx::SqlitePool;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::{Result, models::SessionState};

pub async fn read_state(pool: &SqlitePool, session_id: &str) -> Result<Option<SessionState>> {
	let row: Option<(String,)> =
		sqlx::query_as("SELECT state FROM sessions WHERE session_id = ?1")
			.bind(session_id)
			.fetch_optional(pool)
			.await?;
	let Some((raw,)) = row else {
		return Ok(None);
	};
	let state = serde_json::from_str(&raw)?;

	Ok(Some(state))
}

pub async fn upsert_state(
	pool: &SqlitePool,
	session_id: &str,
	state: &SessionState,
) -> Result<()> {
	let raw = serde_json::to_string(state)?;
	let now = OffsetDateTime::now_utc().format(&Rfc3339)?;

	sqlx::query(
		"\
INSERT INTO sessions (session_id, state, created_at, updated_at)
VALUES (?1, ?2, ?3, ?3)
ON CONFLICT (session_id) DO UPDATE SET
	state = excluded.state,
	updated_at = excluded.updated_at",
	)
	.bind(session_id)
	.bind(raw)
	.bind(now)
	.execute(pool)
	.await?;

	Ok(())
}

pub async fn delete_state(pool: &SqlitePool, session_id: &str) -> Result<()> {
	sqlx::query("DELETE FROM sessions WHERE session_id = ?1")
		.bind(session_id)
		.execute(pool)
		.await?;

	Ok(())
}
