use std::{
	collections::HashMap,
	sync::{Mutex, MutexGuard},
};

use serde_json::Value;

use verdict_storage::{
	db::Db,
	models::{Exchange, SessionState},
	sessions,
};

use crate::{ServiceError, ServiceResult};

/// Engine operations that memoize their results per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
	DecisionSearch,
}
impl OperationKind {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::DecisionSearch => "decision_search",
		}
	}
}

/// Session-scoped memo of engine outputs, written through to the session
/// store.
///
/// Keys are the raw input strings, compared exactly; differently-cased
/// variants of one query are distinct entries. Entries never expire; callers
/// bound growth with [`SessionCache::clear`]. Concurrent writers to one
/// session are not serialized here, so duplicate computations may race and
/// the last writer wins.
#[derive(Default)]
pub struct SessionCache {
	sessions: Mutex<HashMap<String, SessionState>>,
}
impl SessionCache {
	/// Returns the memoized output for `(session, kind, input)`, loading the
	/// session's stored state on first touch.
	pub async fn lookup(
		&self,
		db: &Db,
		session_id: &str,
		kind: OperationKind,
		input: &str,
	) -> ServiceResult<Option<Value>> {
		{
			let loaded = self.lock();

			if let Some(state) = loaded.get(session_id) {
				return Ok(find_exchange(state, kind, input));
			}
		}

		let state = sessions::read_state(&db.pool, session_id)
			.await
			.map_err(|err| ServiceError::Storage {
				message: format!("Failed to load session {session_id}: {err}"),
			})?
			.unwrap_or_default();
		let found = find_exchange(&state, kind, input);

		// Another caller may have loaded (and written to) the session in the
		// meantime; their copy wins.
		self.lock().entry(session_id.to_string()).or_insert(state);

		Ok(found)
	}

	/// Appends one exchange and persists the whole session state before
	/// returning.
	pub async fn record(
		&self,
		db: &Db,
		session_id: &str,
		kind: OperationKind,
		input: &str,
		output: Value,
	) -> ServiceResult<()> {
		let snapshot = {
			let mut loaded = self.lock();
			let state = loaded.entry(session_id.to_string()).or_default();
			let exchanges = state.operations.entry(kind.as_str().to_string()).or_default();

			exchanges.push(Exchange { input: input.to_string(), output });

			state.clone()
		};

		sessions::upsert_state(&db.pool, session_id, &snapshot).await.map_err(|err| {
			ServiceError::CacheStore {
				message: format!("Failed to persist session {session_id}: {err}"),
			}
		})?;

		Ok(())
	}

	pub async fn clear(&self, db: &Db, session_id: &str) -> ServiceResult<()> {
		self.lock().remove(session_id);

		sessions::delete_state(&db.pool, session_id).await.map_err(|err| {
			ServiceError::CacheStore {
				message: format!("Failed to clear session {session_id}: {err}"),
			}
		})?;

		Ok(())
	}

	fn lock(&self) -> MutexGuard<'_, HashMap<String, SessionState>> {
		self.sessions.lock().unwrap_or_else(|err| err.into_inner())
	}
}

fn find_exchange(state: &SessionState, kind: OperationKind, input: &str) -> Option<Value> {
	state
		.operations
		.get(kind.as_str())?
		.iter()
		.find(|exchange| exchange.input == input)
		.map(|exchange| exchange.output.clone())
}
