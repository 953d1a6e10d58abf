use verdict_storage::{
	models::{Exchange, SessionState},
	sessions,
};

fn state_with(kind: &str, input: &str, output: serde_json::Value) -> SessionState {
	let mut state = SessionState::default();

	state.operations.insert(kind.to_string(), vec![Exchange {
		input: input.to_string(),
		output,
	}]);

	state
}

#[tokio::test]
async fn missing_session_reads_none() {
	let db = verdict_testkit::memory_db().await.expect("Failed to open in-memory store.");
	let loaded = sessions::read_state(&db.pool, "absent").await.expect("Read failed.");

	assert!(loaded.is_none());
}

#[tokio::test]
async fn round_trips_session_state() {
	let db = verdict_testkit::memory_db().await.expect("Failed to open in-memory store.");
	let state = state_with(
		"decision_search",
		"pencurian dengan kekerasan",
		serde_json::json!({ "items": [], "formatted": "" }),
	);

	sessions::upsert_state(&db.pool, "s1", &state).await.expect("Upsert failed.");

	let loaded = sessions::read_state(&db.pool, "s1")
		.await
		.expect("Read failed.")
		.expect("Session missing after upsert.");
	let exchanges = &loaded.operations["decision_search"];

	assert_eq!(exchanges.len(), 1);
	assert_eq!(exchanges[0].input, "pencurian dengan kekerasan");
	assert_eq!(exchanges[0].output["formatted"], "");
}

#[tokio::test]
async fn upsert_replaces_previous_state() {
	let db = verdict_testkit::memory_db().await.expect("Failed to open in-memory store.");

	sessions::upsert_state(&db.pool, "s1", &state_with("decision_search", "a", "first".into()))
		.await
		.expect("First upsert failed.");
	sessions::upsert_state(&db.pool, "s1", &state_with("decision_search", "b", "second".into()))
		.await
		.expect("Second upsert failed.");

	let loaded = sessions::read_state(&db.pool, "s1")
		.await
		.expect("Read failed.")
		.expect("Session missing after upsert.");
	let exchanges = &loaded.operations["decision_search"];

	assert_eq!(exchanges.len(), 1);
	assert_eq!(exchanges[0].input, "b");
}

#[tokio::test]
async fn delete_removes_session() {
	let db = verdict_testkit::memory_db().await.expect("Failed to open in-memory store.");

	sessions::upsert_state(&db.pool, "s1", &state_with("decision_search", "a", "out".into()))
		.await
		.expect("Upsert failed.");
	sessions::delete_state(&db.pool, "s1").await.expect("Delete failed.");

	let loaded = sessions::read_state(&db.pool, "s1").await.expect("Read failed.");

	assert!(loaded.is_none());
}

#[tokio::test]
async fn sessions_are_isolated() {
	let db = verdict_testkit::memory_db().await.expect("Failed to open in-memory store.");

	sessions::upsert_state(&db.pool, "s1", &state_with("decision_search", "a", "one".into()))
		.await
		.expect("Upsert failed.");

	let other = sessions::read_state(&db.pool, "s2").await.expect("Read failed.");

	assert!(other.is_none());
}
