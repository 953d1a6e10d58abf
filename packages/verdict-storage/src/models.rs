use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Durable per-session state: one exchange list per operation kind.
///
/// Serialized shape is the bare mapping, e.g.
/// `{"decision_search": [{"input": "...", "output": ...}]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionState {
	#[serde(flatten)]
	pub operations: HashMap<String, Vec<Exchange>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exchange {
	pub input: String,
	pub output: Value,
}
