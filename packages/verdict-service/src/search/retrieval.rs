use std::collections::HashMap;

use qdrant_client::{
	Payload,
	qdrant::{PointStruct, ScoredPoint, Value, point_id::PointIdOptions, value::Kind},
};
use serde_json::{Map, Value as JsonValue};

use verdict_domain::Candidate;
use verdict_storage::qdrant::QdrantStore;

use crate::{BoxFuture, SearchBackend, search::DecisionInput};

impl SearchBackend for QdrantStore {
	fn similarity_search<'a>(
		&'a self,
		vector: &'a [f32],
		threshold: f32,
		limit: u64,
	) -> BoxFuture<'a, verdict_storage::Result<Vec<Candidate>>> {
		Box::pin(async move {
			let points =
				QdrantStore::similarity_search(self, vector.to_vec(), threshold, limit).await?;

			Ok(collect_candidates(&points))
		})
	}

	fn index_decisions<'a>(
		&'a self,
		decisions: &'a [DecisionInput],
		vectors: &'a [Vec<f32>],
	) -> BoxFuture<'a, verdict_storage::Result<()>> {
		Box::pin(async move {
			let points = decisions
				.iter()
				.zip(vectors.iter())
				.map(|(decision, vector)| decision_point(decision, vector.clone()))
				.collect();

			self.upsert_points(points).await
		})
	}
}

pub(crate) fn collect_candidates(points: &[ScoredPoint]) -> Vec<Candidate> {
	let mut out = Vec::with_capacity(points.len());

	for point in points {
		let Some(candidate) = candidate_from_point(point) else {
			tracing::warn!("Skipping search hit without id or content.");

			continue;
		};

		out.push(candidate);
	}

	out
}

fn candidate_from_point(point: &ScoredPoint) -> Option<Candidate> {
	let id = point_id(point)?;
	let content = payload_string(&point.payload, "content")?;

	Some(Candidate {
		id,
		title: payload_string(&point.payload, "title").unwrap_or_default(),
		content,
		category: payload_string(&point.payload, "category"),
		metadata: payload_object(&point.payload, "metadata").unwrap_or_default(),
		similarity: point.score,
		file_url: payload_string(&point.payload, "file_url"),
		document_link: payload_string(&point.payload, "document_link"),
	})
}

fn decision_point(decision: &DecisionInput, vector: Vec<f32>) -> PointStruct {
	let mut payload_map = HashMap::new();

	payload_map.insert("title".to_string(), Value::from(decision.title.clone()));
	payload_map.insert("content".to_string(), Value::from(decision.content.clone()));
	payload_map.insert("category".to_string(), optional_string(decision.category.as_ref()));
	payload_map.insert("file_url".to_string(), optional_string(decision.file_url.as_ref()));
	payload_map
		.insert("document_link".to_string(), optional_string(decision.document_link.as_ref()));
	payload_map.insert(
		"metadata".to_string(),
		Value::from(JsonValue::Object(decision.metadata.clone())),
	);

	PointStruct::new(decision.id.to_string(), vector, Payload::from(payload_map))
}

fn optional_string(value: Option<&String>) -> Value {
	value
		.map(|text| Value::from(text.clone()))
		.unwrap_or_else(|| Value::from(JsonValue::Null))
}

fn point_id(point: &ScoredPoint) -> Option<String> {
	match point.id.as_ref()?.point_id_options.as_ref()? {
		PointIdOptions::Uuid(id) => Some(id.clone()),
		PointIdOptions::Num(id) => Some(id.to_string()),
	}
}

fn payload_string(payload: &HashMap<String, Value>, key: &str) -> Option<String> {
	match payload.get(key)?.kind.as_ref()? {
		Kind::StringValue(text) if !text.trim().is_empty() => Some(text.clone()),
		_ => None,
	}
}

fn payload_object(payload: &HashMap<String, Value>, key: &str) -> Option<Map<String, JsonValue>> {
	match payload.get(key)?.kind.as_ref()? {
		Kind::StructValue(fields) => {
			let mut out = Map::new();

			for (name, value) in &fields.fields {
				out.insert(name.clone(), json_value(value));
			}

			Some(out)
		},
		_ => None,
	}
}

fn json_value(value: &Value) -> JsonValue {
	match value.kind.as_ref() {
		Some(Kind::StringValue(text)) => JsonValue::String(text.clone()),
		Some(Kind::IntegerValue(value)) => JsonValue::from(*value),
		Some(Kind::DoubleValue(value)) => serde_json::Number::from_f64(*value)
			.map(JsonValue::Number)
			.unwrap_or(JsonValue::Null),
		Some(Kind::BoolValue(value)) => JsonValue::Bool(*value),
		Some(Kind::ListValue(list)) => JsonValue::Array(list.values.iter().map(json_value).collect()),
		Some(Kind::StructValue(fields)) => {
			let mut out = Map::new();

			for (name, inner) in &fields.fields {
				out.insert(name.clone(), json_value(inner));
			}

			JsonValue::Object(out)
		},
		Some(Kind::NullValue(_)) | None => JsonValue::Null,
	}
}

#[cfg(test)]
mod tests {
	use qdrant_client::qdrant::PointId;

	use super::*;

	fn string_value(text: &str) -> Value {
		Value { kind: Some(Kind::StringValue(text.to_string())) }
	}

	fn scored_point(id: &str, payload: HashMap<String, Value>, score: f32) -> ScoredPoint {
		ScoredPoint {
			id: Some(PointId { point_id_options: Some(PointIdOptions::Uuid(id.to_string())) }),
			payload,
			score,
			..Default::default()
		}
	}

	#[test]
	fn decodes_a_full_point() {
		let mut metadata_fields = std::collections::BTreeMap::new();

		metadata_fields
			.insert("decision_number".to_string(), string_value("123/Pid.B/2023/PN Jkt"));

		let mut payload = HashMap::new();

		payload.insert("title".to_string(), string_value("Putusan 123"));
		payload.insert("content".to_string(), string_value("isi putusan"));
		payload.insert("category".to_string(), string_value("pidana"));
		payload.insert("metadata".to_string(), Value {
			kind: Some(Kind::StructValue(qdrant_client::qdrant::Struct {
				fields: metadata_fields.into_iter().collect(),
			})),
		});

		let candidates =
			collect_candidates(&[scored_point("5f2c1d0e-3e7a-4c79-8d89-0a5ad9d1c001", payload, 0.91)]);

		assert_eq!(candidates.len(), 1);
		assert_eq!(candidates[0].title, "Putusan 123");
		assert_eq!(candidates[0].similarity, 0.91);
		assert_eq!(
			candidates[0].metadata["decision_number"],
			JsonValue::String("123/Pid.B/2023/PN Jkt".to_string())
		);
	}

	#[test]
	fn skips_points_without_content() {
		let mut payload = HashMap::new();

		payload.insert("title".to_string(), string_value("Putusan tanpa isi"));

		let candidates = collect_candidates(&[
			scored_point("5f2c1d0e-3e7a-4c79-8d89-0a5ad9d1c001", payload, 0.8),
		]);

		assert!(candidates.is_empty());
	}

	#[test]
	fn numeric_point_ids_are_stringified() {
		let mut payload = HashMap::new();

		payload.insert("content".to_string(), string_value("isi"));

		let point = ScoredPoint {
			id: Some(PointId { point_id_options: Some(PointIdOptions::Num(42)) }),
			payload,
			score: 0.7,
			..Default::default()
		};
		let candidates = collect_candidates(&[point]);

		assert_eq!(candidates[0].id, "42");
	}

	#[test]
	fn converts_nested_payload_values() {
		let list = Value {
			kind: Some(Kind::ListValue(qdrant_client::qdrant::ListValue {
				values: vec![string_value("a"), Value { kind: Some(Kind::IntegerValue(2)) }],
			})),
		};

		assert_eq!(json_value(&list), serde_json::json!(["a", 2]));
	}
}
