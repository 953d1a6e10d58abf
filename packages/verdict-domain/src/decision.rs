use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Rendered in place of any metadata field the corpus does not carry.
pub const MISSING_FIELD: &str = "N/A";

/// One vector-search hit, immutable once fetched from the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
	pub id: String,
	pub title: String,
	pub content: String,
	pub category: Option<String>,
	pub metadata: Map<String, Value>,
	pub similarity: f32,
	pub file_url: Option<String>,
	pub document_link: Option<String>,
}

/// Decision metadata flattened out of the free-form candidate mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionFields {
	pub decision_number: Option<String>,
	pub decision_date: Option<String>,
	pub charged_articles: Option<String>,
	pub custodial_sentence: Option<String>,
	pub fine_amount: Option<String>,
	pub document_link: Option<String>,
}
impl DecisionFields {
	pub fn from_candidate(candidate: &Candidate) -> Self {
		Self {
			decision_number: metadata_field(&candidate.metadata, "decision_number"),
			decision_date: metadata_field(&candidate.metadata, "decision_date"),
			charged_articles: metadata_field(&candidate.metadata, "charged_articles"),
			custodial_sentence: metadata_field(&candidate.metadata, "custodial_sentence"),
			fine_amount: metadata_field(&candidate.metadata, "fine_amount"),
			document_link: metadata_field(&candidate.metadata, "document_link")
				.or_else(|| candidate.document_link.clone())
				.or_else(|| candidate.file_url.clone()),
		}
	}
}

/// A candidate scored for presentation: integer relevance percentage plus the
/// highlighted best-matching excerpt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredResult {
	pub id: String,
	pub title: String,
	pub content: String,
	pub category: Option<String>,
	pub metadata: Map<String, Value>,
	pub relevance_score: u32,
	pub excerpt: String,
	pub fields: DecisionFields,
}

fn metadata_field(metadata: &Map<String, Value>, key: &str) -> Option<String> {
	let text = metadata.get(key)?.as_str()?.trim();

	if text.is_empty() {
		return None;
	}

	Some(text.to_string())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn candidate(metadata: Map<String, Value>) -> Candidate {
		Candidate {
			id: "d1".to_string(),
			title: "Putusan 123".to_string(),
			content: "content".to_string(),
			category: None,
			metadata,
			similarity: 0.8,
			file_url: None,
			document_link: None,
		}
	}

	#[test]
	fn flattens_present_fields() {
		let metadata = serde_json::json!({
			"decision_number": "123/Pid.B/2023/PN Jkt",
			"decision_date": "2023-04-12",
			"charged_articles": "Pasal 365 KUHP",
			"custodial_sentence": "3 tahun",
			"fine_amount": "Rp 5.000.000",
			"document_link": "https://example.com/doc",
		});
		let Value::Object(metadata) = metadata else { unreachable!() };
		let fields = DecisionFields::from_candidate(&candidate(metadata));

		assert_eq!(fields.decision_number.as_deref(), Some("123/Pid.B/2023/PN Jkt"));
		assert_eq!(fields.fine_amount.as_deref(), Some("Rp 5.000.000"));
		assert_eq!(fields.document_link.as_deref(), Some("https://example.com/doc"));
	}

	#[test]
	fn blank_metadata_values_are_missing() {
		let metadata = serde_json::json!({ "decision_number": "  ", "fine_amount": "" });
		let Value::Object(metadata) = metadata else { unreachable!() };
		let fields = DecisionFields::from_candidate(&candidate(metadata));

		assert_eq!(fields.decision_number, None);
		assert_eq!(fields.fine_amount, None);
	}

	#[test]
	fn document_link_falls_back_to_candidate_links() {
		let mut hit = candidate(Map::new());

		hit.file_url = Some("https://example.com/file.pdf".to_string());

		let fields = DecisionFields::from_candidate(&hit);

		assert_eq!(fields.document_link.as_deref(), Some("https://example.com/file.pdf"));

		hit.document_link = Some("https://drive.example.com/doc".to_string());

		let fields = DecisionFields::from_candidate(&hit);

		assert_eq!(fields.document_link.as_deref(), Some("https://drive.example.com/doc"));
	}

	#[test]
	fn non_string_metadata_values_are_missing() {
		let metadata = serde_json::json!({ "fine_amount": 5_000_000 });
		let Value::Object(metadata) = metadata else { unreachable!() };
		let fields = DecisionFields::from_candidate(&candidate(metadata));

		assert_eq!(fields.fine_amount, None);
	}
}
