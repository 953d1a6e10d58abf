use verdict_domain::{MISSING_FIELD, ScoredResult};

/// Renders ranked results into one document of fixed-field metadata blocks,
/// joined with a blank line. An empty result list renders to an empty string.
pub fn render_decisions(results: &[ScoredResult]) -> String {
	results.iter().map(render_block).collect::<Vec<_>>().join("\n\n")
}

fn render_block(result: &ScoredResult) -> String {
	let fields = &result.fields;

	format!(
		"**Court Decision Metadata**\n\
		* **Decision Number:** {}\n\
		* **Decision Date:** {}\n\
		* **Charged Articles:** {}\n\
		* **Custodial Sentence:** {}\n\
		* **Fine:** {}\n\
		* **Document Link:** {}",
		field_or_missing(&fields.decision_number),
		field_or_missing(&fields.decision_date),
		field_or_missing(&fields.charged_articles),
		field_or_missing(&fields.custodial_sentence),
		field_or_missing(&fields.fine_amount),
		field_or_missing(&fields.document_link),
	)
}

fn field_or_missing(value: &Option<String>) -> &str {
	value.as_deref().unwrap_or(MISSING_FIELD)
}
