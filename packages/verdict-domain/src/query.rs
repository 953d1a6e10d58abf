/// A query as received from the caller plus its canonical form.
///
/// The canonical text is trimmed, lower-cased, and whitespace-collapsed; it is
/// what gets embedded and tokenized. The raw text stays untouched because it
/// is the cache key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedQuery {
	pub raw: String,
	pub text: String,
}
impl NormalizedQuery {
	pub fn new(raw: &str) -> Self {
		let text = raw.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();

		Self { raw: raw.to_string(), text }
	}

	pub fn is_empty(&self) -> bool {
		self.text.is_empty()
	}
}
