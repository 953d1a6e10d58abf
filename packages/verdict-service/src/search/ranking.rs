//! Lexical scoring over candidate content.
//!
//! The similarity score from the backend decides ranking; these helpers only
//! decide which slice of a decision to show and how to mark it up.

/// Splits a normalized query into search terms, dropping tokens shorter than
/// `min_term_chars`. No stemming, no stop-word list; the length filter alone
/// sheds particles like "di" and "ke".
pub fn query_terms(normalized: &str, min_term_chars: usize) -> Vec<String> {
	normalized
		.split_whitespace()
		.filter(|token| token.chars().count() >= min_term_chars)
		.map(str::to_string)
		.collect()
}

/// Finds the content window with the highest summed term-occurrence count.
///
/// Windows are `window_chars` characters wide and advance by `step_chars`;
/// content shorter than one window is scanned as a single whole-content
/// window. The leftmost window wins ties. Returns `None` when no window
/// contains any term at all.
pub fn best_window<'a>(
	content: &'a str,
	terms: &[String],
	window_chars: usize,
	step_chars: usize,
) -> Option<&'a str> {
	if content.is_empty() || terms.is_empty() || window_chars == 0 || step_chars == 0 {
		return None;
	}

	let boundaries: Vec<usize> = content.char_indices().map(|(offset, _)| offset).collect();
	let total = boundaries.len();
	let byte_at =
		|char_index: usize| boundaries.get(char_index).copied().unwrap_or(content.len());
	let mut best: Option<(usize, usize)> = None;
	let mut best_score = 0_usize;
	let mut start = 0_usize;

	loop {
		let begin = byte_at(start);
		let end = byte_at(start + window_chars);
		let score = window_score(&content[begin..end], terms);

		if score > best_score {
			best_score = score;
			best = Some((begin, end));
		}
		if start + window_chars >= total {
			break;
		}

		start += step_chars;
	}

	best.map(|(begin, end)| &content[begin..end])
}

/// Wraps every term occurrence in the excerpt with `**` markers.
///
/// Match spans are collected across all terms first and overlapping spans are
/// dropped before rendering, so a term can never re-match inside another
/// term's markers.
pub fn highlight(excerpt: &str, terms: &[String]) -> String {
	let spans = match_spans(excerpt, terms);

	if spans.is_empty() {
		return excerpt.to_string();
	}

	let mut out = String::with_capacity(excerpt.len() + spans.len() * 4);
	let mut cursor = 0;

	for (begin, end) in spans {
		out.push_str(&excerpt[cursor..begin]);
		out.push_str("**");
		out.push_str(&excerpt[begin..end]);
		out.push_str("**");

		cursor = end;
	}

	out.push_str(&excerpt[cursor..]);

	out
}

/// Similarity as an integer percentage; the sole ranking key downstream.
pub fn relevance_percent(similarity: f32) -> u32 {
	(f64::from(similarity) * 100.0).round().clamp(0.0, 100.0) as u32
}

fn window_score(window: &str, terms: &[String]) -> usize {
	let lowered = window.to_lowercase();

	terms.iter().map(|term| lowered.matches(term.as_str()).count()).sum()
}

fn match_spans(excerpt: &str, terms: &[String]) -> Vec<(usize, usize)> {
	let hay = excerpt.as_bytes();
	let mut spans = Vec::new();

	for term in terms {
		let needle = term.as_bytes();

		if needle.is_empty() {
			continue;
		}

		let mut at = 0;

		while at + needle.len() <= hay.len() {
			if excerpt.is_char_boundary(at)
				&& excerpt.is_char_boundary(at + needle.len())
				&& hay[at..at + needle.len()].eq_ignore_ascii_case(needle)
			{
				spans.push((at, at + needle.len()));

				at += needle.len();
			} else {
				at += 1;
			}
		}
	}

	// Earliest span first; on a shared start the longer span wins and the
	// nested one is dropped below.
	spans.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));
	spans.dedup();

	let mut out: Vec<(usize, usize)> = Vec::new();

	for span in spans {
		if out.last().map(|last| span.0 >= last.1).unwrap_or(true) {
			out.push(span);
		}
	}

	out
}
