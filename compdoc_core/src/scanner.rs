//! Depth-aware scanning over free-form source text.
//!
//! All three delimiter families (`{}`, `()`, `[]`) share a single depth
//! counter, and quoted literals (`'`, `"`, `` ` ``) suspend delimiter and
//! separator handling until the matching unescaped quote. The extractor relies
//! on the shared counter, so a `(` closed by `}` still nets out to zero.

use std::ops::Range;

/// Separators used when no explicit set is given: statement terminator and
/// list separator.
pub const DEFAULT_SEPARATORS: [u8; 2] = [b';', b','];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
	/// The byte belongs to a quoted literal (including its quotes).
	Literal,
	/// An opening delimiter outside any literal.
	Open,
	/// A closing delimiter outside any literal.
	Close,
	/// Any other byte outside a literal.
	Plain,
}

/// Walks bytes one at a time, tracking literal mode and the shared nesting
/// depth.
#[derive(Debug, Default)]
struct DepthTracker {
	depth: isize,
	quote: Option<u8>,
}

impl DepthTracker {
	fn step(&mut self, bytes: &[u8], index: usize) -> Step {
		let byte = bytes[index];
		let escaped = index > 0 && bytes[index - 1] == b'\\';

		if let Some(quote) = self.quote {
			if byte == quote && !escaped {
				self.quote = None;
			}
			return Step::Literal;
		}

		if is_quote(byte) && !escaped {
			self.quote = Some(byte);
			return Step::Literal;
		}

		if is_opener(byte) {
			self.depth += 1;
			Step::Open
		} else if is_closer(byte) {
			self.depth -= 1;
			Step::Close
		} else {
			Step::Plain
		}
	}

	fn in_literal(&self) -> bool {
		self.quote.is_some()
	}
}

fn is_opener(byte: u8) -> bool {
	matches!(byte, b'{' | b'(' | b'[')
}

fn is_closer(byte: u8) -> bool {
	matches!(byte, b'}' | b')' | b']')
}

fn is_quote(byte: u8) -> bool {
	matches!(byte, b'"' | b'\'' | b'`')
}

/// Return the text strictly between the opening delimiter at `open` and its
/// matching closer.
///
/// Returns `None` when `open` does not point at an opening delimiter or the
/// text ends before depth returns to zero.
pub fn extract_scoped_content(text: &str, open: usize) -> Option<&str> {
	let bytes = text.as_bytes();
	if !bytes.get(open).copied().is_some_and(is_opener) {
		return None;
	}

	let mut tracker = DepthTracker::default();
	for index in open..bytes.len() {
		if tracker.step(bytes, index) == Step::Close && tracker.depth == 0 {
			return Some(&text[open + 1..index]);
		}
	}

	None
}

/// Split `text` on any of `separators` occurring at depth zero outside
/// literals. Segments are trimmed and empty segments dropped.
pub fn split_top_level<'a>(text: &'a str, separators: &[u8]) -> Vec<&'a str> {
	split_top_level_spans(text, separators)
		.into_iter()
		.map(|span| text[span].trim())
		.filter(|segment| !segment.is_empty())
		.collect()
}

/// Like [`split_top_level`] but returns the raw byte ranges of every segment,
/// untrimmed and including empty ones. The separators themselves are not part
/// of any range.
pub fn split_top_level_spans(text: &str, separators: &[u8]) -> Vec<Range<usize>> {
	let bytes = text.as_bytes();
	let mut tracker = DepthTracker::default();
	let mut spans = Vec::new();
	let mut start = 0;

	for index in 0..bytes.len() {
		let step = tracker.step(bytes, index);
		if step == Step::Plain && tracker.depth == 0 && separators.contains(&bytes[index]) {
			spans.push(start..index);
			start = index + 1;
		}
	}

	spans.push(start..bytes.len());
	spans
}

/// Find the first `needle` byte at depth zero (relative to `from`) outside any
/// literal. Scanning stops with `None` once a closer takes the depth below
/// zero, i.e. the enclosing scope ended first.
pub fn find_top_level(text: &str, from: usize, needle: u8) -> Option<usize> {
	let bytes = text.as_bytes();
	let mut tracker = DepthTracker::default();

	for index in from..bytes.len() {
		match tracker.step(bytes, index) {
			Step::Close if tracker.depth < 0 => return None,
			Step::Plain if tracker.depth == 0 && bytes[index] == needle => return Some(index),
			_ => {}
		}
	}

	None
}

/// Remove `//` line comments and `/* */` block comments that sit outside
/// literals. Block comments carrying an `@default` marker are kept verbatim so
/// the extractor can read them; every other block comment becomes a single
/// space. Line breaks are preserved.
pub fn strip_comments(text: &str) -> String {
	let bytes = text.as_bytes();
	let mut tracker = DepthTracker::default();
	let mut result = String::with_capacity(text.len());
	let mut last = 0;
	let mut index = 0;

	while index < bytes.len() {
		if !tracker.in_literal() && bytes[index] == b'/' {
			match bytes.get(index + 1) {
				Some(b'/') => {
					result.push_str(&text[last..index]);
					let end = bytes[index..]
						.iter()
						.position(|&byte| byte == b'\n')
						.map_or(bytes.len(), |offset| index + offset);
					last = end;
					index = end;
					continue;
				}
				Some(b'*') => {
					let end = text[index + 2..]
						.find("*/")
						.map_or(bytes.len(), |offset| index + 2 + offset + 2);
					let comment = &text[index..end];
					let body = comment
						.trim_start_matches("/*")
						.trim_end_matches("*/")
						.trim_start_matches('*')
						.trim();
					if !body.starts_with("@default") {
						result.push_str(&text[last..index]);
						result.push(' ');
						last = end;
					}
					index = end;
					continue;
				}
				_ => {}
			}
		}

		tracker.step(bytes, index);
		index += 1;
	}

	result.push_str(&text[last..]);
	result
}
