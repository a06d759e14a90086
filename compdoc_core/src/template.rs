//! A logic-less template renderer.
//!
//! Rendering runs three passes over a flattened context:
//!
//! 1. Conditional blocks `{{#name}}…{{/name}}`. Truthy values render the inner
//!    content in place, falsy values drop the block. Blocks bound to a
//!    non-empty list are left for the loop pass.
//! 2. Loop blocks with the same syntax. A list renders the inner content once
//!    per element, with map elements overlaid on the context. Anything else
//!    renders empty.
//! 3. Substitution of `{{name}}` and `{{dotted.path}}`. Unresolved paths
//!    render empty.
//!
//! Text produced by a nested render is spliced in as-is and never scanned by
//! a later pass, so values that happen to contain `{{…}}` print literally.
//!
//! A block closes at the first closing marker with the same name, so a block
//! must not contain another block of the same name.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::ops::Range;
use std::path::Path;

use derive_more::Deref;
use derive_more::DerefMut;
use float_cmp::approx_eq;
use logos::Logos;
use tracing::debug;

use crate::CompdocError;
use crate::CompdocResult;

#[derive(Debug, Clone)]
pub enum TemplateValue {
	Null,
	Bool(bool),
	Number(f64),
	String(String),
	List(Vec<TemplateValue>),
	Map(TemplateContext),
}

impl PartialEq for TemplateValue {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Null, Self::Null) => true,
			(Self::Bool(a), Self::Bool(b)) => a == b,
			(Self::Number(a), Self::Number(b)) => approx_eq!(f64, *a, *b),
			(Self::String(a), Self::String(b)) => a == b,
			(Self::List(a), Self::List(b)) => a == b,
			(Self::Map(a), Self::Map(b)) => a == b,
			_ => false,
		}
	}
}

impl TemplateValue {
	pub fn is_truthy(&self) -> bool {
		match self {
			Self::Null => false,
			Self::Bool(value) => *value,
			Self::Number(value) => !approx_eq!(f64, *value, 0.0),
			Self::String(value) => !value.is_empty(),
			Self::List(items) => !items.is_empty(),
			Self::Map(map) => !map.is_empty(),
		}
	}

	/// The substitution form of the value.
	pub fn to_display_string(&self) -> String {
		match self {
			Self::Null | Self::Map(_) => String::new(),
			Self::Bool(value) => value.to_string(),
			Self::Number(value) => {
				if value.is_finite() && approx_eq!(f64, value.fract(), 0.0) {
					format!("{value:.0}")
				} else {
					value.to_string()
				}
			}
			Self::String(value) => value.clone(),
			Self::List(items) => {
				items
					.iter()
					.map(Self::to_display_string)
					.collect::<Vec<_>>()
					.join(", ")
			}
		}
	}
}

impl From<bool> for TemplateValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<f64> for TemplateValue {
	fn from(value: f64) -> Self {
		Self::Number(value)
	}
}

impl From<i64> for TemplateValue {
	fn from(value: i64) -> Self {
		Self::Number(value as f64)
	}
}

impl From<u64> for TemplateValue {
	fn from(value: u64) -> Self {
		Self::Number(value as f64)
	}
}

impl From<usize> for TemplateValue {
	fn from(value: usize) -> Self {
		Self::Number(value as f64)
	}
}

impl From<&str> for TemplateValue {
	fn from(value: &str) -> Self {
		Self::String(value.to_string())
	}
}

impl From<String> for TemplateValue {
	fn from(value: String) -> Self {
		Self::String(value)
	}
}

impl From<TemplateContext> for TemplateValue {
	fn from(value: TemplateContext) -> Self {
		Self::Map(value)
	}
}

impl<T: Into<TemplateValue>> From<Vec<T>> for TemplateValue {
	fn from(items: Vec<T>) -> Self {
		Self::List(items.into_iter().map(Into::into).collect())
	}
}

impl<T: Into<TemplateValue>> From<Option<T>> for TemplateValue {
	fn from(value: Option<T>) -> Self {
		value.map_or(Self::Null, Into::into)
	}
}

/// Named values available to a template.
#[derive(Debug, Clone, Default, PartialEq, Deref, DerefMut)]
pub struct TemplateContext(BTreeMap<String, TemplateValue>);

impl TemplateContext {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder-style insert.
	#[must_use]
	pub fn with(mut self, key: impl Into<String>, value: impl Into<TemplateValue>) -> Self {
		self.0.insert(key.into(), value.into());
		self
	}

	/// Resolve a dotted path. Maps are indexed by key, lists by decimal index.
	pub fn lookup(&self, path: &str) -> Option<&TemplateValue> {
		let mut segments = path.split('.');
		let mut current = self.0.get(segments.next()?)?;

		for segment in segments {
			current = match current {
				TemplateValue::Map(map) => map.0.get(segment)?,
				TemplateValue::List(items) => items.get(segment.parse::<usize>().ok()?)?,
				_ => return None,
			};
		}

		Some(current)
	}

	/// Fields of a nested `component` map first, then every top-level binding
	/// on top, so siblings win over component fields of the same name.
	pub fn flatten(&self) -> Self {
		let mut flat = Self::new();

		if let Some(TemplateValue::Map(component)) = self.0.get("component") {
			flat.0
				.extend(component.0.iter().map(|(key, value)| (key.clone(), value.clone())));
		}

		flat.0
			.extend(self.0.iter().map(|(key, value)| (key.clone(), value.clone())));
		flat
	}

	/// A copy of `self` with every binding of `other` laid over it.
	pub fn overlay(&self, other: &Self) -> Self {
		let mut merged = self.clone();
		merged
			.0
			.extend(other.0.iter().map(|(key, value)| (key.clone(), value.clone())));
		merged
	}
}

/// Render `template` against `context`.
pub fn render(template: &str, context: &TemplateContext) -> String {
	render_flat(template, &context.flatten())
}

fn render_flat(template: &str, context: &TemplateContext) -> String {
	let conditionals = render_blocks(template, context, BlockPass::Conditional);
	let loops = conditionals.into_iter().flat_map(|segment| {
		match segment {
			Segment::Template(text) => render_blocks(text, context, BlockPass::Loop),
			rendered @ Segment::Rendered(_) => vec![rendered],
		}
	});

	let mut output = String::with_capacity(template.len());
	for segment in loops {
		match segment {
			Segment::Template(text) => substitute(&mut output, text, context),
			Segment::Rendered(text) => output.push_str(&text),
		}
	}
	output
}

/// Load `<dir>/<name>.md`, falling back to `default` when it does not exist.
pub fn load_template(dir: &Path, name: &str, default: &str) -> CompdocResult<String> {
	let path = dir.join(format!("{name}.md"));

	match std::fs::read_to_string(&path) {
		Ok(content) => Ok(content),
		Err(error) if error.kind() == ErrorKind::NotFound => {
			debug!(path = %path.display(), "template not found, using the built-in template");
			Ok(default.to_string())
		}
		Err(error) => {
			Err(CompdocError::TemplateRead {
				name: name.to_string(),
				reason: error.to_string(),
			})
		}
	}
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum TemplateToken {
	#[regex(r"\{\{#[A-Za-z0-9_.]+\}\}")]
	SectionOpen,
	#[regex(r"\{\{/[A-Za-z0-9_.]+\}\}")]
	SectionClose,
	#[regex(r"\{\{[A-Za-z0-9_.]+\}\}")]
	Variable,
	#[regex(r"[^{]+")]
	Text,
	#[token("{")]
	Brace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece<'a> {
	Open(&'a str),
	Close(&'a str),
	Variable(&'a str),
	Text,
}

fn lex(template: &str) -> Vec<(Piece<'_>, Range<usize>)> {
	TemplateToken::lexer(template)
		.spanned()
		.map(|(token, span)| {
			let slice = &template[span.clone()];
			let piece = match token {
				Ok(TemplateToken::SectionOpen) => Piece::Open(&slice[3..slice.len() - 2]),
				Ok(TemplateToken::SectionClose) => Piece::Close(&slice[3..slice.len() - 2]),
				Ok(TemplateToken::Variable) => Piece::Variable(&slice[2..slice.len() - 2]),
				Ok(TemplateToken::Text | TemplateToken::Brace) | Err(()) => Piece::Text,
			};
			(piece, span)
		})
		.collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockPass {
	Conditional,
	Loop,
}

/// Pass output. Rendered text came from a nested render and is copied
/// verbatim by later passes.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment<'a> {
	Template(&'a str),
	Rendered(String),
}

fn render_blocks<'a>(
	template: &'a str,
	context: &TemplateContext,
	pass: BlockPass,
) -> Vec<Segment<'a>> {
	let pieces = lex(template);
	let mut segments = Vec::new();
	let mut run_start = 0;
	let mut index = 0;

	while index < pieces.len() {
		let (piece, span) = &pieces[index];

		if let Piece::Open(name) = *piece {
			let close = pieces[index + 1..]
				.iter()
				.position(|(candidate, _)| *candidate == Piece::Close(name))
				.map(|offset| index + 1 + offset);

			if let Some(close) = close {
				let close_span = &pieces[close].1;
				let inner = &template[span.end..close_span.start];
				let block = &template[span.start..close_span.end];
				let value = context.lookup(name);

				if run_start < span.start {
					segments.push(Segment::Template(&template[run_start..span.start]));
				}

				let rendered = match pass {
					BlockPass::Conditional => render_conditional(block, inner, value, context),
					BlockPass::Loop => render_loop(inner, value, context),
				};
				segments.extend(rendered);

				run_start = close_span.end;
				index = close + 1;
				continue;
			}
		}

		index += 1;
	}

	if run_start < template.len() {
		segments.push(Segment::Template(&template[run_start..]));
	}

	segments
}

fn render_conditional<'a>(
	block: &'a str,
	inner: &str,
	value: Option<&TemplateValue>,
	context: &TemplateContext,
) -> Option<Segment<'a>> {
	match value {
		Some(TemplateValue::List(items)) if !items.is_empty() => Some(Segment::Template(block)),
		Some(value) if value.is_truthy() => Some(Segment::Rendered(render_flat(inner, context))),
		_ => None,
	}
}

fn render_loop(
	inner: &str,
	value: Option<&TemplateValue>,
	context: &TemplateContext,
) -> Option<Segment<'static>> {
	let Some(TemplateValue::List(items)) = value else {
		return None;
	};

	let mut rendered = String::new();
	for item in items {
		let child = match item {
			TemplateValue::Map(fields) => context.overlay(fields),
			_ => context.clone(),
		};
		rendered.push_str(&render_flat(inner, &child));
	}

	Some(Segment::Rendered(rendered))
}

fn substitute(output: &mut String, template: &str, context: &TemplateContext) {
	for (piece, span) in lex(template) {
		match piece {
			Piece::Variable(path) => {
				if let Some(value) = context.lookup(path) {
					output.push_str(&value.to_display_string());
				}
			}
			_ => output.push_str(&template[span]),
		}
	}
}
