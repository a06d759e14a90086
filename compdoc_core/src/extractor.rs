//! Heuristic extraction of component props and style variants.
//!
//! The extractor never parses the full language grammar. It finds anchors
//! with the patterns in [`crate::patterns`], then hands every body to the
//! depth-aware helpers in [`crate::scanner`]. Comments are stripped up front
//! (except `@default` markers) so apostrophes in prose cannot open a literal.

use std::ops::Range;

use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::CompdocError;
use crate::CompdocResult;
use crate::patterns::ALIAS_DECLARATION;
use crate::patterns::ATTRIBUTE_BUNDLE;
use crate::patterns::BUILDER_CALL;
use crate::patterns::DEFAULT_MARKER;
use crate::patterns::FIELD;
use crate::patterns::INTERFACE_DECLARATION;
use crate::patterns::KEYED_ENTRY;
use crate::patterns::TRAILING_UNDEFINED;
use crate::patterns::VARIANTS_KEY;
use crate::scanner::extract_scoped_content;
use crate::scanner::find_top_level;
use crate::scanner::split_top_level;
use crate::scanner::split_top_level_spans;
use crate::scanner::strip_comments;

/// Terminators between fields of a declaration body.
const FIELD_TERMINATORS: [u8; 3] = [b';', b',', b'\n'];

const PROP_DESCRIPTIONS: &[(&str, &str)] = &[
	("children", "The content rendered inside the component"),
	("className", "Additional CSS classes to apply"),
	("variant", "The visual style variant"),
	("size", "The size of the component"),
	("disabled", "Whether the component is disabled"),
	("asChild", "Render as the child element, merging props onto it"),
	("onClick", "Handler called when the component is clicked"),
	("onChange", "Handler called when the value changes"),
	("value", "The controlled value"),
	("defaultValue", "The initial value when uncontrolled"),
	("placeholder", "Placeholder text shown while empty"),
	("type", "The native type attribute"),
	("id", "Unique identifier for the element"),
	("name", "The name submitted with a form"),
	("label", "Accessible label text"),
	("checked", "Whether the control is checked"),
	("open", "Whether the component is open"),
	("onOpenChange", "Handler called when the open state changes"),
	("required", "Whether a value is required"),
	("loading", "Whether to show a loading state"),
	("style", "Inline styles to apply"),
];

const OPTION_DESCRIPTIONS: &[(&str, &str)] = &[
	("default", "Default styling"),
	("primary", "Primary emphasis for the main action"),
	("secondary", "Secondary, lower-emphasis styling"),
	("destructive", "Signals a dangerous or destructive action"),
	("outline", "Bordered style with a transparent background"),
	("ghost", "Minimal style without background or border"),
	("link", "Styled as an inline text link"),
	("sm", "Small size"),
	("md", "Medium size"),
	("lg", "Large size"),
	("xl", "Extra large size"),
	("icon", "Square sizing for icon-only content"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorKind {
	/// `interface FooProps { … }`
	Interface,
	/// `type FooProps = { … }`
	Alias,
}

/// A declaration whose body is a field list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationAnchor {
	pub kind: AnchorKind,
	pub name: String,
	/// Span of the declaration head, up to and excluding the body.
	pub span: Range<usize>,
	/// Byte index of the opening `{` of the body.
	pub open: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropDefinition {
	pub name: String,
	pub raw_type: String,
	pub required: bool,
	pub default_value: Option<String>,
	pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantOption {
	pub value: String,
	pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantDefinition {
	pub name: String,
	pub options: Vec<VariantOption>,
	pub default_value: Option<String>,
}

/// A field segment that could not be read unambiguously. It is reported
/// instead of guessed at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionDiagnostic {
	pub declaration: String,
	pub text: String,
	pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
	pub props: Vec<PropDefinition>,
	pub variants: Vec<VariantDefinition>,
	pub diagnostics: Vec<ExtractionDiagnostic>,
}

/// Extract props and variants from full source text.
pub fn extract(source: &str) -> CompdocResult<Extraction> {
	let text = strip_comments(source);
	let mut extraction = Extraction::default();

	for anchor in find_declaration_anchors(&text) {
		let body =
			extract_scoped_content(&text, anchor.open).ok_or_else(|| CompdocError::UnbalancedScope {
				anchor: anchor.name.clone(),
				offset: anchor.open,
			})?;
		parse_fields(&anchor.name, body, &mut extraction);
	}

	extraction.variants = variants_in(&text)?;

	Ok(extraction)
}

/// Convenience wrapper returning only the props.
pub fn extract_props(source: &str) -> CompdocResult<Vec<PropDefinition>> {
	extract(source).map(|extraction| extraction.props)
}

/// Convenience wrapper returning only the variants.
pub fn extract_variants(source: &str) -> CompdocResult<Vec<VariantDefinition>> {
	variants_in(&strip_comments(source))
}

/// Find prop-bearing declarations in source order.
///
/// Anchor grammars:
///
/// - `interface <Ident> [extends …] {`
/// - `type <Ident> = {`
///
/// The name must end in `Props` and must not be exactly `Props`. A generic
/// parameter list directly after the name skips the declaration. An interface
/// whose heritage clause reaches `;` or `}` before any `{` has no body and is
/// skipped too.
pub fn find_declaration_anchors(text: &str) -> Vec<DeclarationAnchor> {
	let mut anchors = Vec::new();

	for captures in INTERFACE_DECLARATION.captures_iter(text) {
		let (Some(head), Some(name)) = (captures.get(0), captures.get(1)) else {
			continue;
		};
		if captures.get(2).is_some() || !is_props_name(name.as_str()) {
			continue;
		}
		let Some(open) = interface_body_start(text, head.end()) else {
			continue;
		};
		anchors.push(DeclarationAnchor {
			kind: AnchorKind::Interface,
			name: name.as_str().to_string(),
			span: head.start()..open,
			open,
		});
	}

	for captures in ALIAS_DECLARATION.captures_iter(text) {
		let (Some(head), Some(name)) = (captures.get(0), captures.get(1)) else {
			continue;
		};
		if captures.get(2).is_some() || !is_props_name(name.as_str()) {
			continue;
		}
		let Some(open) = alias_body_start(text, head.end()) else {
			continue;
		};
		anchors.push(DeclarationAnchor {
			kind: AnchorKind::Alias,
			name: name.as_str().to_string(),
			span: head.start()..open,
			open,
		});
	}

	anchors.sort_by_key(|anchor| anchor.span.start);
	anchors
}

/// Byte indices of the `(` of every style-variant builder call, i.e. `cva(`.
pub fn find_builder_calls(text: &str) -> Vec<usize> {
	BUILDER_CALL
		.find_iter(text)
		.map(|found| found.end() - 1)
		.collect()
}

fn is_props_name(name: &str) -> bool {
	name.ends_with("Props") && name != "Props"
}

fn interface_body_start(text: &str, from: usize) -> Option<usize> {
	let offset = text[from..].find(['{', ';', '}'])?;
	let index = from + offset;
	(text.as_bytes()[index] == b'{').then_some(index)
}

fn alias_body_start(text: &str, from: usize) -> Option<usize> {
	let rest = text[from..].trim_start().strip_prefix('=')?.trim_start();
	rest.starts_with('{').then(|| text.len() - rest.len())
}

fn parse_fields(declaration: &str, body: &str, extraction: &mut Extraction) {
	let mut seen: Vec<String> = Vec::new();

	for segment in field_segments(body) {
		match parse_field(segment) {
			Ok(prop) => {
				if seen.contains(&prop.name) {
					debug!(declaration, field = %prop.name, "ignoring duplicate field");
					continue;
				}
				seen.push(prop.name.clone());
				extraction.props.push(prop);
			}
			Err(reason) => {
				extraction.diagnostics.push(ExtractionDiagnostic {
					declaration: declaration.to_string(),
					text: segment.to_string(),
					reason: reason.to_string(),
				});
			}
		}
	}
}

/// Split a body into field segments. A segment continues the previous field's
/// type, and is merged back into it, when it starts with `|`, `&` or `=>`,
/// when the previous segment ends with an operator, or when the previous
/// segment left a `<` open and this one is not a field of its own.
fn field_segments(body: &str) -> Vec<&str> {
	let mut merged: Vec<Range<usize>> = Vec::new();

	for span in split_top_level_spans(body, &FIELD_TERMINATORS) {
		let segment = body[span.clone()].trim();
		if segment.is_empty() {
			continue;
		}

		let continues = merged
			.last()
			.is_some_and(|previous| is_continuation(body[previous.clone()].trim(), segment));

		match merged.last_mut() {
			Some(previous) if continues => previous.end = span.end,
			_ => merged.push(span),
		}
	}

	merged.into_iter().map(|span| body[span].trim()).collect()
}

fn is_continuation(previous: &str, segment: &str) -> bool {
	segment.starts_with('|')
		|| segment.starts_with('&')
		|| segment.starts_with("=>")
		|| previous.ends_with('|')
		|| previous.ends_with('&')
		|| previous.ends_with(':')
		|| previous.ends_with("=>")
		|| (angle_balance(previous) > 0 && !FIELD.is_match(segment))
}

/// Net count of `<` over `>`, ignoring the `>` of `=>` arrows.
fn angle_balance(text: &str) -> isize {
	let bytes = text.as_bytes();
	let mut balance = 0;

	for (index, byte) in bytes.iter().enumerate() {
		match byte {
			b'<' => balance += 1,
			b'>' if index == 0 || bytes[index - 1] != b'=' => balance -= 1,
			_ => {}
		}
	}

	balance
}

fn parse_field(segment: &str) -> Result<PropDefinition, &'static str> {
	let captures = FIELD.captures(segment).ok_or("no top-level `name: type` shape")?;
	let name = captures
		.get(1)
		.map(|found| unquote(found.as_str()))
		.ok_or("missing field name")?;
	let required = captures.get(2).is_none();
	let mut type_text = captures.get(3).map_or("", |found| found.as_str()).to_string();

	let mut default_value = None;
	if let Some(marker) = DEFAULT_MARKER.captures(&type_text) {
		default_value = marker.get(1).map(|found| found.as_str().trim().to_string());
		type_text = DEFAULT_MARKER.replace(&type_text, " ").into_owned();
	}

	let raw_type = normalize_type(&type_text);
	if raw_type.is_empty() {
		return Err("missing type annotation");
	}
	if angle_balance(&raw_type) != 0 {
		return Err("unbalanced generic brackets");
	}

	let description = describe_prop(&name, &raw_type);

	Ok(PropDefinition {
		name,
		raw_type,
		required,
		default_value,
		description,
	})
}

/// Collapse whitespace, drop a leading `|` and a trailing `| undefined` arm,
/// and shorten verbose attribute bundles to `ButtonAttributes`,
/// `InputAttributes` or `HTMLAttributes`.
pub fn normalize_type(text: &str) -> String {
	let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
	let collapsed = collapsed.trim_start_matches('|').trim_start();
	let trimmed = TRAILING_UNDEFINED.replace(collapsed, "");

	ATTRIBUTE_BUNDLE
		.replace_all(&trimmed, |captures: &regex::Captures<'_>| {
			let bundle = captures[0].to_ascii_lowercase();
			if bundle.contains("button") {
				"ButtonAttributes"
			} else if bundle.contains("input") {
				"InputAttributes"
			} else {
				"HTMLAttributes"
			}
		})
		.trim()
		.to_string()
}

/// Describe a prop from the name table, falling back to type heuristics.
pub fn describe_prop(name: &str, raw_type: &str) -> String {
	if let Some((_, description)) = PROP_DESCRIPTIONS.iter().find(|(key, _)| *key == name) {
		return (*description).to_string();
	}

	if raw_type.contains("boolean") {
		format!("Whether to enable `{name}`")
	} else if raw_type.contains("string") {
		format!("The `{name}` text")
	} else if raw_type.contains("number") {
		format!("The `{name}` value")
	} else if is_function_type(raw_type) {
		format!("Callback function for `{name}`")
	} else {
		format!("The `{name}` prop")
	}
}

fn is_function_type(raw_type: &str) -> bool {
	raw_type.contains("=>") || raw_type.contains("Function") || raw_type.ends_with("Handler")
}

/// Describe a variant option from the canonical table.
pub fn describe_option(value: &str) -> String {
	OPTION_DESCRIPTIONS
		.iter()
		.find(|(key, _)| *key == value)
		.map_or_else(|| format!("`{value}` variant"), |(_, description)| (*description).to_string())
}

fn variants_in(text: &str) -> CompdocResult<Vec<VariantDefinition>> {
	let mut variants: Vec<VariantDefinition> = Vec::new();

	for paren in find_builder_calls(text) {
		let Some(config) = builder_config(text, paren)? else {
			continue;
		};

		for variant in variant_axes(config) {
			if variants.iter().any(|existing| existing.name == variant.name) {
				continue;
			}
			variants.push(variant);
		}
	}

	Ok(variants)
}

/// Locate the configuration object passed as the second argument of the
/// builder call whose `(` is at `paren`.
fn builder_config(text: &str, paren: usize) -> CompdocResult<Option<&str>> {
	let Some(comma) = find_top_level(text, paren + 1, b',') else {
		return Ok(None);
	};

	let rest = &text[comma + 1..];
	let open = comma + 1 + (rest.len() - rest.trim_start().len());
	if text.as_bytes().get(open) != Some(&b'{') {
		return Ok(None);
	}

	extract_scoped_content(text, open)
		.map(Some)
		.ok_or_else(|| CompdocError::UnbalancedScope {
			anchor: "cva".to_string(),
			offset: open,
		})
}

fn variant_axes(config: &str) -> Vec<VariantDefinition> {
	let Some(key) = VARIANTS_KEY.find(config) else {
		return Vec::new();
	};
	let Some(body) = extract_scoped_content(config, key.end() - 1) else {
		return Vec::new();
	};

	split_top_level(body, &[b','])
		.into_iter()
		.filter_map(variant_axis)
		.collect()
}

fn variant_axis(segment: &str) -> Option<VariantDefinition> {
	let captures = KEYED_ENTRY.captures(segment)?;
	let name = unquote(captures.get(1)?.as_str());
	let value = captures.get(2)?;
	if !value.as_str().starts_with('{') {
		return None;
	}
	let options_body = extract_scoped_content(segment, value.start())?;

	let options: Vec<VariantOption> = split_top_level(options_body, &[b','])
		.into_iter()
		.filter_map(|entry| {
			let captures = KEYED_ENTRY.captures(entry)?;
			let value = unquote(captures.get(1)?.as_str());
			if captures.get(2)?.as_str().trim().is_empty() {
				return None;
			}
			Some(VariantOption {
				description: describe_option(&value),
				value,
			})
		})
		.collect();

	let default_value = options
		.iter()
		.any(|option| option.value == "default")
		.then(|| "default".to_string());

	Some(VariantDefinition {
		name,
		options,
		default_value,
	})
}

fn unquote(text: &str) -> String {
	text.trim_matches(|c| c == '\'' || c == '"').to_string()
}
