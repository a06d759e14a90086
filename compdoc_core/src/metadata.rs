use std::fmt;
use std::path::Path;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use sha2::Digest;
use sha2::Sha256;

use crate::patterns::DEPRECATED_TAG;
use crate::patterns::EXPERIMENTAL_TAG;
use crate::patterns::EXPORT_LIST;
use crate::patterns::EXPORTED_COMPONENT;
use crate::patterns::EXPORTED_DECLARATION;
use crate::patterns::LAST_MODIFIED_TAG;
use crate::patterns::STATUS_TAG;
use crate::patterns::VERSION_COMMENT;
use crate::patterns::VERSION_CONSTANT;
use crate::patterns::VERSION_PROPERTY;
use crate::patterns::VERSION_TAG;
use crate::patterns::WRAPPED_COMPONENT;

/// Version used when the source declares none.
pub const DEFAULT_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
	#[default]
	Stable,
	Beta,
	Alpha,
	Deprecated,
	Experimental,
}

impl ComponentStatus {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Stable => "stable",
			Self::Beta => "beta",
			Self::Alpha => "alpha",
			Self::Deprecated => "deprecated",
			Self::Experimental => "experimental",
		}
	}
}

impl fmt::Display for ComponentStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for ComponentStatus {
	type Err = String;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		match value.to_ascii_lowercase().as_str() {
			"stable" => Ok(Self::Stable),
			"beta" => Ok(Self::Beta),
			"alpha" => Ok(Self::Alpha),
			"deprecated" => Ok(Self::Deprecated),
			"experimental" => Ok(Self::Experimental),
			other => Err(format!("unknown component status `{other}`")),
		}
	}
}

/// Version and metadata computed fresh from the current source text. Never
/// persisted as-is; the registry copies what it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentVersionSnapshot {
	pub identity: String,
	pub version: String,
	pub last_modified: String,
	pub content_hash: String,
	pub size_bytes: u64,
	pub exports: Vec<String>,
	pub status: ComponentStatus,
	pub file_path: PathBuf,
}

/// Compute a snapshot of `source`, read from `path`.
///
/// Returns `None` when no component identity can be determined.
pub fn snapshot(source: &str, path: &Path) -> Option<ComponentVersionSnapshot> {
	let identity = scan_identity(source, path)?;

	Some(ComponentVersionSnapshot {
		identity,
		version: scan_version(source),
		last_modified: scan_last_modified(source),
		content_hash: content_hash(source),
		size_bytes: source.len() as u64,
		exports: scan_exports(source),
		status: scan_status(source),
		file_path: path.to_path_buf(),
	})
}

/// Exported PascalCase declarations first (preferring the one matching the
/// file name), then `forwardRef`/`memo` wrappers, then the file name itself.
pub fn scan_identity(source: &str, path: &Path) -> Option<String> {
	let from_path = identity_from_path(path);

	let declared: Vec<&str> = EXPORTED_COMPONENT
		.captures_iter(source)
		.chain(WRAPPED_COMPONENT.captures_iter(source))
		.filter_map(|captures| captures.get(1))
		.map(|found| found.as_str())
		.collect();

	if let Some(expected) = from_path.as_deref() {
		if declared.contains(&expected) {
			return Some(expected.to_string());
		}
	}

	declared.first().map(|name| (*name).to_string()).or(from_path)
}

/// PascalCase form of the file stem. `index` files take their directory name.
pub fn identity_from_path(path: &Path) -> Option<String> {
	let stem = path.file_stem()?.to_str()?;
	let stem = stem.split('.').next().unwrap_or(stem);
	let stem = if stem == "index" {
		path.parent()?.file_name()?.to_str()?
	} else {
		stem
	};

	let name = to_pascal_case(stem);
	(!name.is_empty()).then_some(name)
}

fn to_pascal_case(text: &str) -> String {
	text.split(|c: char| !c.is_ascii_alphanumeric())
		.filter(|word| !word.is_empty())
		.map(|word| {
			let mut chars = word.chars();
			chars.next().map_or_else(String::new, |first| {
				first.to_ascii_uppercase().to_string() + chars.as_str()
			})
		})
		.collect()
}

pub fn scan_version(source: &str) -> String {
	[
		&*VERSION_TAG,
		&*VERSION_CONSTANT,
		&*VERSION_PROPERTY,
		&*VERSION_COMMENT,
	]
	.into_iter()
	.find_map(|pattern| pattern.captures(source)?.get(1))
	.map_or_else(
		|| DEFAULT_VERSION.to_string(),
		|found| found.as_str().trim().to_string(),
	)
}

pub fn scan_last_modified(source: &str) -> String {
	LAST_MODIFIED_TAG
		.captures(source)
		.and_then(|captures| captures.get(1))
		.map_or_else(now, |found| found.as_str().to_string())
}

pub fn scan_status(source: &str) -> ComponentStatus {
	if let Some(status) = STATUS_TAG
		.captures(source)
		.and_then(|captures| captures.get(1))
		.and_then(|found| found.as_str().parse().ok())
	{
		return status;
	}

	if DEPRECATED_TAG.is_match(source) {
		ComponentStatus::Deprecated
	} else if EXPERIMENTAL_TAG.is_match(source) {
		ComponentStatus::Experimental
	} else {
		ComponentStatus::Stable
	}
}

/// Exported names in first-seen order without duplicates. For `A as B` the
/// exported name `B` is recorded.
pub fn scan_exports(source: &str) -> Vec<String> {
	let mut found: Vec<(usize, String)> = EXPORTED_DECLARATION
		.captures_iter(source)
		.filter_map(|captures| captures.get(1))
		.map(|name| (name.start(), name.as_str().to_string()))
		.collect();

	for captures in EXPORT_LIST.captures_iter(source) {
		let Some(list) = captures.get(1) else {
			continue;
		};
		for item in list.as_str().split(',') {
			let item = item.trim();
			let item = item.strip_prefix("type ").unwrap_or(item).trim();
			let exported = item.rsplit(" as ").next().unwrap_or(item).trim();
			if !exported.is_empty() {
				found.push((list.start(), exported.to_string()));
			}
		}
	}

	found.sort_by_key(|(offset, _)| *offset);

	let mut exports: Vec<String> = Vec::with_capacity(found.len());
	for (_, name) in found {
		if !exports.contains(&name) {
			exports.push(name);
		}
	}
	exports
}

/// Lowercase hex SHA-256 of the full text.
pub fn content_hash(source: &str) -> String {
	let mut hasher = Sha256::new();
	hasher.update(source.as_bytes());
	hex::encode(hasher.finalize())
}

pub(crate) fn now() -> String {
	chrono::Utc::now().to_rfc3339()
}
