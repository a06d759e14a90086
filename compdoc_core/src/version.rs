//! Loose version parsing and change classification.

use std::fmt;

use semver::Version;
use serde::Deserialize;
use serde::Serialize;

/// `Prerelease` is accepted in stored history but never produced by
/// [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
	Major,
	Minor,
	Patch,
	Prerelease,
}

impl fmt::Display for ChangeKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Major => "major",
			Self::Minor => "minor",
			Self::Patch => "patch",
			Self::Prerelease => "prerelease",
		})
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
	Critical,
	High,
	Medium,
	Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstimatedEffort {
	Minimal,
	Moderate,
	Significant,
	Major,
}

/// Parse a version string, tolerating a leading `v` or `V`.
pub fn parse_version(text: &str) -> Option<Version> {
	let text = text.trim();
	let text = text
		.strip_prefix('v')
		.or_else(|| text.strip_prefix('V'))
		.unwrap_or(text);

	Version::parse(text).ok()
}

/// Classify the change from `previous` to `next`.
///
/// Returns `None` when both strings are identical. A missing or unparsable
/// version on either side is a major change. Otherwise the first numeric
/// component that increased, scanning major to minor, decides. Anything else,
/// including downgrades of every component and prerelease-only changes,
/// resolves to `patch`.
pub fn classify(previous: Option<&str>, next: &str) -> Option<ChangeKind> {
	let Some(previous) = previous else {
		return Some(ChangeKind::Major);
	};
	if previous == next {
		return None;
	}

	let (Some(before), Some(after)) = (parse_version(previous), parse_version(next)) else {
		return Some(ChangeKind::Major);
	};

	let kind = if after.major > before.major {
		ChangeKind::Major
	} else if after.minor > before.minor {
		ChangeKind::Minor
	} else {
		ChangeKind::Patch
	};

	Some(kind)
}

/// Documentation priority and effort implied by a change.
pub fn impact(kind: Option<ChangeKind>) -> (Priority, EstimatedEffort) {
	match kind {
		Some(ChangeKind::Major) => (Priority::Critical, EstimatedEffort::Major),
		Some(ChangeKind::Minor) => (Priority::High, EstimatedEffort::Significant),
		Some(ChangeKind::Patch) => (Priority::Medium, EstimatedEffort::Moderate),
		Some(ChangeKind::Prerelease) | None => (Priority::Low, EstimatedEffort::Minimal),
	}
}
