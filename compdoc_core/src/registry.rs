//! The persisted version registry and the diff engine built on it.
//!
//! A [`Registry`] is an explicit service object: [`Registry::load`] reads the
//! store into memory, mutations happen on the in-memory map, and
//! [`Registry::save`] writes the whole map back. There is no cross-process
//! lock, so two concurrent runs race and the last writer wins.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::warn;

use crate::CompdocError;
use crate::CompdocResult;
use crate::metadata::ComponentStatus;
use crate::metadata::ComponentVersionSnapshot;
use crate::metadata::now;
use crate::version::ChangeKind;
use crate::version::EstimatedEffort;
use crate::version::Priority;
use crate::version::classify;
use crate::version::impact;

/// Default location of the store, relative to the project root.
pub const DEFAULT_REGISTRY_PATH: &str = ".compdoc/registry.json";

/// One append-only record of a version change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionHistoryEntry {
	pub version: String,
	pub date: String,
	pub change_kind: ChangeKind,
	pub breaking: bool,
	pub migration_required: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub notes: Option<String>,
}

/// Persisted state for one component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionEntry {
	pub current_version: String,
	pub last_modified: String,
	pub file_path: PathBuf,
	/// Empty until documentation has been generated once.
	#[serde(default)]
	pub documentation_version: String,
	#[serde(default)]
	pub last_documentation_update: String,
	pub content_hash: String,
	pub size_bytes: u64,
	#[serde(default)]
	pub exports: Vec<String>,
	#[serde(default)]
	pub status: ComponentStatus,
	#[serde(default)]
	pub history: Vec<VersionHistoryEntry>,
}

impl VersionEntry {
	pub fn is_documented(&self) -> bool {
		!self.documentation_version.is_empty()
	}

	pub fn is_outdated(&self) -> bool {
		self.current_version != self.documentation_version
	}

	fn documented_version(&self) -> Option<&str> {
		self.is_documented()
			.then_some(self.documentation_version.as_str())
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonReason {
	MissingDocs,
	VersionMismatch,
	HashMismatch,
	StaleDocs,
	UpToDate,
}

impl ComparisonReason {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::MissingDocs => "missing_docs",
			Self::VersionMismatch => "version_mismatch",
			Self::HashMismatch => "hash_mismatch",
			Self::StaleDocs => "stale_docs",
			Self::UpToDate => "up_to_date",
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionDiff {
	pub current: String,
	pub documented: Option<String>,
	pub change_kind: Option<ChangeKind>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
	pub identity: String,
	pub needs_update: bool,
	pub version_diff: VersionDiff,
	pub reason: ComparisonReason,
	pub priority: Priority,
	pub estimated_effort: EstimatedEffort,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryStats {
	pub total: usize,
	pub documented: usize,
	pub outdated: usize,
	pub coverage_percent: f64,
}

/// What an [`Registry::upsert`] did to the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpsertOutcome {
	/// `None` when the version string did not change.
	pub change_kind: Option<ChangeKind>,
	/// Whether a history entry was appended.
	pub appended: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Registry {
	path: PathBuf,
	entries: BTreeMap<String, VersionEntry>,
}

impl Registry {
	/// An empty in-memory registry that will persist to `path`.
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			entries: BTreeMap::new(),
		}
	}

	/// Read the store at `path`.
	///
	/// A missing store yields an empty registry. So does an unparsable one, with
	/// a warning; partial data is never merged. Any other read failure means the
	/// store cannot be initialized and is returned as an error.
	pub fn load(path: impl Into<PathBuf>) -> CompdocResult<Self> {
		let path = path.into();

		let bytes = match std::fs::read(&path) {
			Ok(bytes) => bytes,
			Err(error) if error.kind() == ErrorKind::NotFound => {
				debug!(path = %path.display(), "no registry store yet");
				return Ok(Self::new(path));
			}
			Err(error) => {
				return Err(CompdocError::RegistryInit {
					path: path.display().to_string(),
					reason: error.to_string(),
				});
			}
		};

		match serde_json::from_slice::<BTreeMap<String, VersionEntry>>(&bytes) {
			Ok(entries) => Ok(Self { path, entries }),
			Err(error) => {
				warn!(
					path = %path.display(),
					%error,
					"registry store is corrupt, starting from an empty registry"
				);
				Ok(Self::new(path))
			}
		}
	}

	/// Write the whole map back to the store, creating parent directories.
	/// The payload goes to a temp file first and is renamed into place.
	pub fn save(&self) -> CompdocResult<()> {
		if let Some(parent) = self.path.parent() {
			if !parent.as_os_str().is_empty() {
				std::fs::create_dir_all(parent)?;
			}
		}

		let payload = serde_json::to_vec_pretty(&self.entries)
			.map_err(|error| CompdocError::RegistrySerialize(error.to_string()))?;

		let temp_path = self.path.with_extension(format!(
			"json.tmp-{}-{}",
			std::process::id(),
			SystemTime::now()
				.duration_since(UNIX_EPOCH)
				.map_or(0, |duration| duration.as_nanos())
		));

		let written =
			std::fs::write(&temp_path, payload).and_then(|()| std::fs::rename(&temp_path, &self.path));
		if let Err(error) = written {
			let _ = std::fs::remove_file(&temp_path);
			return Err(error.into());
		}

		Ok(())
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn get(&self, identity: &str) -> Option<&VersionEntry> {
		self.entries.get(identity)
	}

	/// Entries in registry order.
	pub fn entries(&self) -> impl Iterator<Item = (&String, &VersionEntry)> {
		self.entries.iter()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Record `snapshot`, appending history only when the entry is new or its
	/// version string changed. Documentation fields are left untouched.
	pub fn upsert(&mut self, snapshot: &ComponentVersionSnapshot) -> UpsertOutcome {
		let existing = self.entries.remove(&snapshot.identity);
		let previous_version = existing.as_ref().map(|entry| entry.current_version.clone());
		let change_kind = classify(previous_version.as_deref(), &snapshot.version);

		let (documentation_version, last_documentation_update, mut history) = match existing {
			Some(entry) => {
				(
					entry.documentation_version,
					entry.last_documentation_update,
					entry.history,
				)
			}
			None => (String::new(), String::new(), Vec::new()),
		};

		let appended = previous_version.as_deref() != Some(snapshot.version.as_str());
		if appended {
			let kind = change_kind.unwrap_or(ChangeKind::Patch);
			let breaking = kind == ChangeKind::Major;
			let notes = match previous_version.as_deref() {
				Some(previous) => format!("Updated from {previous}"),
				None => "Initial version".to_string(),
			};

			history.push(VersionHistoryEntry {
				version: snapshot.version.clone(),
				date: now(),
				change_kind: kind,
				breaking,
				migration_required: breaking,
				notes: Some(notes),
			});
		}

		self.entries.insert(
			snapshot.identity.clone(),
			VersionEntry {
				current_version: snapshot.version.clone(),
				last_modified: snapshot.last_modified.clone(),
				file_path: snapshot.file_path.clone(),
				documentation_version,
				last_documentation_update,
				content_hash: snapshot.content_hash.clone(),
				size_bytes: snapshot.size_bytes,
				exports: snapshot.exports.clone(),
				status: snapshot.status,
				history,
			},
		);

		UpsertOutcome {
			change_kind: if appended { change_kind } else { None },
			appended,
		}
	}

	/// Mark `identity` as documented at `version`. Returns `false` (and does
	/// nothing) for an unknown identity.
	pub fn mark_documentation_updated(&mut self, identity: &str, version: &str) -> bool {
		let Some(entry) = self.entries.get_mut(identity) else {
			return false;
		};

		entry.documentation_version = version.to_string();
		entry.last_documentation_update = now();
		true
	}

	/// Compare fresh snapshots against the recorded documentation state.
	pub fn compare(&self, snapshots: &[ComponentVersionSnapshot]) -> Vec<ComparisonResult> {
		snapshots
			.iter()
			.map(|snapshot| self.compare_one(snapshot))
			.collect()
	}

	fn compare_one(&self, snapshot: &ComponentVersionSnapshot) -> ComparisonResult {
		let Some(entry) = self.entries.get(&snapshot.identity) else {
			return ComparisonResult {
				identity: snapshot.identity.clone(),
				needs_update: true,
				version_diff: VersionDiff {
					current: snapshot.version.clone(),
					documented: None,
					change_kind: Some(ChangeKind::Major),
				},
				reason: ComparisonReason::MissingDocs,
				priority: Priority::High,
				estimated_effort: EstimatedEffort::Moderate,
			};
		};

		let documented = entry.documented_version();
		let reason = if documented.is_none() {
			ComparisonReason::MissingDocs
		} else if entry.documentation_version != snapshot.version {
			ComparisonReason::VersionMismatch
		} else if entry.content_hash != snapshot.content_hash {
			ComparisonReason::HashMismatch
		} else {
			ComparisonReason::UpToDate
		};

		let change_kind = classify(documented, &snapshot.version);
		let (priority, estimated_effort) = impact(change_kind);

		ComparisonResult {
			identity: snapshot.identity.clone(),
			needs_update: reason != ComparisonReason::UpToDate,
			version_diff: VersionDiff {
				current: snapshot.version.clone(),
				documented: documented.map(ToString::to_string),
				change_kind,
			},
			reason,
			priority,
			estimated_effort,
		}
	}

	/// Entries whose documentation lags their recorded version, in registry
	/// order. Reads the registry only, never the sources.
	pub fn outdated(&self) -> Vec<ComparisonResult> {
		self.entries
			.iter()
			.filter(|(_, entry)| entry.is_outdated())
			.map(|(identity, entry)| {
				let documented = entry.documented_version();
				let change_kind = classify(documented, &entry.current_version);
				let (priority, estimated_effort) = impact(change_kind);
				let reason = if documented.is_none() {
					ComparisonReason::MissingDocs
				} else {
					ComparisonReason::StaleDocs
				};

				ComparisonResult {
					identity: identity.clone(),
					needs_update: true,
					version_diff: VersionDiff {
						current: entry.current_version.clone(),
						documented: documented.map(ToString::to_string),
						change_kind,
					},
					reason,
					priority,
					estimated_effort,
				}
			})
			.collect()
	}

	pub fn stats(&self) -> RegistryStats {
		let total = self.entries.len();
		let documented = self
			.entries
			.values()
			.filter(|entry| entry.is_documented())
			.count();
		let outdated = self
			.entries
			.values()
			.filter(|entry| entry.is_outdated())
			.count();
		let coverage_percent = if total == 0 {
			0.0
		} else {
			documented as f64 / total as f64 * 100.0
		};

		RegistryStats {
			total,
			documented,
			outdated,
			coverage_percent,
		}
	}
}
