use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::CompdocError;
use crate::CompdocResult;
use crate::catalog;
use crate::config::CompdocConfig;
use crate::config::DEFAULT_EXTENSION;
use crate::config::DEFAULT_OUTPUT_DIR;
use crate::config::DEFAULT_TEMPLATE_NAME;
use crate::config::DEFAULT_TEMPLATES_DIR;
use crate::extractor::Extraction;
use crate::extractor::PropDefinition;
use crate::extractor::VariantDefinition;
use crate::extractor::extract;
use crate::metadata::ComponentStatus;
use crate::metadata::ComponentVersionSnapshot;
use crate::metadata::now;
use crate::metadata::snapshot;
use crate::registry::ComparisonResult;
use crate::registry::DEFAULT_REGISTRY_PATH;
use crate::registry::Registry;
use crate::registry::VersionEntry;
use crate::registry::VersionHistoryEntry;
use crate::template::TemplateContext;
use crate::template::TemplateValue;
use crate::template::load_template;
use crate::template::render;

/// Number of history entries shown in a generated changelog.
pub const CHANGELOG_LENGTH: usize = 5;

/// Template used when no `<templates>/<name>.md` file exists.
pub const DEFAULT_TEMPLATE: &str = r"# {{name}}

{{description}}

| | |
| --- | --- |
| Version | `{{version}}` |
| Status | {{status}} |
| Category | {{category}} |
| Import | `{{importPath}}` |
| Source | `{{filePath}}` |

{{#isDeprecated}}> **Deprecated.** Plan a migration away from this component.

{{/isDeprecated}}{{#isExperimental}}> **Experimental.** The API may change in any release.

{{/isExperimental}}{{#hasProps}}## Props

| Name | Type | Required | Default | Description |
| --- | --- | --- | --- | --- |
{{#props}}| `{{name}}` | `{{tableType}}` | {{required}} | {{defaultValue}} | {{description}} |
{{/props}}
{{/hasProps}}{{#hasVariants}}## Variants

{{#variants}}### {{name}}

{{#options}}- `{{value}}`: {{description}}
{{/options}}
{{/variants}}{{/hasVariants}}## Accessibility

{{#accessibility}}- {{note}}
{{/accessibility}}
{{#tags}}`{{name}}` {{/tags}}

{{#related}}- [{{name}}](./{{file}})
{{/related}}
{{#hasChangelog}}## Changelog

{{#changelog}}- **{{version}}** ({{date}}): {{changeKind}}{{#breaking}}, breaking{{/breaking}}. {{notes}}
{{/changelog}}
{{/hasChangelog}}_Generated on {{generatedAt}}._
";

/// Reads component source text. The generator treats a failed read as fatal
/// for that one file only.
pub trait SourceReader {
	fn read(&self, path: &Path) -> std::io::Result<String>;
}

/// Reads sources from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSourceReader;

impl SourceReader for FsSourceReader {
	fn read(&self, path: &Path) -> std::io::Result<String> {
		std::fs::read_to_string(path)
	}
}

/// Resolved, absolute generator settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
	pub output_dir: PathBuf,
	pub extension: String,
	pub templates_dir: PathBuf,
	pub template_name: String,
	pub registry_path: PathBuf,
}

impl GeneratorOptions {
	/// Resolve `config` (or the defaults) against the project `root`.
	pub fn from_config(root: &Path, config: Option<&CompdocConfig>) -> Self {
		let Some(config) = config else {
			return Self {
				output_dir: root.join(DEFAULT_OUTPUT_DIR),
				extension: DEFAULT_EXTENSION.to_string(),
				templates_dir: root.join(DEFAULT_TEMPLATES_DIR),
				template_name: DEFAULT_TEMPLATE_NAME.to_string(),
				registry_path: root.join(DEFAULT_REGISTRY_PATH),
			};
		};

		Self {
			output_dir: root.join(&config.output.dir),
			extension: config.output.extension.trim_start_matches('.').to_string(),
			templates_dir: root.join(&config.templates.dir),
			template_name: config.templates.name.clone(),
			registry_path: root.join(&config.registry.path),
		}
	}

	/// Artifact path for a component.
	pub fn artifact_path(&self, identity: &str) -> PathBuf {
		self.output_dir.join(artifact_file_name(identity, &self.extension))
	}
}

fn artifact_file_name(identity: &str, extension: &str) -> String {
	format!("{}.{extension}", identity.to_lowercase())
}

/// Per-item result of a batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
	Generated { identity: String, artifact: PathBuf },
	Skipped { path: PathBuf, reason: String },
	Failed { path: PathBuf, message: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
	pub processed: usize,
	pub updated: usize,
	pub skipped: usize,
	pub errors: usize,
	pub outcomes: Vec<BatchOutcome>,
}

impl BatchSummary {
	fn record(&mut self, outcome: BatchOutcome) {
		self.processed += 1;
		match &outcome {
			BatchOutcome::Generated { .. } => self.updated += 1,
			BatchOutcome::Skipped { .. } => self.skipped += 1,
			BatchOutcome::Failed { .. } => self.errors += 1,
		}
		self.outcomes.push(outcome);
	}

	pub fn has_errors(&self) -> bool {
		self.errors > 0
	}
}

/// Comparison results for a set of files, plus the files that could not be
/// compared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompareReport {
	pub results: Vec<ComparisonResult>,
	pub problems: Vec<BatchOutcome>,
}

impl CompareReport {
	pub fn needs_update(&self) -> bool {
		self.results.iter().any(|result| result.needs_update)
	}
}

/// Produces one documentation artifact per component and keeps the registry
/// in step. Work is strictly sequential.
#[derive(Debug)]
pub struct DocGenerator<R: SourceReader = FsSourceReader> {
	options: GeneratorOptions,
	registry: Registry,
	template: String,
	reader: R,
}

impl DocGenerator<FsSourceReader> {
	/// Load the registry and template named by `options`, reading sources
	/// from disk.
	pub fn new(options: GeneratorOptions) -> CompdocResult<Self> {
		Self::with_reader(options, FsSourceReader)
	}
}

impl<R: SourceReader> DocGenerator<R> {
	pub fn with_reader(options: GeneratorOptions, reader: R) -> CompdocResult<Self> {
		let registry = Registry::load(&options.registry_path)?;
		let template =
			load_template(&options.templates_dir, &options.template_name, DEFAULT_TEMPLATE)?;

		Ok(Self {
			options,
			registry,
			template,
			reader,
		})
	}

	pub fn options(&self) -> &GeneratorOptions {
		&self.options
	}

	pub fn registry(&self) -> &Registry {
		&self.registry
	}

	/// Generate documentation for `source`, read from `path`.
	///
	/// Returns the artifact path, or `None` when no component identity could be
	/// determined.
	pub fn generate(&mut self, source: &str, path: &Path) -> CompdocResult<Option<PathBuf>> {
		Ok(self
			.generate_component(source, path)?
			.map(|(_, artifact)| artifact))
	}

	/// Read `path` through the source reader, then [`Self::generate`].
	pub fn generate_file(&mut self, path: &Path) -> CompdocResult<Option<PathBuf>> {
		let source = self.read_source(path)?;
		self.generate(&source, path)
	}

	/// Generate every file in `paths`, in order. Failures are recorded and the
	/// batch continues.
	pub fn generate_all(&mut self, paths: &[PathBuf]) -> BatchSummary {
		let mut summary = BatchSummary::default();
		for path in paths {
			summary.record(self.generate_one(path));
		}
		summary
	}

	/// Regenerate every registry entry whose documentation lags its version,
	/// in registry order.
	pub fn generate_outdated(&mut self) -> BatchSummary {
		let pending: Vec<PathBuf> = self
			.registry
			.outdated()
			.iter()
			.filter_map(|result| self.registry.get(&result.identity))
			.map(|entry| entry.file_path.clone())
			.collect();

		debug!(count = pending.len(), "regenerating outdated components");

		let mut summary = BatchSummary::default();
		for path in &pending {
			summary.record(self.generate_one(path));
		}
		summary
	}

	/// Record fresh snapshots of `paths` in the registry and save it.
	///
	/// Documentation state is left untouched, so a source whose version moved
	/// on shows up in [`Registry::outdated`] afterwards. Files that cannot be
	/// snapshotted are returned as problems.
	pub fn refresh(&mut self, paths: &[PathBuf]) -> CompdocResult<Vec<BatchOutcome>> {
		let (snapshots, problems) = self.snapshot_files(paths);

		for snapshot in &snapshots {
			self.registry.upsert(snapshot);
		}
		if !snapshots.is_empty() {
			self.registry.save()?;
		}

		debug!(
			recorded = snapshots.len(),
			problems = problems.len(),
			"refreshed registry from sources"
		);

		Ok(problems)
	}

	/// Snapshot each file and compare it with the registry. Nothing is
	/// written.
	pub fn compare_files(&self, paths: &[PathBuf]) -> CompareReport {
		let (snapshots, problems) = self.snapshot_files(paths);

		CompareReport {
			results: self.registry.compare(&snapshots),
			problems,
		}
	}

	fn snapshot_files(
		&self,
		paths: &[PathBuf],
	) -> (Vec<ComponentVersionSnapshot>, Vec<BatchOutcome>) {
		let mut snapshots = Vec::with_capacity(paths.len());
		let mut problems = Vec::new();

		for path in paths {
			match self.read_source(path) {
				Ok(source) => {
					match snapshot(&source, path) {
						Some(snapshot) => snapshots.push(snapshot),
						None => {
							problems.push(BatchOutcome::Skipped {
								path: path.clone(),
								reason: "no component identity".to_string(),
							});
						}
					}
				}
				Err(error) => {
					warn!(path = %path.display(), %error, "failed to read component source");
					problems.push(BatchOutcome::Failed {
						path: path.clone(),
						message: error.to_string(),
					});
				}
			}
		}

		(snapshots, problems)
	}

	fn generate_one(&mut self, path: &Path) -> BatchOutcome {
		let result = self
			.read_source(path)
			.and_then(|source| self.generate_component(&source, path));

		match result {
			Ok(Some((identity, artifact))) => BatchOutcome::Generated { identity, artifact },
			Ok(None) => {
				BatchOutcome::Skipped {
					path: path.to_path_buf(),
					reason: "no component identity".to_string(),
				}
			}
			Err(error) => {
				warn!(path = %path.display(), %error, "failed to generate documentation");
				BatchOutcome::Failed {
					path: path.to_path_buf(),
					message: error.to_string(),
				}
			}
		}
	}

	fn read_source(&self, path: &Path) -> CompdocResult<String> {
		self.reader
			.read(path)
			.map_err(|error| CompdocError::SourceRead {
				path: path.display().to_string(),
				reason: error.to_string(),
			})
	}

	fn generate_component(
		&mut self,
		source: &str,
		path: &Path,
	) -> CompdocResult<Option<(String, PathBuf)>> {
		let Some(snapshot) = snapshot(source, path) else {
			warn!(path = %path.display(), "no component identity found, skipping");
			return Ok(None);
		};

		let extraction = match extract(source) {
			Ok(extraction) => extraction,
			Err(error) => {
				warn!(
					identity = %snapshot.identity,
					%error,
					"failed to extract props and variants"
				);
				Extraction::default()
			}
		};

		for diagnostic in &extraction.diagnostics {
			warn!(
				identity = %snapshot.identity,
				declaration = %diagnostic.declaration,
				field = %diagnostic.text,
				reason = %diagnostic.reason,
				"field left unparsed"
			);
		}

		self.registry.upsert(&snapshot);

		let context = build_context(
			&snapshot,
			&extraction,
			self.registry.get(&snapshot.identity),
			&self.options.extension,
		);
		let rendered = render(&self.template, &context);

		std::fs::create_dir_all(&self.options.output_dir)?;
		let artifact = self.options.artifact_path(&snapshot.identity);
		std::fs::write(&artifact, rendered)?;

		self.registry
			.mark_documentation_updated(&snapshot.identity, &snapshot.version);
		self.registry.save()?;

		info!(
			identity = %snapshot.identity,
			version = %snapshot.version,
			artifact = %artifact.display(),
			"wrote documentation"
		);

		Ok(Some((snapshot.identity, artifact)))
	}
}

/// Assemble the template context for one component.
pub fn build_context(
	snapshot: &ComponentVersionSnapshot,
	extraction: &Extraction,
	entry: Option<&VersionEntry>,
	extension: &str,
) -> TemplateContext {
	let name = snapshot.identity.as_str();

	let component = TemplateContext::new()
		.with("name", name)
		.with("version", snapshot.version.as_str())
		.with("status", snapshot.status.as_str())
		.with("lastModified", snapshot.last_modified.as_str())
		.with("contentHash", snapshot.content_hash.as_str())
		.with("sizeBytes", snapshot.size_bytes)
		.with("filePath", snapshot.file_path.display().to_string())
		.with("category", catalog::category_for_path(&snapshot.file_path))
		.with("description", catalog::description_for(name))
		.with("importPath", import_path(&snapshot.file_path))
		.with("exports", snapshot.exports.clone());

	let props: Vec<TemplateValue> = extraction.props.iter().map(prop_context).collect();
	let variants: Vec<TemplateValue> = extraction.variants.iter().map(variant_context).collect();

	let tags: Vec<TemplateValue> = catalog::tags_for(name)
		.into_iter()
		.map(|tag| TemplateContext::new().with("name", tag).into())
		.collect();

	let related: Vec<TemplateValue> = catalog::related_to(name)
		.iter()
		.map(|other| {
			TemplateContext::new()
				.with("name", *other)
				.with("file", artifact_file_name(other, extension))
				.into()
		})
		.collect();

	let accessibility: Vec<TemplateValue> = catalog::accessibility_notes(name)
		.into_iter()
		.map(|note| TemplateContext::new().with("note", note).into())
		.collect();

	let changelog: Vec<TemplateValue> = entry
		.map(|entry| {
			entry
				.history
				.iter()
				.rev()
				.take(CHANGELOG_LENGTH)
				.map(history_context)
				.collect()
		})
		.unwrap_or_default();

	TemplateContext::new()
		.with("component", component)
		.with("hasProps", !props.is_empty())
		.with("props", props)
		.with("hasVariants", !variants.is_empty())
		.with("variants", variants)
		.with("tags", tags)
		.with("related", related)
		.with("accessibility", accessibility)
		.with("hasChangelog", !changelog.is_empty())
		.with("changelog", changelog)
		.with("isDeprecated", snapshot.status == ComponentStatus::Deprecated)
		.with("isExperimental", snapshot.status == ComponentStatus::Experimental)
		.with("generatedAt", now())
}

fn prop_context(prop: &PropDefinition) -> TemplateValue {
	TemplateContext::new()
		.with("name", prop.name.as_str())
		.with("rawType", prop.raw_type.as_str())
		.with("tableType", prop.raw_type.replace('|', "\\|"))
		.with("required", prop.required)
		.with("defaultValue", prop.default_value.clone())
		.with("description", prop.description.as_str())
		.into()
}

fn variant_context(variant: &VariantDefinition) -> TemplateValue {
	let options: Vec<TemplateValue> = variant
		.options
		.iter()
		.map(|option| {
			TemplateContext::new()
				.with("value", option.value.as_str())
				.with("description", option.description.as_str())
				.into()
		})
		.collect();

	TemplateContext::new()
		.with("name", variant.name.as_str())
		.with("options", options)
		.with("defaultValue", variant.default_value.clone())
		.into()
}

fn history_context(entry: &VersionHistoryEntry) -> TemplateValue {
	TemplateContext::new()
		.with("version", entry.version.as_str())
		.with("date", entry.date.as_str())
		.with("changeKind", entry.change_kind.to_string())
		.with("breaking", entry.breaking)
		.with("migrationRequired", entry.migration_required)
		.with("notes", entry.notes.clone())
		.into()
}

/// `@/…` import for files under a `src` directory, otherwise `./<stem>`.
pub fn import_path(path: &Path) -> String {
	let without_extension = path.with_extension("");
	let segments: Vec<&str> = without_extension
		.components()
		.filter_map(|component| {
			match component {
				Component::Normal(segment) => segment.to_str(),
				_ => None,
			}
		})
		.collect();

	match segments.iter().rposition(|segment| *segment == "src") {
		Some(index) if index + 1 < segments.len() => {
			let mut tail = segments[index + 1..].to_vec();
			if tail.len() > 1 && tail.last() == Some(&"index") {
				tail.pop();
			}
			format!("@/{}", tail.join("/"))
		}
		_ => {
			let stem = segments.last().copied().unwrap_or_default();
			format!("./{stem}")
		}
	}
}
