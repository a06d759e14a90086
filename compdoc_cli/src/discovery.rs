//! Finds the component sources tracked by the `[sources]` section of
//! `compdoc.toml`.

use std::path::Path;
use std::path::PathBuf;

use compdoc_core::CompdocError;
use compdoc_core::CompdocResult;
use compdoc_core::SourcesConfig;
use globset::Glob;
use globset::GlobSet;
use globset::GlobSetBuilder;
use ignore::WalkBuilder;
use tracing::debug;
use tracing::warn;

/// Include patterns used when `[sources].include` is empty.
pub const DEFAULT_INCLUDE: [&str; 2] = ["src/components/**/*.tsx", "src/components/**/*.jsx"];

/// Exclude patterns used when `[sources].exclude` is empty.
pub const DEFAULT_EXCLUDE: [&str; 4] = [
	"**/*.stories.tsx",
	"**/*.stories.jsx",
	"**/*.test.tsx",
	"**/*.test.jsx",
];

/// Decides whether a path under the project root is a tracked source.
/// Patterns match the path relative to the root.
#[derive(Debug, Clone)]
pub struct SourceMatcher {
	root: PathBuf,
	include: GlobSet,
	exclude: GlobSet,
}

impl SourceMatcher {
	pub fn new(root: &Path, sources: &SourcesConfig) -> CompdocResult<Self> {
		let include = if sources.include.is_empty() {
			build_glob_set(DEFAULT_INCLUDE)?
		} else {
			build_glob_set(sources.include.iter().map(String::as_str))?
		};
		let exclude = if sources.exclude.is_empty() {
			build_glob_set(DEFAULT_EXCLUDE)?
		} else {
			build_glob_set(sources.exclude.iter().map(String::as_str))?
		};

		Ok(Self {
			root: root.to_path_buf(),
			include,
			exclude,
		})
	}

	pub fn is_tracked(&self, path: &Path) -> bool {
		let Ok(relative) = path.strip_prefix(&self.root) else {
			return false;
		};

		self.include.is_match(relative) && !self.exclude.is_match(relative)
	}
}

fn build_glob_set<'a>(patterns: impl IntoIterator<Item = &'a str>) -> CompdocResult<GlobSet> {
	let mut builder = GlobSetBuilder::new();
	for pattern in patterns {
		let glob = Glob::new(pattern).map_err(|e| {
			CompdocError::ConfigParse(format!("invalid source pattern `{pattern}`: {e}"))
		})?;
		builder.add(glob);
	}

	builder
		.build()
		.map_err(|e| CompdocError::ConfigParse(format!("failed to build source patterns: {e}")))
}

/// Walk `root` and return every tracked source as a sorted list of absolute
/// paths.
///
/// Hidden entries are skipped. `.gitignore` rules apply unless
/// `disable_gitignore` is set, whether or not the root is a git repository.
pub fn discover_sources(root: &Path, sources: &SourcesConfig) -> CompdocResult<Vec<PathBuf>> {
	let root = std::path::absolute(root)?;
	let matcher = SourceMatcher::new(&root, sources)?;
	let respect_gitignore = !sources.disable_gitignore;

	let walker = WalkBuilder::new(&root)
		.git_ignore(respect_gitignore)
		.git_exclude(respect_gitignore)
		.git_global(respect_gitignore)
		.require_git(false)
		.build();

	let mut files = Vec::new();
	for entry in walker {
		let entry = match entry {
			Ok(entry) => entry,
			Err(error) => {
				warn!(%error, "skipping unreadable path during discovery");
				continue;
			}
		};

		if !entry
			.file_type()
			.is_some_and(|file_type| file_type.is_file())
		{
			continue;
		}

		let path = entry.into_path();
		if matcher.is_tracked(&path) {
			files.push(path);
		}
	}

	files.sort();
	debug!(root = %root.display(), count = files.len(), "discovered component sources");

	Ok(files)
}
