use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::CompdocError;
use crate::CompdocResult;
use crate::registry::DEFAULT_REGISTRY_PATH;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["compdoc.toml", ".compdoc.toml", ".config/compdoc.toml"];

pub const DEFAULT_OUTPUT_DIR: &str = "docs/components";
pub const DEFAULT_EXTENSION: &str = "md";
pub const DEFAULT_TEMPLATES_DIR: &str = ".compdoc/templates";
pub const DEFAULT_TEMPLATE_NAME: &str = "component";

/// Configuration loaded from a `compdoc.toml` file.
///
/// ```toml
/// [output]
/// dir = "docs/components"
/// extension = "md"
///
/// [templates]
/// dir = ".compdoc/templates"
/// name = "component"
///
/// [registry]
/// path = ".compdoc/registry.json"
///
/// [sources]
/// include = ["src/components/**/*.tsx"]
/// exclude = ["**/*.stories.tsx", "**/*.test.tsx"]
/// ```
///
/// Every section is optional. Relative paths resolve against the directory
/// holding the project, not the config file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct CompdocConfig {
	#[serde(default)]
	pub output: OutputConfig,
	#[serde(default)]
	pub templates: TemplatesConfig,
	#[serde(default)]
	pub registry: RegistryConfig,
	#[serde(default)]
	pub sources: SourcesConfig,
}

/// Where generated documentation is written.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct OutputConfig {
	#[serde(default = "default_output_dir")]
	pub dir: PathBuf,
	/// File extension of each artifact, without the dot.
	#[serde(default = "default_extension")]
	pub extension: String,
}

impl Default for OutputConfig {
	fn default() -> Self {
		Self {
			dir: default_output_dir(),
			extension: default_extension(),
		}
	}
}

/// Which template renders each component.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TemplatesConfig {
	#[serde(default = "default_templates_dir")]
	pub dir: PathBuf,
	/// Template file stem; `<dir>/<name>.md` is loaded.
	#[serde(default = "default_template_name")]
	pub name: String,
}

impl Default for TemplatesConfig {
	fn default() -> Self {
		Self {
			dir: default_templates_dir(),
			name: default_template_name(),
		}
	}
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RegistryConfig {
	#[serde(default = "default_registry_path")]
	pub path: PathBuf,
}

impl Default for RegistryConfig {
	fn default() -> Self {
		Self {
			path: default_registry_path(),
		}
	}
}

/// Which source files are tracked. Patterns use glob syntax and match paths
/// relative to the project root.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct SourcesConfig {
	#[serde(default)]
	pub include: Vec<String>,
	#[serde(default)]
	pub exclude: Vec<String>,
	/// When true, `.gitignore` files are not consulted during discovery.
	#[serde(default)]
	pub disable_gitignore: bool,
}

fn default_output_dir() -> PathBuf {
	PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn default_extension() -> String {
	DEFAULT_EXTENSION.to_string()
}

fn default_templates_dir() -> PathBuf {
	PathBuf::from(DEFAULT_TEMPLATES_DIR)
}

fn default_template_name() -> String {
	DEFAULT_TEMPLATE_NAME.to_string()
}

fn default_registry_path() -> PathBuf {
	PathBuf::from(DEFAULT_REGISTRY_PATH)
}

impl CompdocConfig {
	/// Resolve the first existing config file path at `root` using
	/// [`CONFIG_FILE_CANDIDATES`] precedence.
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no file exists.
	pub fn load(root: &Path) -> CompdocResult<Option<CompdocConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config: CompdocConfig =
			toml::from_str(&content).map_err(|e| CompdocError::ConfigParse(e.to_string()))?;

		Ok(Some(config))
	}
}
