use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum CompdocError {
	#[error(transparent)]
	#[diagnostic(code(compdoc::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(compdoc::config_parse),
		help("check that compdoc.toml is valid TOML with [output], [templates], [registry] and/or [sources] sections")
	)]
	ConfigParse(String),

	#[error("failed to initialize registry store `{path}`: {reason}")]
	#[diagnostic(
		code(compdoc::registry_init),
		help("make sure the registry path points to a readable file, or remove it to start fresh")
	)]
	RegistryInit { path: String, reason: String },

	#[error("failed to serialize registry: {0}")]
	#[diagnostic(code(compdoc::registry_serialize))]
	RegistrySerialize(String),

	#[error("unbalanced delimiters in `{anchor}` starting at byte {offset}")]
	#[diagnostic(
		code(compdoc::unbalanced_scope),
		help("every `{{`, `(` and `[` in a declaration body needs a matching closer")
	)]
	UnbalancedScope { anchor: String, offset: usize },

	#[error("failed to read template `{name}`: {reason}")]
	#[diagnostic(code(compdoc::template_read))]
	TemplateRead { name: String, reason: String },

	#[error("could not determine a component name for `{path}`")]
	#[diagnostic(
		code(compdoc::missing_identity),
		help("export the component under a PascalCase name or give the file a descriptive name")
	)]
	MissingIdentity { path: String },

	#[error("failed to read source file `{path}`: {reason}")]
	#[diagnostic(code(compdoc::source_read))]
	SourceRead { path: String, reason: String },
}

pub type CompdocResult<T> = Result<T, CompdocError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
