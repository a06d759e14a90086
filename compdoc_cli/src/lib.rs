use std::path::PathBuf;

use clap::ArgGroup;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

pub use discovery::*;

mod discovery;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Generate component documentation from source and keep it in sync.",
	long_about = "compdoc extracts props, style variants and version metadata from component \
	              source files and renders one documentation page per component.\n\nA version \
	              registry records what was documented at which version, so stale pages can be \
	              found and regenerated.\n\nQuick start:\n  compdoc generate --all      \
	              Document every tracked component\n  compdoc compare             Report \
	              components whose docs are stale\n  compdoc generate --outdated Regenerate only \
	              the stale ones\n  compdoc stats               Show documentation coverage"
)]
pub struct CompdocCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Generate documentation for one component, every tracked component, or
	/// only the components whose documentation is out of date.
	///
	/// Each run records the component's version in the registry and marks its
	/// documentation as current. Pages are written to the configured output
	/// directory, one file per component.
	#[command(group(
		ArgGroup::new("target")
			.required(true)
			.args(["file", "all", "outdated"])
	))]
	Generate {
		/// A single component source file.
		file: Option<PathBuf>,

		/// Generate every source file matched by `[sources]`.
		#[arg(long, default_value_t = false)]
		all: bool,

		/// Regenerate registry entries whose documented version lags the
		/// current one.
		#[arg(long, default_value_t = false)]
		outdated: bool,

		/// After the initial run, watch the project and regenerate tracked
		/// files as they change.
		#[arg(long, default_value_t = false, requires = "all")]
		watch: bool,
	},
	/// Compare tracked sources against the registry.
	///
	/// Reports every component whose documentation is missing, records an
	/// older version, or was generated from different content. Exits with a
	/// non-zero status code when any component needs an update, which makes it
	/// suitable for CI.
	Compare {
		/// Output format. Use `text` for human-readable output or `json` for
		/// programmatic consumption.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// Print documentation coverage recorded in the registry.
	Stats {
		/// Output format. Use `text` for human-readable output or `json` for
		/// programmatic consumption.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output with colors and formatting.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}
