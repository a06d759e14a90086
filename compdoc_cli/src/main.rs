use std::collections::BTreeSet;
use std::path::Path;
use std::path::PathBuf;
use std::process;
use std::sync::mpsc;
use std::time::Duration;

use clap::Parser;
use compdoc_cli::Commands;
use compdoc_cli::CompdocCli;
use compdoc_cli::OutputFormat;
use compdoc_cli::SourceMatcher;
use compdoc_cli::discover_sources;
use compdoc_core::BatchOutcome;
use compdoc_core::BatchSummary;
use compdoc_core::CompareReport;
use compdoc_core::CompdocConfig;
use compdoc_core::CompdocError;
use compdoc_core::ComparisonReason;
use compdoc_core::DocGenerator;
use compdoc_core::GeneratorOptions;
use compdoc_core::Registry;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = CompdocCli::parse();

	// Respect NO_COLOR env var, the --no-color flag and non-color terminals.
	let use_color = !args.no_color
		&& std::env::var_os("NO_COLOR").is_none()
		&& supports_color::on(supports_color::Stream::Stdout).is_some();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_tracing(args.verbose, use_color);

	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match &args.command {
		Some(Commands::Generate {
			file,
			all,
			outdated,
			watch,
		}) => {
			if let Some(file) = file {
				run_generate_file(&args, file)
			} else if *outdated {
				run_generate_outdated(&args)
			} else if *all {
				run_generate_all(&args, *watch)
			} else {
				Ok(())
			}
		}
		Some(Commands::Compare { format }) => run_compare(&args, *format),
		Some(Commands::Stats { format }) => run_stats(&args, *format),
		None => {
			eprintln!("No subcommand specified. Run `compdoc --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		match e.downcast::<CompdocError>() {
			Ok(compdoc_err) => {
				let report: miette::Report = (*compdoc_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Logs go to stderr so command output on stdout stays machine-readable.
/// `RUST_LOG` overrides the level chosen by `--verbose`.
fn init_tracing(verbose: bool, use_color: bool) {
	let level = if verbose { "info" } else { "warn" };
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.try_init();
}

fn resolve_root(args: &CompdocCli) -> PathBuf {
	let root = args
		.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
	std::path::absolute(&root).unwrap_or(root)
}

/// Project root plus its resolved configuration.
struct Project {
	root: PathBuf,
	config: CompdocConfig,
	options: GeneratorOptions,
}

fn load_project(args: &CompdocCli) -> Result<Project, Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let config = CompdocConfig::load(&root)?.unwrap_or_default();
	let options = GeneratorOptions::from_config(&root, Some(&config));

	Ok(Project {
		root,
		config,
		options,
	})
}

fn run_generate_file(args: &CompdocCli, file: &Path) -> Result<(), Box<dyn std::error::Error>> {
	let project = load_project(args)?;
	let path = std::path::absolute(file)?;
	let mut generator = DocGenerator::new(project.options)?;

	let Some(artifact) = generator.generate_file(&path)? else {
		return Err(CompdocError::MissingIdentity {
			path: make_relative(&path, &project.root),
		}
		.into());
	};

	println!(
		"{} {}",
		colored!("Generated", green),
		make_relative(&artifact, &project.root)
	);

	Ok(())
}

fn run_generate_outdated(args: &CompdocCli) -> Result<(), Box<dyn std::error::Error>> {
	let project = load_project(args)?;
	let files = discover_sources(&project.root, &project.config.sources)?;
	let mut generator = DocGenerator::new(project.options)?;

	let problems = generator.refresh(&files)?;
	for problem in &problems {
		print_outcome(problem, &project.root, args.verbose);
	}

	if generator.registry().outdated().is_empty() {
		println!("All documented components are up to date.");
		return Ok(());
	}

	let summary = generator.generate_outdated();
	print_summary(&summary, &project.root, args.verbose);

	if summary.has_errors() {
		process::exit(1);
	}

	Ok(())
}

fn run_generate_all(args: &CompdocCli, watch: bool) -> Result<(), Box<dyn std::error::Error>> {
	let project = load_project(args)?;
	let files = discover_sources(&project.root, &project.config.sources)?;
	let mut generator = DocGenerator::new(project.options)?;

	if files.is_empty() {
		println!("No component sources found.");
	} else {
		let summary = generator.generate_all(&files);
		print_summary(&summary, &project.root, args.verbose);

		if summary.has_errors() && !watch {
			process::exit(1);
		}
	}

	if !watch {
		return Ok(());
	}

	// Watch mode
	println!("\nWatching for file changes... (press Ctrl+C to stop)");

	let matcher = SourceMatcher::new(&project.root, &project.config.sources)?;
	let (tx, rx) = mpsc::channel::<PathBuf>();

	let mut watcher =
		notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
			if let Ok(event) = res {
				if matches!(
					event.kind,
					notify::EventKind::Modify(_) | notify::EventKind::Create(_)
				) {
					for path in event.paths {
						let _ = tx.send(path);
					}
				}
			}
		})?;

	use notify::Watcher;
	watcher.watch(&project.root, notify::RecursiveMode::Recursive)?;

	loop {
		let mut changed = BTreeSet::from([rx.recv()?]);
		// Debounce: collect additional events within 200ms.
		while let Ok(path) = rx.recv_timeout(Duration::from_millis(200)) {
			changed.insert(path);
		}

		let tracked: Vec<PathBuf> = changed
			.into_iter()
			.filter(|path| path.is_file() && matcher.is_tracked(path))
			.collect();
		if tracked.is_empty() {
			continue;
		}

		println!("\nFile change detected, regenerating...");
		let summary = generator.generate_all(&tracked);
		print_summary(&summary, &project.root, args.verbose);
	}
}

fn print_outcome(outcome: &BatchOutcome, root: &Path, verbose: bool) {
	match outcome {
		BatchOutcome::Generated { identity, artifact } => {
			if verbose {
				println!("  {identity} -> {}", make_relative(artifact, root));
			}
		}
		BatchOutcome::Skipped { path, reason } => {
			eprintln!(
				"{} skipped {} ({reason})",
				colored!("warning:", yellow),
				make_relative(path, root)
			);
		}
		BatchOutcome::Failed { path, message } => {
			eprintln!(
				"{} {}: {message}",
				colored!("error:", red),
				make_relative(path, root)
			);
		}
	}
}

fn print_summary(summary: &BatchSummary, root: &Path, verbose: bool) {
	for outcome in &summary.outcomes {
		print_outcome(outcome, root, verbose);
	}

	let line = format!(
		"Processed {} component(s): {} updated, {} skipped, {} failed.",
		summary.processed, summary.updated, summary.skipped, summary.errors
	);
	if summary.has_errors() {
		println!("{}", colored!(line, yellow));
	} else {
		println!("{}", colored!(line, green));
	}
}

fn run_compare(args: &CompdocCli, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
	let project = load_project(args)?;
	let files = discover_sources(&project.root, &project.config.sources)?;
	let generator = DocGenerator::new(project.options)?;
	let report = generator.compare_files(&files);

	match format {
		OutputFormat::Json => print_compare_json(&report, &project.root)?,
		OutputFormat::Text => print_compare_text(&report, &project.root),
	}

	if report.needs_update() {
		process::exit(1);
	}

	Ok(())
}

fn print_compare_json(report: &CompareReport, root: &Path) -> Result<(), serde_json::Error> {
	let problems: Vec<serde_json::Value> = report
		.problems
		.iter()
		.filter_map(|outcome| {
			match outcome {
				BatchOutcome::Skipped { path, reason } => {
					Some(serde_json::json!({
						"file": make_relative(path, root),
						"skipped": reason,
					}))
				}
				BatchOutcome::Failed { path, message } => {
					Some(serde_json::json!({
						"file": make_relative(path, root),
						"error": message,
					}))
				}
				BatchOutcome::Generated { .. } => None,
			}
		})
		.collect();

	let output = serde_json::json!({
		"ok": !report.needs_update(),
		"results": report.results,
		"problems": problems,
	});
	println!("{}", serde_json::to_string_pretty(&output)?);

	Ok(())
}

fn print_compare_text(report: &CompareReport, root: &Path) {
	for outcome in &report.problems {
		match outcome {
			BatchOutcome::Skipped { path, reason } => {
				eprintln!(
					"{} skipped {} ({reason})",
					colored!("warning:", yellow),
					make_relative(path, root)
				);
			}
			BatchOutcome::Failed { path, message } => {
				eprintln!(
					"{} {}: {message}",
					colored!("error:", red),
					make_relative(path, root)
				);
			}
			BatchOutcome::Generated { .. } => {}
		}
	}

	let pending: Vec<_> = report
		.results
		.iter()
		.filter(|result| result.needs_update)
		.collect();

	if pending.is_empty() {
		println!(
			"Compare passed: {} component(s) documented and up to date.",
			report.results.len()
		);
		return;
	}

	println!("{}", colored!("Components needing documentation updates:", bold));
	for result in &pending {
		let documented = result
			.version_diff
			.documented
			.as_deref()
			.unwrap_or("none");
		let change = result
			.version_diff
			.change_kind
			.map_or_else(String::new, |kind| format!(", {kind}"));
		let reason = match result.reason {
			ComparisonReason::MissingDocs => colored!(result.reason.as_str(), red),
			ComparisonReason::VersionMismatch | ComparisonReason::StaleDocs => {
				colored!(result.reason.as_str(), yellow)
			}
			ComparisonReason::HashMismatch | ComparisonReason::UpToDate => {
				result.reason.as_str().to_string()
			}
		};
		println!(
			"  {:<24} {reason} (documented {documented}, current {}{change}; priority {:?}, effort \
			 {:?})",
			result.identity, result.version_diff.current, result.priority, result.estimated_effort,
		);
	}

	println!();
	println!(
		"{} of {} component(s) need updates. Run `compdoc generate --outdated` or `compdoc \
		 generate --all`.",
		pending.len(),
		report.results.len()
	);
}

fn run_stats(args: &CompdocCli, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
	let project = load_project(args)?;
	let registry = Registry::load(&project.options.registry_path)?;
	let stats = registry.stats();

	match format {
		OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
		OutputFormat::Text => {
			println!("{}", colored!("compdoc stats", bold));
			println!();
			println!("{:<16} {}", "Components", stats.total);
			println!("{:<16} {}", "Documented", stats.documented);
			println!("{:<16} {}", "Outdated", stats.outdated);
			println!("{:<16} {:.1}%", "Coverage", stats.coverage_percent);
		}
	}

	Ok(())
}

/// Make a path relative to root for display purposes.
fn make_relative(path: &Path, root: &Path) -> String {
	path.strip_prefix(root)
		.unwrap_or(path)
		.display()
		.to_string()
}
