use std::path::PathBuf;

use compdoc_cli::SourceMatcher;
use compdoc_cli::discover_sources;
use compdoc_core::AnyEmptyResult;
use compdoc_core::CompdocError;
use compdoc_core::SourcesConfig;

mod common;

use common::write_file;

#[test]
fn discovers_default_component_sources_in_order() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let root = std::path::absolute(tmp.path())?;
	write_file(&root, "src/components/ui/tabs.tsx", "");
	write_file(&root, "src/components/avatar.jsx", "");
	write_file(&root, "src/components/avatar.css", "");
	write_file(&root, "src/pages/home.tsx", "");
	write_file(&root, "src/components/.hidden/secret.tsx", "");

	let files = discover_sources(&root, &SourcesConfig::default())?;

	assert_eq!(
		files,
		vec![
			root.join("src/components/avatar.jsx"),
			root.join("src/components/ui/tabs.tsx"),
		]
	);

	Ok(())
}

#[test]
fn default_excludes_skip_tests_and_stories() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let root = std::path::absolute(tmp.path())?;
	write_file(&root, "src/components/button.tsx", "");
	write_file(&root, "src/components/button.test.tsx", "");
	write_file(&root, "src/components/button.stories.tsx", "");
	write_file(&root, "src/components/card.test.jsx", "");

	let files = discover_sources(&root, &SourcesConfig::default())?;
	assert_eq!(files, vec![root.join("src/components/button.tsx")]);

	let matcher = SourceMatcher::new(&root, &SourcesConfig::default())?;
	assert!(matcher.is_tracked(&root.join("src/components/button.tsx")));
	assert!(!matcher.is_tracked(&root.join("src/components/button.test.tsx")));

	let sources = SourcesConfig {
		exclude: vec!["**/*.stories.tsx".into()],
		..SourcesConfig::default()
	};
	let files = discover_sources(&root, &sources)?;
	assert_eq!(
		files,
		vec![
			root.join("src/components/button.test.tsx"),
			root.join("src/components/button.tsx"),
			root.join("src/components/card.test.jsx"),
		]
	);

	Ok(())
}

#[test]
fn discovery_respects_gitignore_unless_disabled() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let root = std::path::absolute(tmp.path())?;
	write_file(&root, ".gitignore", "src/components/legacy/\n");
	write_file(&root, "src/components/legacy/old.tsx", "");
	write_file(&root, "src/components/new.tsx", "");

	let files = discover_sources(&root, &SourcesConfig::default())?;
	assert_eq!(files, vec![root.join("src/components/new.tsx")]);

	let sources = SourcesConfig {
		disable_gitignore: true,
		..SourcesConfig::default()
	};
	let files = discover_sources(&root, &sources)?;
	assert_eq!(
		files,
		vec![
			root.join("src/components/legacy/old.tsx"),
			root.join("src/components/new.tsx"),
		]
	);

	Ok(())
}

#[test]
fn matcher_applies_include_and_exclude() -> AnyEmptyResult {
	let root = PathBuf::from("/project");
	let sources = SourcesConfig {
		include: vec!["lib/**/*.tsx".into()],
		exclude: vec!["**/*.test.tsx".into()],
		disable_gitignore: false,
	};
	let matcher = SourceMatcher::new(&root, &sources)?;

	assert!(matcher.is_tracked(&root.join("lib/button.tsx")));
	assert!(matcher.is_tracked(&root.join("lib/forms/input.tsx")));
	assert!(!matcher.is_tracked(&root.join("lib/button.test.tsx")));
	assert!(!matcher.is_tracked(&root.join("src/components/button.tsx")));
	assert!(!matcher.is_tracked(&PathBuf::from("/elsewhere/lib/button.tsx")));

	Ok(())
}

#[test]
fn invalid_pattern_is_a_config_error() {
	let sources = SourcesConfig {
		include: vec!["src/[".into()],
		..SourcesConfig::default()
	};

	assert!(matches!(
		SourceMatcher::new(&PathBuf::from("/project"), &sources),
		Err(CompdocError::ConfigParse(_))
	));
}
