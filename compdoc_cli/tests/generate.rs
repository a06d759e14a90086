use compdoc_core::AnyEmptyResult;
use compdoc_core::Registry;
use predicates::prelude::*;

mod common;

use common::BUTTON_SOURCE;
use common::INPUT_SOURCE;
use common::compdoc_cmd;
use common::write_file;

#[test]
fn generate_all_writes_one_page_per_component() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_file(tmp.path(), "src/components/ui/button.tsx", BUTTON_SOURCE);
	write_file(tmp.path(), "src/components/forms/input.tsx", INPUT_SOURCE);
	write_file(tmp.path(), "src/lib/utils.ts", "export const cn = () => ''\n");

	compdoc_cmd(tmp.path())
		.arg("generate")
		.arg("--all")
		.assert()
		.success()
		.stdout(predicate::str::contains(
			"Processed 2 component(s): 2 updated, 0 skipped, 0 failed.",
		));

	let button = std::fs::read_to_string(tmp.path().join("docs/components/button.md"))?;
	assert!(button.starts_with("# Button\n"));
	assert!(button.contains("| `disabled` | `boolean` | false |"));
	assert!(button.contains("| `size` | `'sm' \\| 'lg'` | false |"));

	let input = std::fs::read_to_string(tmp.path().join("docs/components/input.md"))?;
	assert!(input.contains("| Status | beta |"));
	assert!(input.contains("| Category | Forms |"));

	let registry = Registry::load(tmp.path().join(".compdoc/registry.json"))?;
	assert_eq!(registry.len(), 2);
	assert!(registry.outdated().is_empty());

	Ok(())
}

#[test]
fn generate_single_file_prints_artifact() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let source = write_file(tmp.path(), "src/components/ui/button.tsx", BUTTON_SOURCE);

	compdoc_cmd(tmp.path())
		.arg("generate")
		.arg(&source)
		.assert()
		.success()
		.stdout(predicate::str::contains("Generated docs/components/button.md"));

	assert!(tmp.path().join("docs/components/button.md").exists());

	Ok(())
}

#[test]
fn generate_single_file_without_identity_fails() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let source = write_file(tmp.path(), "src/components/.tsx", "const x = 1\n");

	compdoc_cmd(tmp.path())
		.arg("generate")
		.arg(&source)
		.assert()
		.code(2)
		.stderr(predicate::str::contains("could not determine a component name"));

	assert!(!tmp.path().join("docs/components").exists());

	Ok(())
}

#[test]
fn generate_missing_file_fails() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	compdoc_cmd(tmp.path())
		.arg("generate")
		.arg(tmp.path().join("src/components/nope.tsx"))
		.assert()
		.code(2)
		.stderr(predicate::str::contains("failed to read source file"));

	Ok(())
}

#[test]
fn generate_requires_a_target() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	compdoc_cmd(tmp.path()).arg("generate").assert().failure();
	compdoc_cmd(tmp.path())
		.arg("generate")
		.arg("--watch")
		.assert()
		.failure();

	Ok(())
}

#[test]
fn generate_outdated_when_everything_is_current() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	compdoc_cmd(tmp.path())
		.arg("generate")
		.arg("--outdated")
		.assert()
		.success()
		.stdout(predicate::str::contains("up to date"));

	Ok(())
}

#[test]
fn generate_outdated_regenerates_stale_entries() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let source = write_file(tmp.path(), "src/components/ui/button.tsx", BUTTON_SOURCE);
	let registry = serde_json::json!({
		"Button": {
			"currentVersion": "1.0.0",
			"lastModified": "2024-01-01T00:00:00+00:00",
			"filePath": source,
			"documentationVersion": "0.9.0",
			"lastDocumentationUpdate": "2024-01-01T00:00:00+00:00",
			"contentHash": "stale",
			"sizeBytes": 10,
			"history": [],
		}
	});
	write_file(
		tmp.path(),
		".compdoc/registry.json",
		&serde_json::to_string_pretty(&registry)?,
	);

	compdoc_cmd(tmp.path())
		.arg("generate")
		.arg("--outdated")
		.assert()
		.success()
		.stdout(predicate::str::contains(
			"Processed 1 component(s): 1 updated, 0 skipped, 0 failed.",
		));

	let registry = Registry::load(tmp.path().join(".compdoc/registry.json"))?;
	let entry = registry
		.get("Button")
		.unwrap_or_else(|| panic!("missing entry"));
	assert_eq!(entry.documentation_version, "1.0.0");
	assert!(tmp.path().join("docs/components/button.md").exists());

	Ok(())
}

#[test]
fn generate_outdated_picks_up_version_bumps() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let button = write_file(tmp.path(), "src/components/ui/button.tsx", BUTTON_SOURCE);
	write_file(tmp.path(), "src/components/forms/input.tsx", INPUT_SOURCE);

	compdoc_cmd(tmp.path())
		.arg("generate")
		.arg("--all")
		.assert()
		.success();

	std::fs::write(&button, BUTTON_SOURCE.replace("@version 1.0.0", "@version 1.1.0"))?;

	compdoc_cmd(tmp.path())
		.arg("compare")
		.assert()
		.code(1)
		.stdout(predicate::str::contains("version_mismatch"));

	compdoc_cmd(tmp.path())
		.arg("generate")
		.arg("--outdated")
		.assert()
		.success()
		.stdout(predicate::str::contains(
			"Processed 1 component(s): 1 updated, 0 skipped, 0 failed.",
		));

	let page = std::fs::read_to_string(tmp.path().join("docs/components/button.md"))?;
	assert!(page.contains("| Version | `1.1.0` |"));

	compdoc_cmd(tmp.path())
		.arg("compare")
		.assert()
		.success();

	Ok(())
}

#[test]
fn generate_all_honours_config() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_file(
		tmp.path(),
		"compdoc.toml",
		"[output]\ndir = \"site/components\"\n\n[sources]\ninclude = [\"ui/**/*.tsx\"]\nexclude = \
		 [\"**/*.stories.tsx\"]\n",
	);
	write_file(tmp.path(), "ui/button.tsx", BUTTON_SOURCE);
	write_file(tmp.path(), "ui/button.stories.tsx", BUTTON_SOURCE);
	write_file(tmp.path(), "src/components/input.tsx", INPUT_SOURCE);

	compdoc_cmd(tmp.path())
		.arg("generate")
		.arg("--all")
		.assert()
		.success()
		.stdout(predicate::str::contains("Processed 1 component(s)"));

	assert!(tmp.path().join("site/components/button.md").exists());
	assert!(!tmp.path().join("site/components/input.md").exists());

	Ok(())
}

#[test]
fn generate_all_ignores_test_files_by_default() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_file(tmp.path(), "src/components/button.tsx", BUTTON_SOURCE);
	write_file(
		tmp.path(),
		"src/components/button.test.tsx",
		"import { Button } from './button'\n",
	);

	compdoc_cmd(tmp.path())
		.arg("generate")
		.arg("--all")
		.assert()
		.success()
		.stdout(predicate::str::contains(
			"Processed 1 component(s): 1 updated, 0 skipped, 0 failed.",
		));

	let registry = Registry::load(tmp.path().join(".compdoc/registry.json"))?;
	let entry = registry
		.get("Button")
		.unwrap_or_else(|| panic!("missing entry"));
	assert!(entry.file_path.ends_with("src/components/button.tsx"));

	Ok(())
}

#[test]
fn generate_all_uses_custom_template() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_file(tmp.path(), "src/components/button.tsx", BUTTON_SOURCE);
	write_file(
		tmp.path(),
		".compdoc/templates/component.md",
		"{{name}} v{{version}}\n{{#props}}- {{name}}\n{{/props}}",
	);

	compdoc_cmd(tmp.path())
		.arg("generate")
		.arg("--all")
		.assert()
		.success();

	let page = std::fs::read_to_string(tmp.path().join("docs/components/button.md"))?;
	assert_eq!(page, "Button v1.0.0\n- disabled\n- size\n");

	Ok(())
}

#[test]
fn generate_all_reports_skipped_files() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_file(tmp.path(), "src/components/button.tsx", BUTTON_SOURCE);
	write_file(tmp.path(), "src/components/_.tsx", "const x = 1\n");

	compdoc_cmd(tmp.path())
		.arg("generate")
		.arg("--all")
		.assert()
		.success()
		.stdout(predicate::str::contains("1 updated, 1 skipped, 0 failed"))
		.stderr(predicate::str::contains("skipped src/components/_.tsx"));

	Ok(())
}
