use compdoc_core::AnyEmptyResult;
use predicates::prelude::*;

mod common;

use common::BUTTON_SOURCE;
use common::INPUT_SOURCE;
use common::compdoc_cmd;
use common::write_file;

#[test]
fn compare_reports_missing_docs() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_file(tmp.path(), "src/components/ui/button.tsx", BUTTON_SOURCE);

	compdoc_cmd(tmp.path())
		.arg("compare")
		.assert()
		.code(1)
		.stdout(predicate::str::contains("Button"))
		.stdout(predicate::str::contains("missing_docs"));

	assert!(!tmp.path().join(".compdoc/registry.json").exists());

	Ok(())
}

#[test]
fn compare_passes_after_generate() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_file(tmp.path(), "src/components/ui/button.tsx", BUTTON_SOURCE);
	write_file(tmp.path(), "src/components/forms/input.tsx", INPUT_SOURCE);

	compdoc_cmd(tmp.path())
		.arg("generate")
		.arg("--all")
		.assert()
		.success();

	compdoc_cmd(tmp.path())
		.arg("compare")
		.assert()
		.success()
		.stdout(predicate::str::contains(
			"Compare passed: 2 component(s) documented and up to date.",
		));

	Ok(())
}

#[test]
fn compare_detects_version_and_content_changes() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let button = write_file(tmp.path(), "src/components/ui/button.tsx", BUTTON_SOURCE);
	let input = write_file(tmp.path(), "src/components/forms/input.tsx", INPUT_SOURCE);

	compdoc_cmd(tmp.path())
		.arg("generate")
		.arg("--all")
		.assert()
		.success();

	std::fs::write(&button, BUTTON_SOURCE.replace("@version 1.0.0", "@version 1.1.0"))?;
	std::fs::write(&input, INPUT_SOURCE.replace("value: string", "value: string\n  id: string"))?;

	compdoc_cmd(tmp.path())
		.arg("compare")
		.assert()
		.code(1)
		.stdout(predicate::str::contains("version_mismatch"))
		.stdout(predicate::str::contains("hash_mismatch"))
		.stdout(predicate::str::contains("2 of 2 component(s) need updates."));

	Ok(())
}

#[test]
fn compare_json_output() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_file(tmp.path(), "src/components/ui/button.tsx", BUTTON_SOURCE);

	let output = compdoc_cmd(tmp.path())
		.arg("compare")
		.arg("--format")
		.arg("json")
		.output()?;

	assert_eq!(output.status.code(), Some(1));

	let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
	assert_eq!(json["ok"], false);
	assert_eq!(json["results"][0]["identity"], "Button");
	assert_eq!(json["results"][0]["reason"], "missing_docs");
	assert_eq!(json["results"][0]["needsUpdate"], true);
	assert_eq!(json["results"][0]["versionDiff"]["current"], "1.0.0");
	assert_eq!(json["results"][0]["priority"], "high");
	assert_eq!(json["problems"], serde_json::json!([]));

	Ok(())
}

#[test]
fn compare_with_no_sources_passes() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	compdoc_cmd(tmp.path())
		.arg("compare")
		.assert()
		.success()
		.stdout(predicate::str::contains("0 component(s)"));

	Ok(())
}

#[test]
fn corrupt_registry_is_not_fatal() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_file(tmp.path(), "src/components/ui/button.tsx", BUTTON_SOURCE);
	write_file(tmp.path(), ".compdoc/registry.json", "{ not json");

	compdoc_cmd(tmp.path())
		.arg("compare")
		.assert()
		.code(1)
		.stdout(predicate::str::contains("missing_docs"))
		.stderr(predicate::str::contains("registry store is corrupt"));

	Ok(())
}

#[test]
fn invalid_config_is_fatal() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_file(tmp.path(), "compdoc.toml", "[output\n");

	compdoc_cmd(tmp.path())
		.arg("compare")
		.assert()
		.code(2)
		.stderr(predicate::str::contains("failed to parse config file"));

	Ok(())
}
