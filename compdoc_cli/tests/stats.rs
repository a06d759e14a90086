use compdoc_core::AnyEmptyResult;
use predicates::prelude::*;

mod common;

use common::BUTTON_SOURCE;
use common::INPUT_SOURCE;
use common::compdoc_cmd;
use common::write_file;

#[test]
fn stats_on_empty_registry() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	compdoc_cmd(tmp.path())
		.arg("stats")
		.assert()
		.success()
		.stdout(predicate::str::contains("Components       0"))
		.stdout(predicate::str::contains("Coverage         0.0%"));

	Ok(())
}

#[test]
fn stats_after_generate() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_file(tmp.path(), "src/components/ui/button.tsx", BUTTON_SOURCE);
	write_file(tmp.path(), "src/components/forms/input.tsx", INPUT_SOURCE);

	compdoc_cmd(tmp.path())
		.arg("generate")
		.arg("--all")
		.assert()
		.success();

	let output = compdoc_cmd(tmp.path())
		.arg("stats")
		.arg("--format")
		.arg("json")
		.output()?;
	assert!(output.status.success());

	let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
	assert_eq!(json["total"], 2);
	assert_eq!(json["documented"], 2);
	assert_eq!(json["outdated"], 0);
	assert_eq!(json["coveragePercent"], 100.0);

	Ok(())
}
