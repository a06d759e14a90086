#![allow(dead_code)]

use std::path::Path;
use std::path::PathBuf;

use assert_cmd::Command;

pub const BUTTON_SOURCE: &str = "/** @version 1.0.0 */
export interface ButtonProps {
  disabled?: boolean
  size?: 'sm' | 'lg'
}

export function Button(props: ButtonProps) {
  return null
}
";

pub const INPUT_SOURCE: &str = "/** @version 0.2.0 @status beta */
export type InputProps = {
  value: string
}

export const Input = (props: InputProps) => null
";

pub fn compdoc_cmd(root: &Path) -> Command {
	let mut cmd =
		Command::cargo_bin("compdoc").unwrap_or_else(|e| panic!("missing compdoc binary: {e}"));
	cmd.env("NO_COLOR", "1")
		.env_remove("RUST_LOG")
		.arg("--path")
		.arg(root);
	cmd
}

/// Write `content` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) -> PathBuf {
	let path = root.join(relative);
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent).unwrap_or_else(|e| panic!("create dir: {e}"));
	}
	std::fs::write(&path, content).unwrap_or_else(|e| panic!("write {relative}: {e}"));
	path
}
