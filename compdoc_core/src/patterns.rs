//! Compiled source patterns shared by the extractor and the metadata scanner.
//!
//! These only locate anchors. Anything that depends on nesting is handed to
//! the depth-aware helpers in [`crate::scanner`].

use std::sync::LazyLock;

use regex::Regex;

fn compile(source: &str) -> Regex {
	Regex::new(source)
		.unwrap_or_else(|error| panic!("built-in pattern `{source}` failed to compile: {error}"))
}

// Declarations.
pub(crate) static INTERFACE_DECLARATION: LazyLock<Regex> =
	LazyLock::new(|| compile(r"\binterface\s+([A-Za-z_$][\w$]*)\s*(<)?"));
pub(crate) static ALIAS_DECLARATION: LazyLock<Regex> =
	LazyLock::new(|| compile(r"\btype\s+([A-Za-z_$][\w$]*)\s*(<)?"));
pub(crate) static BUILDER_CALL: LazyLock<Regex> = LazyLock::new(|| compile(r"\bcva\s*\("));
pub(crate) static VARIANTS_KEY: LazyLock<Regex> =
	LazyLock::new(|| compile(r"\bvariants\s*:\s*\{"));

// Fields and entries.
pub(crate) static FIELD: LazyLock<Regex> = LazyLock::new(|| {
	compile(r#"(?s)^(?:readonly\s+)?([A-Za-z_$][\w$]*|'[^']*'|"[^"]*")\s*(\?)?\s*:(.*)$"#)
});
pub(crate) static KEYED_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
	compile(r#"(?s)^([A-Za-z_$][\w$-]*|'[^']*'|"[^"]*"|\d+)\s*:\s*(.*)$"#)
});
pub(crate) static DEFAULT_MARKER: LazyLock<Regex> =
	LazyLock::new(|| compile(r"(?s)/\*+\s*@default\s+(.*?)\s*\*/"));
pub(crate) static TRAILING_UNDEFINED: LazyLock<Regex> =
	LazyLock::new(|| compile(r"\s*\|\s*undefined\s*$"));
pub(crate) static ATTRIBUTE_BUNDLE: LazyLock<Regex> = LazyLock::new(|| {
	compile(
		r"(?:React\.)?(?:[A-Z][A-Za-z]*)?HTMLAttributes<[^<>]*>|(?:React\.)?ComponentProps(?:WithoutRef|WithRef)?<[^<>]*>",
	)
});

// Component metadata.
pub(crate) static EXPORTED_COMPONENT: LazyLock<Regex> = LazyLock::new(|| {
	compile(r"\bexport\s+(?:default\s+)?(?:async\s+)?(?:function|const|let|class)\s+([A-Z][A-Za-z0-9_]*)")
});
pub(crate) static WRAPPED_COMPONENT: LazyLock<Regex> = LazyLock::new(|| {
	compile(r"\bconst\s+([A-Z][A-Za-z0-9_]*)\s*(?::[^=]+)?=\s*(?:React\.)?(?:forwardRef|memo)\b")
});
pub(crate) static VERSION_TAG: LazyLock<Regex> =
	LazyLock::new(|| compile(r"@version\s+v?(\d+(?:\.\d+)*(?:[-+][0-9A-Za-z.-]+)?)"));
pub(crate) static VERSION_CONSTANT: LazyLock<Regex> = LazyLock::new(|| {
	compile(r#"\bexport\s+const\s+[A-Za-z_]*VERSION\s*(?::\s*string\s*)?=\s*['"`]v?([^'"`]+)['"`]"#)
});
pub(crate) static VERSION_PROPERTY: LazyLock<Regex> =
	LazyLock::new(|| compile(r#"\.version\s*=\s*['"`]v?([^'"`]+)['"`]"#));
pub(crate) static VERSION_COMMENT: LazyLock<Regex> = LazyLock::new(|| {
	compile(r"(?im)(?://|/\*|^\s*\*)\s*(?:version:?\s*v?|v)(\d+\.\d+\.\d+(?:-[0-9A-Za-z.-]+)?)")
});
pub(crate) static LAST_MODIFIED_TAG: LazyLock<Regex> =
	LazyLock::new(|| compile(r"@(?:lastModified|updated)\s+([^\s*]+)"));
pub(crate) static STATUS_TAG: LazyLock<Regex> = LazyLock::new(|| {
	compile(r"(?i)@status\s+(stable|beta|alpha|deprecated|experimental)\b")
});
pub(crate) static DEPRECATED_TAG: LazyLock<Regex> = LazyLock::new(|| compile(r"@deprecated\b"));
pub(crate) static EXPERIMENTAL_TAG: LazyLock<Regex> =
	LazyLock::new(|| compile(r"@experimental\b"));
pub(crate) static EXPORTED_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
	compile(
		r"\bexport\s+(?:default\s+)?(?:declare\s+)?(?:async\s+)?(?:function\*?|const|let|var|class|interface|type|enum)\s+([A-Za-z_$][\w$]*)",
	)
});
pub(crate) static EXPORT_LIST: LazyLock<Regex> =
	LazyLock::new(|| compile(r"\bexport\s+(?:type\s+)?\{([^}]*)\}"));
