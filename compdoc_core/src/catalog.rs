//! Static prose used when composing documentation: categories, tags,
//! descriptions, related components and accessibility notes.

use std::path::Path;

const PATH_CATEGORIES: &[(&str, &str)] = &[
	("ui", "UI Primitives"),
	("primitives", "UI Primitives"),
	("forms", "Forms"),
	("form", "Forms"),
	("layout", "Layout"),
	("navigation", "Navigation"),
	("nav", "Navigation"),
	("feedback", "Feedback"),
	("data-display", "Data Display"),
	("display", "Data Display"),
	("overlay", "Overlays"),
	("overlays", "Overlays"),
	("typography", "Typography"),
];

const DEFAULT_CATEGORY: &str = "General";

const TAGS: &[(&str, &[&str])] = &[
	("Button", &["action", "interactive", "form"]),
	("Input", &["form", "text", "interactive"]),
	("Textarea", &["form", "text", "multiline"]),
	("Select", &["form", "choice", "interactive"]),
	("Checkbox", &["form", "boolean", "interactive"]),
	("Switch", &["form", "boolean", "toggle"]),
	("RadioGroup", &["form", "choice"]),
	("Label", &["form", "text"]),
	("Dialog", &["overlay", "modal", "focus-trap"]),
	("Popover", &["overlay", "floating"]),
	("Tooltip", &["overlay", "hint"]),
	("Card", &["layout", "container"]),
	("Badge", &["status", "label"]),
	("Alert", &["feedback", "status"]),
	("Tabs", &["navigation", "disclosure"]),
	("Avatar", &["media", "identity"]),
];

const DESCRIPTIONS: &[(&str, &str)] = &[
	(
		"Button",
		"Triggers an action or event, such as submitting a form or opening a dialog.",
	),
	("Input", "A single-line text field for user input."),
	("Textarea", "A multi-line text field for longer user input."),
	("Select", "Lets users pick one value from a list of options."),
	("Checkbox", "A control that toggles between checked and unchecked."),
	("Switch", "A toggle between two mutually exclusive states."),
	("RadioGroup", "A set of options where only one can be selected."),
	("Label", "Renders an accessible label associated with a control."),
	(
		"Dialog",
		"A window overlaid on the primary content that interrupts the user.",
	),
	("Popover", "Displays rich content in a portal, anchored to a trigger."),
	(
		"Tooltip",
		"A short hint shown when an element receives hover or keyboard focus.",
	),
	("Card", "Groups related content and actions in a contained surface."),
	("Badge", "A small label for status, counts or categorisation."),
	("Alert", "Displays a callout for important, non-interruptive messages."),
	(
		"Tabs",
		"Layered sections of content, shown one panel at a time.",
	),
	("Avatar", "An image element with a fallback for representing a user."),
];

const RELATED: &[(&str, &[&str])] = &[
	("Button", &["Dialog", "Tooltip"]),
	("Input", &["Label", "Textarea", "Select"]),
	("Textarea", &["Input", "Label"]),
	("Select", &["Input", "RadioGroup"]),
	("Checkbox", &["Switch", "RadioGroup", "Label"]),
	("Switch", &["Checkbox", "Label"]),
	("RadioGroup", &["Checkbox", "Select"]),
	("Label", &["Input", "Checkbox"]),
	("Dialog", &["Popover", "Button"]),
	("Popover", &["Dialog", "Tooltip"]),
	("Tooltip", &["Popover", "Button"]),
	("Card", &["Badge", "Avatar"]),
	("Badge", &["Card", "Alert"]),
	("Alert", &["Badge", "Dialog"]),
	("Tabs", &["Card"]),
	("Avatar", &["Card", "Badge"]),
];

const ACCESSIBILITY: &[(&str, &[&str])] = &[
	(
		"Button",
		&[
			"Rendered as a native `button`, so Enter and Space activate it.",
			"Give icon-only buttons an `aria-label`.",
		],
	),
	(
		"Input",
		&[
			"Pair with a `Label` or provide an `aria-label`.",
			"Expose validation errors with `aria-invalid` and `aria-describedby`.",
		],
	),
	(
		"Checkbox",
		&[
			"Toggles with Space.",
			"Announces checked, unchecked and indeterminate states.",
		],
	),
	(
		"Switch",
		&["Uses `role=\"switch\"` and toggles with Space and Enter."],
	),
	(
		"Dialog",
		&[
			"Focus is trapped inside while open and restored on close.",
			"Escape closes the dialog.",
			"Provide a title so the dialog is announced.",
		],
	),
	(
		"Tooltip",
		&[
			"Opens on keyboard focus as well as hover.",
			"Keep content short and never place interactive elements inside.",
		],
	),
	(
		"Tabs",
		&["Arrow keys move between tabs, Tab moves into the active panel."],
	),
];

const DEFAULT_ACCESSIBILITY: &str =
	"Follows WAI-ARIA authoring practices for keyboard and screen reader support.";

fn lookup<T: Copy>(table: &[(&str, T)], name: &str) -> Option<T> {
	table
		.iter()
		.find(|(key, _)| *key == name)
		.map(|(_, value)| *value)
}

/// Category from the nearest directory that names one, else `General`.
pub fn category_for_path(path: &Path) -> &'static str {
	path.parent()
		.into_iter()
		.flat_map(Path::components)
		.rev()
		.filter_map(|component| component.as_os_str().to_str())
		.find_map(|segment| lookup(PATH_CATEGORIES, &segment.to_ascii_lowercase()))
		.unwrap_or(DEFAULT_CATEGORY)
}

pub fn tags_for(name: &str) -> Vec<&'static str> {
	lookup(TAGS, name).map_or_else(|| vec!["component"], |tags| tags.to_vec())
}

pub fn description_for(name: &str) -> String {
	lookup(DESCRIPTIONS, name).map_or_else(
		|| format!("A reusable {name} component."),
		ToString::to_string,
	)
}

pub fn related_to(name: &str) -> &'static [&'static str] {
	lookup(RELATED, name).unwrap_or(&[])
}

pub fn accessibility_notes(name: &str) -> Vec<&'static str> {
	lookup(ACCESSIBILITY, name).map_or_else(|| vec![DEFAULT_ACCESSIBILITY], |notes| notes.to_vec())
}
