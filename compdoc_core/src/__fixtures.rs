use std::path::PathBuf;

use crate::ComponentStatus;
use crate::ComponentVersionSnapshot;
use crate::PropDefinition;
use crate::VariantDefinition;
use crate::VariantOption;

pub(crate) const BUTTON_SOURCE: &str = r#"import * as React from "react"
import { Slot } from "@radix-ui/react-slot"
import { cva, type VariantProps } from "class-variance-authority"

import { cn } from "@/lib/utils"

/**
 * Displays a button or a component that looks like a button.
 * @version 2.1.0
 */
const buttonVariants = cva(
  "inline-flex items-center justify-center rounded-md text-sm font-medium",
  {
    variants: {
      variant: {
        default: "bg-primary text-primary-foreground",
        destructive: "bg-destructive text-destructive-foreground",
        outline: "border border-input bg-background",
        ghost: "hover:bg-accent",
      },
      size: {
        default: "h-10 px-4 py-2",
        sm: "h-9 rounded-md px-3",
        lg: "h-11 rounded-md px-8",
        icon: "h-10 w-10",
      },
    },
    defaultVariants: {
      variant: "default",
      size: "default",
    },
  }
)

export interface ButtonProps
  extends React.ButtonHTMLAttributes<HTMLButtonElement>,
    VariantProps<typeof buttonVariants> {
  asChild?: boolean
  /** Shows a spinner and disables the button. Don't nest buttons. */
  loading?: boolean /* @default false */
  onPress?: (event: React.MouseEvent<HTMLButtonElement>) => void
}

const Button = React.forwardRef<HTMLButtonElement, ButtonProps>(
  ({ className, variant, size, asChild = false, ...props }, ref) => {
    const Comp = asChild ? Slot : "button"
    return <Comp className={cn(buttonVariants({ variant, size, className }))} ref={ref} {...props} />
  }
)
Button.displayName = "Button"

export { Button, buttonVariants }
"#;

pub(crate) const INPUT_SOURCE: &str = r#"import * as React from "react"

/**
 * @version 1.0.0
 * @status beta
 * @lastModified 2024-03-01
 */
export type InputProps = {
  value?: string
  onChange?: (value: string) => void
  size?: number;
  variant?: "default" | "filled" | undefined;
  inputProps?: React.InputHTMLAttributes<HTMLInputElement>;
  label: string
}

export function Input({ value, onChange }: InputProps) {
  return <input value={value} onChange={(e) => onChange?.(e.target.value)} />
}
"#;

pub(crate) const DEPRECATED_SOURCE: &str = r#"/**
 * @deprecated Use Button instead.
 */
export const LegacyButton = () => null
export const VERSION = "0.9.0"
"#;

pub(crate) fn button_props() -> Vec<PropDefinition> {
	vec![
		PropDefinition {
			name: "asChild".into(),
			raw_type: "boolean".into(),
			required: false,
			default_value: None,
			description: "Render as the child element, merging props onto it".into(),
		},
		PropDefinition {
			name: "loading".into(),
			raw_type: "boolean".into(),
			required: false,
			default_value: Some("false".into()),
			description: "Whether to show a loading state".into(),
		},
		PropDefinition {
			name: "onPress".into(),
			raw_type: "(event: React.MouseEvent<HTMLButtonElement>) => void".into(),
			required: false,
			default_value: None,
			description: "Callback function for `onPress`".into(),
		},
	]
}

fn option(value: &str, description: &str) -> VariantOption {
	VariantOption {
		value: value.into(),
		description: description.into(),
	}
}

pub(crate) fn button_variants() -> Vec<VariantDefinition> {
	vec![
		VariantDefinition {
			name: "variant".into(),
			options: vec![
				option("default", "Default styling"),
				option("destructive", "Signals a dangerous or destructive action"),
				option("outline", "Bordered style with a transparent background"),
				option("ghost", "Minimal style without background or border"),
			],
			default_value: Some("default".into()),
		},
		VariantDefinition {
			name: "size".into(),
			options: vec![
				option("default", "Default styling"),
				option("sm", "Small size"),
				option("lg", "Large size"),
				option("icon", "Square sizing for icon-only content"),
			],
			default_value: Some("default".into()),
		},
	]
}

/// A snapshot with fixed metadata, for registry tests.
pub(crate) fn snapshot_at(identity: &str, version: &str, content_hash: &str) -> ComponentVersionSnapshot {
	ComponentVersionSnapshot {
		identity: identity.into(),
		version: version.into(),
		last_modified: "2024-01-01T00:00:00+00:00".into(),
		content_hash: content_hash.into(),
		size_bytes: 128,
		exports: vec![identity.into()],
		status: ComponentStatus::Stable,
		file_path: PathBuf::from(format!("src/components/{}.tsx", identity.to_lowercase())),
	}
}
