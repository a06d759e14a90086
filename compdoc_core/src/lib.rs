//! `compdoc_core` is the core library for compdoc, a generator that extracts structural metadata (props, variants and versions) from component source files and keeps their documentation in sync. It provides the structural scanner, the declaration extractor, the version registry and diff engine, the template renderer, and the documentation generator that composes them.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Component source file
//!   → Scanner (balanced-delimiter extraction, depth-aware splitting)
//!   → Extractor (props from `*Props` declarations, variants from `cva(...)` calls)
//!   → Metadata (identity, version, status, exports, content hash → snapshot)
//!   → Registry (upsert snapshot, classify the change, compare with documented state)
//!   → Generator (build context, render template, write artifact, mark documented)
//! ```
//!
//! ## Modules
//!
//! - [`scanner`]: Delimiter-balanced substring extraction and top-level splitting that ignore delimiters inside quoted literals.
//! - [`catalog`]: Static category, tag, description, related-component and accessibility tables.
//! - [`config`]: Configuration loading from `compdoc.toml`.
//!
//! ## Key Types
//!
//! - [`Extraction`]: Props, variants and unparsed-field diagnostics for one source file.
//! - [`ComponentVersionSnapshot`]: Metadata computed fresh from current source.
//! - [`Registry`]: The persisted identity → [`VersionEntry`] map with explicit `load`/`save`.
//! - [`ComparisonResult`]: Whether a component's documentation needs regenerating, and why.
//! - [`TemplateContext`]: Closed, tagged values consumed by [`render`].
//! - [`DocGenerator`]: The orchestrator producing one artifact per component.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use compdoc_core::CompdocConfig;
//! use compdoc_core::DocGenerator;
//! use compdoc_core::GeneratorOptions;
//! use std::path::Path;
//! use std::path::PathBuf;
//!
//! let root = Path::new(".");
//! let config = CompdocConfig::load(root).unwrap();
//! let options = GeneratorOptions::from_config(root, config.as_ref());
//! let mut generator = DocGenerator::new(options).unwrap();
//!
//! let summary = generator.generate_all(&[PathBuf::from("src/components/ui/button.tsx")]);
//! println!("{} updated, {} failed", summary.updated, summary.errors);
//! ```

pub use config::*;
pub use error::*;
pub use extractor::*;
pub use generator::*;
pub use metadata::*;
pub use registry::*;
pub use template::*;
pub use version::*;

pub mod catalog;
pub mod config;
#[allow(unused_assignments)]
mod error;
mod extractor;
mod generator;
mod metadata;
pub(crate) mod patterns;
mod registry;
pub mod scanner;
mod template;
mod version;

#[cfg(test)]
mod __fixtures;
