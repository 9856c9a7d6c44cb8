//! myst2md-core: Core library for converting MyST markdown to plain markdown
//!
//! This crate provides:
//! - Equation label extraction and phrase resolution
//! - Block directive rewrites (notes, math, exercises, figures, ...)
//! - Inline cross-reference resolution
//! - Jupytext header normalization
//! - The ordered rewrite pipeline tying them together
//!
//! # Example
//!
//! ```
//! use myst2md_core::{Variant, convert};
//!
//! let plain = convert("```{note}\nWatch out.\n```\n", Variant::Enhanced);
//! assert_eq!(plain, "**Note:** Watch out.\n\n");
//! ```

pub mod directives;
pub mod file;
pub mod header;
pub mod labels;
pub mod pipeline;
pub mod xref;

pub use file::{ConvertError, ConvertSummary, convert_file};
pub use labels::{
    FALLBACK_PHRASE, FallbackPhrase, LabelMap, LabelResolver, describe_label,
    extract_equation_labels,
};
pub use pipeline::{Stage, Variant, convert, convert_with, normalize_line_endings};
