//! Rewrite pipeline
//!
//! Runs the directive, cross-reference and header rewrites over a document in
//! a fixed order. Later stages rely on earlier ones: cross-references are
//! resolved only after code cells and notes have been flattened, and equation
//! labels are collected before the math stage throws them away.
//!
//! Every pattern expects `\n` line endings, so CRLF input is normalized before
//! the first stage and the output always uses `\n`.

use std::borrow::Cow;

use crate::directives;
use crate::header;
use crate::labels::{FallbackPhrase, LabelResolver, extract_equation_labels};
use crate::xref;

/// Which label strategy the pipeline uses for `{eq}` references
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Variant {
    /// Every equation reference becomes "the equation above"
    Baseline,
    /// Equation labels are collected first and described individually
    #[default]
    Enhanced,
}

/// A single rewrite over the whole document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    RawBlocks,
    Contents,
    Epigraphs,
    CodeCells,
    IndexEntries,
    MathBlocks,
    Notes,
    Exercises,
    Figures,
    CrossReferences,
    LabelLines,
    Header,
}

impl Stage {
    /// Stages in the order the pipeline runs them
    pub const ORDER: [Stage; 12] = [
        Stage::RawBlocks,
        Stage::Contents,
        Stage::Epigraphs,
        Stage::CodeCells,
        Stage::IndexEntries,
        Stage::MathBlocks,
        Stage::Notes,
        Stage::Exercises,
        Stage::Figures,
        Stage::CrossReferences,
        Stage::LabelLines,
        Stage::Header,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Stage::RawBlocks => "raw",
            Stage::Contents => "contents",
            Stage::Epigraphs => "epigraph",
            Stage::CodeCells => "code-cell",
            Stage::IndexEntries => "index",
            Stage::MathBlocks => "math",
            Stage::Notes => "note",
            Stage::Exercises => "exercise",
            Stage::Figures => "figure",
            Stage::CrossReferences => "cross-reference",
            Stage::LabelLines => "label",
            Stage::Header => "header",
        }
    }

    /// Apply this stage to a document
    ///
    /// Only [`Stage::CrossReferences`] consults the resolver.
    pub fn apply(self, content: &str, resolver: &dyn LabelResolver) -> String {
        match self {
            Stage::RawBlocks => directives::remove_raw_blocks(content),
            Stage::Contents => directives::remove_contents(content),
            Stage::Epigraphs => directives::convert_epigraphs(content),
            Stage::CodeCells => directives::convert_code_cells(content),
            Stage::IndexEntries => directives::remove_index_entries(content),
            Stage::MathBlocks => directives::convert_math_blocks(content),
            Stage::Notes => directives::convert_notes(content),
            Stage::Exercises => directives::convert_exercises(content),
            Stage::Figures => directives::remove_figures(content),
            Stage::CrossReferences => xref::resolve_cross_references(content, resolver),
            Stage::LabelLines => directives::remove_label_lines(content),
            Stage::Header => header::normalize_header(content),
        }
    }
}

/// Convert a MyST document to plain markdown
pub fn convert(content: &str, variant: Variant) -> String {
    let content = normalize_line_endings(content);
    match variant {
        Variant::Baseline => convert_with(&content, &FallbackPhrase),
        Variant::Enhanced => {
            let labels = extract_equation_labels(&content);
            convert_with(&content, &labels)
        }
    }
}

/// Convert a MyST document, resolving equation references with `resolver`
pub fn convert_with(content: &str, resolver: &dyn LabelResolver) -> String {
    Stage::ORDER
        .iter()
        .fold(normalize_line_endings(content).into_owned(), |document, stage| {
            let rewritten = stage.apply(&document, resolver);
            tracing::debug!(
                stage = stage.name(),
                before = document.len(),
                after = rewritten.len(),
                "Applied stage"
            );
            rewritten
        })
}

/// Replace CRLF line endings with LF
pub fn normalize_line_endings(content: &str) -> Cow<'_, str> {
    if content.contains("\r\n") {
        Cow::Owned(content.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(content)
    }
}
