//! Inline cross-reference roles
//!
//! MyST roles look like `` {role}`argument` ``. Plain markdown has nowhere to
//! point them, so they are replaced with readable text or dropped:
//!
//! | Role | Output |
//! |------|--------|
//! | `{doc}`Text <path>`` | `Text` |
//! | `{doc}`path`` | `path` |
//! | `{eq}`label`` | phrase from the [`LabelResolver`] |
//! | `{ref}`target`` | removed |
//! | `{cite}`key`` | removed |

use crate::labels::LabelResolver;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static DOC_WITH_TARGET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{doc\}`([^<`]*?)\s*<[^>`]*>`").unwrap());

static DOC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{doc\}`([^`]*)`").unwrap());

static EQ_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"equations \{eq\}`[^`]*` and \{eq\}`[^`]*`").unwrap()
});

static EQ_CAPITALIZED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Equation \{eq\}`([^`]*)`").unwrap());

static EQ: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{eq\}`([^`]*)`").unwrap());

static REF: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{ref\}`[^`]*`").unwrap());

static CITE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{cite(?::[A-Za-z]+)?\}`[^`]*`").unwrap());

/// Phrase used for two equations referenced together
pub const EQUATION_PAIR_PHRASE: &str = "these two equations";

/// Capitalize a phrase that starts a sentence
///
/// Numbered phrases (`equation (j1)`) get their leading word capitalized,
/// anything else has its first character uppercased. The rest of the phrase
/// is kept as is, so proper nouns survive.
pub fn capitalize_phrase(phrase: &str) -> String {
    if phrase.starts_with("equation (") {
        return phrase.replacen("equation", "Equation", 1);
    }

    let mut chars = phrase.chars();
    match chars.next() {
        Some(first) if first.is_lowercase() => first.to_uppercase().chain(chars).collect(),
        _ => phrase.to_string(),
    }
}

/// Replace every cross-reference role in the document
///
/// The pair form `equations {eq}`a` and {eq}`b`` is collapsed before single
/// references are resolved, and `Equation {eq}`a`` is resolved before the
/// lowercase form so the sentence keeps its capital letter.
pub fn resolve_cross_references(content: &str, resolver: &dyn LabelResolver) -> String {
    let content = DOC_WITH_TARGET.replace_all(content, "${1}");
    let content = DOC.replace_all(&content, "${1}");
    let content = EQ_PAIR.replace_all(&content, EQUATION_PAIR_PHRASE);
    let content = EQ_CAPITALIZED.replace_all(&content, |caps: &Captures| {
        capitalize_phrase(resolver.resolve(&caps[1]))
    });
    let content = EQ.replace_all(&content, |caps: &Captures| {
        resolver.resolve(&caps[1]).to_string()
    });
    let content = REF.replace_all(&content, "");
    CITE.replace_all(&content, "").into_owned()
}
