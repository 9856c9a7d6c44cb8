//! Jupytext front matter normalization

use regex::Regex;
use std::sync::LazyLock;

static MYST_FORMAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^([ \t]*)format_name: myst[ \t]*\n[ \t]*format_version: [^\n]*(?:\n|\z)")
        .unwrap()
});

/// Declare the document as plain markdown in its jupytext header
///
/// ```yaml
/// jupytext:
///   text_representation:
///     format_name: myst
///     format_version: 0.13
/// ```
///
/// becomes `format_name: markdown` with the version line removed. Other
/// header fields are untouched.
pub fn normalize_header(content: &str) -> String {
    MYST_FORMAT
        .replace_all(content, "${1}format_name: markdown\n")
        .into_owned()
}
