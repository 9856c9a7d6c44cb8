//! Equation label extraction and resolution
//!
//! Cross-references such as `{eq}`bell1_mccall`` point at labeled math blocks:
//!
//! ````markdown
//! ```{math}
//! :label: bell1_mccall
//!
//! v_e(w) = u(w) + \beta [ (1-\alpha) v_e(w) + \alpha h ]
//! ```
//! ````
//!
//! Plain markdown has no equation numbering, so each reference is replaced by a
//! short phrase describing the equation. The phrase is derived from the label
//! alone using an ordered rule table.

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Phrase used for any equation reference that cannot be described
pub const FALLBACK_PHRASE: &str = "the equation above";

/// A `{math}` block with a `:label:` line and a blank line before the body.
/// Group 1 is the label, group 2 the body. Shared with the math stage so every
/// extracted label belongs to a block that stage converts.
pub(crate) static LABELED_MATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?ms)^```\{math\}[ \t]*\n:label:[ \t]*([^\n]*?)[ \t]*\n\n(.*?)\n```[ \t]*$")
        .unwrap()
});

/// Resolves an equation label to the phrase that replaces references to it
pub trait LabelResolver {
    fn resolve(&self, label: &str) -> &str;
}

/// Resolver that describes every equation as [`FALLBACK_PHRASE`]
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackPhrase;

impl LabelResolver for FallbackPhrase {
    fn resolve(&self, _label: &str) -> &str {
        FALLBACK_PHRASE
    }
}

/// How a rule inspects a label
#[derive(Debug, Clone, Copy)]
enum LabelPattern {
    Contains(&'static str),
    ContainsAny(&'static [&'static str]),
    StartsWith(&'static str),
    /// Case-insensitive substring; the needle must be lowercase
    ContainsIgnoreCase(&'static str),
}

impl LabelPattern {
    fn matches(self, label: &str) -> bool {
        match self {
            LabelPattern::Contains(needle) => label.contains(needle),
            LabelPattern::ContainsAny(needles) => needles.iter().any(|n| label.contains(n)),
            LabelPattern::StartsWith(prefix) => label.starts_with(prefix),
            LabelPattern::ContainsIgnoreCase(needle) => {
                label.to_ascii_lowercase().contains(needle)
            }
        }
    }
}

/// Label rules, evaluated top to bottom. The first match wins, so the generic
/// `bell` rule has to stay below every `bell*` rule that refines it.
const PHRASE_RULES: &[(LabelPattern, &str)] = &[
    (
        LabelPattern::ContainsAny(&["obj_model", "objective"]),
        "the objective function",
    ),
    (LabelPattern::Contains("odu_pv"), "the Bellman equation"),
    (LabelPattern::Contains("reswage"), "the reservation wage equation"),
    (LabelPattern::StartsWith("j1"), "equation (j1)"),
    (LabelPattern::StartsWith("j2"), "equation (j2)"),
    (LabelPattern::StartsWith("j3"), "equation (j3)"),
    (LabelPattern::Contains("bell1_mccall"), "the Bellman equation for v_e"),
    (LabelPattern::Contains("bell2_mccall"), "the Bellman equation for v_u"),
    (LabelPattern::Contains("bell01_mccall"), "the equation for v_e"),
    (LabelPattern::Contains("bell02_mccall"), "the equation for h"),
    (LabelPattern::Contains("bell_scalar"), "the scalar equation for h"),
    (LabelPattern::Contains("bell_iter"), "the iteration rule"),
    (LabelPattern::Contains("bell_v_e_final"), "the expression for v_e"),
    (LabelPattern::ContainsIgnoreCase("bell"), "the Bellman equation"),
    (LabelPattern::Contains("defh"), "the definition of h"),
    (LabelPattern::Contains("v_e_closed"), "the closed-form expression for v_e"),
];

/// Derive the descriptive phrase for an equation label
///
/// Returns [`FALLBACK_PHRASE`] when no rule matches.
pub fn describe_label(label: &str) -> &'static str {
    PHRASE_RULES
        .iter()
        .find(|(pattern, _)| pattern.matches(label))
        .map_or(FALLBACK_PHRASE, |&(_, phrase)| phrase)
}

/// Mapping from equation labels to descriptive phrases
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LabelMap {
    labels: BTreeMap<String, String>,
}

impl LabelMap {
    /// Build the map from every labeled math block in a document
    pub fn from_document(content: &str) -> Self {
        let labels = LABELED_MATH
            .captures_iter(content)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .filter(|label| !label.is_empty())
            .map(|label| (label.to_string(), describe_label(label).to_string()))
            .collect();

        Self { labels }
    }

    /// Look up the phrase for a label
    pub fn get(&self, label: &str) -> Option<&str> {
        self.labels.get(label).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterate over `(label, phrase)` pairs in label order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.labels.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl LabelResolver for LabelMap {
    fn resolve(&self, label: &str) -> &str {
        self.get(label).unwrap_or(FALLBACK_PHRASE)
    }
}

/// Extract equation labels from a document
///
/// Only blocks of the `math` directive are considered. The document is not
/// modified.
pub fn extract_equation_labels(content: &str) -> LabelMap {
    let map = LabelMap::from_document(content);
    tracing::debug!(labels = map.len(), "Extracted equation labels");
    map
}
