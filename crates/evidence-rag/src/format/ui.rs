//! Presentation helpers for the sources panel

use once_cell::sync::Lazy;
use regex::Regex;

static EXTENSION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.\w+$").expect("Invalid regex"));

pub const DEFAULT_LOCATION: &str = "Document excerpt";
pub const DEFAULT_SUPPORT: &str = "Contains relevant information that directly addresses the query.";

/// Query terms shorter than this carry no signal
const MIN_KEY_TERM_CHARS: usize = 4;

/// One rule of the support taxonomy: a query topic and the passage words that back it
struct SupportRule {
    query_topic: &'static str,
    passage_terms: &'static [&'static str],
    explanation: &'static str,
}

const SUPPORT_RULES: &[SupportRule] = &[
    SupportRule {
        query_topic: "treatment",
        passage_terms: &["treatment", "therapy", "medication"],
        explanation: "Provides treatment information relevant to the query.",
    },
    SupportRule {
        query_topic: "pathophysiology",
        passage_terms: &["mechanism", "pathology", "cause"],
        explanation: "Explains pathophysiological mechanisms relevant to the query.",
    },
    SupportRule {
        query_topic: "variant",
        passage_terms: &["variant", "type", "form"],
        explanation: "Describes disease variants mentioned in the query.",
    },
];

/// Title words that place a source in the location taxonomy, in priority order
const LOCATION_RULES: &[(&[&str], &str)] = &[
    (&["clinical", "trial"], "Clinical research findings"),
    (&["review"], "Literature review"),
    (&["guideline"], "Clinical guidelines"),
];

/// Readable title from a file name: extension dropped, separators spaced, words capitalised
pub fn readable_title(name: &str) -> String {
    let stem = EXTENSION.replace(name.trim(), "");
    stem.replace(['_', '-'], " ")
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Where in the literature a source sits, judged from its title
pub fn location_for(title: &str) -> &'static str {
    let title = title.to_lowercase();
    LOCATION_RULES
        .iter()
        .find(|(words, _)| words.iter().any(|w| title.contains(w)))
        .map(|(_, location)| *location)
        .unwrap_or(DEFAULT_LOCATION)
}

/// Query terms long enough to count, lowercased, deduplicated in query order
pub fn key_terms(query: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for term in query.to_lowercase().split_whitespace() {
        if term.chars().count() >= MIN_KEY_TERM_CHARS && !terms.iter().any(|t| t == term) {
            terms.push(term.to_string());
        }
    }
    terms
}

/// Why a passage supports the answer to `query`
pub fn why_it_supports(query: &str, passage: &str) -> String {
    let passage = passage.to_lowercase();
    let query_lower = query.to_lowercase();

    let matched: Vec<String> = key_terms(query)
        .into_iter()
        .filter(|term| passage.contains(term.as_str()))
        .collect();
    if !matched.is_empty() {
        return format!("Directly addresses {} mentioned in the query.", matched.join(", "));
    }

    SUPPORT_RULES
        .iter()
        .find(|rule| {
            query_lower.contains(rule.query_topic)
                && rule.passage_terms.iter().any(|term| passage.contains(term))
        })
        .map(|rule| rule.explanation)
        .unwrap_or(DEFAULT_SUPPORT)
        .to_string()
}
