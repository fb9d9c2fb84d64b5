//! Display-name derivation for source paths

use once_cell::sync::Lazy;
use regex::Regex;

/// Trailing file extension (`.pdf`, `.docx`, ...)
static EXTENSION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.\w+$").expect("Invalid regex"));

/// UTF-8 text that was decoded as Windows-1252 somewhere upstream, in replacement order.
/// Longer sequences come first because they share the `â€` prefix.
const ENCODING_REPAIRS: &[(&str, &str)] = &[
    ("â€™", "’"),
    ("â€˜", "‘"),
    ("â€œ", "“"),
    ("â€\u{9d}", "”"),
    ("â€“", "–"),
    ("â€”", "\u{2014}"),
    ("â€\u{90}", "‐"),
    ("â€", "‐"),
    ("Î±", "α"),
    ("Î²", "β"),
    ("Ã©", "é"),
    ("Ã¶", "ö"),
    ("Ã¼", "ü"),
];

/// Final path segment, accepting both `/` and `\` separators
pub fn file_name(path: &str) -> &str {
    let trimmed = path.trim().trim_end_matches(['/', '\\']);
    trimmed
        .rsplit(['/', '\\'])
        .next()
        .filter(|segment| !segment.is_empty())
        .unwrap_or(trimmed)
}

/// Repair known mojibake sequences
pub fn repair_encoding(text: &str) -> String {
    let mut repaired = text.to_string();
    for (broken, fixed) in ENCODING_REPAIRS {
        if repaired.contains(broken) {
            repaired = repaired.replace(broken, fixed);
        }
    }
    repaired
}

/// Human-readable name for a source path
///
/// Final segment, extension stripped, underscores turned into spaces, encoding
/// artifacts repaired. Never empty for a non-blank path.
pub fn display_name(path: &str) -> String {
    let name = file_name(path);
    let stem = EXTENSION.replace(name, "");
    let spaced = repair_encoding(&stem.replace('_', " "));
    let cleaned = spaced.split_whitespace().collect::<Vec<_>>().join(" ");

    if cleaned.is_empty() {
        name.to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_both_separators() {
        assert_eq!(file_name("/data/docs/A_B.pdf"), "A_B.pdf");
        assert_eq!(file_name(r"C:\docs\reports\Study_One.pdf"), "Study_One.pdf");
        assert_eq!(file_name("plain.pdf"), "plain.pdf");
        assert_eq!(file_name("/data/docs/"), "docs");
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("A_B.pdf"), "A B");
        assert_eq!(display_name(r"D:\corpus\Study_One.pdf"), "Study One");
        assert_eq!(
            display_name("/srv/a_multicenter_long_term_cohort_study_of.2.pdf"),
            "a multicenter long term cohort study of.2"
        );
        assert_eq!(display_name("notes"), "notes");
    }

    #[test]
    fn test_display_name_repairs_mojibake() {
        assert_eq!(
            display_name("Close followâ€\u{90}up is associated.pdf"),
            "Close follow‐up is associated"
        );
        assert_eq!(display_name("Epithelial HIF-1Î± axis.pdf"), "Epithelial HIF-1α axis");
    }

    #[test]
    fn test_display_name_never_empty() {
        assert_eq!(display_name("___.pdf"), "___.pdf");
        assert!(!display_name(".pdf").is_empty());
    }
}
