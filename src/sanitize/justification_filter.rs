use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

/// Identifiers, rule numbers, parenthesised percentages and inline scores.
static FORBIDDEN: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\bskill\s+ids?\s*[:#]?\s*\d+",
        r"(?i)\brules?\s+#?\d+\b",
        r"\(\s*\d+(?:\.\d+)?\s*%\s*\)",
        r"(?i)\(?\bids?\s*[:#]?\s*\d+\)?",
        r"#\d+\b",
        r"(?i)\b(?:(?:suitability|overall|match|skill)\s+)?scores?\s*(?:of|:|=)\s*\d+(?:\.\d+)?%?",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid justification pattern"))
    .collect()
});

static SPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]{2,}").expect("valid whitespace pattern"));
static SPACE_BEFORE_PUNCT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+([,.;:!?])").expect("valid punctuation pattern"));
static EMPTY_PARENS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(\s*\)").expect("valid parens pattern"));
static BULLET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:[•*\-]|\d+[.)])\s*").expect("valid bullet pattern"));

pub struct JustificationFilter;

impl JustificationFilter {
    /// Strip every forbidden element and tidy what is left.
    ///
    /// Each line is reworked until it stops changing, so removals that bring
    /// two fragments together cannot leave a new match behind.
    pub fn clean(text: &str) -> String {
        let text = text.replace("\\n", "\n");

        text.lines()
            .filter_map(|line| {
                let mut cleaned = line.trim_end().to_string();
                loop {
                    let next = Self::clean_pass(&cleaned);
                    if next == cleaned {
                        break;
                    }
                    cleaned = next;
                }

                let content = BULLET.replace(&cleaned, "");
                let has_words = content.chars().any(char::is_alphanumeric);
                has_words.then_some(cleaned)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn clean_pass(line: &str) -> String {
        let mut cleaned = line.to_string();
        for pattern in FORBIDDEN.iter() {
            cleaned = pattern.replace_all(&cleaned, "").into_owned();
        }
        cleaned = EMPTY_PARENS.replace_all(&cleaned, "").into_owned();
        cleaned = SPACE_RUN.replace_all(&cleaned, " ").into_owned();
        cleaned = SPACE_BEFORE_PUNCT.replace_all(&cleaned, "$1").into_owned();
        cleaned.trim_end().to_string()
    }

    /// True when no line holds a forbidden element.
    pub fn is_clean(text: &str) -> bool {
        text.lines().all(|line| !FORBIDDEN.iter().any(|p| p.is_match(line)))
    }

    /// Cleaned `text`, or the cleaned `fallback` when `text` cannot be made presentable.
    ///
    /// Lines of the fallback that still fail [`is_clean`](Self::is_clean) are dropped.
    pub fn sanitize_or(text: &str, fallback: &str) -> String {
        let cleaned = Self::clean(text);
        if !cleaned.trim().is_empty() && Self::is_clean(&cleaned) {
            if cleaned != text.trim() {
                debug!("Removed prohibited elements from justification");
            }
            return cleaned;
        }

        warn!("Justification could not be cleaned; using local rendering");
        Self::clean(fallback)
            .lines()
            .filter(|line| Self::is_clean(line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = "• Technician ID: 12 is an experienced specialist in Network Security (92%)\n\
                       • Selected under Rule 2 for high priority tickets\n\
                       • Skill ID 42\n\
                       • Holds a suitability score of 0.56, the best on the team\n\
                       • Currently available with a low current workload";

    #[test]
    fn test_strips_forbidden_elements() {
        let cleaned = JustificationFilter::clean(RAW);
        assert!(JustificationFilter::is_clean(&cleaned), "{cleaned}");
        assert!(!Regex::new(r"Skill ID \d+").unwrap().is_match(&cleaned));
        assert!(!Regex::new(r"Rule \d+").unwrap().is_match(&cleaned));
        assert!(!Regex::new(r"\(\d+%\)").unwrap().is_match(&cleaned));
        assert!(cleaned.contains("specialist in Network Security"));
        assert!(cleaned.contains("• Currently available with a low current workload"));
    }

    #[test]
    fn test_drops_emptied_bullets() {
        let cleaned = JustificationFilter::clean(RAW);
        assert_eq!(cleaned.lines().count(), 4);
        assert!(cleaned.lines().all(|l| l.starts_with('•')));
    }

    #[test]
    fn test_expands_escaped_newlines() {
        let cleaned = JustificationFilter::clean("• First point\\n• Second point");
        assert_eq!(cleaned, "• First point\n• Second point");
    }

    #[test]
    fn test_clean_text_is_untouched() {
        let text = "• Experienced in Active Directory\n• Currently available";
        assert_eq!(JustificationFilter::clean(text), text);
    }

    #[test]
    fn test_falls_back_when_nothing_presentable_remains() {
        let text = JustificationFilter::sanitize_or("Skill ID 7 (80%)", "• Currently available");
        assert_eq!(text, "• Currently available");
    }

    #[test]
    fn test_removals_that_form_new_matches_are_cleaned() {
        let cleaned = JustificationFilter::clean("• Chosen by Rule Rule 1 2 for this queue");
        assert!(JustificationFilter::is_clean(&cleaned), "{cleaned}");
        assert_eq!(cleaned, "• Chosen by for this queue");

        let fallback = JustificationFilter::sanitize_or("ID 3", "• Rule Rule 1 2 applied\n• Currently available");
        assert!(JustificationFilter::is_clean(&fallback), "{fallback}");
        assert!(fallback.contains("• Currently available"));
    }

    #[test]
    fn test_references_by_hash() {
        let cleaned = JustificationFilter::clean("• Similar to ticket #4512, resolved quickly");
        assert!(JustificationFilter::is_clean(&cleaned));
        assert_eq!(cleaned, "• Similar to ticket, resolved quickly");
    }
}
