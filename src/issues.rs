use once_cell::sync::Lazy;
use regex::Regex;

use crate::sentences::heading_span_text;
use crate::Sentence;

static NUMBERED_ISSUE: Lazy<Regex> = Lazy::new(||
    Regex::new(r"^(\d+\.\d+)\s+(.+)$").unwrap());
static SAFETY_ISSUE_LABEL: Lazy<Regex> = Lazy::new(||
    Regex::new(r"(?i)safety\s+issue\s*\d+[:.\-]\s*").unwrap());
static SAFETY_ISSUE_MENTION: Lazy<Regex> = Lazy::new(||
    Regex::new(r"(?i)\s*safety\s+issue").unwrap());

/// Safety issues listed in a conclusions section.
///
/// Numbered clauses ("3.1 ...") are the primary form; wrapped lines are
/// stitched onto the open clause. Reports without numbered clauses are
/// scanned for "Safety issue N:" labels instead.
pub fn extract_safety_issues(conclusions_text: &str) -> Vec<String> {
    let mut issues = Vec::new();
    let mut current: Option<String> = None;

    for line in conclusions_text.split('\n') {
        let stripped = line.trim();
        if stripped.is_empty() {
            continue;
        }

        if let Some(caps) = NUMBERED_ISSUE.captures(stripped) {
            if let Some(done) = current.take() {
                issues.push(done.trim().to_string());
            }
            current = Some(caps[2].to_string());
        } else if let Some(open) = current.as_mut() {
            open.push(' ');
            open.push_str(stripped);
        }
    }

    if let Some(done) = current {
        issues.push(done.trim().to_string());
    }

    if issues.is_empty() {
        issues = labelled_issues(conclusions_text);
    }

    log::debug!("extracted {} safety issues", issues.len());
    issues
}

/// Same extraction, scoped to the conclusions span of a sentence stream.
pub fn extract_safety_issues_from_sentences(sentences: &[Sentence]) -> Vec<String> {
    heading_span_text(sentences, "CONCLUSIONS")
        .map(|text| extract_safety_issues(&text))
        .unwrap_or_default()
}

// Each label's text runs to the end of its line or to the next mention of
// "safety issue", whichever comes first.
fn labelled_issues(text: &str) -> Vec<String> {
    let mut issues = Vec::new();
    let mut cursor = 0;

    while let Some(label) = SAFETY_ISSUE_LABEL.find_at(text, cursor) {
        let start = label.end();
        let body = &text[start..];

        let Some(first) = body.chars().next().filter(|&c| c != '\n') else {
            cursor = start;
            continue;
        };

        let rest = first.len_utf8();
        let line_end = body.find('\n').unwrap_or(body.len());
        let mention = SAFETY_ISSUE_MENTION
            .find_at(body, rest)
            .map_or(body.len(), |m| m.start());
        let end = line_end.min(mention);

        let issue = body[..end].trim();
        if !issue.is_empty() {
            issues.push(issue.to_string());
        }
        cursor = start + end;
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_issues_with_continuations() {
        let text = "Safety issues directly contributing:\n\
                    3.1 The skipper had not slept\n\
                    for 20 hours.\n\n\
                    3.2 Lifejackets were not worn.\n";
        assert_eq!(
            extract_safety_issues(text),
            ["The skipper had not slept for 20 hours.", "Lifejackets were not worn."]
        );
    }

    #[test]
    fn falls_back_to_safety_issue_labels() {
        let text = "Safety issue 1: Poor lookout.\nSafety issue 2: Fatigue Safety issue 3: lifejackets";
        assert_eq!(
            extract_safety_issues(text),
            ["Poor lookout.", "Fatigue", "lifejackets"]
        );
    }

    #[test]
    fn label_text_may_start_on_the_next_line() {
        assert_eq!(extract_safety_issues("safety issue 1:\nnext line text"), ["next line text"]);
    }

    #[test]
    fn nothing_recognisable_yields_nothing() {
        assert!(extract_safety_issues("").is_empty());
        assert!(extract_safety_issues("The crew were experienced.").is_empty());
    }

    #[test]
    fn extraction_is_repeatable() {
        let text = "1.1 First issue\n1.2 Second issue";
        assert_eq!(extract_safety_issues(text), extract_safety_issues(text));
    }
}
