use once_cell::sync::Lazy;
use regex::Regex;

use crate::sentences::heading_span_text;
use crate::{Recommendation, Sentence};

static REFERENCE_CODE: Lazy<Regex> = Lazy::new(||
    Regex::new(r"(\d{4}/\d+)").unwrap());

// Loose organisation captures, tried in order on continuation lines.
static ORGANISATION_PATTERNS: Lazy<[Regex; 2]> = Lazy::new(|| [
    Regex::new(r"(?i)to\s+([A-Z][A-Za-z\s&]+?)(?:\s+(?:to|recommend|ensure|consider|review)|$)").unwrap(),
    Regex::new(r"(?i)(?:recommend|addressed)\s+to\s+([A-Z][A-Za-z\s&]+?)(?:\s+(?:to|recommend|ensure)|$)").unwrap(),
]);

/// Recommendations keyed by their "YYYY/NNN" reference codes.
///
/// A line carrying a code opens a new recommendation; following lines are
/// appended to it and searched for the addressee organisation.
pub fn extract_recommendations(recommendations_text: &str) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();
    let mut current: Option<Recommendation> = None;

    for line in recommendations_text.split('\n') {
        let stripped = line.trim();
        if stripped.is_empty() {
            continue;
        }

        if let Some(caps) = REFERENCE_CODE.captures(stripped) {
            recommendations.extend(current.take());
            current = Some(Recommendation {
                reference_code: caps[1].to_string(),
                text: stripped.to_string(),
                organisation: None,
            });
        } else if let Some(open) = current.as_mut() {
            open.text.push(' ');
            open.text.push_str(stripped);
            if open.organisation.is_none() {
                open.organisation = find_organisation(stripped);
            }
        }
    }

    recommendations.extend(current);
    log::debug!("extracted {} recommendations", recommendations.len());
    recommendations
}

/// Same extraction, scoped to the recommendations span of a sentence stream.
pub fn extract_recommendations_from_sentences(sentences: &[Sentence]) -> Vec<Recommendation> {
    heading_span_text(sentences, "RECOMMENDATIONS")
        .map(|text| extract_recommendations(&text))
        .unwrap_or_default()
}

fn find_organisation(line: &str) -> Option<String> {
    ORGANISATION_PATTERNS.iter().find_map(|pattern| {
        let name = pattern.captures(line)?.get(1)?.as_str().trim();
        let len = name.chars().count();
        (len > 2 && len < 100).then(|| name.to_string())
    })
}

/// Distinct addressee organisations, in order of first mention.
pub fn collect_organisations(recommendations: &[Recommendation]) -> Vec<String> {
    let mut organisations: Vec<String> = Vec::new();

    for name in recommendations.iter().filter_map(|r| r.organisation.as_deref()) {
        let name = name.trim();
        if !name.is_empty() && !organisations.iter().any(|seen| seen == name) {
            organisations.push(name.to_string());
        }
    }

    organisations
}
