use clap::ValueEnum;
use serde::Serialize;

use crate::issues::{extract_safety_issues, extract_safety_issues_from_sentences};
use crate::metadata::extract_metadata_from_tables;
use crate::recommendations::{
    collect_organisations, extract_recommendations, extract_recommendations_from_sentences,
};
use crate::sections::split_into_sections;
use crate::sentences::split_into_sentences;
use crate::{Recommendation, ReportMetadata, SafetyIssue, Section, Sentence, TableGrid};

/// Where safety issues and recommendations are read from.
///
/// The two scopings can disagree at section edges, so the caller picks one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ExtractionScope {
    /// Raw text of the CONCLUSIONS / RECOMMENDATIONS sections.
    #[default]
    Sections,
    /// Heading-delimited spans of the whole-document sentence stream.
    Sentences,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct SectionSentences {
    #[serde(flatten)]
    pub section: Section,
    pub sentences: Vec<Sentence>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum ReportBody {
    Sectioned(Vec<SectionSentences>),
    /// No section boundary was recognised; the whole text was split instead.
    Unsectioned(Vec<Sentence>),
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ReportExtraction {
    pub metadata: ReportMetadata,
    pub body: ReportBody,
    pub safety_issues: Vec<SafetyIssue>,
    pub recommendations: Vec<Recommendation>,
    pub organisations: Vec<String>,
}

/// Run every stage over one report's extracted text and tables.
pub fn process_report(
    full_text: &str,
    tables: &[TableGrid],
    scope: ExtractionScope,
) -> ReportExtraction {
    let metadata = extract_metadata_from_tables(tables);
    let sections = split_into_sections(full_text);

    let (issues, recommendations) = match scope {
        ExtractionScope::Sections => {
            let issues = find_section(&sections, "CONCLUSIONS")
                .map(|s| extract_safety_issues(&s.text))
                .unwrap_or_default();
            let recommendations = find_section(&sections, "RECOMMENDATIONS")
                .map(|s| extract_recommendations(&s.text))
                .unwrap_or_default();
            (issues, recommendations)
        }
        ExtractionScope::Sentences => {
            let stream = split_into_sentences(full_text);
            (
                extract_safety_issues_from_sentences(&stream),
                extract_recommendations_from_sentences(&stream),
            )
        }
    };

    let body = if sections.is_empty() {
        log::warn!("no section boundaries found, splitting the whole document");
        ReportBody::Unsectioned(split_into_sentences(full_text))
    } else {
        ReportBody::Sectioned(
            sections
                .into_iter()
                .map(|section| SectionSentences {
                    sentences: split_into_sentences(&section.text),
                    section,
                })
                .collect(),
        )
    };

    let organisations = collect_organisations(&recommendations);

    log::info!(
        "report processed: {} safety issues, {} recommendations, {} organisations",
        issues.len(),
        recommendations.len(),
        organisations.len()
    );

    ReportExtraction {
        metadata,
        body,
        safety_issues: issues.into_iter().map(|text| SafetyIssue { text }).collect(),
        recommendations,
        organisations,
    }
}

fn find_section<'a>(sections: &'a [Section], name: &str) -> Option<&'a Section> {
    sections.iter().find(|s| s.name.to_uppercase().contains(name))
}

impl ReportBody {
    pub fn sentence_count(&self) -> usize {
        match self {
            ReportBody::Sectioned(sections) => sections.iter().map(|s| s.sentences.len()).sum(),
            ReportBody::Unsectioned(sentences) => sentences.len(),
        }
    }
}
