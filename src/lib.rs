use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub mod blocks;
pub mod issues;
pub mod metadata;
pub mod pipeline;
pub mod recommendations;
pub mod sections;
pub mod sentences;
pub mod source;
pub mod toc;

pub use blocks::classify_blocks;
pub use issues::{extract_safety_issues, extract_safety_issues_from_sentences};
pub use metadata::extract_metadata_from_tables;
pub use pipeline::{process_report, ExtractionScope, ReportBody, ReportExtraction, SectionSentences};
pub use recommendations::{
    collect_organisations, extract_recommendations, extract_recommendations_from_sentences,
};
pub use sections::split_into_sections;
pub use sentences::{
    split_into_sentences, split_into_sentences_with, SentenceTokenizer, UnicodeSentenceTokenizer,
};
pub use toc::is_toc_entry;

// Section boundaries. Matched against a whitespace-trimmed line.
pub static SECTION_BOUNDARY: Lazy<Regex> = Lazy::new(||
    Regex::new(r"(?i)^SECTION\s+(\d+)\s*[–-]\s+(.+?)\s*$").unwrap());
pub static SYNOPSIS_BOUNDARY: Lazy<Regex> = Lazy::new(||
    Regex::new(r"(?i)^SYNOPSIS\s*$").unwrap());
pub static GLOSSARY_BOUNDARY: Lazy<Regex> = Lazy::new(||
    Regex::new(r"(?i)^GLOSSARY OF ABBREVIATIONS AND ACRONYMS\s*$").unwrap());
pub static CONCLUSIONS_BOUNDARY: Lazy<Regex> = Lazy::new(||
    Regex::new(r"(?i)^CONCLUSIONS\s*$").unwrap());
pub static RECOMMENDATIONS_BOUNDARY: Lazy<Regex> = Lazy::new(||
    Regex::new(r"(?i)^RECOMMENDATIONS\s*$").unwrap());

// Line shapes used by the block classifier.
pub static SECTION_HEADING: Lazy<Regex> = Lazy::new(||
    Regex::new(r"(?i)^SECTION\s+\d+").unwrap());
pub static SUBSECTION_HEADING: Lazy<Regex> = Lazy::new(||
    // "1.1 ", "2.3.1 " and the like
    Regex::new(r"^\d+\.\d+(\.\d+)?\s+").unwrap());
pub static BULLET_ITEM: Lazy<Regex> = Lazy::new(||
    Regex::new(r"^[\-\*●]\s+").unwrap());
pub static MARKER_ITEM: Lazy<Regex> = Lazy::new(||
    Regex::new(r"^[a-zA-Z0-9][.\)]\s+").unwrap());
pub static PAREN_ITEM: Lazy<Regex> = Lazy::new(||
    Regex::new(r"^\([a-zA-Z0-9]\)\s+").unwrap());

/// Trailing page number of a contents line, e.g. " 12" or " 18a".
pub static TOC_PAGE_NUMBER: Lazy<Regex> = Lazy::new(||
    Regex::new(r"\s\d{1,3}[a-z]?\s*$").unwrap());

/// Structural tag carried by blocks and sentences.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TextType {
    Heading,
    ListItem,
    Paragraph,
}

/// A top-level span of the report between two recognised boundaries.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    pub text: String,
    pub position: usize,
}

/// A reconstructed unit of text before sentence splitting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: TextType,
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Sentence {
    pub text: String,
    pub text_type: TextType,
    pub position: usize,
    /// `Some(0)` marks contents/front-matter noise, `None` is unscored.
    pub relevance_score: Option<u32>,
}

impl Sentence {
    pub fn is_relevant(&self) -> bool {
        self.relevance_score != Some(0)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SafetyIssue {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub reference_code: String,
    pub text: String,
    pub organisation: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct ReportMetadata {
    pub vessel_name: Option<String>,
    pub vessel_type: Option<String>,
    pub accident_date: Option<String>,
    pub accident_location: Option<String>,
    pub severity: Option<String>,
    pub loss_of_life: Option<String>,
    pub port_of_origin: Option<String>,
    pub destination: Option<String>,
    pub accident_type: Option<String>,
}

/// A raw table as handed over by the PDF collaborator: rows of optional cells.
pub type TableGrid = Vec<Vec<Option<String>>>;
