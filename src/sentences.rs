use std::collections::HashSet;

use unicode_segmentation::UnicodeSegmentation;

use crate::blocks::classify_blocks;
use crate::toc::is_toc_entry;
use crate::{Sentence, TextType, SECTION_HEADING};

/// Sentence boundary detection over a reconstructed paragraph.
pub trait SentenceTokenizer {
    fn split(&self, text: &str) -> Vec<String>;
}

impl<F> SentenceTokenizer for F
where
    F: Fn(&str) -> Vec<String>,
{
    fn split(&self, text: &str) -> Vec<String> {
        self(text)
    }
}

/// UAX #29 sentence boundaries, with pieces re-joined where the break fell
/// right after a common abbreviation or an initial.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnicodeSentenceTokenizer;

// Matched case-sensitively; these are normally followed by a name or number.
const TITLES: &[&str] = &[
    "Mr.", "Mrs.", "Ms.", "Dr.", "Capt.", "Cdr.", "Lt.", "St.", "No.", "Nos.", "Fig.", "Figs.",
    "Ref.", "Para.", "Sec.",
];
const ABBREVIATIONS: &[&str] = &["e.g.", "i.e.", "approx.", "vs.", "cf."];

impl SentenceTokenizer for UnicodeSentenceTokenizer {
    fn split(&self, text: &str) -> Vec<String> {
        let mut sentences: Vec<String> = Vec::new();

        for piece in text.unicode_sentences() {
            let piece = piece.trim();
            if piece.is_empty() {
                continue;
            }
            match sentences.last_mut() {
                Some(previous) if ends_with_abbreviation(previous) => {
                    previous.push(' ');
                    previous.push_str(piece);
                }
                _ => sentences.push(piece.to_string()),
            }
        }

        sentences
    }
}

fn ends_with_abbreviation(sentence: &str) -> bool {
    let mut tokens = sentence.split_whitespace().rev();
    let Some(last) = tokens.next() else {
        return false;
    };

    if TITLES.contains(&last) || ABBREVIATIONS.contains(&last) {
        return true;
    }

    // "Capt. J. Smith" but not "quay B. The crew"
    is_initial(last) && tokens.next().map_or(true, |prev| TITLES.contains(&prev) || is_initial(prev))
}

fn is_initial(token: &str) -> bool {
    let mut chars = token.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(c), Some('.'), None) if c.is_uppercase()
    )
}

/// Split a section (or whole document) into typed, positioned sentences using
/// the default tokenizer.
pub fn split_into_sentences(text: &str) -> Vec<Sentence> {
    split_into_sentences_with(text, &UnicodeSentenceTokenizer)
}

/// Split into sentences with a caller-supplied tokenizer.
///
/// Headings and list items pass through whole; only paragraphs are tokenized.
/// Contents-shaped sentences are scored 0 on creation, then everything ahead
/// of the first repeated heading is scored 0 as front matter.
pub fn split_into_sentences_with<T>(text: &str, tokenizer: &T) -> Vec<Sentence>
where
    T: SentenceTokenizer + ?Sized,
{
    let mut sentences = Vec::new();

    for block in classify_blocks(text) {
        match block.kind {
            TextType::Paragraph => {
                for piece in tokenizer.split(&block.text) {
                    let piece = piece.trim();
                    if !piece.is_empty() {
                        push_sentence(&mut sentences, piece.to_string(), TextType::Paragraph);
                    }
                }
            }
            kind => push_sentence(&mut sentences, block.text, kind),
        }
    }

    if let Some(marker) = front_matter_end(&sentences) {
        log::debug!("front matter ends at sentence {}", marker);
        mark_front_matter(&mut sentences, marker);
    }

    sentences
}

fn push_sentence(sentences: &mut Vec<Sentence>, text: String, text_type: TextType) {
    let relevance_score = if is_toc_entry(&text) { Some(0) } else { None };
    sentences.push(Sentence {
        position: sentences.len(),
        text,
        text_type,
        relevance_score,
    });
}

/// Position of the first heading whose exact text was already seen earlier in
/// the stream. Contents pages repeat the body headings, so this is where the
/// body starts.
pub fn front_matter_end(sentences: &[Sentence]) -> Option<usize> {
    let mut seen: HashSet<&str> = HashSet::new();

    for sentence in sentences.iter().filter(|s| s.text_type == TextType::Heading) {
        if !seen.insert(sentence.text.as_str()) {
            return Some(sentence.position);
        }
    }
    None
}

fn mark_front_matter(sentences: &mut [Sentence], marker: usize) {
    for sentence in sentences.iter_mut().filter(|s| s.position < marker) {
        sentence.relevance_score = Some(0);
    }
}

/// Text of the span that follows the first relevant heading containing
/// `marker` (case-insensitive), one sentence per line.
///
/// The span stops at the next relevant top-level heading ("SECTION n ..." or
/// "SYNOPSIS"). Sentences scored 0 are left out, which keeps contents lines
/// that mention the marker from opening the span.
pub fn heading_span_text(sentences: &[Sentence], marker: &str) -> Option<String> {
    let marker = marker.to_uppercase();
    let mut relevant = sentences.iter().filter(|s| s.is_relevant());

    relevant.find(|s| s.text_type == TextType::Heading && s.text.to_uppercase().contains(&marker))?;

    let lines: Vec<&str> = relevant
        .take_while(|s| !is_top_level_heading(s))
        .map(|s| s.text.as_str())
        .collect();

    Some(lines.join("\n"))
}

fn is_top_level_heading(sentence: &Sentence) -> bool {
    sentence.text_type == TextType::Heading
        && (SECTION_HEADING.is_match(&sentence.text) || sentence.text == "SYNOPSIS")
}
