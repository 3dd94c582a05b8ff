use std::path::Path;

use anyhow::{anyhow, Context, Result};
use lopdf::Document;

use crate::TableGrid;

/// Concatenated plain text of every page, in reading order, pages separated
/// by a blank line. `.txt` inputs are taken as already extracted.
pub fn extract_full_text(path: &Path) -> Result<String> {
    let is_text = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("txt"));
    if is_text {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()));
    }

    match try_pdf_extract(path) {
        Ok(text) => Ok(text),
        Err(e) => {
            log::warn!("pdf-extract failed on {}: {:#}, falling back to lopdf", path.display(), e);
            extract_with_lopdf(path)
        }
    }
}

fn try_pdf_extract(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    let text = pdf_extract::extract_text_from_mem(&bytes)?;

    if text.trim().is_empty() {
        return Err(anyhow!("No text extracted"));
    }

    Ok(join_pages(text.split('\x0C')))
}

fn extract_with_lopdf(path: &Path) -> Result<String> {
    let doc = Document::load(path)
        .with_context(|| format!("Failed to load {}", path.display()))?;
    let mut pages = Vec::new();

    for (page_index, (page_no, _)) in doc.get_pages().into_iter().enumerate() {
        match doc.extract_text(&[page_no]) {
            Ok(text) => pages.push(text),
            Err(e) => log::warn!("Could not extract text from page {}: {}", page_index + 1, e),
        }
    }

    Ok(join_pages(pages.iter().map(String::as_str)))
}

fn join_pages<'a>(pages: impl Iterator<Item = &'a str>) -> String {
    pages
        .map(str::trim_end)
        .filter(|p| !p.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Table grids exported alongside the text, as JSON: tables of rows of
/// nullable cells.
pub fn load_tables(path: &Path) -> Result<Vec<TableGrid>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a list of table grids", path.display()))
}
