use crate::TOC_PAGE_NUMBER;

/// Whether `text` looks like a table-of-contents line: a short label followed
/// by a page reference such as "12" or "18a".
///
/// Figure captions frequently end in a number too, so anything starting with
/// "figure" is rejected. Genuine sentences ending in a small count will still
/// be caught; that false-positive rate is accepted.
pub fn is_toc_entry(text: &str) -> bool {
    if text.chars().count() > 150 {
        return false;
    }

    if !TOC_PAGE_NUMBER.is_match(text) {
        return false;
    }

    let label = TOC_PAGE_NUMBER.replace(text, "");
    if label.trim().chars().count() < 3 {
        return false;
    }

    !text.to_lowercase().starts_with("figure")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contents_line_with_page_number() {
        assert!(is_toc_entry("SECTION 1 - FACTUAL INFORMATION 12"));
        assert!(is_toc_entry("1.4 Environmental conditions 18a"));
    }

    #[test]
    fn rejects_lines_without_trailing_page() {
        assert!(!is_toc_entry("SECTION 1 - FACTUAL INFORMATION"));
        assert!(!is_toc_entry("The vessel sank in 2019"));
        assert!(!is_toc_entry("Page 1234"));
    }

    #[test]
    fn rejects_short_labels_and_figures() {
        assert!(!is_toc_entry("ab 12"));
        assert!(!is_toc_entry("Figure 3: Wheelhouse layout 4"));
        assert!(!is_toc_entry("FIGURE 3 Wheelhouse layout 4"));
    }

    #[test]
    fn rejects_long_lines() {
        let long = format!("{} 12", "word ".repeat(40));
        assert!(!is_toc_entry(&long));
    }

    #[test]
    fn trailing_whitespace_is_tolerated() {
        assert!(is_toc_entry("Glossary of abbreviations 3   "));
    }
}
