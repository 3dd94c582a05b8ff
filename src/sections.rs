use crate::toc::is_toc_entry;
use crate::{
    Section, CONCLUSIONS_BOUNDARY, GLOSSARY_BOUNDARY, RECOMMENDATIONS_BOUNDARY, SECTION_BOUNDARY,
    SYNOPSIS_BOUNDARY,
};

/// Split the full report text at its top-level boundaries.
///
/// Lines before the first boundary belong to no section and are dropped.
/// Contents entries that merely reference a section never open one.
pub fn split_into_sections(full_text: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current: Option<String> = None;
    let mut lines: Vec<&str> = Vec::new();

    for line in full_text.split('\n') {
        let line = line.trim_end();
        let stripped = line.trim();

        if is_toc_entry(stripped) {
            lines.push(line);
            continue;
        }

        let Some(name) = boundary_name(stripped) else {
            lines.push(line);
            continue;
        };

        if let Some(previous) = current.take() {
            close_section(&mut sections, previous, &lines);
        }
        current = Some(name);
        lines.clear();
    }

    if let Some(last) = current {
        close_section(&mut sections, last, &lines);
    }

    log::debug!("split report into {} sections", sections.len());
    sections
}

fn boundary_name(stripped: &str) -> Option<String> {
    if let Some(caps) = SECTION_BOUNDARY.captures(stripped) {
        return Some(caps[2].trim().to_string());
    }
    if SYNOPSIS_BOUNDARY.is_match(stripped) {
        return Some("SYNOPSIS".to_string());
    }
    if GLOSSARY_BOUNDARY.is_match(stripped) {
        return Some("GLOSSARY".to_string());
    }
    if CONCLUSIONS_BOUNDARY.is_match(stripped) {
        return Some("CONCLUSIONS".to_string());
    }
    if RECOMMENDATIONS_BOUNDARY.is_match(stripped) {
        return Some("RECOMMENDATIONS".to_string());
    }
    None
}

fn close_section(sections: &mut Vec<Section>, name: String, lines: &[&str]) {
    let position = sections.len();
    sections.push(Section {
        name,
        text: lines.join("\n").trim().to_string(),
        position,
    });
}
