use crate::{
    Block, TextType, BULLET_ITEM, MARKER_ITEM, PAREN_ITEM, SECTION_HEADING, SUBSECTION_HEADING,
};

/// Classify a single non-blank, trimmed line by its shape alone.
pub fn classify_line(line: &str) -> TextType {
    if line.chars().count() < 80
        && (SECTION_HEADING.is_match(line) || SUBSECTION_HEADING.is_match(line) || line == "SYNOPSIS")
    {
        return TextType::Heading;
    }

    if BULLET_ITEM.is_match(line) || MARKER_ITEM.is_match(line) || PAREN_ITEM.is_match(line) {
        return TextType::ListItem;
    }

    TextType::Paragraph
}

/// Reconstruct logical blocks from visually wrapped lines.
///
/// Wrapped paragraph lines are joined with a space, as are wrapped list items.
/// A blank line always ends whatever is open.
pub fn classify_blocks(text: &str) -> Vec<Block> {
    let mut state = BlockState::default();

    for line in text.split('\n') {
        let stripped = line.trim();
        if stripped.is_empty() {
            state.flush();
            continue;
        }

        match classify_line(stripped) {
            TextType::Heading => {
                state.flush();
                state.blocks.push(Block {
                    kind: TextType::Heading,
                    text: stripped.to_string(),
                });
            }
            TextType::ListItem => {
                state.flush_paragraph();
                state.flush_list_item();
                state.list_item = Some(stripped.to_string());
            }
            TextType::Paragraph => state.push_paragraph_line(stripped),
        }
    }

    state.flush();
    log::debug!("reconstructed {} blocks", state.blocks.len());
    state.blocks
}

/// Accumulators carried across a single pass over the lines.
#[derive(Default)]
struct BlockState<'a> {
    blocks: Vec<Block>,
    paragraph: Vec<&'a str>,
    list_item: Option<String>,
}

impl<'a> BlockState<'a> {
    fn push_paragraph_line(&mut self, line: &'a str) {
        let Some(item) = self.list_item.as_mut() else {
            self.paragraph.push(line);
            return;
        };

        if continues_list_item(item, line) {
            item.push(' ');
            item.push_str(line);
        } else {
            self.flush_list_item();
            self.paragraph.push(line);
        }
    }

    fn flush(&mut self) {
        self.flush_paragraph();
        self.flush_list_item();
    }

    fn flush_paragraph(&mut self) {
        if self.paragraph.is_empty() {
            return;
        }
        self.blocks.push(Block {
            kind: TextType::Paragraph,
            text: self.paragraph.join(" "),
        });
        self.paragraph.clear();
    }

    fn flush_list_item(&mut self) {
        if let Some(text) = self.list_item.take() {
            self.blocks.push(Block {
                kind: TextType::ListItem,
                text,
            });
        }
    }
}

// A wrapped list item has no terminal punctuation yet and the next line
// picks up mid-sentence in lower case.
fn continues_list_item(item: &str, line: &str) -> bool {
    let open = !item.trim_end().ends_with(['.', '!', '?']);
    let lower = line.chars().next().is_some_and(char::is_lowercase);
    open && lower
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(blocks: &[Block]) -> Vec<TextType> {
        blocks.iter().map(|b| b.kind).collect()
    }

    #[test]
    fn classifies_line_shapes() {
        assert_eq!(classify_line("SECTION 2 - ANALYSIS"), TextType::Heading);
        assert_eq!(classify_line("section 2"), TextType::Heading);
        assert_eq!(classify_line("1.2 Narrative"), TextType::Heading);
        assert_eq!(classify_line("2.3.1 Fatigue"), TextType::Heading);
        assert_eq!(classify_line("SYNOPSIS"), TextType::Heading);
        assert_eq!(classify_line("- bullet"), TextType::ListItem);
        assert_eq!(classify_line("● bullet"), TextType::ListItem);
        assert_eq!(classify_line("a. first"), TextType::ListItem);
        assert_eq!(classify_line("1) first"), TextType::ListItem);
        assert_eq!(classify_line("(b) second"), TextType::ListItem);
        assert_eq!(classify_line("Synopsis"), TextType::Paragraph);
        assert_eq!(classify_line("The vessel was alongside."), TextType::Paragraph);
    }

    #[test]
    fn long_numbered_line_is_not_a_heading() {
        let line = format!("1.1 {}", "long text ".repeat(10));
        assert_eq!(classify_line(line.trim()), TextType::Paragraph);
    }

    #[test]
    fn wrapped_paragraph_lines_are_joined() {
        let blocks = classify_blocks("The vessel left port\nat 0600 and headed\nnorth.\n\nSecond one.");
        assert_eq!(kinds(&blocks), [TextType::Paragraph, TextType::Paragraph]);
        assert_eq!(blocks[0].text, "The vessel left port at 0600 and headed north.");
        assert_eq!(blocks[1].text, "Second one.");
    }

    #[test]
    fn heading_interrupts_paragraph() {
        let blocks = classify_blocks("Some text\n1.1 Particulars\nMore text");
        assert_eq!(
            kinds(&blocks),
            [TextType::Paragraph, TextType::Heading, TextType::Paragraph]
        );
        assert_eq!(blocks[1].text, "1.1 Particulars");
    }

    #[test]
    fn heading_closes_open_list_item() {
        let blocks = classify_blocks("- a lifejacket was\n1.2 Narrative\nnot worn");
        assert_eq!(
            kinds(&blocks),
            [TextType::ListItem, TextType::Heading, TextType::Paragraph]
        );
        assert_eq!(blocks[0].text, "- a lifejacket was");
        assert_eq!(blocks[2].text, "not worn");
    }

    #[test]
    fn wrapped_list_item_is_merged() {
        let blocks = classify_blocks("a) The vessel was\ntravelling at speed.");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, TextType::ListItem);
        assert_eq!(blocks[0].text, "a) The vessel was travelling at speed.");
    }

    #[test]
    fn finished_list_item_is_not_continued() {
        let blocks = classify_blocks("a) The vessel was travelling.\nAnother crew member noted the time.");
        assert_eq!(kinds(&blocks), [TextType::ListItem, TextType::Paragraph]);
        assert_eq!(blocks[1].text, "Another crew member noted the time.");
    }

    #[test]
    fn capitalised_line_after_open_item_starts_paragraph() {
        let blocks = classify_blocks("- a lifejacket\nThe crew then");
        assert_eq!(kinds(&blocks), [TextType::ListItem, TextType::Paragraph]);
    }

    #[test]
    fn consecutive_items_stay_separate() {
        let blocks = classify_blocks("Findings:\n(a) one\n(b) two\nwith more\n\nafter");
        assert_eq!(
            kinds(&blocks),
            [
                TextType::Paragraph,
                TextType::ListItem,
                TextType::ListItem,
                TextType::Paragraph
            ]
        );
        assert_eq!(blocks[2].text, "(b) two with more");
        assert_eq!(blocks[3].text, "after");
    }

    #[test]
    fn empty_input_has_no_blocks() {
        assert!(classify_blocks("").is_empty());
        assert!(classify_blocks("\n  \n\t\n").is_empty());
    }
}
