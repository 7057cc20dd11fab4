//! Plain text rendering for report documents

use super::{Block, Document};

/// Render the document one block per line. Titles are underlined with `=`,
/// section headers with `-`.
pub fn render_text(document: &Document) -> String {
    let mut out = String::new();
    for block in &document.blocks {
        match block {
            Block::Title(text) => {
                out.push_str(text);
                out.push('\n');
                out.push_str(&underline(text, '='));
            }
            Block::SectionHeader(text) => {
                out.push_str(text);
                out.push('\n');
                out.push_str(&underline(text, '-'));
            }
            Block::Paragraph(text) => out.push_str(text),
        }
        out.push('\n');
    }
    out
}

const TAB_STOP: usize = 8;

// Width of the text as a terminal shows it, tabs advancing to the next stop.
fn display_width(text: &str) -> usize {
    text.chars().fold(0, |column, c| match c {
        '\t' => (column / TAB_STOP + 1) * TAB_STOP,
        _ => column + 1,
    })
}

fn underline(text: &str, rule: char) -> String {
    std::iter::repeat_n(rule, display_width(text.trim_end())).collect()
}
