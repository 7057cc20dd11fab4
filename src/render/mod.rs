//! Output rendering for reports

pub mod json;
pub mod text;

pub use json::{render_json, render_json_compact, render_json_string};
pub use text::render_text;

use serde::{Deserialize, Serialize};

use crate::report::ReportRenderer;

/// A single laid out piece of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Block {
    Title(String),
    Paragraph(String),
    SectionHeader(String),
}

/// A report document that records the blocks emitted into it, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text of every paragraph, in order
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Paragraph(text) => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn title(&self) -> Option<&str> {
        self.blocks.iter().find_map(|b| match b {
            Block::Title(text) => Some(text.as_str()),
            _ => None,
        })
    }
}

impl ReportRenderer for Document {
    fn emit_title(&mut self, text: &str) {
        self.blocks.push(Block::Title(text.to_owned()));
    }
    fn emit_paragraph(&mut self, text: &str) {
        self.blocks.push(Block::Paragraph(text.to_owned()));
    }
    fn emit_section_header(&mut self, text: &str) {
        self.blocks.push(Block::SectionHeader(text.to_owned()));
    }
}
