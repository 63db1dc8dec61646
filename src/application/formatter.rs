//! # Result Formatter
//!
//! Classifies the lines of a generated strategy document for display. Content is never
//! rewritten beyond stripping list markers and surrounding whitespace, and no structure
//! is enforced: zero, repeated or out-of-order section headers are all accepted.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static NUMBERED_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.").unwrap());

/// One displayable line of a generated document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocLine {
    /// `A)`, `B)` or `C)` at the very start of the line
    Header { label: char, text: String },
    /// `-` bullet or `N.` numbered entry, marker stripped
    Item(String),
    Prose(String),
}

impl DocLine {
    pub fn text(&self) -> &str {
        match self {
            DocLine::Header { text, .. } => text,
            DocLine::Item(text) | DocLine::Prose(text) => text,
        }
    }
}

/// Classifies every non-blank line, preserving order.
pub fn classify(document: &str) -> Vec<DocLine> {
    document.lines().filter_map(classify_line).collect()
}

pub fn classify_line(line: &str) -> Option<DocLine> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(label) = section_label(line) {
        return Some(DocLine::Header {
            label,
            text: line[2..].trim().to_string(),
        });
    }

    if let Some(rest) = trimmed.strip_prefix('-') {
        return Some(DocLine::Item(rest.trim().to_string()));
    }

    if let Some(marker) = NUMBERED_MARKER.find(trimmed) {
        return Some(DocLine::Item(trimmed[marker.end()..].trim().to_string()));
    }

    Some(DocLine::Prose(trimmed.to_string()))
}

/// The header marker is matched on the raw line: an indented `A)` is not a header.
fn section_label(line: &str) -> Option<char> {
    let mut chars = line.chars();
    match (chars.next(), chars.next()) {
        (Some(label @ ('A' | 'B' | 'C')), Some(')')) => Some(label),
        _ => None,
    }
}

/// Lines grouped under the header that precedes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// `None` for anything before the first header
    pub label: Option<char>,
    pub title: String,
    pub lines: Vec<DocLine>,
}

pub fn sections(lines: &[DocLine]) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();

    for line in lines {
        match line {
            DocLine::Header { label, text } => sections.push(Section {
                label: Some(*label),
                title: text.clone(),
                lines: Vec::new(),
            }),
            other => match sections.last_mut() {
                Some(section) => section.lines.push(other.clone()),
                None => sections.push(Section {
                    label: None,
                    title: String::new(),
                    lines: vec![other.clone()],
                }),
            },
        }
    }

    sections
}

/// Titles (A), hooks (B) and flow (C) pulled out of a classified document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Strategy {
    pub titles: Vec<String>,
    pub hooks: Vec<String>,
    pub flow: Vec<String>,
}

impl Strategy {
    pub fn from_lines(lines: &[DocLine]) -> Self {
        let mut strategy = Strategy::default();

        for section in sections(lines) {
            let bucket = match section.label {
                Some('A') => &mut strategy.titles,
                Some('B') => &mut strategy.hooks,
                Some('C') => &mut strategy.flow,
                _ => continue,
            };
            bucket.extend(section.lines.iter().map(|line| line.text().to_string()));
        }

        strategy
    }

    pub fn from_document(document: &str) -> Self {
        Self::from_lines(&classify(document))
    }
}
