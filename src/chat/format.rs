//! Answer text formatting
//!
//! The backend returns plain text. A double line-break is a paragraph
//! boundary, a single line-break is a soft break inside a paragraph, and
//! a string without any boundary is one paragraph. Answers, summaries and
//! comparisons all go through the same rule.

/// One block-level paragraph; lines are joined by soft breaks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub lines: Vec<String>,
}

/// Split raw answer text into paragraphs with soft breaks
pub fn format_text(raw: &str) -> Vec<Paragraph> {
    if raw.is_empty() {
        return Vec::new();
    }

    raw.split("\n\n")
        .map(|block| Paragraph {
            lines: block.split('\n').map(str::to_string).collect(),
        })
        .collect()
}

/// Render paragraphs for the terminal: soft breaks become newlines,
/// paragraphs are separated by a blank line
pub fn render_plain(paragraphs: &[Paragraph]) -> String {
    paragraphs
        .iter()
        .map(|p| p.lines.join("\n"))
        .collect::<Vec<_>>()
        .join("\n\n")
}
