//! Wire types for the backend HTTP contract
//!
//! The backend is loose about numeric fields: chapter numbers and page
//! numbers arrive as either JSON strings or numbers depending on how the
//! chapter extractor parsed the document. Everything is normalized to
//! strings on the way in.

use crate::core::error::Error;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// One document in the corpus.
///
/// Identity is the server-assigned filename, which embeds a uniqueness
/// token after the original name (`report_a1b2c3.pdf`). The full string
/// is what every subsequent call must use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    pub filename: String,
    #[serde(default)]
    pub size: u64,
}

impl DocumentRef {
    /// User-facing label: everything before the uniqueness token
    pub fn display_name(&self) -> &str {
        display_label(&self.filename)
    }
}

/// Strip the server's uniqueness token from a filename for display.
/// The full string remains the identity used in requests.
pub fn display_label(filename: &str) -> &str {
    match filename.split_once('_') {
        Some((label, _)) if !label.is_empty() => label,
        _ => filename,
    }
}

/// One chapter of a document, as identified by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterRef {
    #[serde(deserialize_with = "string_or_number")]
    pub chapter_number: String,
    #[serde(default)]
    pub title: String,
    #[serde(default = "not_available", deserialize_with = "string_or_number")]
    pub page: String,
}

/// One evidence unit backing part of an answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceChunk {
    pub book: String,
    #[serde(default = "not_available", deserialize_with = "string_or_number")]
    pub page: String,
}

/// One `(document, chapter)` pair queued for comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonItem {
    pub book: String,
    pub chapter: String,
}

impl ComparisonItem {
    /// Label shown in selection lists: `report - Cap. 3`
    pub fn label(&self) -> String {
        format!("{} - Cap. {}", display_label(&self.book), self.chapter)
    }
}

/// Requested summary length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl SummaryLength {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryLength::Short => "short",
            SummaryLength::Medium => "medium",
            SummaryLength::Long => "long",
        }
    }
}

impl fmt::Display for SummaryLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SummaryLength {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "short" => Ok(SummaryLength::Short),
            "medium" => Ok(SummaryLength::Medium),
            "long" => Ok(SummaryLength::Long),
            other => Err(Error::validation(format!(
                "Unknown summary length '{}' (expected short, medium or long)",
                other
            ))),
        }
    }
}

// =============================================================================
// REQUEST/RESPONSE TYPES
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct DocumentsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub documents: Vec<DocumentRef>,
}

#[derive(Debug, Deserialize)]
pub struct UploadResponse {
    pub filename: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ChaptersResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub chapters: Vec<ChapterRef>,
}

#[derive(Debug, Deserialize)]
pub struct SummaryResponse {
    #[serde(default)]
    pub success: bool,
    pub summary: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CompareRequest<'a> {
    pub sources: &'a [ComparisonItem],
}

#[derive(Debug, Deserialize)]
pub struct ComparisonResponse {
    #[serde(default)]
    pub success: bool,
    pub comparison: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QueryRequest<'a> {
    pub query: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    pub answer: Option<String>,
    #[serde(default)]
    pub chunks: Vec<SourceChunk>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub response: Option<String>,
    pub message: Option<String>,
}

// =============================================================================
// SERDE HELPERS
// =============================================================================

fn not_available() -> String {
    "N/A".to_string()
}

/// Accept a JSON string or number, normalizing to a string
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(f) => f.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_label_strips_token() {
        assert_eq!(display_label("quijote_9f31ab.pdf"), "quijote");
        assert_eq!(display_label("plain.pdf"), "plain.pdf");
        // A leading delimiter is not a token boundary
        assert_eq!(display_label("_odd.pdf"), "_odd.pdf");
    }

    #[test]
    fn test_chapter_number_tolerates_int_and_string() {
        let c: ChapterRef =
            serde_json::from_str(r#"{"chapter_number": 3, "title": "Inicio", "page": "12"}"#)
                .unwrap();
        assert_eq!(c.chapter_number, "3");
        assert_eq!(c.page, "12");

        let c: ChapterRef =
            serde_json::from_str(r#"{"chapter_number": "IV", "title": "Final", "page": 90}"#)
                .unwrap();
        assert_eq!(c.chapter_number, "IV");
        assert_eq!(c.page, "90");
    }

    #[test]
    fn test_source_chunk_page_defaults_to_na() {
        let s: SourceChunk = serde_json::from_str(r#"{"book": "quijote_1.pdf"}"#).unwrap();
        assert_eq!(s.page, "N/A");
    }

    #[test]
    fn test_summary_length_round_trip() {
        assert_eq!("short".parse::<SummaryLength>().unwrap(), SummaryLength::Short);
        assert_eq!(SummaryLength::Long.as_str(), "long");
        assert!("huge".parse::<SummaryLength>().is_err());
    }

    #[test]
    fn test_comparison_item_serializes_to_wire_shape() {
        let item = ComparisonItem {
            book: "quijote_1.pdf".to_string(),
            chapter: "3".to_string(),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["book"], "quijote_1.pdf");
        assert_eq!(json["chapter"], "3");
    }
}
