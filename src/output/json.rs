//! JSON output for scripting

use crate::api::types::{ChapterRef, DocumentRef, SourceChunk};
use crate::core::error::Result;
use serde::Serialize;

#[derive(Serialize)]
struct DocumentsOut<'a> {
    documents: &'a [DocumentRef],
}

#[derive(Serialize)]
struct ChaptersOut<'a> {
    book: &'a str,
    chapters: &'a [ChapterRef],
}

#[derive(Serialize)]
struct AnswerOut<'a> {
    answer: &'a str,
    chunks: &'a [SourceChunk],
}

pub fn format_documents(documents: &[DocumentRef]) -> Result<String> {
    Ok(serde_json::to_string_pretty(&DocumentsOut { documents })?)
}

pub fn format_chapters(book: &str, chapters: &[ChapterRef]) -> Result<String> {
    Ok(serde_json::to_string_pretty(&ChaptersOut { book, chapters })?)
}

pub fn format_answer(answer: &str, chunks: &[SourceChunk]) -> Result<String> {
    Ok(serde_json::to_string_pretty(&AnswerOut { answer, chunks })?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_round_trips() {
        let chunks = vec![SourceChunk {
            book: "x.pdf".to_string(),
            page: "5".to_string(),
        }];
        let json = format_answer("hola [1]", &chunks).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["answer"], "hola [1]");
        assert_eq!(value["chunks"][0]["page"], "5");
    }
}
