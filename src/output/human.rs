//! Human-readable output formatting

use crate::api::types::{ChapterRef, ComparisonItem, DocumentRef, SourceChunk};
use crate::chat::format::Paragraph;
use crate::notify::{Notice, Severity};

/// Format a byte count the way file listings show it
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let exponent = (bytes as f64).log(1024.0).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exponent as i32);
    let formatted = format!("{:.2}", value);
    // Trim trailing zeros: 2.00 -> 2, 2.50 -> 2.5
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[exponent])
}

/// Truncate a title for selector labels
pub fn limit_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_chars).collect();
    format!("{}...", truncated)
}

/// Format the document catalog
pub fn format_documents(documents: &[DocumentRef]) -> String {
    if documents.is_empty() {
        return "No documents in the corpus. Upload one with 'tome upload <file>'.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("{} document(s):\n\n", documents.len()));
    for (i, doc) in documents.iter().enumerate() {
        output.push_str(&format!(
            "{}. {} ({})\n   id: {}\n",
            i + 1,
            doc.display_name(),
            format_file_size(doc.size),
            doc.filename
        ));
    }
    output
}

/// Format a chapter list. An empty list is a valid state and reads
/// differently from a failure.
pub fn format_chapters(book: &str, chapters: &[ChapterRef]) -> String {
    if chapters.is_empty() {
        return format!(
            "No chapters found in '{}'.\n",
            crate::api::types::display_label(book)
        );
    }

    let mut output = String::new();
    output.push_str(&format!(
        "Chapters of '{}':\n\n",
        crate::api::types::display_label(book)
    ));
    for chapter in chapters {
        output.push_str(&format!(
            "  {:>4}  {}  (page {})\n",
            chapter.chapter_number,
            limit_text(&chapter.title, 60),
            chapter.page
        ));
    }
    output
}

/// Selector label for one chapter: `Capítulo 3: Title...`
pub fn chapter_label(chapter: &ChapterRef) -> String {
    format!(
        "Capítulo {}: {}",
        chapter.chapter_number,
        limit_text(&chapter.title, 40)
    )
}

/// Render answer paragraphs with a left margin
pub fn format_paragraphs(paragraphs: &[Paragraph]) -> String {
    let mut output = String::new();
    for (i, paragraph) in paragraphs.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        for line in &paragraph.lines {
            output.push_str(&format!("  {}\n", line));
        }
    }
    output
}

/// Footnote list of the evidence chunks behind an answer
pub fn format_sources(chunks: &[SourceChunk]) -> String {
    if chunks.is_empty() {
        return String::new();
    }

    let mut output = String::from("\n  Sources:\n");
    for (i, chunk) in chunks.iter().enumerate() {
        output.push_str(&format!("    [{}] {}\n", i + 1, source_line(chunk)));
    }
    output
}

/// One resolved citation: `Fuente: book, página 5`
pub fn source_line(chunk: &SourceChunk) -> String {
    if chunk.page == "N/A" {
        format!("Fuente: {}", crate::api::types::display_label(&chunk.book))
    } else {
        format!(
            "Fuente: {}, página {}",
            crate::api::types::display_label(&chunk.book),
            chunk.page
        )
    }
}

/// Label for one selected comparison entry
pub fn format_selection(items: &[ComparisonItem]) -> String {
    let mut output = String::new();
    for (i, item) in items.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, item.label()));
    }
    output
}

/// Print a notice with its severity tag
pub fn print_notice(notice: &Notice) {
    let tag = match notice.severity {
        Severity::Info => "info",
        Severity::Success => "ok",
        Severity::Warning => "warn",
        Severity::Error => "error",
    };
    eprintln!("[{}] {}", tag, notice.message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(2048), "2 KB");
        assert_eq!(format_file_size(2_621_440), "2.5 MB");
    }

    #[test]
    fn test_limit_text() {
        assert_eq!(limit_text("corto", 40), "corto");
        let long = "x".repeat(50);
        let limited = limit_text(&long, 40);
        assert_eq!(limited.chars().count(), 43);
        assert!(limited.ends_with("..."));
    }

    #[test]
    fn test_source_line_hides_missing_page() {
        let with_page = SourceChunk {
            book: "quijote_1.pdf".to_string(),
            page: "5".to_string(),
        };
        assert_eq!(source_line(&with_page), "Fuente: quijote, página 5");

        let without = SourceChunk {
            book: "quijote_1.pdf".to_string(),
            page: "N/A".to_string(),
        };
        assert_eq!(source_line(&without), "Fuente: quijote");
    }

    #[test]
    fn test_empty_chapter_list_reads_as_valid_state() {
        let text = format_chapters("libro_1.pdf", &[]);
        assert!(text.contains("No chapters found"));
    }
}
