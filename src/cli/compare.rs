//! Multi-chapter comparison
//!
//! Builds the ordered selection, either from repeated `-s BOOK:CHAPTER`
//! flags or interactively, and issues one comparison call over it. The
//! selection enforces its own invariants: no duplicate pairs, and no
//! request below two chapters.

use crate::api::BackendClient;
use crate::chat::Panel;
use crate::cli::chapters::{render_loading, render_panel};
use crate::cli::{resolve_book, CompareArgs};
use crate::core::error::{Error, Result};
use crate::core::session::SessionState;
use crate::notify::{Notice, NotificationService};
use crate::output::human;
use dialoguer::{theme::ColorfulTheme, Select};
use tokio::sync::broadcast;

pub async fn run(client: &BackendClient, args: CompareArgs) -> Result<()> {
    let notices = NotificationService::default();
    let mut notice_rx = notices.subscribe();
    let mut session = SessionState::new();

    match client.list_documents().await {
        Ok(documents) => session.set_documents(documents),
        Err(e) => {
            notices.error(e.to_string());
            crate::cli::drain_notices(&mut notice_rx);
            return Ok(());
        }
    }

    if session.documents.is_empty() {
        notices.warning("The corpus is empty; upload documents first.");
        crate::cli::drain_notices(&mut notice_rx);
        return Ok(());
    }

    if args.sources.is_empty() {
        build_selection_interactively(client, &mut session, &notices, &mut notice_rx).await?;
    } else {
        for raw in &args.sources {
            match parse_source(raw) {
                Ok((book, chapter)) => match resolve_book(client, &book).await {
                    Ok(filename) => {
                        if let Err(e) = session.selection.add(filename, chapter) {
                            notices.warning(e.to_string());
                        }
                    }
                    Err(e) => notices.warning(e.to_string()),
                },
                Err(e) => notices.warning(e.to_string()),
            }
        }
    }

    crate::cli::drain_notices(&mut notice_rx);
    if !session.selection.is_empty() {
        compare_selection(client, &mut session, &notices).await;
    }
    crate::cli::drain_notices(&mut notice_rx);
    Ok(())
}

/// Split `BOOK:CHAPTER` at the last colon, so book names may contain one
fn parse_source(raw: &str) -> Result<(String, String)> {
    match raw.rsplit_once(':') {
        Some((book, chapter)) if !book.is_empty() && !chapter.is_empty() => {
            Ok((book.to_string(), chapter.to_string()))
        }
        _ => Err(Error::validation(format!(
            "Expected BOOK:CHAPTER, got '{}'",
            raw
        ))),
    }
}

async fn build_selection_interactively(
    client: &BackendClient,
    session: &mut SessionState,
    notices: &NotificationService,
    notice_rx: &mut broadcast::Receiver<Notice>,
) -> Result<()> {
    loop {
        if !session.selection.is_empty() {
            println!("\nSelected chapters:");
            print!("{}", human::format_selection(session.selection.items()));
        }

        let mut options = vec!["Add a chapter".to_string()];
        if !session.selection.is_empty() {
            options.push("Remove a chapter".to_string());
        }
        if session.selection.can_compare() {
            // The compare trigger only appears at two or more chapters
            options.push("Compare now".to_string());
        }
        options.push("Cancel".to_string());

        let choice = prompt_select("Comparison", &options)?;
        match options[choice].as_str() {
            "Add a chapter" => add_chapter(client, session, notices).await?,
            "Remove a chapter" => remove_chapter(session, notices)?,
            "Compare now" => return Ok(()),
            _ => {
                // Cancel clears the pending selection
                while !session.selection.is_empty() {
                    session.selection.remove_at(0)?;
                }
                return Ok(());
            }
        }

        crate::cli::drain_notices(notice_rx);
    }
}

async fn add_chapter(
    client: &BackendClient,
    session: &mut SessionState,
    notices: &NotificationService,
) -> Result<()> {
    let labels: Vec<String> = session
        .documents
        .iter()
        .map(|d| d.display_name().to_string())
        .collect();
    let book_idx = prompt_select("Book", &labels)?;
    let filename = session.documents[book_idx].filename.clone();

    println!("Identifying chapters...");
    let chapters = match session.chapters.ensure(client, &filename).await {
        Ok(chapters) => chapters.to_vec(),
        Err(e) => {
            notices.error(format!("Could not load chapters: {}", e));
            return Ok(());
        }
    };
    if chapters.is_empty() {
        notices.info("No chapters found in this document.");
        return Ok(());
    }

    let chapter_labels: Vec<String> = chapters.iter().map(human::chapter_label).collect();
    let chapter_idx = prompt_select("Chapter", &chapter_labels)?;
    let chapter = chapters[chapter_idx].chapter_number.clone();

    if let Err(e) = session.selection.add(filename, chapter) {
        notices.warning(e.to_string());
    }
    Ok(())
}

fn remove_chapter(session: &mut SessionState, notices: &NotificationService) -> Result<()> {
    let labels: Vec<String> = session
        .selection
        .items()
        .iter()
        .map(|item| item.label())
        .collect();
    // Freshly rendered indices: the list was just rebuilt above
    let idx = prompt_select("Remove which?", &labels)?;
    if let Err(e) = session.selection.remove_at(idx) {
        notices.warning(e.to_string());
    }
    Ok(())
}

/// Issue the comparison over the ordered selection. Below two chapters
/// this is a validation failure and no request is made.
async fn compare_selection(
    client: &BackendClient,
    session: &mut SessionState,
    notices: &NotificationService,
) {
    let sources = match session.selection.sources() {
        Ok(sources) => sources.to_vec(),
        Err(e) => {
            notices.warning(e.to_string());
            return;
        }
    };

    let ticket = session.panel.open("Comparación de capítulos");
    render_loading(&session.panel);

    match client.compare_chapters(&sources).await {
        Ok(comparison) => {
            session.panel.settle_text(ticket, &comparison);
        }
        Err(e) => {
            session.panel.settle_error(ticket, e.to_string());
        }
    }

    render_panel(&session.panel);
}

fn prompt_select(prompt: &str, items: &[String]) -> Result<usize> {
    Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()
        .map_err(|e| Error::Prompt {
            message: format!("Selection failed: {}", e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_source() {
        let (book, chapter) = parse_source("quijote_9f31.pdf:3").unwrap();
        assert_eq!(book, "quijote_9f31.pdf");
        assert_eq!(chapter, "3");

        // The last colon wins, so odd book names survive
        let (book, chapter) = parse_source("a:b.pdf:IV").unwrap();
        assert_eq!(book, "a:b.pdf");
        assert_eq!(chapter, "IV");

        assert!(parse_source("sin-capitulo").is_err());
        assert!(parse_source(":3").is_err());
        assert!(parse_source("libro.pdf:").is_err());
    }
}
