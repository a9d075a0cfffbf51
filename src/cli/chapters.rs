//! Chapter listing and summaries

use crate::api::types::display_label;
use crate::api::BackendClient;
use crate::chat::{Panel, PanelContent};
use crate::cli::{resolve_book, ChaptersArgs, SummaryArgs};
use crate::core::error::Result;
use crate::library::ChapterCatalog;
use crate::output::{human, json};

pub async fn chapters(client: &BackendClient, args: ChaptersArgs) -> Result<()> {
    let filename = match resolve_book(client, &args.book).await {
        Ok(filename) => filename,
        Err(e) => {
            eprintln!("{}", e);
            return Ok(());
        }
    };

    let mut catalog = ChapterCatalog::new();
    println!("Identifying chapters...");
    let result = if args.refresh {
        catalog.refresh(client, &filename).await
    } else {
        catalog.ensure(client, &filename).await
    };

    match result {
        Ok(chapters) => {
            if args.json {
                println!("{}", json::format_chapters(&filename, chapters)?);
            } else {
                print!("{}", human::format_chapters(&filename, chapters));
            }
        }
        // A fetch failure, unlike an empty list, reads as an error
        Err(e) => eprintln!("Could not identify chapters: {}", e),
    }

    Ok(())
}

pub async fn summary(client: &BackendClient, args: SummaryArgs) -> Result<()> {
    let filename = match resolve_book(client, &args.book).await {
        Ok(filename) => filename,
        Err(e) => {
            eprintln!("{}", e);
            return Ok(());
        }
    };

    // The panel opens before the request resolves, busy state visible
    let mut panel = Panel::new();
    let ticket = panel.open(format!(
        "Resumen: {} - Capítulo {}",
        display_label(&filename),
        args.chapter
    ));
    render_loading(&panel);

    match client
        .chapter_summary(&filename, &args.chapter, args.length)
        .await
    {
        Ok(summary) => {
            panel.settle_text(ticket, &summary);
        }
        Err(e) => {
            panel.settle_error(ticket, e.to_string());
        }
    }

    render_panel(&panel);
    Ok(())
}

pub(crate) fn render_loading(panel: &Panel) {
    println!("{}", panel.title());
    println!("  generating...");
}

pub(crate) fn render_panel(panel: &Panel) {
    match panel.content() {
        PanelContent::Text(paragraphs) => {
            println!();
            print!("{}", human::format_paragraphs(paragraphs));
        }
        PanelContent::Error(message) => eprintln!("  {}", message),
        PanelContent::Loading | PanelContent::Empty => {}
    }
}
