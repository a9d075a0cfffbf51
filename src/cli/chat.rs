//! Interactive chat session
//!
//! The terminal counterpart of the observed chat surface: questions get
//! cited answers appended to a transcript, uploads can happen mid
//! conversation, and citation markers are resolved against the current
//! answer's bindings only.

use crate::api::BackendClient;
use crate::chat::format::format_text;
use crate::chat::CitationIndex;
use crate::cli::drain_notices;
use crate::core::error::Result;
use crate::core::session::SessionState;
use crate::library::UploadLifecycle;
use crate::notify::NotificationService;
use crate::output::human;
use dialoguer::{theme::ColorfulTheme, Input};
use std::io::Write;
use std::path::PathBuf;

const HELP: &str = "\
Commands:
  /source <n>    Show the evidence behind citation marker [n]
  /sources       List all sources of the current answer
  /upload <file> Add a document to the corpus (PDF, TXT, DOC, DOCX)
  /docs          List documents
  /help          This help
  /quit          Leave the session

Anything else is sent to the backend as a question.";

/// Run the interactive chat loop
pub async fn run(client: &BackendClient) -> Result<()> {
    let notices = NotificationService::default();
    let mut notice_rx = notices.subscribe();
    let mut session = SessionState::new();

    println!("tome chat ({})", client.base_url());
    println!("{}", HELP);
    println!();

    // Load the corpus up front so answers have context to name
    match client.list_documents().await {
        Ok(documents) => {
            println!("{}", human::format_documents(&documents));
            session.set_documents(documents);
        }
        Err(e) => notices.error(e.to_string()),
    }

    loop {
        drain_notices(&mut notice_rx);

        let line: String = match Input::with_theme(&ColorfulTheme::default())
            .with_prompt("you")
            .allow_empty(true)
            .interact_text()
        {
            Ok(line) => line,
            // EOF / closed terminal ends the session
            Err(_) => break,
        };

        let trimmed = line.trim();
        match trimmed {
            "" => continue,
            "/quit" | "/exit" => break,
            "/help" => println!("{}", HELP),
            "/docs" => match client.list_documents().await {
                Ok(documents) => {
                    print!("{}", human::format_documents(&documents));
                    session.set_documents(documents);
                }
                Err(e) => notices.error(e.to_string()),
            },
            "/sources" => {
                print!("{}", human::format_sources(session.citations.chunks()));
            }
            _ if trimmed.starts_with("/source") => {
                activate_citation(&session, trimmed);
            }
            _ if trimmed.starts_with("/upload") => {
                upload_document(client, &mut session, &notices, trimmed).await;
            }
            _ => submit_query(client, &mut session, &notices, trimmed).await,
        }
    }

    drain_notices(&mut notice_rx);
    Ok(())
}

/// Resolve a citation marker through the current bindings only.
/// A marker with no corresponding chunk is a silent no-op.
fn activate_citation(session: &SessionState, line: &str) {
    let marker = line
        .trim_start_matches("/source")
        .trim()
        .parse::<usize>()
        .ok();

    if let Some(chunk) = marker.and_then(|m| session.citations.resolve_marker(m)) {
        println!("  {}", human::source_line(chunk));
    }
}

/// One question: placeholder first, then settle with the answer or a
/// distinguishable error entry. Never propagates past this boundary.
async fn submit_query(
    client: &BackendClient,
    session: &mut SessionState,
    notices: &NotificationService,
    input: &str,
) {
    let submission = match session.query.begin(input) {
        Ok(Some(submission)) => submission,
        // Already pending: nothing observable
        Ok(None) => return,
        Err(e) => {
            notices.warning(e.to_string());
            return;
        }
    };

    session.transcript.begin_exchange(&submission.text);
    print!("  ...\r");
    let _ = std::io::stdout().flush();

    match client.query(&submission.text).await {
        Ok((answer, chunks)) => {
            let paragraphs = format_text(&answer);
            session
                .transcript
                .settle_answer(paragraphs.clone(), submission.generation);
            session.bind_citations(CitationIndex::new(submission.generation, chunks));

            print!("{}", human::format_paragraphs(&paragraphs));
            print!("{}", human::format_sources(session.citations.chunks()));
            if !session.citations.is_empty() {
                println!("  ('/source <n>' shows one in full)");
            }
        }
        Err(e) => {
            session.transcript.settle_error(e.to_string());
            notices.error(e.to_string());
        }
    }

    session.query.settle();
}

/// Upload mid-conversation, then refetch the catalog so the new
/// document shows up everywhere
async fn upload_document(
    client: &BackendClient,
    session: &mut SessionState,
    notices: &NotificationService,
    line: &str,
) {
    let path = line.trim_start_matches("/upload").trim();
    if path.is_empty() {
        notices.warning("Usage: /upload <file>");
        return;
    }

    let mut upload = UploadLifecycle::new();
    let result = upload
        .run(client, &PathBuf::from(path), |percent| {
            print!("\r  uploading... {:3}%", percent);
            let _ = std::io::stdout().flush();
        })
        .await;
    println!();

    match result {
        Ok(outcome) => {
            notices.success(format!(
                "File \"{}\" uploaded successfully.",
                outcome.document.display_name()
            ));
            if !outcome.message.is_empty() {
                notices.info(outcome.message);
            }

            let note = format!(
                "Processed \"{}\". Ask me about its content!",
                outcome.document.display_name()
            );
            println!("  {}", note);
            session.transcript.push_note(note);

            match client.list_documents().await {
                Ok(documents) => session.set_documents(documents),
                Err(e) => notices.error(e.to_string()),
            }
        }
        Err(e) => notices.error(e.to_string()),
    }
}
