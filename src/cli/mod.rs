//! CLI command definitions and handlers

pub mod ask;
pub mod chapters;
pub mod chat;
pub mod compare;
pub mod docs;

use crate::api::types::SummaryLength;
use crate::api::BackendClient;
use crate::core::error::{Error, Result};
use crate::notify::Notice;
use crate::output::human;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::sync::broadcast;

const LONG_ABOUT: &str = r#"
Chat with a retrieval-augmented document backend from the terminal.

QUICK START:
    1. tome upload book.pdf       Add a document to the corpus
    2. tome chat                  Ask questions, get cited answers
    3. tome chapters book.pdf     See what the backend found

ANSWERS & CITATIONS:
    Answers embed markers like [1]. In the chat session, '/source 1'
    shows the evidence behind a marker (book and page).

CHAPTER TOOLS:
    tome chapters <book>                   List identified chapters
    tome summary <book> <chapter>          Summarize one chapter
    tome compare                           Pick chapters interactively
    tome compare -s a.pdf:1 -s b.pdf:2     Compare without prompts

BACKEND:
    The backend address comes from --url, then TOME_URL, then
    config.toml, then http://localhost:5000.

EXAMPLES:
    tome ask "¿Quién es el protagonista?"
    tome summary quijote_9f31.pdf 3 --length long
    tome list --json
"#;

/// Chat with your document corpus
#[derive(Parser, Debug)]
#[command(name = "tome")]
#[command(author, version)]
#[command(about = "Terminal client for a retrieval-augmented document backend")]
#[command(long_about = LONG_ABOUT)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Backend base URL (overrides TOME_URL and config.toml)
    #[arg(long, global = true)]
    pub url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive chat session with cited answers
    #[command(visible_alias = "c")]
    Chat,

    /// Ask a single question and print the cited answer
    #[command(visible_alias = "a")]
    Ask(AskArgs),

    /// List documents in the corpus
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Upload a document (PDF, TXT, DOC or DOCX)
    #[command(visible_alias = "up")]
    Upload(UploadArgs),

    /// Delete a document from the corpus
    #[command(visible_alias = "rm")]
    Delete(DeleteArgs),

    /// Re-run backend indexing over all documents
    Reindex(ReindexArgs),

    /// List the chapters of a document
    #[command(visible_alias = "ch")]
    Chapters(ChaptersArgs),

    /// Summarize one chapter
    #[command(visible_alias = "sum")]
    Summary(SummaryArgs),

    /// Compare two or more chapters
    #[command(visible_alias = "cmp")]
    Compare(CompareArgs),
}

/// Arguments for the ask command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:
    tome ask \"¿De qué trata el capítulo 3?\"
    tome ask \"main themes\" --json")]
pub struct AskArgs {
    /// The question to ask
    pub question: String,

    /// JSON output
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// JSON output
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the upload command
#[derive(Parser, Debug)]
pub struct UploadArgs {
    /// File to upload
    pub file: PathBuf,
}

/// Arguments for the delete command
#[derive(Parser, Debug)]
pub struct DeleteArgs {
    /// Document to delete (server filename or display name)
    pub book: String,

    /// Skip the confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Arguments for the reindex command
#[derive(Parser, Debug)]
pub struct ReindexArgs {
    /// Skip the confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Arguments for the chapters command
#[derive(Parser, Debug)]
pub struct ChaptersArgs {
    /// Document to inspect (server filename or display name)
    pub book: String,

    /// Refetch even if cached this session
    #[arg(long)]
    pub refresh: bool,

    /// JSON output
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the summary command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:
    tome summary quijote.pdf 3
    tome summary quijote.pdf IV --length long")]
pub struct SummaryArgs {
    /// Document (server filename or display name)
    pub book: String,

    /// Chapter number as listed by 'tome chapters'
    pub chapter: String,

    /// Summary length
    #[arg(short, long, default_value = "medium")]
    pub length: SummaryLength,
}

/// Arguments for the compare command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:
    tome compare                           Interactive chapter picker
    tome compare -s a.pdf:1 -s b.pdf:2     Compare chapter 1 of a with 2 of b")]
pub struct CompareArgs {
    /// Chapter to include, as BOOK:CHAPTER (repeatable)
    #[arg(short = 's', long = "source", value_name = "BOOK:CHAPTER")]
    pub sources: Vec<String>,
}

/// Resolve a user-supplied book name to the full server-assigned
/// filename. Accepts the exact identity or an unambiguous display name.
pub(crate) async fn resolve_book(client: &BackendClient, name: &str) -> Result<String> {
    let documents = client.list_documents().await?;

    if let Some(doc) = documents.iter().find(|d| d.filename == name) {
        return Ok(doc.filename.clone());
    }

    let matches: Vec<_> = documents
        .iter()
        .filter(|d| d.display_name() == name)
        .collect();
    match matches.as_slice() {
        [doc] => Ok(doc.filename.clone()),
        [] => Err(Error::validation(format!(
            "No document named '{}'. Run 'tome list' to see the corpus.",
            name
        ))),
        _ => Err(Error::validation(format!(
            "'{}' is ambiguous; use the full id shown by 'tome list'.",
            name
        ))),
    }
}

/// Print every notice already emitted, without blocking
pub(crate) fn drain_notices(rx: &mut broadcast::Receiver<Notice>) {
    while let Ok(notice) = rx.try_recv() {
        human::print_notice(&notice);
    }
}
