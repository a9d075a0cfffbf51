//! Document corpus commands: list, upload, delete, reindex

use crate::api::BackendClient;
use crate::cli::{drain_notices, resolve_book, DeleteArgs, ListArgs, ReindexArgs, UploadArgs};
use crate::core::error::{Error, Result};
use crate::library::UploadLifecycle;
use crate::notify::NotificationService;
use crate::output::{human, json};
use dialoguer::{theme::ColorfulTheme, Confirm};
use std::io::Write;

pub async fn list(client: &BackendClient, args: ListArgs) -> Result<()> {
    match client.list_documents().await {
        Ok(documents) => {
            if args.json {
                println!("{}", json::format_documents(&documents)?);
            } else {
                print!("{}", human::format_documents(&documents));
            }
        }
        Err(e) => eprintln!("{}", e),
    }
    Ok(())
}

pub async fn upload(client: &BackendClient, args: UploadArgs) -> Result<()> {
    let notices = NotificationService::default();
    let mut notice_rx = notices.subscribe();

    let mut lifecycle = UploadLifecycle::new();
    let result = lifecycle
        .run(client, &args.file, |percent| {
            print!("\rUploading... {:3}%", percent);
            let _ = std::io::stdout().flush();
        })
        .await;

    match result {
        Ok(outcome) => {
            println!();
            notices.success(format!(
                "File \"{}\" uploaded successfully.",
                outcome.document.display_name()
            ));
            if !outcome.message.is_empty() {
                notices.info(outcome.message);
            }

            // Refetch so the new document shows up in every listing
            match client.list_documents().await {
                Ok(documents) => print!("{}", human::format_documents(&documents)),
                Err(e) => notices.error(e.to_string()),
            }
        }
        Err(e) => {
            // Validation failures never touched the network
            if !e.is_validation() {
                println!();
            }
            notices.error(e.to_string());
        }
    }

    drain_notices(&mut notice_rx);
    Ok(())
}

pub async fn delete(client: &BackendClient, args: DeleteArgs) -> Result<()> {
    let notices = NotificationService::default();
    let mut notice_rx = notices.subscribe();

    let filename = match resolve_book(client, &args.book).await {
        Ok(filename) => filename,
        Err(e) => {
            notices.error(e.to_string());
            drain_notices(&mut notice_rx);
            return Ok(());
        }
    };

    if !args.yes && !confirm(&format!("Delete \"{}\"?", args.book))? {
        return Ok(());
    }

    match client.delete_document(&filename).await {
        Ok(response) => {
            // The server's message, verbatim
            notices.success(response.message);
            match client.list_documents().await {
                Ok(documents) => print!("{}", human::format_documents(&documents)),
                Err(e) => notices.error(e.to_string()),
            }
        }
        Err(e) => notices.error(e.to_string()),
    }

    drain_notices(&mut notice_rx);
    Ok(())
}

pub async fn reindex(client: &BackendClient, args: ReindexArgs) -> Result<()> {
    let notices = NotificationService::default();
    let mut notice_rx = notices.subscribe();

    if !args.yes
        && !confirm("Reindex all documents? This operation can take a while.")?
    {
        return Ok(());
    }

    println!("Reindexing...");
    match client.reindex().await {
        Ok(response) => notices.success(response.message),
        Err(e) => notices.error(e.to_string()),
    }

    drain_notices(&mut notice_rx);
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| Error::Prompt {
            message: format!("Confirmation failed: {}", e),
        })
}
