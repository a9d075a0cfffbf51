//! One-shot question

use crate::api::BackendClient;
use crate::chat::format::format_text;
use crate::chat::{CitationIndex, QueryLifecycle};
use crate::cli::AskArgs;
use crate::core::error::Result;
use crate::output::{human, json};

pub async fn run(client: &BackendClient, args: AskArgs) -> Result<()> {
    let mut query = QueryLifecycle::new();

    let submission = match query.begin(&args.question) {
        Ok(Some(submission)) => submission,
        Ok(None) => return Ok(()),
        Err(e) => {
            eprintln!("{}", e);
            return Ok(());
        }
    };

    if !args.json {
        println!("Thinking...");
    }

    let result = client.query(&submission.text).await;
    query.settle();

    match result {
        Ok((answer, chunks)) => {
            if args.json {
                println!("{}", json::format_answer(&answer, &chunks)?);
            } else {
                let citations = CitationIndex::new(submission.generation, chunks);
                print!("{}", human::format_paragraphs(&format_text(&answer)));
                print!("{}", human::format_sources(citations.chunks()));
            }
        }
        Err(e) => eprintln!("{}", e),
    }

    Ok(())
}
