//! Typed client for the document backend
//!
//! Thin request/response wrapper around the backend's HTTP contract.
//! Stateless: all session state lives with the caller. The client is
//! built without a request timeout, matching the backend's long-running
//! summary and comparison calls.

use crate::api::types::{
    ChapterRef, ChaptersResponse, ChatRequest, ChatResponse, ComparisonItem, ComparisonResponse,
    CompareRequest, DocumentRef, DocumentsResponse, MessageResponse, QueryRequest, QueryResponse,
    SourceChunk, SummaryLength, SummaryResponse, UploadResponse,
};
use crate::core::error::{Error, Result};
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};
use tracing::debug;

const UPLOAD_CHUNK_SIZE: usize = 64 * 1024;

/// Client for the document backend
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    /// Create a new client for the given base URL
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The base URL this client talks to, without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =========================================================================
    // DOCUMENTS
    // =========================================================================

    /// List all documents in the corpus
    pub async fn list_documents(&self) -> Result<Vec<DocumentRef>> {
        let url = format!("{}/documents", self.base_url);

        let res = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;

        if !res.status().is_success() {
            return Err(self.api_error(res).await);
        }

        let body: DocumentsResponse = res.json().await.map_err(|e| {
            Error::transport(format!("Failed to parse documents response: {}", e))
        })?;

        Ok(body.documents)
    }

    /// Upload one file as multipart form data.
    ///
    /// `on_progress` is called with a 0..=100 percentage as chunks are
    /// handed to the transport; it is display-only. The returned
    /// [`UploadResponse::filename`] is the server-assigned identity and
    /// must be used for every subsequent reference to the document.
    pub async fn upload<F>(
        &self,
        filename: &str,
        bytes: Vec<u8>,
        mime: &str,
        mut on_progress: F,
    ) -> Result<UploadResponse>
    where
        F: FnMut(u8) + Send + Sync + 'static,
    {
        let url = format!("{}/upload", self.base_url);
        debug!(file = filename, bytes = bytes.len(), "Uploading document");

        let total = bytes.len() as u64;
        let chunks: Vec<Vec<u8>> = bytes
            .chunks(UPLOAD_CHUNK_SIZE)
            .map(|c| c.to_vec())
            .collect();

        let mut sent = 0u64;
        let stream = futures::stream::iter(chunks.into_iter().map(move |chunk| {
            sent += chunk.len() as u64;
            on_progress(transfer_percent(sent, total));
            Ok::<Vec<u8>, std::io::Error>(chunk)
        }));

        let part = Part::stream_with_length(Body::wrap_stream(stream), total)
            .file_name(filename.to_string())
            .mime_str(mime)
            .map_err(|e| Error::transport(format!("Invalid MIME type '{}': {}", mime, e)))?;
        let form = Form::new().part("file", part);

        let res = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;

        if !res.status().is_success() {
            return Err(self.api_error(res).await);
        }

        res.json()
            .await
            .map_err(|e| Error::transport(format!("Failed to parse upload response: {}", e)))
    }

    /// Delete a document by its server-assigned filename
    pub async fn delete_document(&self, filename: &str) -> Result<MessageResponse> {
        let url = format!(
            "{}/documents/{}",
            self.base_url,
            urlencoding::encode(filename)
        );

        let res = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;

        if !res.status().is_success() {
            return Err(self.api_error(res).await);
        }

        res.json()
            .await
            .map_err(|e| Error::transport(format!("Failed to parse delete response: {}", e)))
    }

    /// Re-run backend indexing over the whole corpus
    pub async fn reindex(&self) -> Result<MessageResponse> {
        let url = format!("{}/reindex", self.base_url);

        let res = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;

        if !res.status().is_success() {
            return Err(self.api_error(res).await);
        }

        res.json()
            .await
            .map_err(|e| Error::transport(format!("Failed to parse reindex response: {}", e)))
    }

    // =========================================================================
    // CHAPTERS
    // =========================================================================

    /// List the chapters of one document. An empty list is a valid state.
    pub async fn list_chapters(&self, filename: &str) -> Result<Vec<ChapterRef>> {
        let url = format!(
            "{}/books/{}/chapters",
            self.base_url,
            urlencoding::encode(filename)
        );

        let res = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;

        if !res.status().is_success() {
            return Err(self.api_error(res).await);
        }

        let body: ChaptersResponse = res.json().await.map_err(|e| {
            Error::transport(format!("Failed to parse chapters response: {}", e))
        })?;

        Ok(body.chapters)
    }

    /// Fetch a chapter summary of the requested length
    pub async fn chapter_summary(
        &self,
        filename: &str,
        chapter: &str,
        length: SummaryLength,
    ) -> Result<String> {
        let url = format!(
            "{}/books/{}/chapters/{}/summary?length={}",
            self.base_url,
            urlencoding::encode(filename),
            urlencoding::encode(chapter),
            length.as_str()
        );

        let res = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;

        let status = res.status();
        if !status.is_success() {
            return Err(self.api_error(res).await);
        }

        let body: SummaryResponse = res.json().await.map_err(|e| {
            Error::transport(format!("Failed to parse summary response: {}", e))
        })?;

        match body.summary {
            Some(summary) if body.success => Ok(summary),
            _ => Err(Error::server(status.as_u16(), body.message)),
        }
    }

    /// Compare the given chapters in their listed order
    pub async fn compare_chapters(&self, sources: &[ComparisonItem]) -> Result<String> {
        let url = format!("{}/compare-chapters", self.base_url);
        debug!(sources = sources.len(), "Requesting chapter comparison");

        let res = self
            .client
            .post(&url)
            .json(&CompareRequest { sources })
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;

        let status = res.status();
        if !status.is_success() {
            return Err(self.api_error(res).await);
        }

        let body: ComparisonResponse = res.json().await.map_err(|e| {
            Error::transport(format!("Failed to parse comparison response: {}", e))
        })?;

        match body.comparison {
            Some(comparison) if body.success => Ok(comparison),
            _ => Err(Error::server(status.as_u16(), body.message)),
        }
    }

    // =========================================================================
    // ANSWERING
    // =========================================================================

    /// Ask a free-text question, returning the answer and its evidence chunks
    pub async fn query(&self, query: &str) -> Result<(String, Vec<SourceChunk>)> {
        let url = format!("{}/query", self.base_url);
        debug!(chars = query.len(), "Submitting query");

        let res = self
            .client
            .post(&url)
            .json(&QueryRequest { query })
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;

        let status = res.status();
        if !status.is_success() {
            return Err(self.api_error(res).await);
        }

        let body: QueryResponse = res.json().await.map_err(|e| {
            Error::transport(format!("Failed to parse query response: {}", e))
        })?;

        // A 2xx body without the answer field is still a server failure
        match body.answer {
            Some(answer) => Ok((answer, body.chunks)),
            None => Err(Error::server(status.as_u16(), body.message)),
        }
    }

    /// Send one message to the alternate conversational endpoint
    pub async fn chat(&self, message: &str) -> Result<String> {
        let url = format!("{}/chat", self.base_url);

        let res = self
            .client
            .post(&url)
            .json(&ChatRequest { message })
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;

        let status = res.status();
        if !status.is_success() {
            return Err(self.api_error(res).await);
        }

        let body: ChatResponse = res.json().await.map_err(|e| {
            Error::transport(format!("Failed to parse chat response: {}", e))
        })?;

        match body.response {
            Some(response) => Ok(response),
            None => Err(Error::server(status.as_u16(), body.message)),
        }
    }

    // =========================================================================
    // PRIVATE HELPERS
    // =========================================================================

    /// Create a transport error with a helpful message
    fn connection_error(&self, e: reqwest::Error) -> Error {
        if e.is_connect() {
            Error::transport(format!(
                "Cannot reach the backend at {}. Check that it is running or pass --url.",
                self.base_url
            ))
        } else {
            Error::transport(format!("Request failed: {}", e))
        }
    }

    /// Create a server error from a non-success response, carrying the
    /// backend's message when the body is structured
    async fn api_error(&self, res: reqwest::Response) -> Error {
        let status = res.status().as_u16();
        let text = res.text().await.unwrap_or_default();

        let message = serde_json::from_str::<MessageResponse>(&text)
            .ok()
            .map(|m| m.message)
            .filter(|m| !m.trim().is_empty());

        Error::server(status, message)
    }
}

/// Percentage of a transfer, clamped to 0..=100
fn transfer_percent(sent: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    ((sent.min(total) * 100) / total) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_percent() {
        assert_eq!(transfer_percent(0, 200), 0);
        assert_eq!(transfer_percent(50, 200), 25);
        assert_eq!(transfer_percent(200, 200), 100);
        // Over-reported bytes are clamped
        assert_eq!(transfer_percent(300, 200), 100);
        // Empty files complete immediately
        assert_eq!(transfer_percent(0, 0), 100);
    }

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let client = BackendClient::new("http://localhost:5000/");
        assert_eq!(client.base_url(), "http://localhost:5000");
    }
}
