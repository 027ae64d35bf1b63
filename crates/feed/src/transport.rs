//! Page sources for the coordinator.

use std::time::Duration;

use async_trait::async_trait;
use shelf_catalog::Book;

use crate::error::FeedError;
use crate::params::FeedParams;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Fetches one page of books for a session.
#[async_trait]
pub trait PageTransport: Send + Sync {
    async fn fetch_page(&self, params: &FeedParams, page: u32) -> Result<Vec<Book>, FeedError>;
}

/// Fetches pages from a running catalog server over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport for the server at `base_url`, e.g. `http://localhost:5000`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder().timeout(DEFAULT_TIMEOUT).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn books_url(&self) -> String {
        format!("{}/books", self.base_url)
    }
}

#[async_trait]
impl PageTransport for HttpTransport {
    async fn fetch_page(&self, params: &FeedParams, page: u32) -> Result<Vec<Book>, FeedError> {
        let url = self.books_url();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("seed", params.seed.clone()),
                ("page", page.to_string()),
                ("language", params.language.clone()),
                ("likes", params.likes.to_string()),
                ("reviews", params.reviews.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.bytes().await?;
        tracing::debug!(page, bytes = body.len(), "fetched page from {}", url);

        Ok(serde_json::from_slice(&body)?)
    }
}

/// Generates pages in-process without a server.
///
/// An optional page limit makes later pages come back empty, which exercises
/// the exhaustion path.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalTransport {
    page_limit: Option<u32>,
}

impl LocalTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_limit(page_limit: u32) -> Self {
        Self {
            page_limit: Some(page_limit),
        }
    }
}

#[async_trait]
impl PageTransport for LocalTransport {
    async fn fetch_page(&self, params: &FeedParams, page: u32) -> Result<Vec<Book>, FeedError> {
        if self.page_limit.is_some_and(|limit| page > limit) {
            return Ok(Vec::new());
        }
        Ok(shelf_catalog::generate(&params.query(page)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_catalog::PAGE_SIZE;

    #[test]
    fn books_url_ignores_trailing_slash() {
        let transport = HttpTransport::with_client(reqwest::Client::new(), "http://localhost:5000/");
        assert_eq!(transport.books_url(), "http://localhost:5000/books");
    }

    #[tokio::test]
    async fn local_transport_generates_pages() {
        let params = FeedParams::default();
        let books = LocalTransport::new().fetch_page(&params, 2).await.unwrap();
        assert_eq!(books.len(), PAGE_SIZE);
        assert_eq!(books[0].index, 21);
    }

    #[tokio::test]
    async fn local_transport_exhausts_after_limit() {
        let params = FeedParams::default();
        let transport = LocalTransport::with_page_limit(1);
        assert_eq!(transport.fetch_page(&params, 1).await.unwrap().len(), PAGE_SIZE);
        assert!(transport.fetch_page(&params, 2).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_error() {
        let transport = HttpTransport::new("http://127.0.0.1:9").unwrap();
        let err = transport
            .fetch_page(&FeedParams::default(), 1)
            .await
            .unwrap_err();
        assert!(matches!(err, FeedError::Transport(_)));
    }
}
