use std::sync::Arc;

use shelf_catalog::Book;
use tokio::sync::Mutex;

use crate::coordinator::{Completion, Coordinator, Phase};
use crate::params::FeedParams;
use crate::transport::PageTransport;
use crate::viewport::ScrollViewport;

/// Shared handle driving one [`Coordinator`] from concurrent event handlers.
///
/// The lock is held only while claiming and completing a page, never across the
/// network call, so overlapping scroll events see the in-flight phase and back off.
#[derive(Clone)]
pub struct FeedSession {
    coordinator: Arc<Mutex<Coordinator>>,
    transport: Arc<dyn PageTransport>,
}

impl FeedSession {
    pub fn new(params: FeedParams, transport: Arc<dyn PageTransport>) -> Self {
        Self {
            coordinator: Arc::new(Mutex::new(Coordinator::new(params))),
            transport,
        }
    }

    /// Fetch the next page unless one is in flight, completed, or the feed is exhausted.
    pub async fn request_next_page(&self) -> Option<Completion> {
        let ticket = self.coordinator.lock().await.begin_next_page()?;
        let result = self
            .transport
            .fetch_page(ticket.params(), ticket.page())
            .await;
        Some(self.coordinator.lock().await.complete(ticket, result))
    }

    pub async fn on_scroll_near_bottom(&self, viewport: ScrollViewport) -> Option<Completion> {
        if !viewport.near_bottom() {
            return None;
        }
        self.request_next_page().await
    }

    /// Start a new session for `params` and fetch its first page.
    pub async fn set_params(&self, params: FeedParams) -> Option<Completion> {
        let ticket = self.coordinator.lock().await.set_params(params)?;
        let result = self
            .transport
            .fetch_page(ticket.params(), ticket.page())
            .await;
        Some(self.coordinator.lock().await.complete(ticket, result))
    }

    /// Copy of every book accumulated in the live session.
    pub async fn books(&self) -> Vec<Book> {
        self.coordinator.lock().await.accumulated().to_vec()
    }

    pub async fn phase(&self) -> Phase {
        self.coordinator.lock().await.phase()
    }

    pub async fn has_more(&self) -> bool {
        self.coordinator.lock().await.has_more()
    }
}
