//! Pagination state machine.
//!
//! A fetch is split into [`Coordinator::begin_next_page`], which hands out a
//! [`PageTicket`], and [`Coordinator::complete`], which merges the result only if the
//! ticket still matches the live session. The split keeps the dedup and staleness rules
//! testable without any I/O.

use shelf_catalog::Book;

use crate::error::FeedError;
use crate::params::FeedParams;
use crate::transport::PageTransport;
use crate::viewport::ScrollViewport;

/// Lifecycle of the page fetch loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Ready to fetch `current_page`
    Idle,
    /// One fetch is outstanding
    Fetching { page: u32 },
    /// The server returned an empty page
    Exhausted,
}

/// Permission to fetch one page, captured when the fetch began.
#[derive(Debug, Clone, PartialEq)]
pub struct PageTicket {
    generation: u64,
    page: u32,
    params: FeedParams,
}

impl PageTicket {
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn params(&self) -> &FeedParams {
        &self.params
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Outcome of [`Coordinator::complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Books were appended and the next page became current
    Appended(usize),
    /// An empty page ended the session
    Exhausted,
    /// The fetch failed; the same page will be requested again
    Failed,
    /// The ticket belonged to a superseded session and was dropped
    Stale,
}

/// Accumulates pages for one parameter set at a time.
#[derive(Debug, Clone)]
pub struct Coordinator {
    params: FeedParams,
    accumulated: Vec<Book>,
    current_page: u32,
    last_completed_page: u32,
    phase: Phase,
    generation: u64,
}

impl Coordinator {
    pub fn new(params: FeedParams) -> Self {
        Self {
            params,
            accumulated: Vec::new(),
            current_page: 1,
            last_completed_page: 0,
            phase: Phase::Idle,
            generation: 0,
        }
    }

    pub fn params(&self) -> &FeedParams {
        &self.params
    }

    pub fn accumulated(&self) -> &[Book] {
        &self.accumulated
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn last_completed_page(&self) -> u32 {
        self.last_completed_page
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn has_more(&self) -> bool {
        self.phase != Phase::Exhausted
    }

    pub fn in_flight(&self) -> bool {
        matches!(self.phase, Phase::Fetching { .. })
    }

    /// Switch to `params`, discarding the current session when they differ.
    ///
    /// Returns the ticket for page 1 of the new session, or `None` when the
    /// parameters are unchanged.
    pub fn set_params(&mut self, params: FeedParams) -> Option<PageTicket> {
        if params == self.params {
            return None;
        }

        tracing::debug!(
            seed = %params.seed,
            language = %params.language,
            likes = params.likes,
            reviews = params.reviews,
            "feed parameters changed, resetting session"
        );

        self.params = params;
        self.accumulated.clear();
        self.current_page = 1;
        self.last_completed_page = 0;
        self.phase = Phase::Idle;
        self.generation += 1;

        self.begin_next_page()
    }

    /// Claim the next page for fetching.
    ///
    /// Returns `None` without touching any state while a fetch is outstanding, after
    /// exhaustion, or when the current page was already completed.
    pub fn begin_next_page(&mut self) -> Option<PageTicket> {
        if self.in_flight() || !self.has_more() || self.current_page == self.last_completed_page {
            return None;
        }

        self.phase = Phase::Fetching {
            page: self.current_page,
        };

        Some(PageTicket {
            generation: self.generation,
            page: self.current_page,
            params: self.params.clone(),
        })
    }

    /// Apply the result of the fetch described by `ticket`.
    pub fn complete(&mut self, ticket: PageTicket, result: Result<Vec<Book>, FeedError>) -> Completion {
        if ticket.generation != self.generation {
            tracing::debug!(
                page = ticket.page,
                ticket_generation = ticket.generation,
                generation = self.generation,
                "discarding response from a superseded session"
            );
            return Completion::Stale;
        }

        match result {
            Err(err) => {
                tracing::warn!(page = ticket.page, error = %err, "page fetch failed, will retry");
                self.phase = Phase::Idle;
                Completion::Failed
            }
            Ok(books) if books.is_empty() => {
                self.last_completed_page = ticket.page;
                self.phase = Phase::Exhausted;
                tracing::info!(page = ticket.page, "feed exhausted");
                Completion::Exhausted
            }
            Ok(books) => {
                let count = books.len();
                self.accumulated.extend(books);
                self.last_completed_page = ticket.page;
                self.current_page = ticket.page + 1;
                self.phase = Phase::Idle;
                tracing::debug!(page = ticket.page, count, total = self.accumulated.len(), "page appended");
                Completion::Appended(count)
            }
        }
    }

    /// Fetch the next page through `transport`, if one may be fetched now.
    pub async fn request_next_page<T>(&mut self, transport: &T) -> Option<Completion>
    where
        T: PageTransport + ?Sized,
    {
        let ticket = self.begin_next_page()?;
        Some(self.fetch(transport, ticket).await)
    }

    /// Switch parameters and fetch page 1 of the new session.
    pub async fn apply_params<T>(&mut self, transport: &T, params: FeedParams) -> Option<Completion>
    where
        T: PageTransport + ?Sized,
    {
        let ticket = self.set_params(params)?;
        Some(self.fetch(transport, ticket).await)
    }

    /// Request the next page when the viewport is close to the content bottom.
    pub async fn on_scroll_near_bottom<T>(
        &mut self,
        viewport: ScrollViewport,
        transport: &T,
    ) -> Option<Completion>
    where
        T: PageTransport + ?Sized,
    {
        if !viewport.near_bottom() {
            return None;
        }
        self.request_next_page(transport).await
    }

    async fn fetch<T>(&mut self, transport: &T, ticket: PageTicket) -> Completion
    where
        T: PageTransport + ?Sized,
    {
        let result = transport.fetch_page(&ticket.params, ticket.page).await;
        self.complete(ticket, result)
    }
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new(FeedParams::default())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::transport::LocalTransport;
    use async_trait::async_trait;
    use shelf_catalog::PAGE_SIZE;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Records every request and fails the pages listed in `failures` once each.
    #[derive(Default)]
    pub(crate) struct RecordingTransport {
        pub(crate) calls: Mutex<Vec<(FeedParams, u32)>>,
        pub(crate) failures: Mutex<Vec<u32>>,
        pub(crate) fetches: AtomicUsize,
    }

    impl RecordingTransport {
        pub(crate) fn pages(&self) -> Vec<u32> {
            self.calls.lock().unwrap().iter().map(|(_, page)| *page).collect()
        }
    }

    #[async_trait]
    impl PageTransport for RecordingTransport {
        async fn fetch_page(&self, params: &FeedParams, page: u32) -> Result<Vec<Book>, FeedError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            self.calls.lock().unwrap().push((params.clone(), page));
            tokio::task::yield_now().await;

            let fail = {
                let mut failures = self.failures.lock().unwrap();
                match failures.iter().position(|p| *p == page) {
                    Some(pos) => {
                        failures.remove(pos);
                        true
                    }
                    None => false,
                }
            };
            if fail {
                return Err(FeedError::Status {
                    status: 503,
                    url: "http://test/books".to_string(),
                });
            }

            LocalTransport::new().fetch_page(params, page).await
        }
    }

    fn page(params: &FeedParams, page: u32) -> Vec<Book> {
        shelf_catalog::generate(&params.query(page))
    }

    #[test]
    fn starts_idle_on_first_page() {
        let coordinator = Coordinator::default();
        assert_eq!(coordinator.phase(), Phase::Idle);
        assert_eq!(coordinator.current_page(), 1);
        assert_eq!(coordinator.last_completed_page(), 0);
        assert!(coordinator.has_more());
        assert!(coordinator.accumulated().is_empty());
    }

    #[test]
    fn second_begin_while_in_flight_is_noop() {
        let mut coordinator = Coordinator::default();
        let ticket = coordinator.begin_next_page().unwrap();
        assert_eq!(ticket.page(), 1);
        assert!(coordinator.in_flight());

        assert!(coordinator.begin_next_page().is_none());
        assert_eq!(coordinator.phase(), Phase::Fetching { page: 1 });
    }

    #[test]
    fn success_appends_and_advances() {
        let mut coordinator = Coordinator::default();
        let params = coordinator.params().clone();

        let ticket = coordinator.begin_next_page().unwrap();
        let outcome = coordinator.complete(ticket, Ok(page(&params, 1)));

        assert_eq!(outcome, Completion::Appended(PAGE_SIZE));
        assert_eq!(coordinator.accumulated().len(), PAGE_SIZE);
        assert_eq!(coordinator.last_completed_page(), 1);
        assert_eq!(coordinator.current_page(), 2);
        assert!(!coordinator.in_flight());
    }

    #[test]
    fn failure_keeps_page_for_retry() {
        let mut coordinator = Coordinator::default();
        let ticket = coordinator.begin_next_page().unwrap();
        let outcome = coordinator.complete(
            ticket,
            Err(FeedError::Status {
                status: 500,
                url: "http://test/books".to_string(),
            }),
        );

        assert_eq!(outcome, Completion::Failed);
        assert_eq!(coordinator.phase(), Phase::Idle);
        assert_eq!(coordinator.current_page(), 1);
        assert!(coordinator.accumulated().is_empty());
        assert_eq!(coordinator.begin_next_page().unwrap().page(), 1);
    }

    #[test]
    fn empty_page_exhausts_feed() {
        let mut coordinator = Coordinator::default();
        let params = coordinator.params().clone();

        let ticket = coordinator.begin_next_page().unwrap();
        coordinator.complete(ticket, Ok(page(&params, 1)));
        let ticket = coordinator.begin_next_page().unwrap();
        let outcome = coordinator.complete(ticket, Ok(Vec::new()));

        assert_eq!(outcome, Completion::Exhausted);
        assert!(!coordinator.has_more());
        assert_eq!(coordinator.current_page(), 2);
        assert_eq!(coordinator.last_completed_page(), 2);
        assert!(coordinator.begin_next_page().is_none());
        assert_eq!(coordinator.accumulated().len(), PAGE_SIZE);
    }

    #[test]
    fn set_params_resets_before_first_fetch() {
        let mut coordinator = Coordinator::default();
        let params = coordinator.params().clone();
        let ticket = coordinator.begin_next_page().unwrap();
        coordinator.complete(ticket, Ok(page(&params, 1)));

        let changed = FeedParams {
            seed: "1234".to_string(),
            ..params
        };
        let ticket = coordinator.set_params(changed.clone()).unwrap();

        assert_eq!(ticket.page(), 1);
        assert_eq!(ticket.params(), &changed);
        assert!(coordinator.accumulated().is_empty());
        assert_eq!(coordinator.current_page(), 1);
        assert_eq!(coordinator.last_completed_page(), 0);
        assert!(coordinator.in_flight());
    }

    #[test]
    fn unchanged_params_do_nothing() {
        let mut coordinator = Coordinator::default();
        let generation = coordinator.generation();
        assert!(coordinator.set_params(FeedParams::default()).is_none());
        assert_eq!(coordinator.generation(), generation);
        assert_eq!(coordinator.phase(), Phase::Idle);
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut coordinator = Coordinator::default();
        let old_params = coordinator.params().clone();
        let stale = coordinator.begin_next_page().unwrap();

        let new_params = FeedParams::new("99", "fr", 1.0, 1.0);
        let fresh = coordinator.set_params(new_params.clone()).unwrap();

        assert_eq!(coordinator.complete(stale, Ok(page(&old_params, 1))), Completion::Stale);
        assert!(coordinator.accumulated().is_empty());
        assert_eq!(coordinator.phase(), Phase::Fetching { page: 1 });

        let outcome = coordinator.complete(fresh, Ok(page(&new_params, 1)));
        assert_eq!(outcome, Completion::Appended(PAGE_SIZE));
        assert!(coordinator.accumulated().iter().all(|b| b.language == "fr"));
    }

    #[test]
    fn stale_failure_does_not_clear_new_fetch() {
        let mut coordinator = Coordinator::default();
        let stale = coordinator.begin_next_page().unwrap();
        coordinator.set_params(FeedParams::new("99", "en", 0.0, 0.0)).unwrap();

        let outcome = coordinator.complete(
            stale,
            Err(FeedError::Status {
                status: 500,
                url: "http://test/books".to_string(),
            }),
        );
        assert_eq!(outcome, Completion::Stale);
        assert!(coordinator.in_flight());
    }

    #[tokio::test]
    async fn nan_average_does_not_wedge_the_session() {
        let transport = LocalTransport::new();
        let mut coordinator = Coordinator::new(FeedParams::new("42", "en", f64::NAN, 1.0));

        assert_eq!(
            coordinator.request_next_page(&transport).await,
            Some(Completion::Appended(PAGE_SIZE))
        );
        assert_eq!(
            coordinator.request_next_page(&transport).await,
            Some(Completion::Appended(PAGE_SIZE))
        );
        assert_eq!(coordinator.phase(), Phase::Idle);
        assert!(coordinator.accumulated().iter().all(|b| b.likes == 0));
    }

    #[tokio::test]
    async fn nan_fields_set_directly_still_complete() {
        let transport = LocalTransport::new();
        let params = FeedParams {
            reviews: f64::NAN,
            ..FeedParams::default()
        };
        let mut coordinator = Coordinator::new(params.clone());

        assert_eq!(
            coordinator.request_next_page(&transport).await,
            Some(Completion::Appended(PAGE_SIZE))
        );
        assert!(coordinator.set_params(params).is_none());
        assert_eq!(coordinator.accumulated().len(), PAGE_SIZE);
    }

    #[tokio::test]
    async fn pages_are_requested_in_order_once_each() {
        let transport = RecordingTransport::default();
        let mut coordinator = Coordinator::default();

        for _ in 0..3 {
            coordinator.request_next_page(&transport).await.unwrap();
        }

        assert_eq!(transport.pages(), vec![1, 2, 3]);
        let indices: Vec<u64> = coordinator.accumulated().iter().map(|b| b.index).collect();
        assert_eq!(indices, (1..=60).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn failed_page_is_retried_not_skipped() {
        let transport = RecordingTransport::default();
        transport.failures.lock().unwrap().push(2);
        let mut coordinator = Coordinator::default();

        let outcomes = [
            coordinator.request_next_page(&transport).await,
            coordinator.request_next_page(&transport).await,
            coordinator.request_next_page(&transport).await,
        ];

        assert_eq!(
            outcomes,
            [
                Some(Completion::Appended(PAGE_SIZE)),
                Some(Completion::Failed),
                Some(Completion::Appended(PAGE_SIZE)),
            ]
        );
        assert_eq!(transport.pages(), vec![1, 2, 2]);
        assert_eq!(coordinator.accumulated().last().unwrap().index, 40);
    }

    #[tokio::test]
    async fn scroll_far_from_bottom_does_not_fetch() {
        let transport = RecordingTransport::default();
        let mut coordinator = Coordinator::default();

        let far = ScrollViewport::new(800.0, 0.0, 5000.0);
        assert!(coordinator.on_scroll_near_bottom(far, &transport).await.is_none());
        assert_eq!(transport.fetches.load(Ordering::SeqCst), 0);

        let near = ScrollViewport::new(800.0, 4100.0, 5000.0);
        assert_eq!(
            coordinator.on_scroll_near_bottom(near, &transport).await,
            Some(Completion::Appended(PAGE_SIZE))
        );
    }

    #[tokio::test]
    async fn apply_params_fetches_first_page_of_new_session() {
        let transport = RecordingTransport::default();
        let mut coordinator = Coordinator::default();
        coordinator.request_next_page(&transport).await;
        coordinator.request_next_page(&transport).await;

        let changed = FeedParams::new("42", "de", 3.5, 2.7);
        let outcome = coordinator.apply_params(&transport, changed.clone()).await;

        assert_eq!(outcome, Some(Completion::Appended(PAGE_SIZE)));
        assert_eq!(coordinator.accumulated().len(), PAGE_SIZE);
        assert_eq!(coordinator.accumulated()[0].index, 1);
        assert_eq!(transport.calls.lock().unwrap().last().unwrap(), &(changed, 1));
    }

    #[tokio::test]
    async fn exhausted_feed_stops_requesting() {
        let transport = LocalTransport::with_page_limit(2);
        let mut coordinator = Coordinator::default();

        let mut outcomes = Vec::new();
        while let Some(outcome) = coordinator.request_next_page(&transport).await {
            outcomes.push(outcome);
        }

        assert_eq!(
            outcomes,
            vec![
                Completion::Appended(PAGE_SIZE),
                Completion::Appended(PAGE_SIZE),
                Completion::Exhausted,
            ]
        );
        assert_eq!(coordinator.accumulated().len(), 2 * PAGE_SIZE);
    }
}
