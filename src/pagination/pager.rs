//! Pull-driven pager
//!
//! [`Pager`] is a hand-written [`Stream`]. It holds at most one page request
//! future and never creates the next one until every buffered item of the
//! current page has been handed to the consumer. Dropping the pager drops
//! the in-flight future, so an abandoned pager issues nothing further.

use super::types::{PageRequest, PageResult, PagerState};
use crate::error::{Error, Result};
use futures::ready;
use futures::Stream;
use pin_project_lite::pin_project;
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tracing::warn;

pin_project! {
    /// Lazy stream of items across pages
    #[must_use = "streams do nothing unless polled"]
    pub struct Pager<T, F, Fut> {
        request: F,
        params: PageRequest,
        buffer: VecDeque<T>,
        state: PagerState,
        pages_fetched: u64,
        max_pages: Option<u64>,
        #[pin]
        in_flight: Option<Fut>,
    }
}

/// Build a pager over `request`, starting from a copy of `initial`
///
/// No request is issued until the returned stream is first polled.
pub fn paginate<T, F, Fut>(request: F, initial: &PageRequest) -> Pager<T, F, Fut>
where
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = Result<PageResult<T>>>,
{
    Pager::new(request, initial.clone())
}

impl<T, F, Fut> Pager<T, F, Fut>
where
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = Result<PageResult<T>>>,
{
    /// Create a pager that owns `params`
    pub fn new(request: F, params: PageRequest) -> Self {
        Self {
            request,
            params,
            buffer: VecDeque::new(),
            state: PagerState::Ready,
            pages_fetched: 0,
            max_pages: None,
            in_flight: None,
        }
    }

    /// Stop with [`Error::PageLimitExceeded`] instead of fetching page `max_pages + 1`
    pub fn with_max_pages(mut self, max_pages: u64) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    /// Apply an optional page limit
    pub fn with_page_limit(mut self, max_pages: Option<u64>) -> Self {
        self.max_pages = max_pages;
        self
    }
}

impl<T, F, Fut> Pager<T, F, Fut> {
    /// Current lifecycle state
    pub fn state(&self) -> PagerState {
        self.state
    }

    /// Number of page requests that have completed, successfully or not
    pub fn pages_fetched(&self) -> u64 {
        self.pages_fetched
    }

    /// Parameters the next request will be issued with
    pub fn params(&self) -> &PageRequest {
        &self.params
    }
}

impl<T, F, Fut> Stream for Pager<T, F, Fut>
where
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = Result<PageResult<T>>>,
{
    type Item = Result<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            if let Some(item) = this.buffer.pop_front() {
                return Poll::Ready(Some(Ok(item)));
            }

            if let Some(fut) = this.in_flight.as_mut().as_pin_mut() {
                let outcome = ready!(fut.poll(cx));
                this.in_flight.set(None);
                *this.pages_fetched += 1;

                match outcome {
                    Ok(page) => {
                        this.params.set_cursor(page.next_cursor);
                        this.buffer.extend(page.items);
                        *this.state = if page.next_cursor.is_some() {
                            PagerState::Ready
                        } else {
                            PagerState::Exhausted
                        };
                    }
                    Err(e) => {
                        *this.state = PagerState::Failed;
                        return Poll::Ready(Some(Err(e)));
                    }
                }
                continue;
            }

            if this.state.is_terminal() {
                return Poll::Ready(None);
            }

            if let Some(max_pages) = *this.max_pages {
                if *this.pages_fetched >= max_pages {
                    warn!(max_pages, cursor = ?this.params.cursor(), "Page limit reached");
                    *this.state = PagerState::Failed;
                    return Poll::Ready(Some(Err(Error::PageLimitExceeded { max_pages })));
                }
            }

            let fut = (this.request)(this.params.clone());
            this.in_flight.set(Some(fut));
            *this.state = PagerState::Fetching;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let buffered = self.buffer.len();
        if self.state.is_terminal() {
            (buffered, Some(buffered))
        } else {
            (buffered, None)
        }
    }
}

impl<T, F, Fut> std::fmt::Debug for Pager<T, F, Fut> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pager")
            .field("params", &self.params)
            .field("state", &self.state)
            .field("buffered", &self.buffer.len())
            .field("pages_fetched", &self.pages_fetched)
            .field("max_pages", &self.max_pages)
            .finish_non_exhaustive()
    }
}
