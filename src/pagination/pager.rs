//! Lazy iteration over every page of a collection

use super::types::PageFetch;
use crate::error::{Error, Result};
use crate::query::RequestOptions;
use futures::Stream;
use std::collections::VecDeque;
use tracing::debug;

/// Walks a paginated collection one page at a time.
///
/// Nothing is fetched until the first call to [`Pager::next`], and a page is
/// only requested once the previous one has been handed out, so dropping a
/// pager part-way through stops all further requests. The server's
/// `totalAvailable` decides when the walk is complete. A pager is single-pass;
/// build a new one to iterate again.
pub struct Pager<'a, T> {
    fetcher: &'a dyn PageFetch<T>,
    options: RequestOptions,
    buffer: VecDeque<T>,
    /// Items received so far, counted from the start of the collection
    received: u64,
    started: bool,
    done: bool,
    pages_fetched: u32,
}

impl<'a, T> Pager<'a, T> {
    /// Iterate from the first page at the server's default page size
    pub fn new(fetcher: &'a dyn PageFetch<T>) -> Self {
        Self {
            fetcher,
            options: RequestOptions::default(),
            buffer: VecDeque::new(),
            received: 0,
            started: false,
            done: false,
            pages_fetched: 0,
        }
    }

    /// Iterate with explicit options, validated before anything is fetched
    pub fn with_options(fetcher: &'a dyn PageFetch<T>, options: RequestOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options,
            ..Self::new(fetcher)
        })
    }

    /// Number of page requests issued so far
    pub fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    /// Options the next fetch will use
    pub fn options(&self) -> &RequestOptions {
        &self.options
    }

    /// Next item, fetching the following page when the current one runs out
    ///
    /// Returns `Ok(None)` once `totalAvailable` items have been received.
    pub async fn next(&mut self) -> Result<Option<T>> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Ok(Some(item));
            }
            if self.done {
                return Ok(None);
            }
            self.fetch_page().await?;
        }
    }

    /// Drain the remaining items into a `Vec`
    pub async fn collect(mut self) -> Result<Vec<T>> {
        let mut all = Vec::new();
        while let Some(item) = self.next().await? {
            all.push(item);
        }
        Ok(all)
    }

    /// Turn the pager into a `Stream` of items
    pub fn into_stream(self) -> impl Stream<Item = Result<T>> + 'a
    where
        T: 'a,
    {
        futures::stream::try_unfold(self, |mut pager| async move {
            let item = pager.next().await?;
            Ok::<_, Error>(item.map(|item| (item, pager)))
        })
    }

    async fn fetch_page(&mut self) -> Result<()> {
        let page_number = self.options.page_number();
        let (items, pagination) = match self.fetcher.fetch(&self.options).await {
            Ok(page) => page,
            Err(e) => {
                self.done = true;
                return Err(e);
            }
        };
        self.pages_fetched += 1;

        if !self.started {
            // Starting mid-collection: earlier pages count as already seen
            self.started = true;
            self.received = u64::from(pagination.page_number().saturating_sub(1))
                * u64::from(pagination.page_size());
        }

        let total = pagination.total_available();
        debug!(
            page = page_number,
            items = items.len(),
            total,
            "Fetched page"
        );

        if items.is_empty() && self.received < total {
            self.done = true;
            return Err(Error::CountMismatch {
                expected: total,
                received: self.received,
            });
        }

        self.received += items.len() as u64;
        if self.received >= total {
            self.done = true;
        } else {
            self.options.set_page_number(page_number + 1);
        }
        self.buffer.extend(items);
        Ok(())
    }
}

impl<T> std::fmt::Debug for Pager<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pager")
            .field("options", &self.options)
            .field("received", &self.received)
            .field("pages_fetched", &self.pages_fetched)
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}
