//! In-memory page fetchers for unit tests

use super::types::{Page, PageFetch, PaginationItem};
use crate::error::{Error, Result};
use crate::query::RequestOptions;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Serves slices of a fixed collection the way the server pages it
pub(crate) struct SimulatedCollection {
    items: Vec<u32>,
    default_page_size: u32,
    calls: Mutex<Vec<RequestOptions>>,
}

impl SimulatedCollection {
    pub(crate) fn new(total: u32, default_page_size: u32) -> Self {
        Self {
            items: (1..=total).collect(),
            default_page_size,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<RequestOptions> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl PageFetch<u32> for SimulatedCollection {
    async fn fetch(&self, options: &RequestOptions) -> Result<Page<u32>> {
        self.calls.lock().unwrap().push(options.clone());
        let size = options.page_size().unwrap_or(self.default_page_size);
        let start = ((options.page_number() - 1) * size) as usize;
        let end = (start + size as usize).min(self.items.len());
        let page = self.items.get(start..end).unwrap_or_default().to_vec();
        Ok((
            page,
            PaginationItem::new(options.page_number(), size, self.items.len() as u64),
        ))
    }
}

/// Returns pre-scripted pages in call order, regardless of the options
pub(crate) struct ScriptedPages {
    pages: Mutex<VecDeque<Result<Vec<u32>>>>,
    page_size: u32,
    total: u64,
    calls: Mutex<usize>,
}

impl ScriptedPages {
    pub(crate) fn new(pages: Vec<Result<Vec<u32>>>, page_size: u32, total: u64) -> Self {
        Self {
            pages: Mutex::new(pages.into()),
            page_size,
            total,
            calls: Mutex::new(0),
        }
    }

    pub(crate) fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl PageFetch<u32> for ScriptedPages {
    async fn fetch(&self, options: &RequestOptions) -> Result<Page<u32>> {
        *self.calls.lock().unwrap() += 1;
        let page = self
            .pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::invalid_argument("script exhausted")))?;
        Ok((
            page,
            PaginationItem::new(options.page_number(), self.page_size, self.total),
        ))
    }
}
