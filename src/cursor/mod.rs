//! Pagination cursor
//!
//! A [`Cursor`] is a lazy, single-pass iterator over one logical query that
//! may span multiple physical HTTP calls. Pages are fetched strictly
//! sequentially; the next page's parameters depend on the prior page's
//! response.
//!
//! # Overview
//!
//! `try_next()` yields elements in page order with in-page order preserved,
//! loading further pages on demand. `execute()` drains the cursor into one
//! merged aggregate result. A cursor is never reusable: once finished with an
//! empty queue it yields nothing, and `load()` short-circuits without network
//! I/O.

mod transition;

pub use transition::{
    advance, clean_result, first_present, is_falsy, PageOutcome, Params, BOOKKEEPING_KEYS,
    ELEMENT_KEYS, TOTAL_KEYS,
};

use crate::api::Api;
use crate::error::Result;
use crate::types::ApiType;
use reqwest::Method;
use serde_json::{Map, Value};
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::debug;

/// Lazy iterator over a multi-page API query
pub struct Cursor {
    api: Arc<Api>,
    endpoint: String,
    mode: ApiType,
    params: Params,
    /// Page count pinned by a caller-supplied `page` parameter
    pinned_pages: Option<u64>,
    queue: VecDeque<Value>,
    data: Map<String, Value>,
    total: Option<u64>,
    finished: bool,
}

impl Cursor {
    /// Create a cursor for one logical query.
    ///
    /// BULK mode is seeded with default `limit`/`offset` parameters where the
    /// caller left them unset; a caller-supplied `page` parameter pins the
    /// REST page count.
    pub fn new(
        api: Arc<Api>,
        endpoint: impl Into<String>,
        mode: ApiType,
        mut params: Params,
    ) -> Self {
        let pinned_pages = params.get("page").and_then(Value::as_u64);
        if mode == ApiType::Bulk {
            transition::seed_bulk_defaults(&mut params);
        }

        Self {
            api,
            endpoint: endpoint.into(),
            mode,
            params,
            pinned_pages,
            queue: VecDeque::new(),
            data: Map::new(),
            total: None,
            finished: false,
        }
    }

    /// Pagination mode
    pub fn mode(&self) -> ApiType {
        self.mode
    }

    /// Whether the final page has been consumed
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Authoritative result count reported by the most recent page
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    /// Current query parameters
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Fetch the next page if not finished.
    ///
    /// Returns `Ok(true)` iff the page's element list was non-empty. When the
    /// cursor is already finished this returns `Ok(false)` without issuing a
    /// network call. Transport failures propagate unretried.
    pub async fn load(&mut self) -> Result<bool> {
        if self.finished {
            return Ok(false);
        }

        let response = self
            .api
            .call(Method::GET, &self.endpoint, &self.params)
            .await?;

        let outcome = transition::advance(
            self.mode,
            std::mem::take(&mut self.params),
            self.pinned_pages,
            response,
        );

        debug!(
            mode = %self.mode,
            total = outcome.total,
            finished = outcome.finished,
            elements = outcome.elements.len(),
            "loaded page"
        );

        self.params = outcome.params;
        self.total = Some(outcome.total);
        self.finished = outcome.finished;
        self.data = outcome.metadata;

        let any = !outcome.elements.is_empty();
        self.queue.extend(outcome.elements);
        Ok(any)
    }

    /// Yield the next element, loading further pages on demand.
    ///
    /// `Ok(None)` signals exhaustion, not an error. Elements come out in
    /// page order with in-page order preserved.
    pub async fn try_next(&mut self) -> Result<Option<Value>> {
        loop {
            if let Some(element) = self.queue.pop_front() {
                return Ok(Some(element));
            }
            if !self.load().await? {
                return Ok(None);
            }
        }
    }

    /// Drain the cursor into one aggregate result.
    ///
    /// All yielded elements land under `elements` (REST) or `items` (BULK) in
    /// yield order, merged with the last page's non-list metadata, with
    /// pagination bookkeeping and falsy fields stripped. Consumes the cursor;
    /// a fresh one must be constructed for a new query.
    pub async fn execute(mut self) -> Result<Map<String, Value>> {
        let key = self.mode.output_key();

        let mut elements = Vec::new();
        while let Some(element) = self.try_next().await? {
            elements.push(element);
        }

        let mut result = Map::new();
        result.insert(key.to_string(), Value::Array(elements));
        for (field, value) in std::mem::take(&mut self.data) {
            result.entry(field).or_insert(value);
        }

        transition::clean_result(&mut result, key);
        Ok(result)
    }
}

impl std::fmt::Debug for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cursor")
            .field("endpoint", &self.endpoint)
            .field("mode", &self.mode)
            .field("finished", &self.finished)
            .field("total", &self.total)
            .field("queued", &self.queue.len())
            .finish_non_exhaustive()
    }
}
