//! Pure page-transition logic
//!
//! The per-page state step is a pure function from the current parameter
//! mapping and a decoded page response to the next parameters, the extracted
//! elements and the termination decision. Keeping it free of I/O makes the
//! pagination state machine testable in isolation.

use crate::types::{ApiType, BULK_DEFAULT_LIMIT, BULK_DEFAULT_OFFSET, REST_PAGE_SIZE};
use serde_json::{Map, Value};
use tracing::warn;

/// Query parameter mapping owned by a cursor
pub type Params = Map<String, Value>;

/// Candidate keys holding the authoritative result count, in priority order
pub const TOTAL_KEYS: [&str; 2] = ["total", "totalResults"];

/// Candidate keys holding the page's element list, in priority order
pub const ELEMENT_KEYS: [&str; 2] = ["elements", "items"];

/// Pagination bookkeeping fields stripped from aggregate results
pub const BOOKKEEPING_KEYS: [&str; 5] = ["page", "pageSize", "limit", "offset", "count"];

/// Result of applying one page response to the pagination state
#[derive(Debug, Clone)]
pub struct PageOutcome {
    /// Parameters for the next page fetch
    pub params: Params,
    /// Elements extracted from this page, server order preserved
    pub elements: Vec<Value>,
    /// Page response minus the extracted element list
    pub metadata: Map<String, Value>,
    /// Authoritative result count reported by this page
    pub total: u64,
    /// Whether pagination terminates after this page
    pub finished: bool,
}

/// First value present among `keys`, in priority order
pub fn first_present<'a>(
    map: &'a Map<String, Value>,
    keys: &'a [&'a str],
) -> Option<(&'a str, &'a Value)> {
    keys.iter()
        .find_map(|key| map.get(*key).map(|value| (*key, value)))
}

/// Apply one page response to the pagination state.
///
/// REST mode advances the `page` parameter and terminates once the current
/// page reaches the total page count; BULK mode advances `offset` by `limit`
/// and terminates when the server reports no continuation.
pub fn advance(
    mode: ApiType,
    mut params: Params,
    pinned_pages: Option<u64>,
    response: Value,
) -> PageOutcome {
    let mut metadata = match response {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    let total = first_present(&metadata, &TOTAL_KEYS)
        .and_then(|(_, value)| value.as_u64())
        .unwrap_or(1);

    let finished = match mode {
        ApiType::Rest => {
            let pages = pinned_pages.unwrap_or_else(|| rest_total_pages(total, REST_PAGE_SIZE));
            let current = metadata.get("page").and_then(Value::as_u64).unwrap_or(1);
            params.insert("page".to_string(), Value::from(current + 1));
            current >= pages
        }
        ApiType::Bulk => {
            let limit = param_u64(&params, "limit", BULK_DEFAULT_LIMIT);
            let offset = param_u64(&params, "offset", BULK_DEFAULT_OFFSET);
            params.insert("offset".to_string(), Value::from(offset + limit));
            match metadata.get("hasMore").and_then(Value::as_bool) {
                Some(has_more) => !has_more,
                None => {
                    warn!("bulk response omitted hasMore; assuming a single page");
                    true
                }
            }
        }
    };

    let elements = match first_present(&metadata, &ELEMENT_KEYS).map(|(key, _)| key.to_string()) {
        Some(key) => match metadata.remove(&key) {
            // A non-list under the element key reads as an empty page
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        None => Vec::new(),
    };

    PageOutcome {
        params,
        elements,
        metadata,
        total,
        finished,
    }
}

/// Total REST page count for a reported result total
pub(crate) fn rest_total_pages(total: u64, page_size: u64) -> u64 {
    total.div_ceil(page_size).max(1)
}

/// Seed BULK pagination defaults for parameters the caller left unset
pub(crate) fn seed_bulk_defaults(params: &mut Params) {
    params
        .entry("limit")
        .or_insert_with(|| Value::from(BULK_DEFAULT_LIMIT));
    params
        .entry("offset")
        .or_insert_with(|| Value::from(BULK_DEFAULT_OFFSET));
}

fn param_u64(params: &Params, key: &str, default: u64) -> u64 {
    params.get(key).and_then(Value::as_u64).unwrap_or(default)
}

/// Strip pagination bookkeeping and falsy fields from an aggregate result.
///
/// `preserve` names the primary element-list key, which survives even when
/// empty. Idempotent: re-applying to a cleaned result is a no-op.
pub fn clean_result(result: &mut Map<String, Value>, preserve: &str) {
    result.retain(|key, value| {
        key == preserve || (!BOOKKEEPING_KEYS.contains(&key.as_str()) && !is_falsy(value))
    });
}

/// Whether a JSON value is falsy: null, false, zero, or an empty
/// string/array/object
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}
