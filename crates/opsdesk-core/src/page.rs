//! Paging requests and the shared shape of paged list responses.

use serde::{Deserialize, Serialize};

/// Offset/limit paging request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageReq {
    /// Number of records to skip.
    pub offset: u64,
    /// Number of records to return.
    pub limit: u64,
}

impl PageReq {
    /// Create a paging request.
    pub fn new(offset: u64, limit: u64) -> Self {
        Self { offset, limit }
    }
}

/// Body `{ "id": .. }` used by single-record endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdReq<T> {
    pub id: T,
}

/// Body `{ "ids": [..] }` used by batch lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdsReq<T> {
    pub ids: Vec<T>,
}

/// A page of records together with the backend's total count.
#[derive(Debug, Clone, PartialEq)]
pub struct Paged<T> {
    /// Records on this page.
    pub items: Vec<T>,
    /// Total number of matching records.
    pub total: u64,
}

impl<T> Paged<T> {
    /// Create a page.
    pub fn new(items: Vec<T>, total: u64) -> Self {
        Self { items, total }
    }
}

/// A complete, unpaged list counts as a single page.
impl<T> From<Vec<T>> for Paged<T> {
    fn from(items: Vec<T>) -> Self {
        let total = items.len() as u64;
        Self { items, total }
    }
}

impl<T> Default for Paged<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_is_single_page() {
        let page: Paged<u8> = vec![1, 2, 3].into();
        assert_eq!(page.total, 3);
    }

    #[test]
    fn test_page_req_wire_shape() {
        let value = serde_json::to_value(PageReq::new(40, 20)).unwrap();
        assert_eq!(value, serde_json::json!({"offset": 40, "limit": 20}));
    }
}
