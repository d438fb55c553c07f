//! Pagination types
//!
//! Page requests as parsed from the query string, and the pages cut from an
//! ordered record sequence.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Number of records per page
pub const PAGE_SIZE: usize = 10;

/// First page number
pub const FIRST_PAGE: u32 = 1;

fn default_page() -> u32 {
    FIRST_PAGE
}

/// Requested page, 1-indexed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (defaults to 1)
    #[serde(default = "default_page")]
    pub page: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: FIRST_PAGE }
    }
}

impl PageRequest {
    /// Create a request for `page`
    pub fn new(page: u32) -> Self {
        Self { page }
    }

    /// Reject page numbers below 1
    pub fn validate(self) -> Result<Self> {
        if self.page < FIRST_PAGE {
            return Err(Error::bad_request(format!(
                "page must be at least {FIRST_PAGE}, got {}",
                self.page
            )));
        }
        Ok(self)
    }

    /// Offset of the first record on this page
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize).saturating_mul(PAGE_SIZE)
    }
}

/// One page of records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Records on this page, at most [`PAGE_SIZE`]
    pub items: Vec<T>,
    /// Page number the items were cut for
    pub page: u32,
    /// Length of the whole sequence
    pub total: usize,
}

impl<T> Page<T> {
    /// Check if the page holds no records
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of records on this page
    pub fn len(&self) -> usize {
        self.items.len()
    }
}
