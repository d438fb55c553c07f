//! Pagination module
//!
//! # Overview
//!
//! Question listings are served ten at a time. A page request carries a
//! 1-indexed page number; the paginator cuts the matching window out of a
//! sequence already ordered by ascending id. Pages past the end are empty, and
//! it is up to the caller to decide whether an empty page is a "not found".

mod paginator;
mod types;

pub use paginator::{page_of, paginate};
pub use types::{Page, PageRequest, FIRST_PAGE, PAGE_SIZE};
