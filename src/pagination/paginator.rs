//! Page slicing over ordered record sequences

use super::types::{Page, PageRequest, PAGE_SIZE};

/// Slice the records that fall on `request.page`
///
/// Returns an empty slice when the page starts at or past the end.
pub fn paginate<T>(records: &[T], request: PageRequest) -> &[T] {
    let start = request.offset();
    if start >= records.len() {
        return &[];
    }
    let end = start.saturating_add(PAGE_SIZE).min(records.len());
    &records[start..end]
}

/// Cut an owned page out of `records`, remembering the full length
pub fn page_of<T: Clone>(records: &[T], request: PageRequest) -> Page<T> {
    Page {
        items: paginate(records, request).to_vec(),
        page: request.page,
        total: records.len(),
    }
}
