//! Paginator
//!
//! Slices an ordered sequence into fixed-size pages. Out-of-range page numbers
//! clamp to the nearest valid page and the clamped value is reported back so
//! the caller can correct displayed state; only a zero page size is an error.

use crate::errors::{AppError, Result};

/// One page of an ordered sequence plus its metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_items: usize,
    /// At least 1, even for an empty sequence.
    pub total_pages: usize,
    /// The clamped 1-based page number actually served.
    pub page: usize,
}

/// Slice `ordered` into pages of `page_size` and return page `page`.
pub fn paginate<T: Clone>(ordered: &[T], page_size: usize, page: usize) -> Result<Page<T>> {
    if page_size == 0 {
        return Err(AppError::InvalidPageSize { page_size });
    }

    let total_items = ordered.len();
    let total_pages = total_items.div_ceil(page_size).max(1);
    let page = page.clamp(1, total_pages);

    let start = (page - 1) * page_size;
    let end = (start + page_size).min(total_items);
    let items = if start < total_items {
        ordered[start..end].to_vec()
    } else {
        Vec::new()
    };

    Ok(Page {
        items,
        total_items,
        total_pages,
        page,
    })
}
