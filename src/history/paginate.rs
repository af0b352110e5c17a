use crate::domain::{Article, Page};
use crate::errors::{FeedlogError, FeedlogResult};

/// Slice one page out of a feed's history.
///
/// `page_index` is zero-based. Asking for a page past the end is not an
/// error: it yields an empty page with `has_next` false, and the caller
/// decides whether to clamp.
pub fn page(history: &[Article], page_size: usize, page_index: usize) -> FeedlogResult<Page> {
    if page_size == 0 {
        return Err(FeedlogError::InvalidArgument(
            "page size must be positive".to_string(),
        ));
    }

    let total_count = history.len();
    let start = page_index.saturating_mul(page_size);
    let end = start.saturating_add(page_size).min(total_count);

    let items = if start < total_count {
        history[start..end].to_vec()
    } else {
        Vec::new()
    };

    Ok(Page {
        items,
        page_index,
        has_previous: page_index > 0,
        has_next: end < total_count,
        total_count,
    })
}
