use crate::domain::Article;

/// One page of a feed's article history. Derived on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub items: Vec<Article>,
    pub page_index: usize,
    pub has_previous: bool,
    pub has_next: bool,
    pub total_count: usize,
}
