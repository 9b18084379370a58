use super::Item;

/// One fetched slice of a list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Page {
    pub items: Vec<Item>,
    pub is_completed: bool,
}

impl Page {
    pub fn new(items: Vec<Item>, is_completed: bool) -> Self {
        Self {
            items,
            is_completed,
        }
    }

    /// Build a page whose completion flag follows the short-page rule:
    /// a page with fewer items than requested is the last one.
    pub fn from_fetch(items: Vec<Item>, page_size: usize) -> Self {
        let is_completed = is_last_page(items.len(), page_size);
        Self {
            items,
            is_completed,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A page is the last one when it came back strictly shorter than requested.
pub fn is_last_page(fetched: usize, page_size: usize) -> bool {
    fetched < page_size
}

/// Parameters of a single paged fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub list_id: String,
    pub search_query: String,
    pub sort_option: String,
    pub filters: Vec<String>,
    /// 1-based page number
    pub page: u32,
    pub page_size: usize,
}
