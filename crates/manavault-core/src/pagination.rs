//! Client-side pagination over an already-fetched result list

use serde::Serialize;
use tracing::debug;

use crate::error::{CoreError, Result};

/// Cards shown per page by the search view
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Snapshot of the pagination state, suitable for a "Page x of y" footer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    /// Current page (1-based)
    pub page: usize,
    /// Total number of pages (at least 1)
    pub total_pages: usize,
    /// Number of items in the full result set
    pub total_items: usize,
    /// Configured page size
    pub page_size: usize,
}

/// Fixed-size pages over a static, in-memory result set.
///
/// The page index always satisfies `1 <= page_index <= total_pages`, and an
/// empty result set still has one (empty) page. Out-of-range navigation is
/// clamped rather than reported.
#[derive(Debug, Clone)]
pub struct PaginatedResultSet<T> {
    items: Vec<T>,
    page_size: usize,
    page_index: usize,
}

impl<T> PaginatedResultSet<T> {
    /// Create an empty result set with the given page size
    pub fn new(page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(CoreError::InvalidPageSize(page_size));
        }

        Ok(Self {
            items: Vec::new(),
            page_size,
            page_index: 1,
        })
    }

    /// Create a result set already loaded with `items`
    pub fn with_items(page_size: usize, items: Vec<T>) -> Result<Self> {
        let mut set = Self::new(page_size)?;
        set.load(items);
        Ok(set)
    }

    /// Replace the whole result set and go back to the first page
    pub fn load(&mut self, items: Vec<T>) {
        self.items = items;
        self.page_index = 1;
        debug!(
            "Loaded {} items into {} page(s)",
            self.items.len(),
            self.total_pages()
        );
    }

    /// Number of pages, never less than one
    pub fn total_pages(&self) -> usize {
        self.items.len().div_ceil(self.page_size).max(1)
    }

    /// Items on the current page
    pub fn current_page(&self) -> &[T] {
        let start = (self.page_index - 1).saturating_mul(self.page_size);
        if start >= self.items.len() {
            return &[];
        }
        let end = start.saturating_add(self.page_size).min(self.items.len());
        &self.items[start..end]
    }

    /// Move to `requested`, clamped to `[1, total_pages]`, and return the
    /// resulting page index
    pub fn go_to(&mut self, requested: i64) -> usize {
        let last = self.total_pages();
        self.page_index = if requested < 1 {
            1
        } else {
            usize::try_from(requested).map_or(last, |page| page.min(last))
        };
        self.page_index
    }

    /// Advance one page, staying on the last page
    pub fn next_page(&mut self) -> usize {
        self.page_index = (self.page_index + 1).min(self.total_pages());
        self.page_index
    }

    /// Go back one page, staying on the first page
    pub fn previous_page(&mut self) -> usize {
        self.page_index = self.page_index.saturating_sub(1).max(1);
        self.page_index
    }

    pub fn has_next(&self) -> bool {
        self.page_index < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.page_index > 1
    }

    /// Current page (1-based)
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Full result set
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Snapshot of the current position
    pub fn page_summary(&self) -> PageInfo {
        PageInfo {
            page: self.page_index,
            total_pages: self.total_pages(),
            total_items: self.items.len(),
            page_size: self.page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let result = PaginatedResultSet::<usize>::new(0);
        assert_eq!(result.unwrap_err(), CoreError::InvalidPageSize(0));
    }

    #[test]
    fn test_empty_set_has_one_empty_page() {
        let set = PaginatedResultSet::<usize>::new(20).unwrap();
        assert_eq!(set.total_pages(), 1);
        assert_eq!(set.page_index(), 1);
        assert!(set.current_page().is_empty());
        assert!(!set.has_next());
        assert!(!set.has_previous());
    }

    #[test]
    fn test_forty_five_items_in_pages_of_twenty() {
        let items = numbers(45);
        let mut set = PaginatedResultSet::with_items(20, items.clone()).unwrap();

        assert_eq!(set.total_pages(), 3);
        assert_eq!(set.current_page(), &items[0..20]);

        assert_eq!(set.go_to(3), 3);
        assert_eq!(set.current_page(), &items[40..45]);
        assert_eq!(set.current_page().len(), 5);
    }

    #[test]
    fn test_go_to_clamps() {
        let mut set = PaginatedResultSet::with_items(10, numbers(25)).unwrap();

        assert_eq!(set.go_to(0), 1);
        assert_eq!(set.go_to(-7), 1);
        assert_eq!(set.go_to(4), 3);
        assert_eq!(set.go_to(i64::MAX), 3);
        assert_eq!(set.page_index(), 3);
    }

    #[test]
    fn test_next_and_previous_stay_in_bounds() {
        let mut set = PaginatedResultSet::with_items(2, numbers(5)).unwrap();

        assert_eq!(set.previous_page(), 1);
        assert_eq!(set.next_page(), 2);
        assert_eq!(set.next_page(), 3);
        assert_eq!(set.next_page(), 3);
        assert!(!set.has_next());
        assert!(set.has_previous());
        assert_eq!(set.current_page(), &[4]);
    }

    #[test]
    fn test_second_load_resets_state() {
        let mut set = PaginatedResultSet::with_items(20, numbers(45)).unwrap();
        set.go_to(3);

        set.load(numbers(7));
        assert_eq!(set.page_index(), 1);
        assert_eq!(set.total_pages(), 1);
        assert_eq!(set.current_page().len(), 7);
    }

    #[test]
    fn test_exact_multiple_of_page_size() {
        let set = PaginatedResultSet::with_items(20, numbers(40)).unwrap();
        assert_eq!(set.total_pages(), 2);
    }

    #[test]
    fn test_page_summary() {
        let mut set = PaginatedResultSet::with_items(20, numbers(45)).unwrap();
        set.go_to(2);

        assert_eq!(
            set.page_summary(),
            PageInfo {
                page: 2,
                total_pages: 3,
                total_items: 45,
                page_size: 20,
            }
        );
    }
}
