// src/moderation/pagination.rs
use serde::Serialize;

/// 1-based page cursor with a fixed page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    page: usize,
    page_size: usize,
}

/// Summary used by page controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub first_item: usize,
    pub last_item: usize,
}

impl PaginationState {
    pub fn new(page_size: usize) -> anyhow::Result<Self> {
        if page_size == 0 {
            anyhow::bail!("page size must be at least 1");
        }
        Ok(Self { page: 1, page_size })
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.page_size)
    }

    /// Move to `page`, clamped to `[1, max(1, total_pages)]`
    pub fn go_to(self, page: usize, total: usize) -> Self {
        let last = self.total_pages(total).max(1);
        Self {
            page: page.clamp(1, last),
            ..self
        }
    }

    pub fn next(self, total: usize) -> Self {
        self.go_to(self.page.saturating_add(1), total)
    }

    pub fn previous(self, total: usize) -> Self {
        self.go_to(self.page.saturating_sub(1), total)
    }

    pub fn reset(self) -> Self {
        Self { page: 1, ..self }
    }

    /// Items `[(page-1)*size, page*size)`, after clamping the page to the
    /// current item count
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let page = self.go_to(self.page, items.len()).page;
        let start = ((page - 1) * self.page_size).min(items.len());
        let end = (start + self.page_size).min(items.len());
        &items[start..end]
    }

    pub fn info(&self, total: usize) -> PageInfo {
        let page = self.go_to(self.page, total).page;
        let first = (page - 1) * self.page_size;
        let last = (first + self.page_size).min(total);
        PageInfo {
            page,
            total_pages: self.total_pages(total),
            total_items: total,
            first_item: if total == 0 { 0 } else { first + 1 },
            last_item: last,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_page_size_is_rejected() {
        assert!(PaginationState::new(0).is_err());
    }

    #[test]
    fn test_slice_lengths() {
        let items: Vec<usize> = (1..=25).collect();
        let pager = PaginationState::new(10).unwrap();

        assert_eq!(pager.total_pages(items.len()), 3);
        for k in 1..=3 {
            let page = pager.go_to(k, items.len());
            let expected = 10.min(items.len() - (k - 1) * 10);
            assert_eq!(page.slice(&items).len(), expected);
        }
        assert_eq!(pager.go_to(3, items.len()).slice(&items), &[21, 22, 23, 24, 25]);
    }

    #[test]
    fn test_out_of_range_pages_clamp() {
        let items: Vec<usize> = (1..=12).collect();
        let pager = PaginationState::new(10).unwrap();

        let past_end = pager.go_to(3, items.len());
        assert_eq!(past_end.page(), 2);
        assert_eq!(past_end.slice(&items), &[11, 12]);

        let before_start = pager.go_to(0, items.len());
        assert_eq!(before_start.page(), 1);
        assert_eq!(before_start.slice(&items).len(), 10);
    }

    #[test]
    fn test_next_and_previous_stop_at_bounds() {
        let pager = PaginationState::new(5).unwrap();
        assert_eq!(pager.previous(12).page(), 1);

        let last = pager.next(12).next(12).next(12);
        assert_eq!(last.page(), 3);
        assert_eq!(last.next(12).page(), 3);
    }

    #[test]
    fn test_stale_page_is_clamped_when_collection_shrinks() {
        let pager = PaginationState::new(10).unwrap().go_to(3, 30);
        let shrunk: Vec<usize> = (1..=4).collect();
        assert_eq!(pager.slice(&shrunk), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_empty_collection() {
        let pager = PaginationState::new(10).unwrap().go_to(4, 0);
        let empty: Vec<usize> = Vec::new();
        assert_eq!(pager.page(), 1);
        assert!(pager.slice(&empty).is_empty());
        assert_eq!(
            pager.info(0),
            PageInfo {
                page: 1,
                total_pages: 0,
                total_items: 0,
                first_item: 0,
                last_item: 0,
            }
        );
    }

    #[test]
    fn test_info() {
        let pager = PaginationState::new(10).unwrap().go_to(2, 12);
        let info = pager.info(12);
        assert_eq!(info.first_item, 11);
        assert_eq!(info.last_item, 12);
        assert_eq!(info.total_pages, 2);
    }
}
