//! Fixed-size pages over a filtered list.

/// One page of results. Pages are numbered from 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<T> {
    /// Cut page `page` out of `items`. Page 0 is treated as page 1 and a
    /// page past the end is empty.
    pub fn of(items: Vec<T>, page: usize, size: usize) -> Self {
        let size = size.max(1);
        let page = page.max(1);
        let total_items = items.len();
        let total_pages = total_items.div_ceil(size);
        let items = items.into_iter().skip((page - 1) * size).take(size).collect();
        Self {
            items,
            page,
            total_pages,
            total_items,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            total_pages: self.total_pages,
            total_items: self.total_items,
        }
    }
}
