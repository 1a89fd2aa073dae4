/// One page of an ordered sequence.
#[derive(Debug, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// 1-indexed page actually returned, after clamping.
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<'_, T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 1-based inclusive `(first, last)` item positions, `None` when empty.
    pub fn range(&self, page_size: usize) -> Option<(usize, usize)> {
        if self.items.is_empty() {
            return None;
        }

        let first = (self.page - 1) * page_size + 1;
        Some((first, first + self.items.len() - 1))
    }
}

/// `max(1, ceil(len / page_size))`. A zero page size has a single empty page.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }

    len.div_ceil(page_size).max(1)
}

/// Clamp a requested page into `[1, total_pages]`.
pub fn clamp_page(page: usize, len: usize, page_size: usize) -> usize {
    page.clamp(1, total_pages(len, page_size))
}

pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let total_pages = total_pages(items.len(), page_size);
    let page = page.clamp(1, total_pages);

    let start = ((page - 1) * page_size).min(items.len());
    let end = (start + page_size).min(items.len());

    Page {
        items: &items[start..end],
        page,
        total_pages,
        total_items: items.len(),
    }
}
