//! Filtering and pagination shared by the listing screens

/// One page of a listing. `number` is 1-based and `count` is never zero.
#[derive(Debug, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub number: usize,
    pub count: usize,
}

impl<T> Page<'_, T> {
    pub fn has_next(&self) -> bool {
        self.number < self.count
    }
}

/// Slice `items` into the requested page, clamping out-of-range page numbers
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> Page<'_, T> {
    let per_page = per_page.max(1);
    let count = items.len().div_ceil(per_page).max(1);
    let number = page.clamp(1, count);
    let start = (number - 1) * per_page;
    let end = (start + per_page).min(items.len());

    Page {
        items: &items[start.min(end)..end],
        number,
        count,
    }
}

/// Case-insensitive substring match; a blank needle matches everything
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}
