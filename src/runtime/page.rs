//! Bounded, clamped pages over an ordered collection.

/// A countable, sliceable collection that can be paged
///
/// The collection is expected to be already filtered and sorted; paging only
/// counts it and cuts one window out of it.
pub trait PageSource {
    /// Element type of the collection
    type Item;

    /// Total number of items
    fn count(&self) -> usize;

    /// Up to `limit` items starting at `offset`
    fn fetch(&self, offset: usize, limit: usize) -> Vec<Self::Item>;
}

impl<T: Clone> PageSource for [T] {
    type Item = T;

    fn count(&self) -> usize {
        self.len()
    }

    fn fetch(&self, offset: usize, limit: usize) -> Vec<T> {
        self.iter().skip(offset).take(limit).cloned().collect()
    }
}

impl<T: Clone> PageSource for Vec<T> {
    type Item = T;

    fn count(&self) -> usize {
        self.len()
    }

    fn fetch(&self, offset: usize, limit: usize) -> Vec<T> {
        self.as_slice().fetch(offset, limit)
    }
}

/// One page of a larger collection plus the paging state that produced it
///
/// Built once by [`PageModel::create`] and never mutated. `page` is always in
/// `[1, max(total_pages, 1)]`, and `items` is exactly the window
/// `[(page - 1) * page_size, page * page_size)` of the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageModel<T> {
    items: Vec<T>,
    total_items: usize,
    total_pages: usize,
    page: usize,
    page_size: usize,
    sort_field: String,
    ascending: bool,
}

impl<T> PageModel<T> {
    /// Count `source`, clamp `page` into range and fetch that page
    ///
    /// A `page_size` of zero is treated as one. Out-of-range pages (zero,
    /// negative or past the end) resolve to the nearest valid page.
    pub fn create<S>(
        source: &S,
        page: i64,
        page_size: usize,
        sort_field: impl Into<String>,
        ascending: bool,
    ) -> Self
    where
        S: PageSource<Item = T> + ?Sized,
    {
        let page_size = page_size.max(1);
        let total_items = source.count();
        let total_pages = total_items.div_ceil(page_size);
        let last = total_pages.max(1);
        let page = usize::try_from(page).unwrap_or(0).clamp(1, last);

        let items = source.fetch((page - 1) * page_size, page_size);

        PageModel {
            items,
            total_items,
            total_pages,
            page,
            page_size,
            sort_field: sort_field.into(),
            ascending,
        }
    }

    /// Items on this page
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the page and keep its items
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Iterate over the items on this page
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Number of items in the whole source
    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// `ceil(total_items / page_size)`, zero for an empty source
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// 1-based, clamped page number
    pub fn page(&self) -> usize {
        self.page
    }

    /// Effective page size
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Field the source was sorted by, empty for the default order
    pub fn sort_field(&self) -> &str {
        &self.sort_field
    }

    /// Sort direction of the source
    pub fn is_ascending(&self) -> bool {
        self.ascending
    }

    /// `page == 1`
    pub fn is_first_page(&self) -> bool {
        self.page == 1
    }

    /// `page == total_pages`; false for an empty source, which has no pages
    pub fn is_last_page(&self) -> bool {
        self.page == self.total_pages
    }
}

impl<'a, T> IntoIterator for &'a PageModel<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> IntoIterator for PageModel<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_and_slice() {
        let source: Vec<u32> = (1..=7).collect();
        let page = PageModel::create(&source, 2, 3, "", true);
        assert_eq!(page.total_items(), 7);
        assert_eq!(page.total_pages(), 3);
        assert_eq!(page.items(), &[4, 5, 6]);
        assert!(!page.is_first_page());
        assert!(!page.is_last_page());

        let last = PageModel::create(&source, 3, 3, "", true);
        assert_eq!(last.items(), &[7]);
        assert!(last.is_last_page());
    }

    #[test]
    fn test_page_below_range_clamps_to_first() {
        let source = vec!["a", "b"];
        let page = PageModel::create(&source, 0, 1, "Title", false);
        assert_eq!(page.page(), 1);
        assert_eq!(page.items(), &["a"]);
        assert!(page.is_first_page());

        let negative = PageModel::create(&source, -5, 1, "Title", false);
        assert_eq!(negative.page(), 1);
    }

    #[test]
    fn test_page_above_range_clamps_to_last() {
        let source = vec!["a", "b"];
        let page = PageModel::create(&source, 99, 1, "", true);
        assert_eq!(page.page(), 2);
        assert_eq!(page.total_pages(), 2);
        assert_eq!(page.items(), &["b"]);
        assert!(page.is_last_page());
    }

    #[test]
    fn test_empty_source() {
        let source: Vec<i32> = Vec::new();
        let page = PageModel::create(&source, 4, 20, "", true);
        assert_eq!(page.total_items(), 0);
        assert_eq!(page.total_pages(), 0);
        assert_eq!(page.page(), 1);
        assert!(page.items().is_empty());
        assert!(page.is_first_page());
        assert!(!page.is_last_page());
    }

    #[test]
    fn test_item_count_matches_remaining_items() {
        let source: Vec<usize> = (0..23).collect();
        for page_size in 1..=10 {
            let total_pages = 23usize.div_ceil(page_size);
            for requested in 1..=total_pages {
                let page = PageModel::create(source.as_slice(), requested as i64, page_size, "", true);
                assert_eq!(page.total_pages(), total_pages);
                let expected = page_size.min(23 - (requested - 1) * page_size);
                assert_eq!(page.items().len(), expected);
                assert_eq!(page.items()[0], (requested - 1) * page_size);
            }
        }
    }

    #[test]
    fn test_zero_page_size_is_one() {
        let source = vec![1, 2, 3];
        let page = PageModel::create(&source, 2, 0, "", true);
        assert_eq!(page.page_size(), 1);
        assert_eq!(page.total_pages(), 3);
        assert_eq!(page.items(), &[2]);
    }

    #[test]
    fn test_sort_state_is_kept() {
        let source = vec![1];
        let page = PageModel::create(&source, 1, 10, "CreatedAt", false);
        assert_eq!(page.sort_field(), "CreatedAt");
        assert!(!page.is_ascending());
        let collected: Vec<_> = page.into_iter().collect();
        assert_eq!(collected, [1]);
    }
}
