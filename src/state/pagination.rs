//! Page arithmetic.
//!
//! The core works on 0-based page indices. [`PageBase`] adapts it to the two
//! numbering conventions in use: key points are shown with 1-based pages and
//! the history service speaks 0-based pages. Nothing here fails: out-of-range
//! requests produce empty slices and clamping is the caller's decision.

/// Number of rows per page. Always >= 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageSize(usize);

/// Error returned when attempting to create a PageSize of zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Page size must be >= 1 (got {0})")]
pub struct InvalidPageSize(pub usize);

impl PageSize {
    /// Smart constructor that validates the size is >= 1.
    pub fn new(size: usize) -> Result<Self, InvalidPageSize> {
        if size == 0 {
            Err(InvalidPageSize(size))
        } else {
            Ok(Self(size))
        }
    }

    /// Rows per page, at least 1.
    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(5)
    }
}

impl TryFrom<usize> for PageSize {
    type Error = InvalidPageSize;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        Self::new(size)
    }
}

// ===== Zero-based core =====

/// `ceil(total / page_size)`. Zero items make zero pages.
pub fn page_count(total: usize, page_size: PageSize) -> usize {
    total.div_ceil(page_size.get())
}

/// Items of the page at 0-based `index`. Empty when out of range.
pub fn slice<T>(items: &[T], index: usize, page_size: PageSize) -> &[T] {
    let Some(start) = index.checked_mul(page_size.get()) else {
        return &[];
    };
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size.get()).min(items.len());
    &items[start..end]
}

// ===== Numbering adapter =====

/// How pages are numbered at a call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PageBase {
    /// First page is 0 (history service).
    Zero,
    /// First page is 1 (key point table).
    #[default]
    One,
}

impl PageBase {
    fn offset(self) -> usize {
        match self {
            PageBase::Zero => 0,
            PageBase::One => 1,
        }
    }

    /// Number of the first page.
    pub fn first_page(self) -> usize {
        self.offset()
    }

    /// Number of the last page, or `None` when there are no pages.
    pub fn last_page(self, count: usize) -> Option<usize> {
        count.checked_sub(1).map(|index| self.from_index(index))
    }

    /// 0-based index of page number `page`. `None` for page 0 in base `One`.
    pub fn to_index(self, page: usize) -> Option<usize> {
        page.checked_sub(self.offset())
    }

    /// Page number of 0-based `index`.
    pub fn from_index(self, index: usize) -> usize {
        index + self.offset()
    }

    /// True when `page` names one of `count` pages.
    pub fn contains(self, page: usize, count: usize) -> bool {
        self.to_index(page).is_some_and(|index| index < count)
    }
}

/// Items of page number `page` in the given numbering.
pub fn slice_page<T>(items: &[T], page: usize, base: PageBase, page_size: PageSize) -> &[T] {
    match base.to_index(page) {
        Some(index) => slice(items, index, page_size),
        None => &[],
    }
}

/// 1-based row number shown in the `#` column for the row at `offset` within
/// page number `page`.
pub fn ordinal(page: usize, base: PageBase, page_size: PageSize, offset: usize) -> usize {
    let index = base.to_index(page).unwrap_or(0);
    index * page_size.get() + offset + 1
}
