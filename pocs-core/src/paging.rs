/// Records per page. ODWB refuses larger pages.
pub const PAGE_SIZE: usize = 100;

/// ODWB rejects requests where offset + limit exceeds 10 000 records.
pub const MAX_PAGES: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub index: usize,
    pub limit: usize,
    pub offset: usize,
}

impl PageRequest {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            limit: PAGE_SIZE,
            offset: index * PAGE_SIZE,
        }
    }
}

/// Number of pages to fetch for `total_count` records.
///
/// Always at least one page, so an empty dataset still issues a single
/// (empty) request, and never more than [`MAX_PAGES`]. Exact multiples of
/// [`PAGE_SIZE`] do not get a trailing empty page.
pub fn page_count(total_count: u64) -> usize {
    let pages = total_count.div_ceil(PAGE_SIZE as u64).max(1);
    pages.min(MAX_PAGES as u64) as usize
}

pub fn pages(total_count: u64) -> impl Iterator<Item = PageRequest> {
    (0..page_count(total_count)).map(PageRequest::new)
}
