//! Backward-pagination cursor for history loads.
//!
//! At most one page load is in flight at a time. A request while one is
//! pending is a no-op, not queued; callers re-request after completion. Pages
//! are strictly sequential: page k+1 is only requestable once page k has
//! completed, so the transcript never develops gaps.

/// History pagination state.
#[derive(Debug, Clone, Default)]
pub struct HistoryPager {
    current_page: u32,
    loading: bool,
}

impl HistoryPager {
    /// Create a pager positioned before the first load.
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin the initial page-0 load.
    pub fn begin_initial(&mut self) -> u32 {
        self.current_page = 0;
        self.loading = true;
        0
    }

    /// Advance the cursor and begin loading the next older page.
    ///
    /// Returns `None` while a load is in flight or when the last page has
    /// already been loaded (`current_page + 1 >= total_pages`).
    pub fn request_older(&mut self, total_pages: u32) -> Option<u32> {
        if self.loading || self.current_page + 1 >= total_pages {
            return None;
        }
        self.current_page += 1;
        self.loading = true;
        Some(self.current_page)
    }

    /// Mark the in-flight load complete.
    pub fn complete(&mut self) {
        self.loading = false;
    }

    /// Mark the in-flight load failed.
    ///
    /// Clears the loading flag only; the caller decides the (fatal)
    /// consequence.
    pub fn fail(&mut self) {
        self.loading = false;
    }

    /// True while a load is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Index of the most recently requested page.
    pub fn current_page(&self) -> u32 {
        self.current_page
    }
}
