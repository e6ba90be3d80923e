use crate::listing::filter::{apply_filter, FilterState};
use crate::listing::sort::{sort_listings, SortKey};
use crate::models::JobListing;

/// The listings from the last successful search plus the view derived from them.
///
/// `filtered` is never edited directly: every change to the listings, the
/// filter, or the sort key re-derives it from `all` by filtering first and
/// sorting second. Sorting therefore never compounds a previous ordering.
#[derive(Debug, Clone, Default)]
pub struct WorkingSet {
    all: Vec<JobListing>,
    filtered: Vec<JobListing>,
    filter: FilterState,
    sort: SortKey,
}

impl WorkingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the listings with a fresh search result, keeping the active
    /// filter and sort.
    pub fn replace(&mut self, jobs: Vec<JobListing>) {
        self.all = jobs;
        self.recompute();
    }

    pub fn apply_filter(&mut self, state: FilterState) {
        self.filter = state;
        self.recompute();
    }

    pub fn apply_sort(&mut self, key: SortKey) {
        self.sort = key;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.filtered = apply_filter(&self.all, &self.filter);
        sort_listings(&mut self.filtered, self.sort);
    }

    pub fn all(&self) -> &[JobListing] {
        &self.all
    }

    pub fn filtered(&self) -> &[JobListing] {
        &self.filtered
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.filter
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}
