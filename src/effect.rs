//! Effects - side effects declared by the reducer

/// Task key shared by all page fetches, so a new fetch replaces the old one
pub const PAGE_TASK: &str = "page";
/// Task key for the search debounce timer
pub const FILTER_TASK: &str = "search_filter";

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Fetch a list page and all of its detail records
    FetchPage { request: u64, url: String },
    /// Restart the search debounce timer
    DebounceFilter { revision: u64, delay_ms: u64 },
    /// Drop any pending debounce timer
    CancelFilter,
}
