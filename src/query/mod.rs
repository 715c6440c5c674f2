//! Filtering, sorting, presets, and caching over request and shift
//! collections.

mod cache;
mod filter;
mod presets;

pub use cache::QueryCache;
pub use filter::{
    RequestCounts, RequestFilter, RequestQueryResult, ShiftFilter, SortDirection, SortField,
    SortSpec, filter_requests, filter_shifts,
};
pub use presets::FilterPreset;
