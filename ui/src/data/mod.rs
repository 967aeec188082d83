//! Result pipeline: fetch provider, transforms, filtering and pagination.

pub mod filter;
pub mod pagination;
pub mod provider;
pub mod transform;

pub use filter::{apply_filters, AssertionBucket, FilterCriteria, TestBucket, TimeRange, NETWORK_OPTIONS};
pub use pagination::{paginate, Page, TableState};
pub use provider::{use_results, use_results_provider, FetchState, FetchTracker, ResultsContext};
pub use transform::{
    classify_overall, flatten, row_key, summarize, to_chart_point, to_pie_slices, ChartPoint,
    FlattenedRow, HomeSummary, NetworkTotals, PieSlice, SliceKind,
};
