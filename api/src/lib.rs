//! Load-test result schema, metric parsing and the HTTP client that fetches
//! result sets for the dashboard.

pub mod client;
pub mod error;
pub mod metric;
pub mod schema;

pub use client::{default_endpoint, ResultClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, RESULT_PATH};
pub use error::{FetchError, ParseError, SchemaError};
pub use metric::{parse_duration_ms, parse_pass_rate};
pub use schema::{
    parse_result_set, parse_result_set_str, DurationField, DurationStats, Metrics, Outcome,
    OutcomeStats, ResultSet, SiteResult, TestResult,
};
