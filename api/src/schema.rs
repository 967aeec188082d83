//! Wire model for a load-test result set.
//!
//! The endpoint returns a JSON array of sites. Each site lists one test run per
//! network condition:
//!
//! ```text
//! [
//!   {
//!     "name": "checkout-api",
//!     "tests": [
//!       {
//!         "network": "35mbps",
//!         "metrics": {
//!           "duration":     { "min": "120ms", "avg": "3.1s", ... },
//!           "status":       { "result": "pass", "passRate": "90%", "passCount": 135, "failCount": 15 },
//!           "responseTime": { "result": "fail", "passRate": "40%", "passCount": 60, "failCount": 90 }
//!         }
//!       }
//!     ]
//!   }
//! ]
//! ```
//!
//! Duration strings are kept verbatim so views can render them as received;
//! numeric accessors parse on demand and report a [`ParseError`] per field.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ParseError, SchemaError};
use crate::metric::{parse_duration_ms, parse_pass_rate};

/// One fetch worth of results, in server order.
pub type ResultSet = Vec<SiteResult>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteResult {
    pub name: String,
    pub tests: Vec<TestResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    /// Free-form network label such as `35mbps`.
    pub network: String,
    pub metrics: Metrics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub duration: DurationStats,
    pub status: OutcomeStats,
    pub response_time: OutcomeStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationStats {
    pub min: String,
    pub avg: String,
    pub med: String,
    pub max: String,
    pub p90: String,
    pub p95: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DurationField {
    Min,
    Avg,
    Med,
    Max,
    P90,
    P95,
}

impl DurationField {
    pub const ALL: [DurationField; 6] = [
        DurationField::Min,
        DurationField::Avg,
        DurationField::Med,
        DurationField::Max,
        DurationField::P90,
        DurationField::P95,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DurationField::Min => "Minimum",
            DurationField::Avg => "Average",
            DurationField::Med => "Median",
            DurationField::Max => "Maximum",
            DurationField::P90 => "90th Percentile",
            DurationField::P95 => "95th Percentile",
        }
    }
}

impl DurationStats {
    /// Raw string for a field, exactly as received.
    pub fn raw(&self, field: DurationField) -> &str {
        match field {
            DurationField::Min => &self.min,
            DurationField::Avg => &self.avg,
            DurationField::Med => &self.med,
            DurationField::Max => &self.max,
            DurationField::P90 => &self.p90,
            DurationField::P95 => &self.p95,
        }
    }

    pub fn millis(&self, field: DurationField) -> Result<f64, ParseError> {
        parse_duration_ms(self.raw(field))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeStats {
    pub result: Outcome,
    /// Server-formatted rate such as `90%`. Never recomputed client-side.
    pub pass_rate: String,
    pub pass_count: u64,
    pub fail_count: u64,
}

impl OutcomeStats {
    pub fn total(&self) -> u64 {
        self.pass_count.saturating_add(self.fail_count)
    }

    pub fn pass_rate_percent(&self) -> Result<u32, ParseError> {
        parse_pass_rate(&self.pass_rate)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Pass,
    Fail,
}

impl Outcome {
    pub fn is_pass(self) -> bool {
        matches!(self, Outcome::Pass)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Pass => "pass",
            Outcome::Fail => "fail",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate and decode a raw JSON value into a [`ResultSet`].
pub fn parse_result_set(value: Value) -> Result<ResultSet, SchemaError> {
    let Value::Array(items) = value else {
        return Err(SchemaError::NotAnArray);
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let has_tests = item.get("tests").map(Value::is_array).unwrap_or(false);
            if !has_tests {
                return Err(SchemaError::MissingTests { index });
            }
            serde_json::from_value(item).map_err(|source| SchemaError::InvalidSite { index, source })
        })
        .collect()
}

pub fn parse_result_set_str(raw: &str) -> Result<ResultSet, SchemaError> {
    let value: Value = serde_json::from_str(raw)?;
    parse_result_set(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn site_json(name: &str) -> Value {
        json!({
            "name": name,
            "tests": [{
                "network": "35mbps",
                "metrics": {
                    "duration": {
                        "min": "120ms", "avg": "3.1s", "med": "2s",
                        "max": "22s", "p90": "5s", "p95": "6.5s"
                    },
                    "status": { "result": "pass", "passRate": "90%", "passCount": 135, "failCount": 15 },
                    "responseTime": { "result": "fail", "passRate": "40%", "passCount": 60, "failCount": 90 }
                }
            }]
        })
    }

    #[test]
    fn decodes_camel_case_payload() {
        let set = parse_result_set(json!([site_json("checkout")])).unwrap();
        assert_eq!(set.len(), 1);
        let test = &set[0].tests[0];
        assert_eq!(test.network, "35mbps");
        assert_eq!(test.metrics.status.result, Outcome::Pass);
        assert_eq!(test.metrics.response_time.result, Outcome::Fail);
        assert_eq!(test.metrics.response_time.pass_count, 60);
        assert_eq!(test.metrics.status.total(), 150);
        assert_eq!(test.metrics.duration.millis(DurationField::Avg), Ok(3100.0));
        assert_eq!(test.metrics.status.pass_rate_percent(), Ok(90));
    }

    #[test]
    fn rejects_non_array_top_level() {
        let err = parse_result_set(json!({ "name": "x", "tests": [] })).unwrap_err();
        assert!(matches!(err, SchemaError::NotAnArray));
    }

    #[test]
    fn reports_index_of_site_without_tests() {
        let err = parse_result_set(json!([site_json("a"), { "name": "b" }])).unwrap_err();
        assert!(matches!(err, SchemaError::MissingTests { index: 1 }));

        let err = parse_result_set(json!([{ "name": "c", "tests": "nope" }])).unwrap_err();
        assert!(matches!(err, SchemaError::MissingTests { index: 0 }));
    }

    #[test]
    fn other_field_mismatches_are_invalid_site() {
        let mut broken = site_json("a");
        broken["tests"][0]["metrics"]["status"]["result"] = json!("maybe");
        let err = parse_result_set(json!([broken])).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidSite { index: 0, .. }));
    }

    #[test]
    fn duplicate_site_names_are_kept() {
        let set = parse_result_set(json!([site_json("dup"), site_json("dup")])).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn malformed_duration_is_kept_verbatim() {
        let mut odd = site_json("a");
        odd["tests"][0]["metrics"]["duration"]["p95"] = json!("n/a");
        let set = parse_result_set(json!([odd])).unwrap();
        let duration = &set[0].tests[0].metrics.duration;
        assert_eq!(duration.raw(DurationField::P95), "n/a");
        assert!(duration.millis(DurationField::P95).is_err());
    }

    #[test]
    fn malformed_json_string_is_schema_error() {
        let err = parse_result_set_str("[{").unwrap_err();
        assert!(matches!(err, SchemaError::Json(_)));
    }
}
