//! Fetch payload → flatten → filter → paginate, as the Table and the report
//! snapshot see it.

use api::{parse_result_set_str, ResultSet};
use serde_json::{json, Value};
use ui::data::{apply_filters, flatten, paginate, summarize, AssertionBucket, FilterCriteria};
use ui::export::snapshot::report_snapshot;
use ui::views::View;

fn test_json(network: &str, avg: &str, status: &str, response: &str) -> Value {
    json!({
        "network": network,
        "metrics": {
            "duration": { "min": "150ms", "avg": avg, "med": "1.2s", "max": "14s", "p90": "6s", "p95": "8s" },
            "status": { "result": status, "passRate": "96%", "passCount": 96, "failCount": 4 },
            "responseTime": { "result": response, "passRate": "70%", "passCount": 70, "failCount": 30 }
        }
    })
}

fn fixture() -> ResultSet {
    let payload = json!([
        {
            "name": "catalog-api",
            "tests": [
                test_json("35mbps", "1.5s", "pass", "pass"),
                test_json("1mbps", "4s", "pass", "fail"),
                test_json("100mbps", "850ms", "pass", "pass"),
            ]
        },
        {
            "name": "checkout-api",
            "tests": [
                test_json("35mbps", "2.2s", "pass", "pass"),
                test_json("1mbps", "12s", "fail", "fail"),
                test_json("100mbps", "n/a", "pass", "pass"),
            ]
        }
    ]);
    parse_result_set_str(&payload.to_string()).expect("fixture decodes")
}

#[test]
fn default_criteria_drop_slow_and_unparsable_rows() {
    let set = fixture();
    let rows = flatten(&set);
    let filtered = apply_filters(&rows, &FilterCriteria::default());
    let page = paginate(&filtered, 12, 1);

    // 12s is over the 10s bound and "n/a" has no average to compare.
    assert_eq!(page.rows.len(), 4);
    assert_eq!(page.showing_label(), "Showing 1 to 4 of 4 entries");
    assert!(!page.has_previous());
    assert!(!page.has_next());

    let keys: Vec<&str> = page.rows.iter().map(|row| row.row_key.as_str()).collect();
    assert_eq!(keys, ["0-0", "0-1", "0-2", "1-0"]);
}

#[test]
fn filters_then_paginates() {
    let set = fixture();
    let rows = flatten(&set);

    let mut criteria = FilterCriteria::default();
    criteria.toggle_network("1mbps");
    criteria.toggle_network("35mbps");
    criteria.toggle_assertion(AssertionBucket::Passed);
    let filtered = apply_filters(&rows, &criteria);

    // 1mbps/checkout failed its status assertion.
    let keys: Vec<&str> = filtered.iter().map(|row| row.row_key.as_str()).collect();
    assert_eq!(keys, ["0-0", "0-1", "1-0"]);

    let second = paginate(&filtered, 2, 2);
    assert_eq!(second.rows.len(), 1);
    assert_eq!(second.showing_label(), "Showing 3 to 3 of 3 entries");

    // Past the end clamps to the last page.
    assert_eq!(paginate(&filtered, 2, 9).page_number, 2);
}

#[test]
fn avg_range_drops_unparsable_rows() {
    let set = fixture();
    let rows = flatten(&set);

    let mut criteria = FilterCriteria::default();
    criteria.avg_time_range.max = 5.0;
    let keys: Vec<String> = apply_filters(&rows, &criteria)
        .into_iter()
        .map(|row| row.row_key)
        .collect();
    assert_eq!(keys, ["0-0", "0-1", "0-2", "1-0"]);
}

#[test]
fn search_matches_site_or_network() {
    let set = fixture();
    let rows = flatten(&set);

    let mut criteria = FilterCriteria::default();
    criteria.search_query = "  CHECKOUT ".into();
    let keys: Vec<String> = apply_filters(&rows, &criteria)
        .into_iter()
        .map(|row| row.row_key)
        .collect();
    assert_eq!(keys, ["1-0"]);

    criteria.search_query = "100mb".into();
    let keys: Vec<String> = apply_filters(&rows, &criteria)
        .into_iter()
        .map(|row| row.row_key)
        .collect();
    assert_eq!(keys, ["0-2"]);
}

#[test]
fn summary_counts_sites_and_tests() {
    let set = fixture();
    let summary = summarize(&set);
    assert_eq!(summary.site_count, 2);
    assert_eq!(summary.test_count, 6);
    assert_eq!(summary.passed + summary.failed, 6);
}

#[test]
fn table_snapshot_lists_every_filtered_row() {
    let set = fixture();
    let mut criteria = FilterCriteria::default();
    criteria.toggle_network("35mbps");

    let snapshot = report_snapshot(View::Table, &set, &criteria, "2025-03-07 09:05 UTC");
    assert!(snapshot.svg.contains("Full Report"));
    assert!(snapshot.svg.contains("Generated on 2025-03-07 09:05 UTC"));
    assert_eq!(snapshot.svg.matches(r#"class="report-row""#).count(), 2);
}
