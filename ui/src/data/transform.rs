//! Derived view models over a [`ResultSet`].
//!
//! Everything here is pure. Unparsable metric strings never abort a view: they
//! become `None` and render as the placeholder.

use api::{DurationField, Outcome, ResultSet, SiteResult, TestResult};
use tracing::debug;

/// One (site, test) pair, addressable by `row_key`.
#[derive(Debug, Clone, PartialEq)]
pub struct FlattenedRow<'a> {
    pub site_index: usize,
    pub test_index: usize,
    pub site: &'a SiteResult,
    pub test: &'a TestResult,
    pub row_key: String,
}

impl<'a> FlattenedRow<'a> {
    pub fn new(site_index: usize, test_index: usize, site: &'a SiteResult, test: &'a TestResult) -> Self {
        Self {
            site_index,
            test_index,
            site,
            test,
            row_key: row_key(site_index, test_index),
        }
    }
}

pub fn row_key(site_index: usize, test_index: usize) -> String {
    format!("{site_index}-{test_index}")
}

/// Every (site, test) pair in server order.
pub fn flatten(set: &ResultSet) -> Vec<FlattenedRow<'_>> {
    set.iter()
        .enumerate()
        .flat_map(|(site_index, site)| {
            site.tests
                .iter()
                .enumerate()
                .map(move |(test_index, test)| FlattenedRow::new(site_index, test_index, site, test))
        })
        .collect()
}

/// Pass only when both the status and the response-time assertions passed.
pub fn classify_overall(test: &TestResult) -> Outcome {
    let metrics = &test.metrics;
    if metrics.status.result.is_pass() && metrics.response_time.result.is_pass() {
        Outcome::Pass
    } else {
        Outcome::Fail
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub network: String,
    pub min_ms: Option<f64>,
    pub avg_ms: Option<f64>,
    pub med_ms: Option<f64>,
    pub max_ms: Option<f64>,
    pub p90_ms: Option<f64>,
    pub p95_ms: Option<f64>,
    pub status_pass_rate: Option<u32>,
    pub response_pass_rate: Option<u32>,
    pub pass_count: u64,
    pub fail_count: u64,
    pub total_requests: u64,
    pub status_result: Outcome,
    pub response_result: Outcome,
}

impl ChartPoint {
    pub fn millis(&self, field: DurationField) -> Option<f64> {
        match field {
            DurationField::Min => self.min_ms,
            DurationField::Avg => self.avg_ms,
            DurationField::Med => self.med_ms,
            DurationField::Max => self.max_ms,
            DurationField::P90 => self.p90_ms,
            DurationField::P95 => self.p95_ms,
        }
    }
}

pub fn to_chart_point(test: &TestResult) -> ChartPoint {
    let metrics = &test.metrics;
    let duration = |field: DurationField| match metrics.duration.millis(field) {
        Ok(ms) => Some(ms),
        Err(err) => {
            debug!(network = %test.network, field = field.label(), error = %err, "duration left blank");
            None
        }
    };
    let rate = |stats: &api::OutcomeStats| match stats.pass_rate_percent() {
        Ok(pct) => Some(pct),
        Err(err) => {
            debug!(network = %test.network, error = %err, "pass rate left blank");
            None
        }
    };

    ChartPoint {
        network: test.network.clone(),
        min_ms: duration(DurationField::Min),
        avg_ms: duration(DurationField::Avg),
        med_ms: duration(DurationField::Med),
        max_ms: duration(DurationField::Max),
        p90_ms: duration(DurationField::P90),
        p95_ms: duration(DurationField::P95),
        status_pass_rate: rate(&metrics.status),
        response_pass_rate: rate(&metrics.response_time),
        pass_count: metrics.status.pass_count,
        fail_count: metrics.status.fail_count,
        total_requests: metrics.status.total(),
        status_result: metrics.status.result,
        response_result: metrics.response_time.result,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceKind {
    Pass,
    Fail,
}

impl SliceKind {
    pub fn color(self) -> &'static str {
        match self {
            SliceKind::Pass => "#10b981",
            SliceKind::Fail => "#ef4444",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: u64,
    pub kind: SliceKind,
}

pub fn to_pie_slices(test: &TestResult) -> [PieSlice; 2] {
    let status = &test.metrics.status;
    [
        PieSlice {
            label: format!("{} - Pass", test.network),
            value: status.pass_count,
            kind: SliceKind::Pass,
        },
        PieSlice {
            label: format!("{} - Fail", test.network),
            value: status.fail_count,
            kind: SliceKind::Fail,
        },
    ]
}

#[derive(Debug, Clone, PartialEq)]
pub struct NetworkTotals {
    pub network: String,
    pub passed: u64,
    pub failed: u64,
}

/// Aggregates shown on the Home view.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HomeSummary {
    pub site_count: usize,
    pub test_count: usize,
    pub passed: u64,
    pub failed: u64,
    pub avg_status_pass_rate: Option<f64>,
    pub avg_response_pass_rate: Option<f64>,
    pub avg_ms: Option<f64>,
    pub avg_max_ms: Option<f64>,
    pub avg_min_ms: Option<f64>,
    pub avg_med_ms: Option<f64>,
    /// First-seen network order.
    pub networks: Vec<NetworkTotals>,
}

impl HomeSummary {
    pub fn total_requests(&self) -> u64 {
        self.passed.saturating_add(self.failed)
    }

    pub fn pie_slices(&self) -> [PieSlice; 2] {
        [
            PieSlice {
                label: "Passed".to_string(),
                value: self.passed,
                kind: SliceKind::Pass,
            },
            PieSlice {
                label: "Failed".to_string(),
                value: self.failed,
                kind: SliceKind::Fail,
            },
        ]
    }
}

pub fn summarize(set: &ResultSet) -> HomeSummary {
    let points: Vec<ChartPoint> = set
        .iter()
        .flat_map(|site| site.tests.iter().map(to_chart_point))
        .collect();

    let mut networks: Vec<NetworkTotals> = Vec::new();
    for point in &points {
        match networks.iter_mut().find(|entry| entry.network == point.network) {
            Some(entry) => {
                entry.passed += point.pass_count;
                entry.failed += point.fail_count;
            }
            None => networks.push(NetworkTotals {
                network: point.network.clone(),
                passed: point.pass_count,
                failed: point.fail_count,
            }),
        }
    }

    HomeSummary {
        site_count: set.len(),
        test_count: points.len(),
        passed: points.iter().map(|p| p.pass_count).sum(),
        failed: points.iter().map(|p| p.fail_count).sum(),
        avg_status_pass_rate: mean(points.iter().map(|p| p.status_pass_rate.map(f64::from))),
        avg_response_pass_rate: mean(points.iter().map(|p| p.response_pass_rate.map(f64::from))),
        avg_ms: mean(points.iter().map(|p| p.avg_ms)),
        avg_max_ms: mean(points.iter().map(|p| p.max_ms)),
        avg_min_ms: mean(points.iter().map(|p| p.min_ms)),
        avg_med_ms: mean(points.iter().map(|p| p.med_ms)),
        networks,
    }
}

fn mean(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    let (sum, count) = values
        .flatten()
        .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    (count > 0).then(|| sum / count as f64)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use api::{DurationStats, Metrics, Outcome, OutcomeStats, SiteResult, TestResult};

    pub fn test(network: &str, avg: &str, status: Outcome, response: Outcome) -> TestResult {
        TestResult {
            network: network.to_string(),
            metrics: Metrics {
                duration: DurationStats {
                    min: "120ms".into(),
                    avg: avg.into(),
                    med: "2s".into(),
                    max: "22s".into(),
                    p90: "5s".into(),
                    p95: "6.5s".into(),
                },
                status: OutcomeStats {
                    result: status,
                    pass_rate: "90%".into(),
                    pass_count: 135,
                    fail_count: 15,
                },
                response_time: OutcomeStats {
                    result: response,
                    pass_rate: "40%".into(),
                    pass_count: 60,
                    fail_count: 90,
                },
            },
        }
    }

    pub fn site(name: &str, tests: Vec<TestResult>) -> SiteResult {
        SiteResult {
            name: name.to_string(),
            tests,
        }
    }
}
