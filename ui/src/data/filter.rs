//! Table filtering.
//!
//! Criteria combine with AND. An empty set (or blank query) leaves that
//! dimension unfiltered. The average-time bound has no "off" state: even the
//! default `[0, 10]` drops slower and unparsable rows.

use std::collections::BTreeSet;

use api::{DurationField, Outcome};

use super::transform::{classify_overall, FlattenedRow};

/// Network labels offered as filter checkboxes.
pub const NETWORK_OPTIONS: [&str; 5] = ["35mbps", "1mbps", "100mbps", "10mbps", "5mbps"];

/// Status-assertion buckets. `Pending` is offered but no result maps to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AssertionBucket {
    Passed,
    Failed,
    Pending,
}

impl AssertionBucket {
    pub const ALL: [AssertionBucket; 3] = [
        AssertionBucket::Passed,
        AssertionBucket::Failed,
        AssertionBucket::Pending,
    ];

    pub fn of(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Pass => AssertionBucket::Passed,
            Outcome::Fail => AssertionBucket::Failed,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AssertionBucket::Passed => "Passed",
            AssertionBucket::Failed => "Failed",
            AssertionBucket::Pending => "Pending",
        }
    }
}

/// Overall test buckets. `Running` and `Queued` never match fetched data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TestBucket {
    Pass,
    Fail,
    Running,
    Queued,
}

impl TestBucket {
    pub const ALL: [TestBucket; 4] = [
        TestBucket::Pass,
        TestBucket::Fail,
        TestBucket::Running,
        TestBucket::Queued,
    ];

    pub fn of(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Pass => TestBucket::Pass,
            Outcome::Fail => TestBucket::Fail,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TestBucket::Pass => "Pass",
            TestBucket::Fail => "Fail",
            TestBucket::Running => "Running",
            TestBucket::Queued => "Queued",
        }
    }
}

/// Inclusive bounds on the average duration, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeRange {
    pub min: f64,
    pub max: f64,
}

impl TimeRange {
    pub const SLIDER_MAX: f64 = 10.0;

    pub fn contains(&self, seconds: f64) -> bool {
        seconds >= self.min && seconds <= self.max
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: Self::SLIDER_MAX,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterCriteria {
    pub search_query: String,
    pub network_types: BTreeSet<String>,
    pub assertion_statuses: BTreeSet<AssertionBucket>,
    pub test_statuses: BTreeSet<TestBucket>,
    pub avg_time_range: TimeRange,
}

impl FilterCriteria {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_active(&self) -> bool {
        !self.search_query.trim().is_empty()
            || !self.network_types.is_empty()
            || !self.assertion_statuses.is_empty()
            || !self.test_statuses.is_empty()
            || !self.avg_time_range.is_default()
    }

    pub fn toggle_network(&mut self, network: &str) {
        if !self.network_types.remove(network) {
            self.network_types.insert(network.to_string());
        }
    }

    pub fn toggle_assertion(&mut self, bucket: AssertionBucket) {
        if !self.assertion_statuses.remove(&bucket) {
            self.assertion_statuses.insert(bucket);
        }
    }

    pub fn toggle_test_status(&mut self, bucket: TestBucket) {
        if !self.test_statuses.remove(&bucket) {
            self.test_statuses.insert(bucket);
        }
    }

    pub fn matches(&self, row: &FlattenedRow<'_>) -> bool {
        let test = row.test;

        let query = self.search_query.trim().to_lowercase();
        if !query.is_empty()
            && !row.site.name.to_lowercase().contains(&query)
            && !test.network.to_lowercase().contains(&query)
        {
            return false;
        }

        if !self.network_types.is_empty() && !self.network_types.contains(&test.network) {
            return false;
        }

        if !self.assertion_statuses.is_empty()
            && !self
                .assertion_statuses
                .contains(&AssertionBucket::of(test.metrics.status.result))
        {
            return false;
        }

        if !self.test_statuses.is_empty()
            && !self.test_statuses.contains(&TestBucket::of(classify_overall(test)))
        {
            return false;
        }

        // The bound always applies; an unparsable average never fits it.
        match test.metrics.duration.millis(DurationField::Avg) {
            Ok(ms) if self.avg_time_range.contains(ms / 1000.0) => {}
            _ => return false,
        }

        true
    }
}

pub fn apply_filters<'a>(rows: &[FlattenedRow<'a>], criteria: &FilterCriteria) -> Vec<FlattenedRow<'a>> {
    rows.iter().filter(|row| criteria.matches(row)).cloned().collect()
}
