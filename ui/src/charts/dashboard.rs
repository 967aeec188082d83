//! The concrete charts shown on the Home and Charts views.

use crate::core::format;
use crate::data::{ChartPoint, HomeSummary, PieSlice};

use super::{area_chart, bar_chart, pie_chart, radial_bars, Chart, Series, PALETTE};

pub const CHART_WIDTH: f64 = 520.0;
pub const CHART_HEIGHT: f64 = 300.0;

fn seconds_axis(ms: f64) -> String {
    format!("{:.1}s", ms / 1000.0)
}

fn count_axis(value: f64) -> String {
    format::format_count(value.round() as u64)
}

fn networks(points: &[ChartPoint]) -> Vec<String> {
    points.iter().map(|point| point.network.clone()).collect()
}

/// Average, P90 and P95 per test.
pub fn duration_bars(points: &[ChartPoint]) -> Chart {
    let series = [
        Series::new("Average", PALETTE[0], points.iter().map(|p| p.avg_ms).collect()),
        Series::new("P90", PALETTE[1], points.iter().map(|p| p.p90_ms).collect()),
        Series::new("P95", PALETTE[2], points.iter().map(|p| p.p95_ms).collect()),
    ];
    bar_chart(&networks(points), &series, CHART_WIDTH, CHART_HEIGHT, seconds_axis)
}

/// Max, average and min per test, largest first so smaller areas stay visible.
pub fn duration_trend(points: &[ChartPoint]) -> Chart {
    let series = [
        Series::new("Max", "#ef4444", points.iter().map(|p| p.max_ms).collect()),
        Series::new("Average", "#8b5cf6", points.iter().map(|p| p.avg_ms).collect()),
        Series::new("Min", "#10b981", points.iter().map(|p| p.min_ms).collect()),
    ];
    area_chart(&networks(points), &series, CHART_WIDTH, CHART_HEIGHT, seconds_axis)
}

pub fn pass_rate_rings(points: &[ChartPoint]) -> Chart {
    let series = [
        Series::new(
            "Status Pass Rate",
            PALETTE[0],
            points.iter().map(|p| p.status_pass_rate.map(f64::from)).collect(),
        ),
        Series::new(
            "Response Pass Rate",
            PALETTE[1],
            points.iter().map(|p| p.response_pass_rate.map(f64::from)).collect(),
        ),
    ];
    radial_bars(&networks(points), &series, CHART_WIDTH, CHART_HEIGHT)
}

pub fn pass_fail_pie(slices: &[PieSlice]) -> Chart {
    let legend_rows = slices.len().div_ceil(2) as f64;
    pie_chart(slices, CHART_WIDTH, CHART_HEIGHT + 20.0 * legend_rows.max(1.0))
}

/// Passed and failed requests per network.
pub fn network_totals(summary: &HomeSummary) -> Chart {
    let categories: Vec<String> = summary.networks.iter().map(|n| n.network.clone()).collect();
    let series = [
        Series::new(
            "Passed",
            "#10b981",
            summary.networks.iter().map(|n| Some(n.passed as f64)).collect(),
        ),
        Series::new(
            "Failed",
            "#ef4444",
            summary.networks.iter().map(|n| Some(n.failed as f64)).collect(),
        ),
    ];
    bar_chart(&categories, &series, CHART_WIDTH, CHART_HEIGHT, count_axis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::transform::fixtures::{site, test};
    use crate::data::{summarize, to_chart_point};
    use api::Outcome;

    #[test]
    fn dashboard_charts_render_every_test() {
        let set = vec![site(
            "A",
            vec![
                test("35mbps", "3.1s", Outcome::Pass, Outcome::Pass),
                test("1mbps", "4s", Outcome::Fail, Outcome::Pass),
            ],
        )];
        let points: Vec<ChartPoint> = set[0].tests.iter().map(to_chart_point).collect();

        assert_eq!(duration_bars(&points).to_svg().matches(r#"class="bar""#).count(), 6);
        assert_eq!(duration_trend(&points).to_svg().matches(r#"class="area""#).count(), 3);
        assert_eq!(pass_rate_rings(&points).to_svg().matches(r#"class="ring""#).count(), 4);

        let totals = network_totals(&summarize(&set)).to_svg();
        assert!(totals.contains(">35mbps</text>"));
        assert!(totals.contains(">1mbps</text>"));
    }
}
