//! SVG report of the active view, used as the page source for the PDF.

use std::fmt::Write;

use api::{DurationField, ResultSet};

use crate::charts::dashboard::{self, CHART_HEIGHT};
use crate::charts::{escape, num, Chart, FONT_FAMILY};
use crate::core::format;
use crate::data::{
    apply_filters, classify_overall, flatten, summarize, to_chart_point, to_pie_slices, ChartPoint,
    FilterCriteria, PieSlice,
};
use crate::views::View;

pub const REPORT_WIDTH: f64 = 1200.0;
const PADDING: f64 = 40.0;
const ROW_HEIGHT: f64 = 26.0;
const TEXT: &str = "#1f2937";
const MUTED: &str = "#6b7280";
const RULE: &str = "#e5e7eb";

#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub svg: String,
    pub width: f64,
    pub height: f64,
}

/// Render `view` as a standalone SVG document.
///
/// The Table snapshot holds every filtered row rather than the visible page.
pub fn report_snapshot(
    view: View,
    set: &ResultSet,
    criteria: &FilterCriteria,
    generated_on: &str,
) -> Snapshot {
    let mut report = Report::new();
    report.header(view, generated_on);

    match view {
        View::Home => home(&mut report, set),
        View::Table => table(&mut report, set, criteria),
        View::Cards => cards(&mut report, set),
        View::Charts => charts(&mut report, set),
    }

    report.finish()
}

fn home(report: &mut Report, set: &ResultSet) {
    let summary = summarize(set);
    report.tiles(&[
        ("Total APIs", summary.site_count.to_string()),
        ("Total Tests", summary.test_count.to_string()),
        ("Total Requests", format::format_count(summary.total_requests())),
        ("Avg Pass Rate", format::format_percent(summary.avg_status_pass_rate)),
        ("Assertion Pass Rate", format::format_percent(summary.avg_response_pass_rate)),
        ("Avg Time", format::format_seconds(summary.avg_ms)),
        ("Max Time", format::format_seconds(summary.avg_max_ms)),
        ("Min Time", format::format_seconds(summary.avg_min_ms)),
        ("Median Time", format::format_seconds(summary.avg_med_ms)),
        ("Passed", format::format_count(summary.passed)),
        ("Failed", format::format_count(summary.failed)),
    ]);
    report.chart_pair(
        "Overall Pass/Fail",
        &dashboard::pass_fail_pie(&summary.pie_slices()),
        "Requests by Network",
        &dashboard::network_totals(&summary),
    );
}

const TABLE_COLUMNS: [(&str, f64); 9] = [
    ("SL No", 0.0),
    ("API Name", 70.0),
    ("Network Type", 380.0),
    ("Min", 510.0),
    ("Avg", 590.0),
    ("Med", 670.0),
    ("Max", 750.0),
    ("Status", 830.0),
    ("Passed %", 920.0),
];

fn table(report: &mut Report, set: &ResultSet, criteria: &FilterCriteria) {
    let rows = flatten(set);
    let filtered = apply_filters(&rows, criteria);
    report.line(
        &format!("{} of {} tests match the active filters", filtered.len(), rows.len()),
        13.0,
        MUTED,
    );

    let header: Vec<(String, f64)> = TABLE_COLUMNS
        .iter()
        .map(|(label, x)| (label.to_string(), *x))
        .collect();
    report.table_row(&header, true, None);

    for (idx, row) in filtered.iter().enumerate() {
        let duration = &row.test.metrics.duration;
        let status = &row.test.metrics.status;
        let values = [
            (idx + 1).to_string(),
            row.site.name.clone(),
            row.test.network.clone(),
            duration.raw(DurationField::Min).to_string(),
            duration.raw(DurationField::Avg).to_string(),
            duration.raw(DurationField::Med).to_string(),
            duration.raw(DurationField::Max).to_string(),
            status.result.to_string(),
            status.pass_rate.clone(),
        ];
        let cells: Vec<(String, f64)> = values
            .into_iter()
            .zip(TABLE_COLUMNS.iter().map(|(_, x)| *x))
            .collect();
        report.table_row(&cells, false, Some("report-row"));
    }
}

fn cards(report: &mut Report, set: &ResultSet) {
    for site in set {
        report.section(&site.name);
        for test in &site.tests {
            let metrics = &test.metrics;
            let badge = if classify_overall(test).is_pass() {
                "All Passed"
            } else {
                "Some Failed"
            };
            let durations = DurationField::ALL
                .iter()
                .map(|field| format!("{} {}", field.label(), metrics.duration.raw(*field)))
                .collect::<Vec<_>>()
                .join("  ·  ");
            let outcome = |label: &str, stats: &api::OutcomeStats| {
                format!(
                    "{label}: {} ({}) - {} passed, {} failed",
                    stats.result,
                    stats.pass_rate,
                    format::format_count(stats.pass_count),
                    format::format_count(stats.fail_count)
                )
            };
            report.card(
                &format!("{}  [{badge}]", test.network),
                &[
                    durations,
                    outcome("Status", &metrics.status),
                    outcome("Response Time", &metrics.response_time),
                ],
            );
        }
    }
}

fn charts(report: &mut Report, set: &ResultSet) {
    let points: Vec<ChartPoint> = set
        .iter()
        .flat_map(|site| site.tests.iter().map(to_chart_point))
        .collect();
    let tiles: Vec<(&str, String)> = points
        .iter()
        .map(|point| {
            (
                point.network.as_str(),
                format!(
                    "{} avg · {} pass",
                    format::format_seconds(point.avg_ms),
                    format::format_percent(point.status_pass_rate.map(f64::from))
                ),
            )
        })
        .collect();
    report.tiles(&tiles);

    let slices: Vec<PieSlice> = set
        .iter()
        .flat_map(|site| site.tests.iter().flat_map(to_pie_slices))
        .collect();
    report.chart_pair(
        "Response Time Distribution",
        &dashboard::duration_bars(&points),
        "Pass/Fail Distribution",
        &dashboard::pass_fail_pie(&slices),
    );
    report.chart_pair(
        "Success Rate Performance",
        &dashboard::pass_rate_rings(&points),
        "Duration Trends",
        &dashboard::duration_trend(&points),
    );
}

/// Vertical layout cursor over an SVG body.
struct Report {
    body: String,
    y: f64,
}

impl Report {
    fn new() -> Self {
        Self {
            body: String::new(),
            y: PADDING,
        }
    }

    fn header(&mut self, view: View, generated_on: &str) {
        self.y += 28.0;
        let _ = write!(
            self.body,
            r#"<text x="{}" y="{}" font-size="28" font-weight="700" fill="{TEXT}">Full Report</text>"#,
            num(PADDING),
            num(self.y)
        );
        self.y += 24.0;
        let _ = write!(
            self.body,
            r#"<text x="{}" y="{}" font-size="13" fill="{MUTED}">{} · Generated on {}</text>"#,
            num(PADDING),
            num(self.y),
            escape(view.title()),
            escape(generated_on)
        );
        self.y += 16.0;
        self.rule();
    }

    fn rule(&mut self) {
        let _ = write!(
            self.body,
            r#"<line x1="{}" y1="{y}" x2="{}" y2="{y}" stroke="{RULE}"/>"#,
            num(PADDING),
            num(REPORT_WIDTH - PADDING),
            y = num(self.y)
        );
        self.y += 20.0;
    }

    fn line(&mut self, text: &str, size: f64, color: &str) {
        self.y += size + 4.0;
        let _ = write!(
            self.body,
            r#"<text x="{}" y="{}" font-size="{}" fill="{color}">{}</text>"#,
            num(PADDING),
            num(self.y),
            num(size),
            escape(text)
        );
        self.y += 8.0;
    }

    fn section(&mut self, title: &str) {
        self.y += 8.0;
        self.line(title, 18.0, TEXT);
    }

    fn tiles(&mut self, tiles: &[(&str, String)]) {
        const COLUMNS: usize = 4;
        const TILE_HEIGHT: f64 = 64.0;
        let tile_width = (REPORT_WIDTH - 2.0 * PADDING - 12.0 * (COLUMNS as f64 - 1.0)) / COLUMNS as f64;

        for (idx, (label, value)) in tiles.iter().enumerate() {
            let x = PADDING + (tile_width + 12.0) * (idx % COLUMNS) as f64;
            let y = self.y + (TILE_HEIGHT + 12.0) * (idx / COLUMNS) as f64;
            let _ = write!(
                self.body,
                r##"<g class="report-tile"><rect x="{x}" y="{y}" width="{w}" height="{TILE_HEIGHT}" rx="8" fill="#f9fafb" stroke="{RULE}"/><text x="{tx}" y="{ly}" font-size="11" fill="{MUTED}">{label}</text><text x="{tx}" y="{vy}" font-size="20" font-weight="700" fill="{TEXT}">{value}</text></g>"##,
                x = num(x),
                y = num(y),
                w = num(tile_width),
                tx = num(x + 12.0),
                ly = num(y + 22.0),
                vy = num(y + 48.0),
                label = escape(label),
                value = escape(value),
            );
        }
        let rows = tiles.len().div_ceil(COLUMNS);
        self.y += (TILE_HEIGHT + 12.0) * rows as f64 + 8.0;
    }

    fn chart_pair(&mut self, left_title: &str, left: &Chart, right_title: &str, right: &Chart) {
        let column = (REPORT_WIDTH - 2.0 * PADDING) / 2.0;
        self.y += 16.0;
        for (idx, title) in [left_title, right_title].iter().enumerate() {
            let _ = write!(
                self.body,
                r#"<text x="{}" y="{}" font-size="15" font-weight="600" fill="{TEXT}">{}</text>"#,
                num(PADDING + column * idx as f64),
                num(self.y),
                escape(title)
            );
        }
        self.y += 12.0;
        self.body.push_str(&left.placed(PADDING, self.y));
        self.body.push_str(&right.placed(PADDING + column, self.y));
        self.y += left.height.max(right.height).max(CHART_HEIGHT) + 16.0;
    }

    fn table_row(&mut self, cells: &[(String, f64)], header: bool, class: Option<&str>) {
        let weight = if header { "700" } else { "400" };
        let y = self.y + ROW_HEIGHT - 8.0;
        let mut markup = String::new();
        for (value, x) in cells {
            let _ = write!(
                markup,
                r#"<text x="{}" y="{}" font-size="12" font-weight="{weight}" fill="{TEXT}">{}</text>"#,
                num(PADDING + x),
                num(y),
                escape(&truncate(value, 40))
            );
        }
        let _ = write!(
            markup,
            r#"<line x1="{}" y1="{y2}" x2="{}" y2="{y2}" stroke="{RULE}"/>"#,
            num(PADDING),
            num(REPORT_WIDTH - PADDING),
            y2 = num(self.y + ROW_HEIGHT)
        );
        match class {
            Some(class) => {
                let _ = write!(self.body, r#"<g class="{class}">{markup}</g>"#);
            }
            None => self.body.push_str(&markup),
        }
        self.y += ROW_HEIGHT;
    }

    fn card(&mut self, title: &str, lines: &[String]) {
        let height = 30.0 + 20.0 * lines.len() as f64;
        let _ = write!(
            self.body,
            r##"<g class="report-card"><rect x="{x}" y="{y}" width="{w}" height="{h}" rx="8" fill="#ffffff" stroke="{RULE}"/><text x="{tx}" y="{ty}" font-size="14" font-weight="700" fill="{TEXT}">{title}</text>"##,
            x = num(PADDING),
            y = num(self.y),
            w = num(REPORT_WIDTH - 2.0 * PADDING),
            h = num(height),
            tx = num(PADDING + 14.0),
            ty = num(self.y + 22.0),
            title = escape(title),
        );
        for (idx, line) in lines.iter().enumerate() {
            let _ = write!(
                self.body,
                r#"<text x="{}" y="{}" font-size="12" fill="{MUTED}">{}</text>"#,
                num(PADDING + 14.0),
                num(self.y + 44.0 + 20.0 * idx as f64),
                escape(line)
            );
        }
        self.body.push_str("</g>");
        self.y += height + 12.0;
    }

    fn finish(self) -> Snapshot {
        let height = (self.y + PADDING).ceil();
        let svg = format!(
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="{FONT_FAMILY}"><rect width="{w}" height="{h}" fill="#ffffff"/>{body}</svg>"##,
            w = num(REPORT_WIDTH),
            h = num(height),
            body = self.body
        );
        Snapshot {
            svg,
            width: REPORT_WIDTH,
            height,
        }
    }
}

fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        value.to_string()
    } else {
        let mut out: String = value.chars().take(max_chars - 1).collect();
        out.push('…');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::transform::fixtures::{site, test};
    use api::Outcome;

    fn sample() -> ResultSet {
        vec![
            site(
                "Checkout & Pay",
                vec![
                    test("35mbps", "3.1s", Outcome::Pass, Outcome::Pass),
                    test("1mbps", "9s", Outcome::Fail, Outcome::Fail),
                ],
            ),
            site("Search", vec![test("35mbps", "800ms", Outcome::Pass, Outcome::Fail)]),
        ]
    }

    #[test]
    fn every_view_has_the_report_header() {
        let set = sample();
        for view in View::ALL {
            let snapshot = report_snapshot(view, &set, &FilterCriteria::default(), "2025-01-31 10:00 UTC");
            assert!(snapshot.svg.contains(">Full Report</text>"), "{view:?}");
            assert!(snapshot.svg.contains("Generated on 2025-01-31 10:00 UTC"));
            assert!(snapshot.height > 100.0);
        }
    }

    #[test]
    fn table_snapshot_lists_all_filtered_rows() {
        let set = sample();
        let mut criteria = FilterCriteria::default();
        let all = report_snapshot(View::Table, &set, &criteria, "today");
        assert_eq!(all.svg.matches(r#"class="report-row""#).count(), 3);
        assert!(all.svg.contains("Checkout &amp; Pay"));

        criteria.toggle_network("35mbps");
        let narrowed = report_snapshot(View::Table, &set, &criteria, "today");
        assert_eq!(narrowed.svg.matches(r#"class="report-row""#).count(), 2);
        assert!(narrowed.height < all.height);
    }

    #[test]
    fn card_snapshot_has_one_card_per_test() {
        let snapshot = report_snapshot(View::Cards, &sample(), &FilterCriteria::default(), "today");
        assert_eq!(snapshot.svg.matches(r#"class="report-card""#).count(), 3);
        assert!(snapshot.svg.contains("[All Passed]"));
        assert!(snapshot.svg.contains("[Some Failed]"));
    }

    #[test]
    fn chart_snapshot_embeds_the_four_charts() {
        let snapshot = report_snapshot(View::Charts, &sample(), &FilterCriteria::default(), "today");
        assert!(snapshot.svg.contains(r#"class="bar""#));
        assert!(snapshot.svg.contains(r#"class="slice""#));
        assert!(snapshot.svg.contains(r#"class="ring""#));
        assert!(snapshot.svg.contains(r#"class="area""#));
    }
}
