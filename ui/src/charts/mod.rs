//! Minimal SVG chart builders.
//!
//! Charts are plain markup strings so the same output can be dropped into a
//! view with `dangerous_inner_html` and composed into the export snapshot.

pub mod dashboard;

use std::f64::consts::PI;
use std::fmt::Write;

use crate::data::PieSlice;

pub const FONT_FAMILY: &str = "Helvetica, Arial, sans-serif";
const AXIS_COLOR: &str = "#9ca3af";
const GRID_COLOR: &str = "#e5e7eb";
const TEXT_COLOR: &str = "#374151";
const TRACK_COLOR: &str = "#e5e7eb";

const MARGIN_LEFT: f64 = 56.0;
const MARGIN_RIGHT: f64 = 16.0;
const MARGIN_TOP: f64 = 16.0;
const MARGIN_BOTTOM: f64 = 56.0;
const GRID_LINES: usize = 4;

/// Bar and area colors, in the order series are usually listed.
pub const PALETTE: [&str; 6] = ["#8b5cf6", "#06b6d4", "#10b981", "#f59e0b", "#ef4444", "#ec4899"];

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub color: &'static str,
    /// One value per category. `None` leaves a gap.
    pub values: Vec<Option<f64>>,
}

impl Series {
    pub fn new(name: impl Into<String>, color: &'static str, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            color,
            values,
        }
    }
}

/// A rendered chart body with its intrinsic size.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub width: f64,
    pub height: f64,
    body: String,
}

impl Chart {
    fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            body: String::new(),
        }
    }

    /// Standalone document.
    pub fn to_svg(&self) -> String {
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="{FONT_FAMILY}">{body}</svg>"#,
            w = num(self.width),
            h = num(self.height),
            body = self.body
        )
    }

    /// Nested `<svg>` positioned inside a larger document.
    pub fn placed(&self, x: f64, y: f64) -> String {
        format!(
            r#"<svg x="{x}" y="{y}" width="{w}" height="{h}" viewBox="0 0 {w} {h}">{body}</svg>"#,
            x = num(x),
            y = num(y),
            w = num(self.width),
            h = num(self.height),
            body = self.body
        )
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    fn push(&mut self, markup: impl AsRef<str>) {
        self.body.push_str(markup.as_ref());
    }
}

/// Grouped vertical bars, one group per category.
pub fn bar_chart(
    categories: &[String],
    series: &[Series],
    width: f64,
    height: f64,
    axis_label: fn(f64) -> String,
) -> Chart {
    let mut chart = Chart::new(width, height);
    let plot = Plot::new(width, height, max_value(series));
    plot.draw_axes(&mut chart, categories, axis_label);

    if !categories.is_empty() && !series.is_empty() {
        let band = plot.band(categories.len());
        let bar_width = band * 0.7 / series.len() as f64;
        for (cat_idx, _) in categories.iter().enumerate() {
            let group_x = plot.left + band * cat_idx as f64 + band * 0.15;
            for (series_idx, s) in series.iter().enumerate() {
                let Some(value) = s.values.get(cat_idx).copied().flatten() else {
                    continue;
                };
                let top = plot.y(value);
                let x = group_x + bar_width * series_idx as f64;
                chart.push(format!(
                    r#"<rect class="bar" x="{}" y="{}" width="{}" height="{}" rx="3" fill="{}"><title>{}: {}</title></rect>"#,
                    num(x),
                    num(top),
                    num(bar_width.max(1.0) - 1.0),
                    num(plot.bottom - top),
                    s.color,
                    escape(&s.name),
                    axis_label(value)
                ));
            }
        }
    }

    draw_legend(&mut chart, series.iter().map(|s| (s.name.as_str(), s.color)));
    chart
}

/// Overlapping filled areas, drawn in the given order.
pub fn area_chart(
    categories: &[String],
    series: &[Series],
    width: f64,
    height: f64,
    axis_label: fn(f64) -> String,
) -> Chart {
    let mut chart = Chart::new(width, height);
    let plot = Plot::new(width, height, max_value(series));
    plot.draw_axes(&mut chart, categories, axis_label);

    if !categories.is_empty() {
        let band = plot.band(categories.len());
        for s in series {
            let points: Vec<(f64, f64)> = s
                .values
                .iter()
                .take(categories.len())
                .enumerate()
                .filter_map(|(idx, value)| {
                    value.map(|v| (plot.left + band * (idx as f64 + 0.5), plot.y(v)))
                })
                .collect();
            let (Some(first), Some(last)) = (points.first(), points.last()) else {
                continue;
            };

            let mut outline = String::new();
            for (x, y) in &points {
                let _ = write!(outline, "{},{} ", num(*x), num(*y));
            }
            chart.push(format!(
                r#"<polygon class="area" points="{}{},{} {},{}" fill="{c}" fill-opacity="0.6" stroke="{c}" stroke-width="2"/>"#,
                outline,
                num(last.0),
                num(plot.bottom),
                num(first.0),
                num(plot.bottom),
                c = s.color
            ));
            for (x, y) in &points {
                chart.push(format!(
                    r#"<circle cx="{}" cy="{}" r="3" fill="{}"/>"#,
                    num(*x),
                    num(*y),
                    s.color
                ));
            }
        }
    }

    draw_legend(&mut chart, series.iter().map(|s| (s.name.as_str(), s.color)));
    chart
}

pub fn pie_chart(slices: &[PieSlice], width: f64, height: f64) -> Chart {
    let mut chart = Chart::new(width, height);
    let legend_space = 20.0 * slices.len().div_ceil(2) as f64 + 12.0;
    let cx = width / 2.0;
    let cy = (height - legend_space) / 2.0;
    let radius = (cx.min(cy) - 8.0).max(4.0);
    let total: u64 = slices.iter().map(|slice| slice.value).sum();

    if total == 0 {
        chart.push(format!(
            r#"<circle cx="{}" cy="{}" r="{}" fill="{TRACK_COLOR}"/><text x="{}" y="{}" text-anchor="middle" font-size="12" fill="{TEXT_COLOR}">No data</text>"#,
            num(cx),
            num(cy),
            num(radius),
            num(cx),
            num(cy + 4.0)
        ));
    } else {
        let mut angle = -PI / 2.0;
        for slice in slices.iter().filter(|slice| slice.value > 0) {
            let sweep = slice.value as f64 / total as f64 * 2.0 * PI;
            let title = format!("{}: {}", escape(&slice.label), slice.value);
            if slice.value == total {
                chart.push(format!(
                    r#"<circle class="slice" cx="{}" cy="{}" r="{}" fill="{}"><title>{title}</title></circle>"#,
                    num(cx),
                    num(cy),
                    num(radius),
                    slice.kind.color()
                ));
            } else {
                let (x0, y0) = polar(cx, cy, radius, angle);
                let (x1, y1) = polar(cx, cy, radius, angle + sweep);
                let large = u8::from(sweep > PI);
                chart.push(format!(
                    r##"<path class="slice" d="M{} {} L{} {} A{r} {r} 0 {large} 1 {} {} Z" fill="{}" stroke="#ffffff" stroke-width="1"><title>{title}</title></path>"##,
                    num(cx),
                    num(cy),
                    num(x0),
                    num(y0),
                    num(x1),
                    num(y1),
                    slice.kind.color(),
                    r = num(radius),
                ));
            }
            angle += sweep;
        }
    }

    let labels: Vec<String> = slices
        .iter()
        .map(|slice| format!("{} ({})", slice.label, slice.value))
        .collect();
    draw_legend(
        &mut chart,
        slices
            .iter()
            .zip(labels.iter())
            .map(|(slice, label)| (label.as_str(), slice.kind.color())),
    );
    chart
}

/// Concentric progress rings. Each (category, series) pair gets one ring
/// whose sweep is the percentage value.
pub fn radial_bars(categories: &[String], series: &[Series], width: f64, height: f64) -> Chart {
    let mut chart = Chart::new(width, height);
    let rings: Vec<(String, &'static str, Option<f64>)> = categories
        .iter()
        .enumerate()
        .flat_map(|(idx, category)| {
            series.iter().map(move |s| {
                (
                    format!("{category} · {}", s.name),
                    s.color,
                    s.values.get(idx).copied().flatten(),
                )
            })
        })
        .collect();

    let legend_space = 20.0 * series.len().div_ceil(2) as f64 + 12.0;
    let cx = width / 2.0;
    let cy = (height - legend_space) / 2.0;
    let outer = (cx.min(cy) - 6.0).max(8.0);
    let inner = outer * 0.25;
    let step = if rings.is_empty() {
        0.0
    } else {
        (outer - inner) / rings.len() as f64
    };
    let stroke = (step * 0.7).max(1.0);

    for (idx, (label, color, value)) in rings.iter().enumerate() {
        let r = outer - step * (idx as f64 + 0.5);
        chart.push(format!(
            r#"<circle cx="{}" cy="{}" r="{}" fill="none" stroke="{TRACK_COLOR}" stroke-width="{}"/>"#,
            num(cx),
            num(cy),
            num(r),
            num(stroke)
        ));
        let Some(pct) = value.map(|v| v.clamp(0.0, 100.0)) else {
            continue;
        };
        let title = format!("{}: {}%", escape(label), num(pct));
        if pct >= 100.0 {
            chart.push(format!(
                r#"<circle class="ring" cx="{}" cy="{}" r="{}" fill="none" stroke="{color}" stroke-width="{}"><title>{title}</title></circle>"#,
                num(cx),
                num(cy),
                num(r),
                num(stroke)
            ));
        } else if pct > 0.0 {
            let start = -PI / 2.0;
            let sweep = pct / 100.0 * 2.0 * PI;
            let (x0, y0) = polar(cx, cy, r, start);
            let (x1, y1) = polar(cx, cy, r, start + sweep);
            let large = u8::from(sweep > PI);
            chart.push(format!(
                r#"<path class="ring" d="M{} {} A{rr} {rr} 0 {large} 1 {} {}" fill="none" stroke="{color}" stroke-width="{}" stroke-linecap="round"><title>{title}</title></path>"#,
                num(x0),
                num(y0),
                num(x1),
                num(y1),
                num(stroke),
                rr = num(r),
            ));
        }
    }

    draw_legend(&mut chart, series.iter().map(|s| (s.name.as_str(), s.color)));
    chart
}

/// Escape text for use in SVG content and attribute values.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Compact number for attributes: at most two decimals, no trailing zeros.
pub fn num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    let text = format!("{rounded:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

struct Plot {
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
    max: f64,
}

impl Plot {
    fn new(width: f64, height: f64, max_value: f64) -> Self {
        Self {
            left: MARGIN_LEFT,
            right: (width - MARGIN_RIGHT).max(MARGIN_LEFT + 1.0),
            top: MARGIN_TOP,
            bottom: (height - MARGIN_BOTTOM).max(MARGIN_TOP + 1.0),
            max: nice_ceiling(max_value),
        }
    }

    fn band(&self, count: usize) -> f64 {
        (self.right - self.left) / count.max(1) as f64
    }

    fn y(&self, value: f64) -> f64 {
        let ratio = (value / self.max).clamp(0.0, 1.0);
        self.bottom - ratio * (self.bottom - self.top)
    }

    fn draw_axes(&self, chart: &mut Chart, categories: &[String], axis_label: fn(f64) -> String) {
        for tick in 0..=GRID_LINES {
            let value = self.max * tick as f64 / GRID_LINES as f64;
            let y = self.y(value);
            chart.push(format!(
                r#"<line x1="{l}" y1="{y}" x2="{r}" y2="{y}" stroke="{GRID_COLOR}" stroke-dasharray="3 3"/><text x="{tx}" y="{ty}" text-anchor="end" font-size="10" fill="{AXIS_COLOR}">{label}</text>"#,
                l = num(self.left),
                r = num(self.right),
                y = num(y),
                tx = num(self.left - 6.0),
                ty = num(y + 3.0),
                label = escape(&axis_label(value)),
            ));
        }

        let band = self.band(categories.len());
        for (idx, category) in categories.iter().enumerate() {
            chart.push(format!(
                r#"<text x="{}" y="{}" text-anchor="middle" font-size="10" fill="{AXIS_COLOR}">{}</text>"#,
                num(self.left + band * (idx as f64 + 0.5)),
                num(self.bottom + 14.0),
                escape(category)
            ));
        }
        chart.push(format!(
            r#"<line x1="{l}" y1="{b}" x2="{r}" y2="{b}" stroke="{AXIS_COLOR}"/>"#,
            l = num(self.left),
            r = num(self.right),
            b = num(self.bottom)
        ));
    }
}

fn draw_legend<'a>(chart: &mut Chart, entries: impl Iterator<Item = (&'a str, &'a str)>) {
    let column_width = chart.width / 2.0;
    let entries: Vec<_> = entries.collect();
    let rows = entries.len().div_ceil(2);
    let base_y = chart.height - 20.0 * rows as f64;

    let mut markup = String::new();
    for (idx, (label, color)) in entries.iter().enumerate() {
        let x = 12.0 + column_width * (idx % 2) as f64;
        let y = base_y + 20.0 * (idx / 2) as f64;
        let _ = write!(
            markup,
            r#"<rect x="{}" y="{}" width="10" height="10" rx="2" fill="{color}"/><text x="{}" y="{}" font-size="11" fill="{TEXT_COLOR}">{}</text>"#,
            num(x),
            num(y),
            num(x + 16.0),
            num(y + 9.0),
            escape(label)
        );
    }
    chart.push(markup);
}

fn max_value(series: &[Series]) -> f64 {
    series
        .iter()
        .flat_map(|s| s.values.iter().copied().flatten())
        .fold(0.0, f64::max)
}

/// Round up to 1, 2 or 5 times a power of ten so grid labels stay readable.
fn nice_ceiling(value: f64) -> f64 {
    if !value.is_finite() || value <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powi(value.log10().floor() as i32);
    let scaled = value / magnitude;
    let nice = if scaled <= 1.0 {
        1.0
    } else if scaled <= 2.0 {
        2.0
    } else if scaled <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

fn polar(cx: f64, cy: f64, radius: f64, angle: f64) -> (f64, f64) {
    (cx + radius * angle.cos(), cy + radius * angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SliceKind;

    fn categories() -> Vec<String> {
        vec!["35mbps".into(), "1mbps".into()]
    }

    fn ms_label(value: f64) -> String {
        format!("{value:.0}ms")
    }

    #[test]
    fn bar_chart_skips_missing_values() {
        let series = [
            Series::new("Average", PALETTE[0], vec![Some(3100.0), None]),
            Series::new("P90", PALETTE[1], vec![Some(5000.0), Some(7000.0)]),
        ];
        let svg = bar_chart(&categories(), &series, 480.0, 280.0, ms_label).to_svg();
        assert_eq!(svg.matches(r#"class="bar""#).count(), 3);
        assert!(svg.starts_with("<svg xmlns="));
        assert!(svg.contains(">35mbps</text>"));
        assert!(svg.contains(">Average</text>"));
    }

    #[test]
    fn area_chart_draws_one_polygon_per_series() {
        let series = [
            Series::new("Max", "#ef4444", vec![Some(22000.0), Some(30000.0)]),
            Series::new("Min", "#10b981", vec![None, None]),
        ];
        let svg = area_chart(&categories(), &series, 480.0, 280.0, ms_label).to_svg();
        assert_eq!(svg.matches(r#"class="area""#).count(), 1);
    }

    #[test]
    fn pie_chart_has_a_slice_per_nonzero_value() {
        let slices = [
            PieSlice {
                label: "35mbps - Pass".into(),
                value: 135,
                kind: SliceKind::Pass,
            },
            PieSlice {
                label: "35mbps - Fail".into(),
                value: 15,
                kind: SliceKind::Fail,
            },
        ];
        let svg = pie_chart(&slices, 320.0, 280.0).to_svg();
        assert_eq!(svg.matches(r#"class="slice""#).count(), 2);
        assert!(svg.contains("#10b981"));
        assert!(svg.contains("#ef4444"));
        assert!(svg.contains("35mbps - Pass (135)"));
    }

    #[test]
    fn pie_chart_without_data_says_so() {
        let slices = [PieSlice {
            label: "Passed".into(),
            value: 0,
            kind: SliceKind::Pass,
        }];
        let svg = pie_chart(&slices, 320.0, 280.0).to_svg();
        assert!(svg.contains("No data"));
        assert!(!svg.contains(r#"class="slice""#));
    }

    #[test]
    fn radial_bars_draw_rings_for_known_rates() {
        let series = [
            Series::new("Status", PALETTE[0], vec![Some(100.0), Some(40.0)]),
            Series::new("Response", PALETTE[1], vec![None, Some(0.0)]),
        ];
        let svg = radial_bars(&categories(), &series, 320.0, 320.0).to_svg();
        assert_eq!(svg.matches(r#"class="ring""#).count(), 2);
        assert!(svg.contains("1mbps · Status: 40%"));
    }

    #[test]
    fn text_is_escaped() {
        assert_eq!(escape(r#"a<b & "c"'"#), "a&lt;b &amp; &quot;c&quot;&apos;");
        let svg = bar_chart(&["<x>".into()], &[], 200.0, 200.0, ms_label).to_svg();
        assert!(svg.contains("&lt;x&gt;"));
    }

    #[test]
    fn numbers_are_compact() {
        assert_eq!(num(12.0), "12");
        assert_eq!(num(12.346), "12.35");
        assert_eq!(num(0.5), "0.5");
        assert_eq!(nice_ceiling(7300.0), 10000.0);
        assert_eq!(nice_ceiling(0.0), 1.0);
    }
}
