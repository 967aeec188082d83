use dioxus::prelude::*;

use crate::charts::dashboard;
use crate::core::format;
use crate::data::{to_chart_point, to_pie_slices, use_results, ChartPoint, PieSlice};
use crate::t;

use super::require_data;

#[component]
pub fn ChartsView() -> Element {
    let results = use_results();
    let set = match require_data(&results.state()) {
        Ok(set) => set,
        Err(status) => return status,
    };

    let points: Vec<ChartPoint> = set
        .iter()
        .flat_map(|site| site.tests.iter().map(to_chart_point))
        .collect();
    let slices: Vec<PieSlice> = set
        .iter()
        .flat_map(|site| site.tests.iter().flat_map(to_pie_slices))
        .collect();

    let panels = [
        (t!("charts-durations"), dashboard::duration_bars(&points).to_svg()),
        (t!("charts-pass-fail"), dashboard::pass_fail_pie(&slices).to_svg()),
        (t!("charts-pass-rates"), dashboard::pass_rate_rings(&points).to_svg()),
        (t!("charts-trend"), dashboard::duration_trend(&points).to_svg()),
    ];

    let tiles: Vec<(usize, String, String, String, String)> = points
        .iter()
        .enumerate()
        .map(|(idx, point)| {
            (
                idx,
                point.network.clone(),
                format::format_seconds(point.avg_ms),
                format::format_percent(point.status_pass_rate.map(f64::from)),
                format::format_count(point.total_requests),
            )
        })
        .collect();

    rsx! {
        section { class: "page page-charts",
            h1 { class: "page__title", {t!("charts-title")} }

            div { class: "stat-grid",
                for (idx, network, avg, rate, total) in tiles {
                    div { key: "{idx}", class: "stat-tile stat-tile--info",
                        span { class: "stat-tile__label", "{network}" }
                        strong { class: "stat-tile__value", "{avg}" }
                        span { class: "stat-tile__meta", {t!("charts-tile-meta", rate = rate, total = total)} }
                    }
                }
            }

            div { class: "chart-grid",
                for (title, svg) in panels {
                    div { key: "{title}", class: "chart-panel",
                        h2 { class: "chart-panel__title", "{title}" }
                        div { class: "chart-panel__canvas", dangerous_inner_html: "{svg}" }
                    }
                }
            }

            div { class: "page__actions",
                button {
                    r#type: "button",
                    class: "button button--primary",
                    onclick: move |_| results.refresh(),
                    {t!("action-refresh-data")}
                }
            }
        }
    }
}
