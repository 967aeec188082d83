use dioxus::prelude::*;

use crate::charts::dashboard;
use crate::core::format;
use crate::data::{summarize, use_results};
use crate::t;

use super::require_data;

#[component]
pub fn HomeView() -> Element {
    let results = use_results();
    let set = match require_data(&results.state()) {
        Ok(set) => set,
        Err(status) => return status,
    };

    let summary = summarize(&set);
    let pie = dashboard::pass_fail_pie(&summary.pie_slices()).to_svg();
    let networks = dashboard::network_totals(&summary).to_svg();

    let tiles = [
        (t!("home-total-apis"), summary.site_count.to_string(), "stat-tile--info"),
        (t!("home-total-tests"), summary.test_count.to_string(), "stat-tile--info"),
        (t!("home-total-requests"), format::format_count(summary.total_requests()), "stat-tile--info"),
        (t!("home-avg-pass-rate"), format::format_percent(summary.avg_status_pass_rate), "stat-tile--pass"),
        (t!("home-assertion-pass-rate"), format::format_percent(summary.avg_response_pass_rate), "stat-tile--pass"),
        (t!("home-avg-time"), format::format_seconds(summary.avg_ms), "stat-tile--time"),
        (t!("home-max-time"), format::format_seconds(summary.avg_max_ms), "stat-tile--time"),
        (t!("home-min-time"), format::format_seconds(summary.avg_min_ms), "stat-tile--time"),
        (t!("home-median-time"), format::format_seconds(summary.avg_med_ms), "stat-tile--time"),
        (t!("home-passed"), format::format_count(summary.passed), "stat-tile--pass"),
        (t!("home-failed"), format::format_count(summary.failed), "stat-tile--fail"),
    ];

    rsx! {
        section { class: "page page-home",
            h1 { class: "page__title", {t!("home-title")} }

            div { class: "stat-grid",
                for (label, value, modifier) in tiles {
                    div { key: "{label}", class: "stat-tile {modifier}",
                        span { class: "stat-tile__label", "{label}" }
                        strong { class: "stat-tile__value", "{value}" }
                    }
                }
            }

            div { class: "chart-grid",
                div { class: "chart-panel",
                    h2 { class: "chart-panel__title", {t!("home-chart-overall")} }
                    div { class: "chart-panel__canvas", dangerous_inner_html: "{pie}" }
                }
                div { class: "chart-panel",
                    h2 { class: "chart-panel__title", {t!("home-chart-networks")} }
                    div { class: "chart-panel__canvas", dangerous_inner_html: "{networks}" }
                }
            }
        }
    }
}
