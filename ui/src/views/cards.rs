use dioxus::prelude::*;

use api::{DurationField, OutcomeStats, TestResult};

use crate::core::format;
use crate::data::{classify_overall, row_key, use_results};
use crate::t;

use super::require_data;

#[component]
pub fn CardsView() -> Element {
    let results = use_results();
    let set = match require_data(&results.state()) {
        Ok(set) => set,
        Err(status) => return status,
    };

    rsx! {
        section { class: "page page-cards",
            h1 { class: "page__title", {t!("cards-title")} }
            p { class: "page__subtitle", {t!("cards-subtitle")} }

            for (site_index, site) in set.iter().enumerate() {
                section { key: "{site_index}", class: "site-group",
                    h2 { class: "site-group__title", "{site.name}" }
                    div { class: "card-grid",
                        for (test_index, test) in site.tests.iter().enumerate() {
                            {test_card(row_key(site_index, test_index), test)}
                        }
                    }
                }
            }
        }
    }
}

fn test_card(key: String, test: &TestResult) -> Element {
    let metrics = &test.metrics;
    let passed = classify_overall(test).is_pass();
    let (badge_class, badge_label) = if passed {
        ("badge badge--pass", t!("cards-all-passed"))
    } else {
        ("badge badge--fail", t!("cards-some-failed"))
    };
    let avg = metrics.duration.raw(DurationField::Avg).to_string();
    let durations: Vec<(&'static str, String)> = [
        DurationField::Min,
        DurationField::Med,
        DurationField::Max,
        DurationField::P90,
        DurationField::P95,
    ]
    .iter()
    .map(|field| (field.label(), metrics.duration.raw(*field).to_string()))
    .collect();

    rsx! {
        article { key: "{key}", class: "test-card",
            header { class: "test-card__header",
                h3 { class: "test-card__network", "{test.network}" }
                span { class: "{badge_class}", "{badge_label}" }
            }

            div { class: "test-card__durations",
                div { class: "test-card__block-title",
                    span { {t!("cards-duration-metrics")} }
                    span { class: "test-card__avg", "{avg}" }
                }
                dl { class: "test-card__grid",
                    for (label, value) in durations {
                        div { key: "{label}", class: "test-card__metric",
                            dt { "{label}" }
                            dd { "{value}" }
                        }
                    }
                }
            }

            div { class: "test-card__outcomes",
                {outcome_block(t!("detail-status"), &metrics.status)}
                {outcome_block(t!("detail-response-time"), &metrics.response_time)}
            }
        }
    }
}

fn outcome_block(title: String, stats: &OutcomeStats) -> Element {
    let class = if stats.result.is_pass() {
        "outcome outcome--pass"
    } else {
        "outcome outcome--fail"
    };
    let result = stats.result.as_str().to_uppercase();
    let passed = format::format_count(stats.pass_count);
    let failed = format::format_count(stats.fail_count);

    rsx! {
        div { class: "{class}",
            div { class: "outcome__header",
                span { class: "outcome__title", "{title}" }
                span { class: "outcome__result", "{result}" }
            }
            dl { class: "outcome__stats",
                dt { {t!("detail-pass-rate")} }
                dd { "{stats.pass_rate}" }
                dt { {t!("detail-passed")} }
                dd { "{passed}" }
                dt { {t!("detail-failed")} }
                dd { "{failed}" }
            }
        }
    }
}
