//! Slide-out filter panel.
//!
//! Edits happen on a draft; nothing reaches the table until Apply.

use std::collections::BTreeSet;

use dioxus::prelude::*;
use tracing::debug;

use crate::data::{AssertionBucket, TestBucket, TimeRange, NETWORK_OPTIONS};
use crate::t;

use super::CriteriaCtx;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Section {
    Search,
    Network,
    Assertion,
    TestStatus,
    AvgTime,
}

#[component]
pub fn FilterPanel(on_close: EventHandler<()>) -> Element {
    let CriteriaCtx(mut committed) = use_context::<CriteriaCtx>();
    let mut draft = use_signal(|| committed.read().clone());
    let mut collapsed = use_signal(BTreeSet::<Section>::new);

    let mut toggle_section = move |section: Section| {
        let mut collapsed = collapsed.write();
        if !collapsed.remove(&section) {
            collapsed.insert(section);
        }
    };
    let is_open = move |section: Section| !collapsed.read().contains(&section);

    let current = draft.read().clone();
    let max_seconds = current.avg_time_range.max;
    let max_label = format!("{max_seconds:.1}s");
    let slider_max = TimeRange::SLIDER_MAX;

    rsx! {
        aside { class: "filter-panel", role: "dialog", aria_label: t!("filter-title"),
            header { class: "filter-panel__header",
                h2 { class: "filter-panel__title", {t!("filter-title")} }
                button {
                    r#type: "button",
                    class: "button button--icon",
                    title: t!("action-close"),
                    onclick: move |_| on_close.call(()),
                    "✕"
                }
            }

            FilterSection {
                title: t!("filter-search"),
                open: is_open(Section::Search),
                on_toggle: move |_| toggle_section(Section::Search),
                input {
                    r#type: "search",
                    class: "filter-panel__search",
                    placeholder: t!("filter-search-placeholder"),
                    value: "{current.search_query}",
                    oninput: move |evt: FormEvent| draft.write().search_query = evt.value(),
                }
            }

            FilterSection {
                title: t!("filter-network"),
                open: is_open(Section::Network),
                on_toggle: move |_| toggle_section(Section::Network),
                for network in NETWORK_OPTIONS {
                    label { key: "{network}", class: "filter-panel__check",
                        input {
                            r#type: "checkbox",
                            checked: current.network_types.contains(network),
                            onchange: move |_| draft.write().toggle_network(network),
                        }
                        span { "{network}" }
                    }
                }
            }

            FilterSection {
                title: t!("filter-assertion"),
                open: is_open(Section::Assertion),
                on_toggle: move |_| toggle_section(Section::Assertion),
                div { class: "chip-row",
                    for bucket in AssertionBucket::ALL {
                        {chip(bucket.label(), current.assertion_statuses.contains(&bucket), move || draft.write().toggle_assertion(bucket))}
                    }
                }
            }

            FilterSection {
                title: t!("filter-test-status"),
                open: is_open(Section::TestStatus),
                on_toggle: move |_| toggle_section(Section::TestStatus),
                div { class: "chip-row",
                    for bucket in TestBucket::ALL {
                        {chip(bucket.label(), current.test_statuses.contains(&bucket), move || draft.write().toggle_test_status(bucket))}
                    }
                }
            }

            FilterSection {
                title: t!("filter-avg-time"),
                open: is_open(Section::AvgTime),
                on_toggle: move |_| toggle_section(Section::AvgTime),
                div { class: "filter-panel__range",
                    input {
                        r#type: "range",
                        min: "0",
                        max: "{slider_max}",
                        step: "0.5",
                        value: "{max_seconds}",
                        oninput: move |evt: FormEvent| {
                            if let Ok(max) = evt.value().parse::<f64>() {
                                draft.write().avg_time_range.max = max.clamp(0.0, TimeRange::SLIDER_MAX);
                            }
                        },
                    }
                    span { class: "filter-panel__range-value", "0s – {max_label}" }
                }
            }

            footer { class: "filter-panel__footer",
                button {
                    r#type: "button",
                    class: "button button--ghost",
                    onclick: move |_| {
                        draft.write().reset();
                        committed.write().reset();
                        debug!("filters reset");
                    },
                    {t!("filter-reset")}
                }
                button {
                    r#type: "button",
                    class: "button button--primary",
                    onclick: move |_| {
                        let next = draft.read().clone();
                        debug!(active = next.is_active(), "filters applied");
                        committed.set(next);
                        on_close.call(());
                    },
                    {t!("filter-apply")}
                }
            }
        }
    }
}

#[component]
fn FilterSection(title: String, open: bool, on_toggle: EventHandler<()>, children: Element) -> Element {
    let glyph = if open { "▾" } else { "▸" };

    rsx! {
        section { class: "filter-panel__section",
            button {
                r#type: "button",
                class: "filter-panel__section-toggle",
                aria_expanded: "{open}",
                onclick: move |_| on_toggle.call(()),
                span { "{title}" }
                span { aria_hidden: "true", "{glyph}" }
            }
            if open {
                div { class: "filter-panel__section-body", {children} }
            }
        }
    }
}

fn chip(label: &'static str, selected: bool, mut on_toggle: impl FnMut() + 'static) -> Element {
    let class = if selected { "chip chip--selected" } else { "chip" };

    rsx! {
        button {
            key: "{label}",
            r#type: "button",
            class: "{class}",
            aria_pressed: "{selected}",
            onclick: move |_| on_toggle(),
            "{label}"
        }
    }
}
