use dioxus::prelude::*;

use api::{DurationField, OutcomeStats, ResultSet};

use crate::core::config::DashboardConfig;
use crate::data::{
    apply_filters, classify_overall, flatten, paginate, use_results, FilterCriteria, FlattenedRow,
    TableState,
};
use crate::shell::CriteriaCtx;
use crate::t;

use super::require_data;

/// One rendered table row. Owned so event handlers can capture it.
#[derive(Debug, Clone, PartialEq)]
pub struct RowModel {
    pub row_key: String,
    pub serial: usize,
    pub site_name: String,
    pub network: String,
    pub durations: [String; 6],
    pub status: String,
    pub status_pass: bool,
    pub pass_rate: String,
    pub overall_pass: bool,
    pub response_time: OutcomeStats,
}

impl RowModel {
    fn from_row(row: &FlattenedRow<'_>, serial: usize) -> Self {
        let metrics = &row.test.metrics;
        Self {
            row_key: row.row_key.clone(),
            serial,
            site_name: row.site.name.clone(),
            network: row.test.network.clone(),
            durations: DurationField::ALL.map(|field| metrics.duration.raw(field).to_string()),
            status: metrics.status.result.to_string(),
            status_pass: metrics.status.result.is_pass(),
            pass_rate: metrics.status.pass_rate.clone(),
            overall_pass: classify_overall(row.test).is_pass(),
            response_time: metrics.response_time.clone(),
        }
    }

    /// `durations` follows `DurationField::ALL` order.
    fn duration(&self, field: DurationField) -> &str {
        &self.durations[field as usize]
    }
}

/// Everything the Table renders for one state of the inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct TableModel {
    pub rows: Vec<RowModel>,
    pub page_number: usize,
    pub total_pages: usize,
    pub showing: String,
    pub has_previous: bool,
    pub has_next: bool,
}

pub fn table_model(
    set: &ResultSet,
    criteria: &FilterCriteria,
    page_size: usize,
    page_number: usize,
) -> TableModel {
    let rows = flatten(set);
    let filtered = apply_filters(&rows, criteria);
    let page = paginate(&filtered, page_size, page_number);

    TableModel {
        rows: page
            .rows
            .iter()
            .enumerate()
            .map(|(offset, row)| RowModel::from_row(row, page.start_index + offset + 1))
            .collect(),
        page_number: page.page_number,
        total_pages: page.total_pages,
        showing: page.showing_label(),
        has_previous: page.has_previous(),
        has_next: page.has_next(),
    }
}

#[component]
pub fn TableView() -> Element {
    let results = use_results();
    let CriteriaCtx(criteria) = use_context::<CriteriaCtx>();
    let config = use_context::<DashboardConfig>();
    let mut table = use_signal(TableState::default);

    use_effect(move || {
        let current = criteria.read().clone();
        let generation = results.generation();
        if table.write().sync(&current, generation) {
            tracing::debug!(generation, "table page reset");
        }
    });

    let set = match require_data(&results.state()) {
        Ok(set) => set,
        Err(status) => return status,
    };

    let state = table();
    let model = table_model(&set, &criteria.read(), config.page_size, state.page);
    let total_pages = model.total_pages;
    let page_count = total_pages.max(1);

    let detail = state.selected.as_ref().and_then(|key| {
        flatten(&set)
            .into_iter()
            .find(|row| &row.row_key == key)
            .map(|row| RowModel::from_row(&row, 0))
    });

    let headers = [
        t!("table-sl-no"),
        t!("table-api-name"),
        t!("table-network"),
        t!("table-min"),
        t!("table-avg"),
        t!("table-med"),
        t!("table-max"),
        t!("table-status"),
        t!("table-passed"),
        t!("table-actions"),
    ];

    rsx! {
        section { class: "page page-table",
            h1 { class: "page__title", {t!("table-title")} }

            div { class: "data-table__wrap",
                table { class: "data-table",
                    thead {
                        tr {
                            for header in headers {
                                th { key: "{header}", "{header}" }
                            }
                        }
                    }
                    tbody {
                        if model.rows.is_empty() {
                            tr {
                                td { class: "data-table__empty", colspan: "10", {t!("table-no-matches")} }
                            }
                        }
                        for row in model.rows.iter().cloned() {
                            {render_row(row, state.expanded.clone(), table)}
                        }
                    }
                }
            }

            div { class: "data-table__footer",
                span { class: "data-table__showing", "{model.showing}" }
                div { class: "data-table__pager",
                    button {
                        r#type: "button",
                        class: "button button--ghost",
                        disabled: !model.has_previous,
                        onclick: move |_| table.write().previous_page(),
                        {t!("table-previous")}
                    }
                    span { class: "data-table__page", "{model.page_number} / {page_count}" }
                    button {
                        r#type: "button",
                        class: "button button--ghost",
                        disabled: !model.has_next,
                        onclick: move |_| table.write().next_page(total_pages),
                        {t!("table-next")}
                    }
                }
            }

            if let Some(row) = detail {
                DetailPanel {
                    row,
                    on_close: move |_| table.write().close_detail(),
                }
            }
        }
    }
}

fn render_row(row: RowModel, expanded: Option<String>, mut table: Signal<TableState>) -> Element {
    let is_expanded = expanded.as_deref() == Some(row.row_key.as_str());
    let toggle_key = row.row_key.clone();
    let select_key = row.row_key.clone();
    let status_class = if row.status_pass {
        "badge badge--pass"
    } else {
        "badge badge--fail"
    };
    let toggle_glyph = if is_expanded { "▾" } else { "▸" };
    let row_class = if is_expanded {
        "data-table__row data-table__row--expanded"
    } else {
        "data-table__row"
    };
    let [min, avg, med, max, p90, p95] = row.durations.clone();
    let response = row.response_time.clone();
    let response_total = response.total();

    rsx! {
        tr {
            key: "{row.row_key}",
            class: "{row_class}",
            td { "{row.serial}" }
            td { class: "data-table__name", "{row.site_name}" }
            td { "{row.network}" }
            td { "{min}" }
            td { "{avg}" }
            td { "{med}" }
            td { "{max}" }
            td { span { class: "{status_class}", "{row.status}" } }
            td { "{row.pass_rate}" }
            td { class: "data-table__actions",
                button {
                    r#type: "button",
                    class: "button button--icon",
                    aria_expanded: "{is_expanded}",
                    title: t!("table-toggle-details"),
                    onclick: move |_| table.write().toggle_expanded(&toggle_key),
                    "{toggle_glyph}"
                }
                button {
                    r#type: "button",
                    class: "button button--ghost",
                    onclick: move |_| table.write().select(&select_key),
                    {t!("table-view-more")}
                }
            }
        }
        if is_expanded {
            tr { key: "{row.row_key}-expanded", class: "data-table__expansion",
                td { colspan: "10",
                    dl { class: "data-table__extra",
                        dt { "P90" }
                        dd { "{p90}" }
                        dt { "P95" }
                        dd { "{p95}" }
                        dt { {t!("detail-response-time")} }
                        dd { "{response.result} · {response.pass_rate} · {response.pass_count}/{response_total}" }
                    }
                }
            }
        }
    }
}

/// Side panel scoped to one (site, test) pair.
#[component]
pub fn DetailPanel(row: RowModel, on_close: EventHandler<()>) -> Element {
    let overall = if row.overall_pass {
        t!("cards-all-passed")
    } else {
        t!("cards-some-failed")
    };
    let response = row.response_time.clone();
    let durations: Vec<(&'static str, String)> = DurationField::ALL
        .iter()
        .map(|field| (field.label(), row.duration(*field).to_string()))
        .collect();

    rsx! {
        aside { class: "detail-panel", role: "dialog", aria_label: "{row.site_name}",
            div { class: "detail-panel__header",
                div {
                    h2 { class: "detail-panel__title", "{row.site_name}" }
                    span { class: "detail-panel__meta", "{row.network} · {overall}" }
                }
                button {
                    r#type: "button",
                    class: "button button--icon",
                    title: t!("action-close"),
                    onclick: move |_| on_close.call(()),
                    "✕"
                }
            }

            h3 { class: "detail-panel__section", {t!("detail-durations")} }
            dl { class: "detail-panel__grid",
                for (label, value) in durations {
                    dt { key: "{label}-label", "{label}" }
                    dd { key: "{label}-value", "{value}" }
                }
            }

            h3 { class: "detail-panel__section", {t!("detail-status")} }
            dl { class: "detail-panel__grid",
                dt { {t!("detail-result")} }
                dd { "{row.status}" }
                dt { {t!("detail-pass-rate")} }
                dd { "{row.pass_rate}" }
            }

            h3 { class: "detail-panel__section", {t!("detail-response-time")} }
            dl { class: "detail-panel__grid",
                dt { {t!("detail-result")} }
                dd { "{response.result}" }
                dt { {t!("detail-pass-rate")} }
                dd { "{response.pass_rate}" }
                dt { {t!("detail-passed")} }
                dd { "{response.pass_count}" }
                dt { {t!("detail-failed")} }
                dd { "{response.fail_count}" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::transform::fixtures::{site, test};
    use api::Outcome;

    fn many(n: usize) -> ResultSet {
        vec![site(
            "Bulk",
            (0..n)
                .map(|idx| {
                    let network = if idx % 2 == 0 { "35mbps" } else { "1mbps" };
                    test(network, "2s", Outcome::Pass, Outcome::Pass)
                })
                .collect(),
        )]
    }

    #[test]
    fn model_numbers_rows_across_pages() {
        let set = many(25);
        let model = table_model(&set, &FilterCriteria::default(), 12, 3);
        assert_eq!(model.rows.len(), 1);
        assert_eq!(model.rows[0].serial, 25);
        assert_eq!(model.rows[0].row_key, "0-24");
        assert_eq!(model.showing, "Showing 25 to 25 of 25 entries");
        assert!(!model.has_next);
    }

    #[test]
    fn model_applies_filters_before_paging() {
        let set = many(25);
        let mut criteria = FilterCriteria::default();
        criteria.toggle_network("1mbps");
        let model = table_model(&set, &criteria, 12, 2);
        assert_eq!(model.total_pages, 1);
        assert_eq!(model.page_number, 1);
        assert_eq!(model.rows.len(), 12);
        assert_eq!(model.showing, "Showing 1 to 12 of 12 entries");
    }

    #[test]
    fn row_model_keeps_raw_durations() {
        let set = many(1);
        let model = table_model(&set, &FilterCriteria::default(), 12, 1);
        let row = &model.rows[0];
        assert_eq!(row.duration(DurationField::Min), "120ms");
        assert_eq!(row.duration(DurationField::P95), "6.5s");
        assert_eq!(row.pass_rate, "90%");
        assert_eq!(row.status, "pass");
    }
}
