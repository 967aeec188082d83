use std::rc::Rc;

use api::ResultSet;
use dioxus::prelude::*;

use crate::data::{use_results, FetchState};
use crate::t;

/// Loading, error and empty states shared by every view.
#[component]
pub fn FetchStatus(state: FetchState) -> Element {
    let results = use_results();

    match state {
        FetchState::Idle | FetchState::Loading => rsx! {
            div { class: "fetch-status fetch-status--loading", role: "status",
                span { class: "fetch-status__spinner", aria_hidden: "true" }
                p { {t!("status-loading")} }
            }
        },
        FetchState::Failed(message) => rsx! {
            div { class: "fetch-status fetch-status--error", role: "alert",
                p { class: "fetch-status__title", {t!("status-error-title")} }
                p { class: "fetch-status__message", "{message}" }
                button {
                    r#type: "button",
                    class: "button button--primary",
                    onclick: move |_| results.refresh(),
                    {t!("action-retry")}
                }
            }
        },
        FetchState::Loaded(_) => rsx! {
            div { class: "fetch-status fetch-status--empty",
                p { {t!("status-empty")} }
            }
        },
    }
}

/// The loaded, non-empty dataset, or the status element to render instead.
pub fn require_data(state: &FetchState) -> Result<Rc<ResultSet>, Element> {
    match state.data() {
        Some(set) if !set.is_empty() => Ok(set),
        _ => Err(rsx! { FetchStatus { state: state.clone() } }),
    }
}
