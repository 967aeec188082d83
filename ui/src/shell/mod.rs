//! Application shell: navbar, sidebar, filter panel and the active view.
//!
//! The shell owns every piece of cross-view state and hands it down through
//! context: the fetch provider, the committed filter criteria, the theme and
//! the configuration.

pub mod filter_panel;
pub mod sidebar;
pub mod theme;

use std::rc::Rc;

use dioxus::prelude::*;
use tracing::{info, warn};

use crate::components::AppNavbar;
use crate::core::config::DashboardConfig;
use crate::core::platform;
use crate::core::storage::{default_store, KeyValueStore};
use crate::data::{use_results_provider, FilterCriteria, ResultsContext};
use crate::export::{export_report, ExportStatus};
use crate::i18n;
use crate::t;
use crate::views::ActiveView;

pub use filter_panel::FilterPanel;
pub use sidebar::{handle_click, ActiveViewSelection, NavigationAction, Sidebar, ACTIVE_VIEW_KEY, SIDEBAR_ITEMS};
pub use theme::{ThemeCycle, ThemeMode, NAVBAR_CYCLE, SIDEBAR_CYCLE};

/// Committed table filters.
#[derive(Clone, Copy)]
pub struct CriteriaCtx(pub Signal<FilterCriteria>);

#[derive(Clone, Copy)]
pub struct ThemeCtx(pub Signal<ThemeMode>);

/// Current UI language tag. Components that render translated text outside
/// the keyed view tree read it to re-render on change.
#[derive(Clone, Copy)]
pub struct LanguageCtx(pub Signal<String>);

#[derive(Clone)]
struct StoreHandle(Rc<dyn KeyValueStore>);

#[component]
pub fn Dashboard() -> Element {
    i18n::init();

    let config = use_context_provider(DashboardConfig::load);
    let client = use_hook(|| config.client());
    let results = use_results_provider(client);

    let criteria = use_signal(FilterCriteria::default);
    use_context_provider(|| CriteriaCtx(criteria));

    let prefers_dark = platform::prefers_dark_scheme();
    let mut theme = use_signal(|| ThemeMode::initial(prefers_dark));
    use_context_provider(|| ThemeCtx(theme));

    let language = use_signal(i18n::current_language);
    use_context_provider(|| LanguageCtx(language));

    let store = use_hook(|| StoreHandle(default_store()));
    let mut selection = use_signal({
        let store = store.clone();
        move || ActiveViewSelection::restore(&*store.0)
    });
    let mut filter_open = use_signal(|| false);
    let mut export_status = use_signal(|| ExportStatus::Idle);

    let run_export = move || {
        if export_status.read().is_busy() {
            return;
        }
        let view = selection.read().view();
        let data = results.state().data();
        let committed = criteria.read().clone();
        export_status.set(ExportStatus::Working);

        spawn(async move {
            match export_report(view, data.as_deref(), &committed).await {
                Ok(Some(path)) => {
                    info!(%path, "report saved");
                    export_status.set(ExportStatus::Done(t!("export-saved", path = path)));
                }
                Ok(None) => export_status.set(ExportStatus::Done(t!("export-downloaded"))),
                Err(err) => {
                    warn!(error = %err, "report export failed");
                    let message = t!("export-failed", reason = err.to_string());
                    platform::alert(&message);
                    export_status.set(ExportStatus::Error(message));
                }
            }
        });
    };

    let on_sidebar = {
        let store = store.clone();
        let mut run_export = run_export;
        move |index: usize| {
            let Some(action) = handle_click(index, &*store.0) else {
                return;
            };
            dispatch(action, index, results, &mut selection, &mut theme, &mut filter_open, &mut run_export);
        }
    };

    let dark = theme().is_dark(prefers_dark);
    let app_class = if dark { "app app--dark" } else { "app" };
    let active = selection();
    let exporting = export_status.read().is_busy();
    let banner = export_status.read().clone();
    let lang = language();

    rsx! {
        div { class: "{app_class}",
            AppNavbar {}

            div { key: "{lang}", class: "app__body",
                Sidebar {
                    active: active.index(),
                    exporting,
                    on_click: on_sidebar,
                }

                main { id: "report-root", class: "app__main",
                    ExportBanner {
                        status: banner,
                        on_dismiss: move |_| export_status.set(ExportStatus::Idle),
                    }
                    ActiveView { view: active.view() }
                }

                if filter_open() {
                    FilterPanel { on_close: move |_| filter_open.set(false) }
                }
            }
        }
    }
}

fn dispatch(
    action: NavigationAction,
    index: usize,
    results: ResultsContext,
    selection: &mut Signal<ActiveViewSelection>,
    theme: &mut Signal<ThemeMode>,
    filter_open: &mut Signal<bool>,
    run_export: &mut impl FnMut(),
) {
    match action {
        NavigationAction::ViewSelect(_) => {
            if let Some(next) = ActiveViewSelection::from_index(index) {
                selection.set(next);
            }
        }
        NavigationAction::ToggleTheme => {
            let next = SIDEBAR_CYCLE.next(*theme.read());
            theme.set(next);
        }
        NavigationAction::ToggleFilter => {
            let open = *filter_open.read();
            filter_open.set(!open);
        }
        NavigationAction::Export => run_export(),
        NavigationAction::Refresh => results.refresh(),
    }
}

#[component]
fn ExportBanner(status: ExportStatus, on_dismiss: EventHandler<()>) -> Element {
    let (class, message) = match status {
        ExportStatus::Idle => return rsx! {},
        ExportStatus::Working => ("export-banner export-banner--working", t!("export-working")),
        ExportStatus::Done(message) => ("export-banner export-banner--done", message),
        ExportStatus::Error(message) => ("export-banner export-banner--error", message),
    };

    rsx! {
        div { class: "{class}", role: "status",
            span { class: "export-banner__message", "{message}" }
            button {
                r#type: "button",
                class: "button button--icon",
                title: t!("action-close"),
                onclick: move |_| on_dismiss.call(()),
                "✕"
            }
        }
    }
}
