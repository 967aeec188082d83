//! Sidebar navigation.
//!
//! Every entry carries an explicit [`NavigationAction`]. Only view entries
//! change (and persist) the active selection; the rest fire their effect and
//! leave the current view alone.

use dioxus::prelude::*;
use tracing::{debug, warn};

use crate::core::storage::KeyValueStore;
use crate::t;
use crate::views::View;

/// Storage key for the last selected view entry.
pub const ACTIVE_VIEW_KEY: &str = "sidebarActiveIndex";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationAction {
    ViewSelect(View),
    ToggleTheme,
    ToggleFilter,
    Export,
    Refresh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SidebarItem {
    pub action: NavigationAction,
    pub glyph: &'static str,
}

impl SidebarItem {
    const fn new(action: NavigationAction, glyph: &'static str) -> Self {
        Self { action, glyph }
    }

    pub fn label(&self) -> String {
        match self.action {
            NavigationAction::ViewSelect(View::Home) => t!("nav-home"),
            NavigationAction::ViewSelect(View::Table) => t!("nav-table"),
            NavigationAction::ViewSelect(View::Cards) => t!("nav-cards"),
            NavigationAction::ViewSelect(View::Charts) => t!("nav-charts"),
            NavigationAction::Export => t!("nav-export"),
            NavigationAction::ToggleFilter => t!("nav-filter"),
            NavigationAction::ToggleTheme => t!("nav-theme"),
            NavigationAction::Refresh => t!("nav-refresh"),
        }
    }
}

pub const SIDEBAR_ITEMS: [SidebarItem; 8] = [
    SidebarItem::new(NavigationAction::ViewSelect(View::Home), "⌂"),
    SidebarItem::new(NavigationAction::ViewSelect(View::Table), "▤"),
    SidebarItem::new(NavigationAction::ViewSelect(View::Cards), "▦"),
    SidebarItem::new(NavigationAction::ViewSelect(View::Charts), "▥"),
    SidebarItem::new(NavigationAction::Export, "⤓"),
    SidebarItem::new(NavigationAction::ToggleFilter, "⚲"),
    SidebarItem::new(NavigationAction::ToggleTheme, "◐"),
    SidebarItem::new(NavigationAction::Refresh, "↻"),
];

/// Index into [`SIDEBAR_ITEMS`] of the entry whose view is on screen. Always
/// points at a `ViewSelect` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActiveViewSelection {
    index: usize,
}

impl ActiveViewSelection {
    pub fn from_index(index: usize) -> Option<Self> {
        match SIDEBAR_ITEMS.get(index)?.action {
            NavigationAction::ViewSelect(_) => Some(Self { index }),
            _ => None,
        }
    }

    /// Last persisted selection. Missing, garbage or out-of-range values
    /// fall back to the first entry.
    pub fn restore(store: &dyn KeyValueStore) -> Self {
        let raw = match store.get(ACTIVE_VIEW_KEY) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(error = %err, "could not read the saved view");
                None
            }
        };

        raw.and_then(|value| value.trim().parse::<usize>().ok())
            .and_then(Self::from_index)
            .unwrap_or_default()
    }

    pub fn persist(self, store: &dyn KeyValueStore) {
        if let Err(err) = store.set(ACTIVE_VIEW_KEY, &self.index.to_string()) {
            warn!(error = %err, index = self.index, "could not save the selected view");
        }
    }

    pub fn index(self) -> usize {
        self.index
    }

    pub fn view(self) -> View {
        match SIDEBAR_ITEMS[self.index].action {
            NavigationAction::ViewSelect(view) => view,
            _ => View::Home,
        }
    }
}

/// Resolve a click on entry `index`. View entries are persisted before the
/// action is returned for the shell to apply.
pub fn handle_click(index: usize, store: &dyn KeyValueStore) -> Option<NavigationAction> {
    let item = SIDEBAR_ITEMS.get(index)?;
    if let Some(selection) = ActiveViewSelection::from_index(index) {
        selection.persist(store);
    }
    debug!(index, action = ?item.action, "sidebar click");
    Some(item.action)
}

#[component]
pub fn Sidebar(active: usize, exporting: bool, on_click: EventHandler<usize>) -> Element {
    rsx! {
        nav { class: "sidebar", aria_label: "Dashboard",
            ul { class: "sidebar__list",
                for (index, item) in SIDEBAR_ITEMS.iter().enumerate() {
                    {sidebar_entry(index, item, index == active, exporting, on_click)}
                }
            }
        }
    }
}

fn sidebar_entry(
    index: usize,
    item: &SidebarItem,
    is_active: bool,
    exporting: bool,
    on_click: EventHandler<usize>,
) -> Element {
    let busy = exporting && item.action == NavigationAction::Export;
    let class = match (is_active, busy) {
        (true, _) => "sidebar__item sidebar__item--active",
        (false, true) => "sidebar__item sidebar__item--busy",
        (false, false) => "sidebar__item",
    };
    let label = if busy { t!("export-working") } else { item.label() };
    let glyph = item.glyph;

    rsx! {
        li { key: "{index}",
            button {
                r#type: "button",
                class: "{class}",
                title: "{label}",
                disabled: busy,
                aria_current: if is_active { "page" } else { "false" },
                onclick: move |_| on_click.call(index),
                if busy {
                    span { class: "sidebar__spinner", aria_hidden: "true" }
                } else {
                    span { class: "sidebar__glyph", aria_hidden: "true", "{glyph}" }
                }
                span { class: "sidebar__label", "{label}" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::MemoryStore;

    fn index_of(action: NavigationAction) -> usize {
        SIDEBAR_ITEMS
            .iter()
            .position(|item| item.action == action)
            .unwrap()
    }

    #[test]
    fn view_click_persists_index() {
        let store = MemoryStore::new();
        let charts = index_of(NavigationAction::ViewSelect(View::Charts));
        assert_eq!(
            handle_click(charts, &store),
            Some(NavigationAction::ViewSelect(View::Charts))
        );
        assert_eq!(store.get(ACTIVE_VIEW_KEY).unwrap(), Some(charts.to_string()));

        let restored = ActiveViewSelection::restore(&store);
        assert_eq!(restored.index(), charts);
        assert_eq!(restored.view(), View::Charts);
    }

    #[test]
    fn action_clicks_do_not_persist() {
        let store = MemoryStore::new();
        for action in [
            NavigationAction::Export,
            NavigationAction::ToggleFilter,
            NavigationAction::ToggleTheme,
            NavigationAction::Refresh,
        ] {
            assert_eq!(handle_click(index_of(action), &store), Some(action));
        }
        assert_eq!(store.get(ACTIVE_VIEW_KEY).unwrap(), None);
    }

    #[test]
    fn out_of_range_click_is_ignored() {
        let store = MemoryStore::new();
        assert_eq!(handle_click(SIDEBAR_ITEMS.len(), &store), None);
    }

    #[test]
    fn bad_stored_values_restore_first_entry() {
        let store = MemoryStore::new();
        assert_eq!(ActiveViewSelection::restore(&store).view(), View::Home);

        for raw in ["99", "banana", "-1", ""] {
            store.set(ACTIVE_VIEW_KEY, raw).unwrap();
            assert_eq!(ActiveViewSelection::restore(&store).index(), 0, "{raw:?}");
        }

        // Action entries are never a valid selection.
        let export = index_of(NavigationAction::Export);
        store.set(ACTIVE_VIEW_KEY, &export.to_string()).unwrap();
        assert_eq!(ActiveViewSelection::restore(&store).index(), 0);
    }

    #[test]
    fn every_view_has_an_entry() {
        for view in View::ALL {
            let index = index_of(NavigationAction::ViewSelect(view));
            assert_eq!(ActiveViewSelection::from_index(index).map(|s| s.view()), Some(view));
        }
    }
}
