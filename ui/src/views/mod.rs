mod cards;
pub use cards::CardsView;

mod charts;
pub use charts::ChartsView;

mod home;
pub use home::HomeView;

mod status;
pub use status::{require_data, FetchStatus};

mod table;
pub use table::{DetailPanel, TableView};

use dioxus::prelude::*;

/// The four layouts of the same dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Home,
    Table,
    Cards,
    Charts,
}

impl View {
    pub const ALL: [View; 4] = [View::Home, View::Table, View::Cards, View::Charts];

    /// English title, used in the exported report.
    pub fn title(self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Table => "Table View",
            View::Cards => "Card View",
            View::Charts => "Chart View",
        }
    }
}

#[component]
pub fn ActiveView(view: View) -> Element {
    match view {
        View::Home => rsx! { HomeView {} },
        View::Table => rsx! { TableView {} },
        View::Cards => rsx! { CardsView {} },
        View::Charts => rsx! { ChartsView {} },
    }
}
