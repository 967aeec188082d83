use dioxus::prelude::*;

use ui::shell::Dashboard;

// Shared theme, inlined so web and desktop render from the same file.
const MAIN_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

fn main() {
    #[cfg(target_arch = "wasm32")]
    tracing_wasm::set_as_global_default();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting Loadscope (web)");
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    ui::i18n::init();

    rsx! {
        document::Title { "Loadscope" }
        document::Style { "{MAIN_CSS_INLINE}" }

        Dashboard {}
    }
}
