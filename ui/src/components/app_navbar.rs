use dioxus::prelude::*;
use tracing::{debug, warn};

use crate::core::platform;
use crate::i18n;
use crate::shell::{LanguageCtx, ThemeCtx, NAVBAR_CYCLE};
use crate::t;

/// Top bar: brand, theme cycle and the language picker.
///
/// Rendered outside the language-keyed body, so it reads [`LanguageCtx`] to
/// pick up a new language on the next render.
#[component]
pub fn AppNavbar() -> Element {
    let ThemeCtx(mut theme) = use_context::<ThemeCtx>();
    let LanguageCtx(mut language) = use_context::<LanguageCtx>();
    let langs = use_hook(i18n::available_languages);
    let show_switcher = langs.len() > 1;

    let on_change = move |evt: FormEvent| {
        let tag = evt.value();
        match i18n::set_language(&tag) {
            Ok(()) => {
                debug!(%tag, "language switched");
                language.set(tag);
            }
            Err(err) => warn!(%tag, error = %err, "language switch failed"),
        }
    };

    let current_lang = language();
    let mode = theme();
    let next = NAVBAR_CYCLE.next(mode);
    let mode_glyph = mode.glyph();
    let theme_title = t!("theme-switch", mode = mode.label(), next = next.label());
    let prefers_dark = platform::prefers_dark_scheme();
    let tagline = t!("tagline");

    rsx! {
        header { id: "navbar", class: "navbar",
            div { class: "navbar__inner",
                div { class: "navbar__brand",
                    span { class: "navbar__brand-link",
                        span { class: "navbar__brand-spark", aria_hidden: "true" }
                        span { class: "navbar__brand-mark", "Loadscope" }
                    }
                    span { class: "navbar__brand-subtitle", "{tagline}" }
                }

                div { class: "navbar__controls",
                    button {
                        r#type: "button",
                        class: "button button--icon navbar__theme",
                        title: "{theme_title}",
                        aria_label: "{theme_title}",
                        onclick: move |_| {
                            let next = NAVBAR_CYCLE.next(theme());
                            debug!(?next, dark = next.is_dark(prefers_dark), "theme changed");
                            theme.set(next);
                        },
                        "{mode_glyph}"
                    }

                    if show_switcher {
                        div { class: "navbar__locale",
                            label {
                                class: "visually-hidden",
                                r#for: "locale-select",
                                {t!("nav-language-label")}
                            }
                            select {
                                id: "locale-select",
                                value: "{current_lang}",
                                oninput: on_change,
                                for code in langs.iter().cloned() {
                                    option { key: "{code}", value: "{code}", selected: code == current_lang, "{code}" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
