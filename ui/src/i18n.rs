//! Localization for the dashboard.
//!
//! Built on `i18n-embed` with Fluent bundles embedded through `rust-embed`:
//! ```text
//! i18n.toml
//! i18n/
//!   en-US/loadscope-ui.ftl   (fallback)
//!   es-ES/loadscope-ui.ftl
//! ```
//!
//! Call [`init`] once before rendering, then look strings up with [`t!`]:
//! ```ignore
//! use crate::t;
//! let title = t!("home-title");
//! let saved = t!("export-saved", path = "/tmp/report.pdf");
//! ```
//!
//! `fl!` checks keys and arguments at compile time against the fallback
//! bundle, so a typo in a key fails the build instead of rendering the id.
use std::sync::Once;

use i18n_embed::fluent::FluentLanguageLoader;
use i18n_embed::LanguageLoader;
use once_cell::sync::Lazy;
use rust_embed::Embed;
use tracing::{info, warn};
use unic_langid::LanguageIdentifier;

pub use i18n_embed_fl::fl;

/// Message lookup routed through [`LOADER`]. Fluent arguments follow the
/// id as `name = value` pairs.
#[macro_export]
macro_rules! t {
    ($key:literal) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key)
    };
    ($key:literal, $( $arg:ident = $value:expr ),+ $(,)?) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key, $( $arg = $value ),+ )
    };
}

/// Fluent domain; the bundle file in every locale is `{DOMAIN}.ftl`.
const DOMAIN: &str = "loadscope-ui";

pub const FALLBACK_LANGUAGE: &str = "en-US";

#[derive(Embed)]
#[folder = "i18n"]
struct Localizations;

pub static LOADER: Lazy<FluentLanguageLoader> = Lazy::new(|| {
    let fallback: LanguageIdentifier = FALLBACK_LANGUAGE
        .parse()
        .unwrap_or_else(|_| LanguageIdentifier::default());
    FluentLanguageLoader::new(DOMAIN, fallback)
});

static INIT: Once = Once::new();

/// Load the bundles for the user's preferred languages. Idempotent.
pub fn init() {
    INIT.call_once(|| {
        let requested = requested_languages();
        match i18n_embed::select(&*LOADER, &Localizations, &requested) {
            Ok(selected) => info!(?selected, "localization ready"),
            Err(err) => warn!(error = %err, "language selection failed; using {FALLBACK_LANGUAGE}"),
        }
    });
}

/// Switch language at runtime. Unparsable tags are ignored.
pub fn set_language(tag: &str) -> Result<(), i18n_embed::I18nEmbedError> {
    let Ok(lang) = tag.parse::<LanguageIdentifier>() else {
        warn!(%tag, "ignoring unparsable language tag");
        return Ok(());
    };
    i18n_embed::select(&*LOADER, &Localizations, &[lang]).map(|_| ())
}

/// Tag of the language currently in use.
pub fn current_language() -> String {
    LOADER.current_language().to_string()
}

/// Embedded language tags, sorted.
pub fn available_languages() -> Vec<String> {
    let mut langs = Localizations::iter()
        .filter_map(|path| path.split('/').next().map(str::to_string))
        .collect::<Vec<_>>();
    langs.sort();
    langs.dedup();
    langs
}

#[cfg(target_arch = "wasm32")]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::WebLanguageRequester::requested_languages()
}

#[cfg(not(target_arch = "wasm32"))]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::DesktopLanguageRequester::requested_languages()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_locales_are_embedded() {
        let langs = available_languages();
        assert!(langs.iter().any(|l| l == "en-US"));
        assert!(langs.iter().any(|l| l == "es-ES"));
    }

    #[test]
    fn fallback_lookup_resolves() {
        // Pin the fallback so the host locale cannot leak into the assertion.
        set_language(FALLBACK_LANGUAGE).unwrap();
        assert_eq!(fl!(&*LOADER, "table-title"), "Table View");
    }

    #[test]
    fn unknown_language_keeps_the_current_bundle() {
        set_language(FALLBACK_LANGUAGE).unwrap();
        let before = fl!(&*LOADER, "nav-home");
        let _ = set_language("zz-ZZ");
        let after = fl!(&*LOADER, "nav-home");
        assert_eq!(before, after);
    }
}
