//! The few browser/OS calls the shell needs.

/// Whether the user agent / OS asks for a dark color scheme.
#[cfg(target_arch = "wasm32")]
pub fn prefers_dark_scheme() -> bool {
    web_sys::window()
        .and_then(|window| window.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .map(|query| query.matches())
        .unwrap_or(false)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn prefers_dark_scheme() -> bool {
    false
}

/// Blocking, user-visible notice. Only the browser has one; desktop relies on
/// the in-app banner.
#[cfg(target_arch = "wasm32")]
pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        window.alert_with_message(message).ok();
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn alert(message: &str) {
    tracing::warn!(%message, "alert requested on a platform without dialogs");
}

#[cfg(not(target_arch = "wasm32"))]
pub fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "Loadscope", "Loadscope")
}
