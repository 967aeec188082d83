//! Shared UI crate for Loadscope. Views, data pipeline, charts and export live
//! here; the `web` and `desktop` crates only launch [`shell::Dashboard`].

pub mod charts;
pub mod core;
pub mod data;
pub mod export;
pub mod i18n;
pub mod shell;
pub mod views;

pub mod components {
    pub mod app_navbar;
    pub use app_navbar::AppNavbar;
}
