//! Platform-agnostic plumbing shared by the views: configuration, persisted
//! preferences, formatting and the thin platform shims.

pub mod config;
pub mod format;
pub mod platform;
pub mod storage;
