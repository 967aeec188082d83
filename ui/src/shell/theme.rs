//! Light/dark theme selection.

use crate::t;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    Dark,
    /// Follow the platform's `prefers-color-scheme`.
    System,
}

impl ThemeMode {
    /// Starting mode on first mount.
    pub fn initial(prefers_dark: bool) -> Self {
        if prefers_dark {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        }
    }

    pub fn is_dark(self, prefers_dark: bool) -> bool {
        match self {
            ThemeMode::Light => false,
            ThemeMode::Dark => true,
            ThemeMode::System => prefers_dark,
        }
    }

    pub fn label(self) -> String {
        match self {
            ThemeMode::Light => t!("theme-light"),
            ThemeMode::Dark => t!("theme-dark"),
            ThemeMode::System => t!("theme-system"),
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            ThemeMode::Light => "☀",
            ThemeMode::Dark => "☾",
            ThemeMode::System => "◐",
        }
    }
}

/// Ordered list of modes a control steps through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeCycle {
    modes: &'static [ThemeMode],
}

/// The navbar button offers all three modes.
pub const NAVBAR_CYCLE: ThemeCycle = ThemeCycle {
    modes: &[ThemeMode::Light, ThemeMode::Dark, ThemeMode::System],
};

/// The sidebar entry is a plain toggle.
pub const SIDEBAR_CYCLE: ThemeCycle = ThemeCycle {
    modes: &[ThemeMode::Light, ThemeMode::Dark],
};

impl ThemeCycle {
    /// The mode after `current`, wrapping at the end. A mode the cycle does not
    /// contain restarts it.
    pub fn next(&self, current: ThemeMode) -> ThemeMode {
        match self.modes.iter().position(|mode| *mode == current) {
            Some(idx) => self.modes[(idx + 1) % self.modes.len()],
            None => self.modes[0],
        }
    }
}
