/// Theme preference
///
/// Resolved once at startup: the persisted value wins, then the OS
/// dark-mode preference, then light. Every toggle is saved immediately.

use std::fmt;
use std::str::FromStr;

use super::store::KeyValueStore;

/// Store key holding "dark" or "light"
pub const THEME_KEY: &str = "comparison-theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTheme(pub String);

impl FromStr for ThemeMode {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => Err(UnknownTheme(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PreferenceStore {
    theme: ThemeMode,
}

impl PreferenceStore {
    /// Resolve the startup theme. `system_prefers_dark` is only called
    /// when nothing usable is persisted.
    pub fn load(store: &dyn KeyValueStore, system_prefers_dark: impl FnOnce() -> bool) -> Self {
        let persisted = match store.get(THEME_KEY) {
            Ok(Some(value)) => match value.parse::<ThemeMode>() {
                Ok(theme) => Some(theme),
                Err(UnknownTheme(value)) => {
                    log::warn!("⚠️  Ignoring unknown saved theme '{}'", value);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                log::warn!("⚠️  Could not read saved theme: {}", e);
                None
            }
        };

        let theme = persisted.unwrap_or_else(|| {
            if system_prefers_dark() {
                ThemeMode::Dark
            } else {
                ThemeMode::Light
            }
        });

        log::debug!("Theme resolved to {}", theme);
        Self { theme }
    }

    pub fn theme(&self) -> ThemeMode {
        self.theme
    }

    /// Flip between dark and light and save the new value
    pub fn toggle_theme(&mut self, store: &mut dyn KeyValueStore) -> ThemeMode {
        self.theme = self.theme.toggled();
        if let Err(e) = store.set(THEME_KEY, self.theme.as_str()) {
            log::warn!("⚠️  Could not save theme: {}", e);
        }
        self.theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::store::fixtures::BrokenStore;
    use crate::state::store::MemoryStore;

    #[test]
    fn test_persisted_value_wins() {
        let mut store = MemoryStore::new();
        store.set(THEME_KEY, "light").unwrap();

        let prefs = PreferenceStore::load(&store, || panic!("system preference should not be read"));

        assert_eq!(prefs.theme(), ThemeMode::Light);
    }

    #[test]
    fn test_falls_back_to_system_then_light() {
        let store = MemoryStore::new();

        assert_eq!(PreferenceStore::load(&store, || true).theme(), ThemeMode::Dark);
        assert_eq!(PreferenceStore::load(&store, || false).theme(), ThemeMode::Light);
    }

    #[test]
    fn test_unknown_value_falls_back() {
        let mut store = MemoryStore::new();
        store.set(THEME_KEY, "solarized").unwrap();

        assert_eq!(PreferenceStore::load(&store, || true).theme(), ThemeMode::Dark);
    }

    #[test]
    fn test_read_failure_falls_back() {
        let store = BrokenStore;
        assert_eq!(PreferenceStore::load(&store, || false).theme(), ThemeMode::Light);
    }

    #[test]
    fn test_toggle_persists() {
        let mut store = MemoryStore::new();
        let mut prefs = PreferenceStore::load(&store, || false);

        assert_eq!(prefs.toggle_theme(&mut store), ThemeMode::Dark);
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));

        assert_eq!(prefs.toggle_theme(&mut store), ThemeMode::Light);
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("light"));

        let reloaded = PreferenceStore::load(&store, || true);
        assert_eq!(reloaded.theme(), ThemeMode::Light);
    }

    #[test]
    fn test_toggle_survives_write_failure() {
        let mut store = BrokenStore;
        let mut prefs = PreferenceStore::load(&store, || false);

        assert_eq!(prefs.toggle_theme(&mut store), ThemeMode::Dark);
        assert_eq!(prefs.theme(), ThemeMode::Dark);
    }
}
