// src/theme.rs
use crate::diagnostics::Diagnostics;
use crate::store::KeyValueStore;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const THEME_STORAGE_KEY: &str = "mini-editor-theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Theme> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Class put on `<body>`; dark is the unclassed default.
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            Theme::Light => Some("light"),
            Theme::Dark => None,
        }
    }

    pub fn toggle_label(self) -> &'static str {
        match self {
            Theme::Light => "\u{1F31E}",
            Theme::Dark => "\u{1F319}",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeSlot {
    pub key: String,
}

impl Default for ThemeSlot {
    fn default() -> Self {
        ThemeSlot {
            key: THEME_STORAGE_KEY.to_string(),
        }
    }
}

impl ThemeSlot {
    pub fn new(key: impl Into<String>) -> Self {
        ThemeSlot { key: key.into() }
    }

    /// Stored preference, else the platform's ambient preference, else dark.
    /// The result is persisted.
    pub fn resolve(&self, store: &dyn KeyValueStore, prefers_light: Option<bool>, diagnostics: &Diagnostics) -> Theme {
        let theme = match store.get(&self.key) {
            Ok(stored) => stored
                .as_deref()
                .and_then(Theme::parse)
                .unwrap_or(if prefers_light.unwrap_or(false) { Theme::Light } else { Theme::Dark }),
            Err(e) => {
                warn!("[THEME] Reading stored theme failed: {}", e);
                Theme::Dark
            }
        };
        self.set(store, theme, diagnostics)
    }

    /// Persists `theme`; a store failure is reported and the theme still applies.
    pub fn set(&self, store: &dyn KeyValueStore, theme: Theme, diagnostics: &Diagnostics) -> Theme {
        diagnostics.guard("Unable to store theme", store.set(&self.key, theme.as_str()));
        theme
    }
}
