use serde::Serialize;

use crate::storage::{
  KeyValueStore,
  THEME_KEY
};

#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
  #[default]
  Dark,
  Light
}

impl Theme {
  /// Stored value, falling back to dark for anything unrecognised.
  pub fn from_storage(
    raw: Option<&str>
  ) -> Self {
    match raw.map(str::trim) {
      | Some("light") => Self::Light,
      | _ => Self::Dark
    }
  }

  pub fn storage_value(
    self
  ) -> &'static str {
    match self {
      | Self::Dark => "dark",
      | Self::Light => "light"
    }
  }

  pub fn toggled(self) -> Self {
    match self {
      | Self::Dark => Self::Light,
      | Self::Light => Self::Dark
    }
  }

  /// Toggle button text names the theme a click switches to.
  pub fn toggle_label(
    self
  ) -> &'static str {
    match self {
      | Self::Dark => "نهار",
      | Self::Light => "ليل"
    }
  }

  pub fn chart_palette(
    self
  ) -> ChartPalette {
    match self {
      | Self::Dark => ChartPalette {
        text_color:       "#e8eaef",
        grid_color:       "rgba(255, 255, 255, 0.1)",
        accent_color:     "#1abc9c",
        accent_light:     "#2dd4bf",
        background_color: "rgba(30, 35, 48, 0.4)"
      },
      | Self::Light => ChartPalette {
        text_color:       "#2c3e50",
        grid_color:       "rgba(0, 0, 0, 0.08)",
        accent_color:     "#16a085",
        accent_light:     "#1abc9c",
        background_color: "rgba(255, 255, 255, 0.7)"
      }
    }
  }
}

/// Colours handed to the charting library for one theme.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
)]
#[serde(rename_all = "camelCase")]
pub struct ChartPalette {
  pub text_color:       &'static str,
  pub grid_color:       &'static str,
  pub accent_color:     &'static str,
  pub accent_light:     &'static str,
  pub background_color: &'static str
}

/// Persisted two-value theme flag.
#[derive(Debug, Clone)]
pub struct ThemeController {
  current: Theme
}

impl ThemeController {
  pub fn load(
    store: &impl KeyValueStore
  ) -> Self {
    let current = Theme::from_storage(
      store.get(THEME_KEY).as_deref()
    );
    tracing::debug!(
      theme = current.storage_value(),
      "loaded theme"
    );
    Self {
      current
    }
  }

  pub fn current(&self) -> Theme {
    self.current
  }

  pub fn set(
    &mut self,
    theme: Theme,
    store: &mut impl KeyValueStore
  ) {
    self.current = theme;
    store.set(
      THEME_KEY,
      theme.storage_value()
    );
    tracing::info!(
      theme = theme.storage_value(),
      "theme changed"
    );
  }

  pub fn toggle(
    &mut self,
    store: &mut impl KeyValueStore
  ) -> Theme {
    let next = self.current.toggled();
    self.set(next, store);
    next
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::storage::MemoryStore;

  #[test]
  fn absent_or_invalid_theme_is_dark() {
    assert_eq!(
      Theme::from_storage(None),
      Theme::Dark
    );
    assert_eq!(
      Theme::from_storage(Some("sepia")),
      Theme::Dark
    );
    assert_eq!(
      Theme::from_storage(Some("light")),
      Theme::Light
    );
  }

  #[test]
  fn toggle_flips_and_persists() {
    let mut store = MemoryStore::default();
    let mut themes =
      ThemeController::load(&store);
    assert_eq!(themes.current(), Theme::Dark);

    assert_eq!(
      themes.toggle(&mut store),
      Theme::Light
    );
    assert_eq!(
      store.get(THEME_KEY).as_deref(),
      Some("light")
    );
    assert_eq!(
      ThemeController::load(&store)
        .current(),
      Theme::Light
    );

    themes.toggle(&mut store);
    assert_eq!(
      store.get(THEME_KEY).as_deref(),
      Some("dark")
    );
  }

  #[test]
  fn labels_and_palettes_follow_theme() {
    assert_eq!(
      Theme::Dark.toggle_label(),
      "نهار"
    );
    assert_eq!(
      Theme::Light.toggle_label(),
      "ليل"
    );
    assert_eq!(
      Theme::Light
        .chart_palette()
        .grid_color,
      "rgba(0, 0, 0, 0.08)"
    );
  }
}
