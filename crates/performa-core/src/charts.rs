//! Chart inputs for the external charting library.
//!
//! Everything here serialises to the camelCase object shape Chart.js
//! expects; rendering stays on the library side.

use serde::Serialize;

use crate::config::ChartSeries;
use crate::theme::ChartPalette;

pub const DAILY_CHART_ID: &str =
  "daily-completion-chart";
pub const PERFORMANCE_CHART_ID: &str =
  "performance-chart";
pub const QUALITY_CHART_ID: &str =
  "quality-chart";

const WARNING_COLOR: &str = "#e67e22";

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
  Line,
  Doughnut
}

#[derive(
  Debug, Clone, PartialEq, Serialize,
)]
#[serde(untagged)]
pub enum Paint {
  One(String),
  Many(Vec<String>)
}

#[derive(
  Debug, Clone, PartialEq, Serialize,
)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
  #[serde(
    skip_serializing_if = "Option::is_none"
  )]
  pub label:            Option<String>,
  pub data:             Vec<f64>,
  pub border_color:     Paint,
  pub background_color: Paint,
  pub border_width:     u8,
  pub fill:             bool,
  pub tension:          f64
}

#[derive(
  Debug, Clone, PartialEq, Serialize,
)]
pub struct ChartData {
  pub labels:   Vec<String>,
  pub datasets: Vec<Dataset>
}

#[derive(
  Debug, Clone, PartialEq, Serialize,
)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
  pub responsive:            bool,
  pub maintain_aspect_ratio: bool,
  #[serde(
    skip_serializing_if = "Option::is_none"
  )]
  pub cutout:                Option<String>,
  pub plugins:               Plugins,
  #[serde(
    skip_serializing_if = "Option::is_none"
  )]
  pub scales:                Option<Scales>
}

#[derive(
  Debug, Clone, PartialEq, Serialize,
)]
pub struct Plugins {
  pub legend: Legend
}

#[derive(
  Debug, Clone, PartialEq, Serialize,
)]
pub struct Legend {
  pub display:  bool,
  pub position: &'static str,
  pub labels:   TickStyle
}

#[derive(
  Debug, Clone, PartialEq, Serialize,
)]
pub struct TickStyle {
  pub color: String
}

#[derive(
  Debug, Clone, PartialEq, Serialize,
)]
pub struct Scales {
  pub x: Axis,
  pub y: Axis
}

#[derive(
  Debug, Clone, PartialEq, Serialize,
)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
  pub begin_at_zero: bool,
  pub grid:          TickStyle,
  pub ticks:         TickStyle
}

/// One chart instance: the canvas it targets plus its library config.
#[derive(
  Debug, Clone, PartialEq, Serialize,
)]
pub struct ChartSpec {
  #[serde(skip)]
  pub canvas_id: &'static str,
  #[serde(rename = "type")]
  pub kind:      ChartKind,
  pub data:      ChartData,
  pub options:   ChartOptions
}

/// Library-wide defaults (`Chart.defaults.color` / `.borderColor`).
#[derive(
  Debug, Clone, PartialEq, Eq, Serialize,
)]
#[serde(rename_all = "camelCase")]
pub struct ChartDefaults {
  pub color:        String,
  pub border_color: String
}

impl ChartDefaults {
  pub fn for_palette(
    palette: &ChartPalette
  ) -> Self {
    Self {
      color:        palette
        .text_color
        .to_string(),
      border_color: palette
        .grid_color
        .to_string()
    }
  }
}

fn line_options(
  palette: &ChartPalette
) -> ChartOptions {
  let axis = || Axis {
    begin_at_zero: true,
    grid:          TickStyle {
      color: palette
        .grid_color
        .to_string()
    },
    ticks:         TickStyle {
      color: palette
        .text_color
        .to_string()
    }
  };

  ChartOptions {
    responsive:            true,
    maintain_aspect_ratio: true,
    cutout:                None,
    plugins:               Plugins {
      legend: Legend {
        display:  true,
        position: "top",
        labels:   TickStyle {
          color: palette
            .text_color
            .to_string()
        }
      }
    },
    scales:                Some(Scales {
      x: axis(),
      y: axis()
    })
  }
}

fn line_dataset(
  label: &str,
  data: &[f64],
  color: &str,
  fill_color: &str
) -> Dataset {
  Dataset {
    label:            Some(
      label.to_string()
    ),
    data:             data.to_vec(),
    border_color:     Paint::One(
      color.to_string()
    ),
    background_color: Paint::One(
      fill_color.to_string()
    ),
    border_width:     2,
    fill:             true,
    tension:          0.4
  }
}

pub fn daily_completion(
  series: &ChartSeries,
  palette: &ChartPalette
) -> ChartSpec {
  ChartSpec {
    canvas_id: DAILY_CHART_ID,
    kind:      ChartKind::Line,
    data:      ChartData {
      labels:   series.daily.labels.clone(),
      datasets: vec![Dataset {
        border_width: 3,
        ..line_dataset(
          "المهام المنجزة",
          &series.daily.data,
          palette.accent_color,
          "rgba(20, 184, 166, 0.1)"
        )
      }]
    },
    options:   line_options(palette)
  }
}

pub fn performance_trend(
  series: &ChartSeries,
  palette: &ChartPalette
) -> ChartSpec {
  let perf = &series.performance;
  ChartSpec {
    canvas_id: PERFORMANCE_CHART_ID,
    kind:      ChartKind::Line,
    data:      ChartData {
      labels:   perf.labels.clone(),
      datasets: vec![
        line_dataset(
          "منجز",
          &perf.completed,
          palette.accent_color,
          "rgba(26, 188, 156, 0.1)"
        ),
        line_dataset(
          "قيد التنفيذ/متأخر",
          &perf.in_progress,
          WARNING_COLOR,
          "rgba(230, 126, 34, 0.1)"
        ),
      ]
    },
    options:   line_options(palette)
  }
}

pub fn quality_ring(
  series: &ChartSeries,
  palette: &ChartPalette
) -> ChartSpec {
  let done =
    f64::from(series.quality.percentage.min(100));
  ChartSpec {
    canvas_id: QUALITY_CHART_ID,
    kind:      ChartKind::Doughnut,
    data:      ChartData {
      labels:   vec![
        "مكتملة من أول مرة".to_string(),
      ],
      datasets: vec![Dataset {
        label:            None,
        data:             vec![
          done,
          100.0 - done,
        ],
        border_color:     Paint::Many(vec![
          palette
            .background_color
            .to_string(),
        ]),
        background_color: Paint::Many(vec![
          palette
            .accent_color
            .to_string(),
          palette.grid_color.to_string(),
        ]),
        border_width:     2,
        fill:             false,
        tension:          0.0
      }]
    },
    options:   ChartOptions {
      responsive:            true,
      maintain_aspect_ratio: true,
      cutout:                Some(
        "70%".to_string()
      ),
      plugins:               Plugins {
        legend: Legend {
          display:  false,
          position: "top",
          labels:   TickStyle {
            color: palette
              .text_color
              .to_string()
          }
        }
      },
      scales:                None
    }
  }
}

const INTENSITY_LEVELS: [&str; 5] = [
  "منخفض جدًا",
  "منخفض",
  "متوسط",
  "عالي",
  "عالي جدًا"
];

/// Heatmap cell tooltip: level name and rounded percentage.
pub fn heatmap_tooltip(
  intensity: f64
) -> String {
  let intensity = if intensity.is_finite()
  {
    intensity.clamp(0.0, 1.0)
  } else {
    0.5
  };
  let percent =
    (intensity * 100.0).round() as u32;
  let level =
    INTENSITY_LEVELS[(intensity * 4.0)
      .floor()
      as usize];
  format!("{level} ({percent}%)")
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::DashboardConfig;
  use crate::theme::Theme;

  #[test]
  fn performance_chart_has_two_series() {
    let config =
      DashboardConfig::builtin().unwrap();
    let spec = performance_trend(
      &config.charts,
      &Theme::Dark.chart_palette()
    );

    assert_eq!(spec.kind, ChartKind::Line);
    assert_eq!(spec.data.labels.len(), 8);
    assert_eq!(spec.data.datasets.len(), 2);
    assert_eq!(
      spec.data.datasets[0].data[7],
      92.0
    );
  }

  #[test]
  fn quality_ring_splits_percentage() {
    let config =
      DashboardConfig::builtin().unwrap();
    let spec = quality_ring(
      &config.charts,
      &Theme::Light.chart_palette()
    );
    assert_eq!(
      spec.data.datasets[0].data,
      vec![92.0, 8.0]
    );
  }

  #[test]
  fn chart_config_serialises_for_chart_js()
  {
    let config =
      DashboardConfig::builtin().unwrap();
    let spec = daily_completion(
      &config.charts,
      &Theme::Dark.chart_palette()
    );
    let json =
      serde_json::to_value(&spec).unwrap();

    assert_eq!(json["type"], "line");
    assert_eq!(
      json["data"]["datasets"][0]
        ["borderColor"],
      "#1abc9c"
    );
    assert_eq!(
      json["options"]["maintainAspectRatio"],
      true
    );
    assert!(json.get("canvas_id").is_none());
  }

  #[test]
  fn heatmap_tooltips_bucket_intensity() {
    assert_eq!(
      heatmap_tooltip(0.8),
      "عالي (80%)"
    );
    assert_eq!(
      heatmap_tooltip(0.3),
      "منخفض (30%)"
    );
    assert_eq!(
      heatmap_tooltip(1.0),
      "عالي جدًا (100%)"
    );
    assert_eq!(
      heatmap_tooltip(f64::NAN),
      "متوسط (50%)"
    );
  }
}
