use performa_core::charts::{
  ChartDefaults,
  ChartSpec
};
use yew::{
  Html,
  Properties,
  function_component,
  html,
  use_effect_with
};

use crate::chart;

#[derive(Properties, PartialEq)]
pub struct ChartsPanelProps {
  pub charts:   Vec<ChartSpec>,
  pub defaults: ChartDefaults
}

/// Canvases for the bound charts. Charts are rebuilt whenever the configs
/// or the theme defaults change, so a theme switch recolours them.
#[function_component(ChartsPanel)]
pub fn charts_panel(
  props: &ChartsPanelProps
) -> Html {
  use_effect_with(
    (
      props.charts.clone(),
      props.defaults.clone()
    ),
    |(charts, defaults)| {
      chart::apply_defaults(defaults);
      let instances: Vec<_> = charts
        .iter()
        .filter_map(chart::render)
        .collect();
      tracing::debug!(
        created = instances.len(),
        requested = charts.len(),
        "charts rendered"
      );

      move || {
        for instance in instances {
          instance.destroy();
        }
      }
    }
  );

  html! {
      <section class="charts">
          {
              for props.charts.iter().map(|spec| html! {
                  <div class="chart-container" key={spec.canvas_id}>
                      <canvas id={spec.canvas_id}></canvas>
                  </div>
              })
          }
      </section>
  }
}
