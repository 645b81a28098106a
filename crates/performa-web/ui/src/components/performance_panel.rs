use performa_core::binder::PerformanceView;
use yew::{
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct PerformancePanelProps {
  pub performance: PerformanceView
}

/// Quality score, its three metrics and the department heatmap.
#[function_component(PerformancePanel)]
pub fn performance_panel(
  props: &PerformancePanelProps
) -> Html {
  let perf = &props.performance;
  let metrics = [
    ("نسبة إعادة العمل", &perf.metrics.rework),
    (
      "متوسط وقت الاعتماد",
      &perf.metrics.approval_time
    ),
    (
      "الإنجاز من المرة الأولى",
      &perf.metrics.first_time_ok
    )
  ];

  html! {
      <section class="performance">
          <div class="quality-summary">
              <span class="quality-percentage">{ &perf.quality_text }</span>
              <ul class="quality-metrics">
                  {
                      for metrics.iter().map(|(label, value)| html! {
                          <li>
                              <span class="metric-label">{ *label }</span>
                              <span class="metric-value">{ value.as_str() }</span>
                          </li>
                      })
                  }
              </ul>
          </div>
          <table class="heatmap">
              <thead>
                  <tr>
                      <th></th>
                      { for perf.heatmap_days.iter().map(|day| html! { <th>{ day }</th> }) }
                  </tr>
              </thead>
              <tbody>
                  {
                      for perf.heatmap.iter().map(|row| html! {
                          <tr>
                              <th>{ &row.department }</th>
                              {
                                  for row.cells.iter().map(|cell| html! {
                                      <td
                                          class="heatmap-cell"
                                          title={cell.tooltip.clone()}
                                          style={format!("opacity: {:.2};", cell.intensity)}
                                      ></td>
                                  })
                              }
                          </tr>
                      })
                  }
              </tbody>
          </table>
      </section>
  }
}
