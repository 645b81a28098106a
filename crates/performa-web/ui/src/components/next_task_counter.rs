use performa_core::deadline::NextTaskPanel;
use yew::{
  Html,
  Properties,
  classes,
  function_component,
  html
};

const UNITS: [&str; 4] =
  ["يوم", "ساعة", "دقيقة", "ثانية"];

#[derive(Properties, PartialEq)]
pub struct NextTaskCounterProps {
  pub panel: NextTaskPanel
}

/// Nearest upcoming deadline with its live countdown.
#[function_component(NextTaskCounter)]
pub fn next_task_counter(
  props: &NextTaskCounterProps
) -> Html {
  let panel = &props.panel;
  let badge = panel
    .deadline()
    .map(|deadline| deadline.badge_class());
  let padded = panel.parts().padded();

  html! {
      <section class="next-task">
          <div class="next-task-info">
              <h3 class="next-task-title">{ panel.title() }</h3>
              <p class="next-task-description">{ panel.description() }</p>
              <span class={classes!("badge", badge)}>{ panel.status_text() }</span>
          </div>
          <div class="countdown">
              {
                  for padded.iter().zip(UNITS).map(|(value, unit)| html! {
                      <div class="countdown-unit">
                          <span class="countdown-value">{ value }</span>
                          <span class="countdown-label">{ unit }</span>
                      </div>
                  })
              }
          </div>
      </section>
  }
}
