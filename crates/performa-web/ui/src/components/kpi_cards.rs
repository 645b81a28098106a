use performa_core::binder::KpiCardView;
use yew::{
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct KpiCardsProps {
  pub cards: Vec<KpiCardView>
}

#[function_component(KpiCards)]
pub fn kpi_cards(
  props: &KpiCardsProps
) -> Html {
  html! {
      <section class="kpi-grid">
          {
              for props.cards.iter().map(|card| html! {
                  <div class="kpi-card" id={format!("kpi-{}", card.id)}>
                      <div class="kpi-label">{ &card.label }</div>
                      <div class="kpi-value">{ &card.value_text }</div>
                      <div class={card.change.class}>{ &card.change.text }</div>
                      <div class="kpi-progress">
                          <div
                              class="kpi-progress-fill"
                              style={format!("width: {}; background: var(--{});", card.progress_width, card.ring_color)}
                          ></div>
                      </div>
                  </div>
              })
          }
      </section>
  }
}
