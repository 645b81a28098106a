use performa_core::binder::OverdueAlert;
use yew::{
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct OverdueBannerProps {
  pub alert: Option<OverdueAlert>
}

#[function_component(OverdueBanner)]
pub fn overdue_banner(
  props: &OverdueBannerProps
) -> Html {
  let Some(alert) =
    props.alert.filter(|alert| alert.visible())
  else {
    return html! {};
  };

  html! {
      <div class="overdue-alert">
          <span class="overdue-icon">{ "⚠" }</span>
          <span class="overdue-count">{ alert.count }</span>
          <span class="overdue-text">{ "مهام متأخرة تحتاج إلى متابعة" }</span>
      </div>
  }
}
