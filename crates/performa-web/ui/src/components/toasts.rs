use performa_core::notify::Toast;
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct ToastsProps {
  pub toasts:     Vec<Toast>,
  pub on_dismiss: Callback<u64>
}

#[function_component(Toasts)]
pub fn toasts(
  props: &ToastsProps
) -> Html {
  html! {
      <div class="toast-stack">
          {
              for props.toasts.iter().map(|toast| {
                  let id = toast.id;
                  let on_close = props.on_dismiss.reform(move |_| id);
                  html! {
                      <div key={id} class={classes!("toast", toast.kind.css_class())}>
                          if let Some(title) = &toast.title {
                              <strong class="toast-title">{ title }</strong>
                          }
                          <span class="toast-message">{ &toast.message }</span>
                          <button class="toast-close" onclick={on_close}>{ "×" }</button>
                      </div>
                  }
              })
          }
      </div>
  }
}
