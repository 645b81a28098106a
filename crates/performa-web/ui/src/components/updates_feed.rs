use performa_core::binder::UpdateItemView;
use yew::{
  Html,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct UpdatesFeedProps {
  pub items: Vec<UpdateItemView>
}

#[function_component(UpdatesFeed)]
pub fn updates_feed(
  props: &UpdatesFeedProps
) -> Html {
  html! {
      <section class="updates">
          <h2>{ "آخر التحديثات" }</h2>
          <ul class="updates-list">
              {
                  for props.items.iter().map(|item| html! {
                      <li class="update-item">
                          <span class="update-task">{ &item.task }</span>
                          <span class={classes!("badge", item.badge.class.clone())}>
                              { &item.badge.label }
                          </span>
                          <span class="update-date">{ &item.date }</span>
                      </li>
                  })
              }
          </ul>
      </section>
  }
}
