use performa_core::config::NavItem;
use yew::{
  AttrValue,
  Html,
  Properties,
  classes,
  function_component,
  html
};
use yew_router::prelude::Link;

use crate::app::Route;

#[derive(Properties, PartialEq)]
pub struct SidebarProps {
  pub items:  Vec<NavItem>,
  pub active: AttrValue
}

#[function_component(Sidebar)]
pub fn sidebar(
  props: &SidebarProps
) -> Html {
  html! {
      <nav class="sidebar">
          {
              for props.items.iter().map(|item| {
                  let active = props.active.as_str() == item.target;
                  html! {
                      <Link<Route>
                          to={Route::Page { page: item.target.clone() }}
                          classes={classes!("nav-item", active.then_some("active"))}
                      >
                          if !item.icon.is_empty() {
                              <span class="nav-icon">{ &item.icon }</span>
                          }
                          <span class="nav-label">{ &item.label }</span>
                      </Link<Route>>
                  }
              })
          }
      </nav>
  }
}
