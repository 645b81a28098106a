use performa_core::binder::AppHeader;
use performa_core::notify::Inbox;
use yew::{
  AttrValue,
  Callback,
  Html,
  Properties,
  function_component,
  html,
  use_state
};

#[derive(Properties, PartialEq)]
pub struct TopbarProps {
  pub header:          AppHeader,
  pub last_updated:    AttrValue,
  pub theme_label:     AttrValue,
  pub profile:         AttrValue,
  pub initial:         AttrValue,
  pub inbox:           Inbox,
  pub badge:           Option<String>,
  pub on_toggle_theme: Callback<()>,
  pub on_refresh:      Callback<()>,
  pub on_read_inbox:   Callback<()>,
  pub on_logout:       Callback<()>
}

#[function_component(Topbar)]
pub fn topbar(
  props: &TopbarProps
) -> Html {
  let inbox_open = use_state(|| false);

  let on_bell = {
    let inbox_open = inbox_open.clone();
    Callback::from(move |_| {
      inbox_open.set(!*inbox_open);
    })
  };
  let on_theme =
    props.on_toggle_theme.reform(|_| ());
  let on_refresh =
    props.on_refresh.reform(|_| ());
  let on_read = props.on_read_inbox.reform(|_| ());
  let on_logout =
    props.on_logout.reform(|_| ());

  html! {
      <header class="topbar">
          <div class="app-title">
              <h1 class="app-name">{ &props.header.name }</h1>
              <span class="app-subtitle">{ &props.header.subtitle }</span>
          </div>
          <span class="last-updated">{ props.last_updated.clone() }</span>
          <div class="topbar-actions">
              <button class="btn refresh-btn" onclick={on_refresh}>{ "تحديث" }</button>
              <button class="btn theme-toggle" onclick={on_theme}>{ props.theme_label.clone() }</button>
              <div class="notification-wrapper">
                  <button class="notification-btn" onclick={on_bell}>
                      { "🔔" }
                      if let Some(badge) = &props.badge {
                          <span class="notif-badge">{ badge }</span>
                      }
                  </button>
                  if *inbox_open {
                      <div class="notification-dropdown">
                          {
                              for props.inbox.items().iter().map(|item| html! {
                                  <div class={if item.unread { "notification-item unread" } else { "notification-item" }}>
                                      <div class="notification-sender">{ &item.sender }</div>
                                      <div class="notification-message">{ &item.message }</div>
                                      <div class="notification-time">{ &item.time }</div>
                                  </div>
                              })
                          }
                          <button class="btn mark-read" onclick={on_read}>{ "تعليم الكل كمقروء" }</button>
                      </div>
                  }
              </div>
              <div class="profile">
                  <span class="avatar">{ props.initial.clone() }</span>
                  <span class="profile-label">{ props.profile.clone() }</span>
                  <button class="btn logout-btn" onclick={on_logout}>{ "تسجيل الخروج" }</button>
              </div>
          </div>
      </header>
  }
}
