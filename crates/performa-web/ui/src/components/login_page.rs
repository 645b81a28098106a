use performa_core::session::{
  UserDirectory,
  load_session,
  sign_in
};
use web_sys::HtmlInputElement;
use yew::{
  Callback,
  Html,
  InputEvent,
  SubmitEvent,
  TargetCast,
  function_component,
  html,
  use_state
};
use yew_router::prelude::{
  Redirect,
  use_navigator
};

use crate::app::Route;
use crate::storage::BrowserStore;

fn input_value(event: InputEvent) -> String {
  event
    .target_unchecked_into::<HtmlInputElement>()
    .value()
}

#[function_component(LoginPage)]
pub fn login_page() -> Html {
  let email = use_state(String::new);
  let password = use_state(String::new);
  let error = use_state(|| None::<String>);
  let navigator = use_navigator();

  if load_session(&BrowserStore::local())
    .is_some()
  {
    return html! {
        <Redirect<Route> to={Route::Home} />
    };
  }

  let on_email = {
    let email = email.clone();
    Callback::from(move |event: InputEvent| {
      email.set(input_value(event));
    })
  };
  let on_password = {
    let password = password.clone();
    Callback::from(move |event: InputEvent| {
      password.set(input_value(event));
    })
  };

  let on_submit = {
    let email = email.clone();
    let password = password.clone();
    let error = error.clone();
    Callback::from(move |event: SubmitEvent| {
      event.prevent_default();
      let mut store = BrowserStore::local();
      match sign_in(
        &UserDirectory::builtin(),
        &mut store,
        &email,
        &password
      ) {
        | Ok(session) => {
          tracing::info!(
            email = %session.email,
            "signed in"
          );
          error.set(None);
          if let Some(navigator) = &navigator {
            navigator.push(&Route::Home);
          }
        }
        | Err(err) => {
          error.set(Some(err.to_string()));
        }
      }
    })
  };

  html! {
      <div class="login-page" dir="rtl">
          <form class="login-card" onsubmit={on_submit}>
              <h1>{ "تسجيل الدخول" }</h1>
              <label for="email">{ "البريد الإلكتروني" }</label>
              <input
                  id="email"
                  type="email"
                  value={(*email).clone()}
                  oninput={on_email}
              />
              <label for="password">{ "كلمة المرور" }</label>
              <input
                  id="password"
                  type="password"
                  value={(*password).clone()}
                  oninput={on_password}
              />
              if let Some(message) = &*error {
                  <div class="login-error">{ message }</div>
              }
              <button class="btn login-btn" type="submit">{ "دخول" }</button>
          </form>
      </div>
  }
}
