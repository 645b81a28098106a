//! Bridge to the page's global `Chart` constructor (Chart.js).

use performa_core::charts::{
  ChartDefaults,
  ChartSpec
};
use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

#[wasm_bindgen]
extern "C" {
  #[wasm_bindgen(js_name = Chart)]
  pub type ChartInstance;

  #[wasm_bindgen(
    constructor,
    catch,
    js_class = "Chart"
  )]
  fn new(
    canvas: &HtmlCanvasElement,
    config: &JsValue
  ) -> Result<ChartInstance, JsValue>;

  #[wasm_bindgen(method)]
  pub fn destroy(this: &ChartInstance);
}

fn chart_global() -> Option<JsValue> {
  js_sys::Reflect::get(
    &js_sys::global(),
    &JsValue::from_str("Chart")
  )
  .ok()
  .filter(|value| !value.is_undefined())
}

/// Sets `Chart.defaults.color` / `.borderColor`. Affects charts created
/// afterwards only.
pub fn apply_defaults(
  defaults: &ChartDefaults
) {
  let Some(chart) = chart_global() else {
    tracing::debug!(
      "Chart.js not loaded; skipping \
       defaults"
    );
    return;
  };
  let Ok(target) = js_sys::Reflect::get(
    &chart,
    &JsValue::from_str("defaults")
  ) else {
    return;
  };

  let _ = js_sys::Reflect::set(
    &target,
    &JsValue::from_str("color"),
    &JsValue::from_str(&defaults.color)
  );
  let _ = js_sys::Reflect::set(
    &target,
    &JsValue::from_str("borderColor"),
    &JsValue::from_str(
      &defaults.border_color
    )
  );
}

/// Creates a chart on its configured canvas. `None` when the canvas or the
/// library is missing.
pub fn render(
  spec: &ChartSpec
) -> Option<ChartInstance> {
  let canvas = web_sys::window()
    .and_then(|window| window.document())
    .and_then(|document| {
      document
        .get_element_by_id(spec.canvas_id)
    })?
    .dyn_into::<HtmlCanvasElement>()
    .ok()?;
  chart_global()?;

  let serializer =
    serde_wasm_bindgen::Serializer::json_compatible();
  let config = match spec.serialize(&serializer)
  {
    | Ok(config) => config,
    | Err(err) => {
      tracing::warn!(
        canvas = spec.canvas_id,
        error = %err,
        "failed to encode chart config"
      );
      return None;
    }
  };

  match ChartInstance::new(&canvas, &config)
  {
    | Ok(chart) => {
      tracing::debug!(
        canvas = spec.canvas_id,
        "chart created"
      );
      Some(chart)
    }
    | Err(err) => {
      tracing::warn!(
        canvas = spec.canvas_id,
        error = ?err,
        "chart constructor threw"
      );
      None
    }
  }
}
