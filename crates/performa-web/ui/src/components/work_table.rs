use performa_core::binder::{
  RowView,
  TableId,
  TableView
};
use performa_core::status::StatusTaxonomy;
use web_sys::{
  HtmlInputElement,
  HtmlSelectElement
};
use yew::{
  Callback,
  Html,
  InputEvent,
  Event,
  Properties,
  TargetCast,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct WorkTableProps {
  pub table:     TableView,
  pub statuses:  StatusTaxonomy,
  pub query:     String,
  pub status:    Option<String>,
  pub on_query:  Callback<String>,
  pub on_status: Callback<Option<String>>
}

/// A bound table with its search box, status selector and quick filters.
#[function_component(WorkTable)]
pub fn work_table(
  props: &WorkTableProps
) -> Html {
  let on_input = props.on_query.reform(
    |event: InputEvent| {
      event
        .target_unchecked_into::<HtmlInputElement>()
        .value()
    }
  );
  let on_select = props.on_status.reform(
    |event: Event| {
      let value = event
        .target_unchecked_into::<HtmlSelectElement>()
        .value();
      (!value.is_empty()).then_some(value)
    }
  );
  let selected = props.status.clone().unwrap_or_default();

  let quick = |key: Option<String>, label: String| {
    let active = props.status == key;
    let on_status = props.on_status.clone();
    html! {
        <button
            class={classes!("quick-filter", active.then_some("active"))}
            onclick={move |_| on_status.emit(key.clone())}
        >
            { label }
        </button>
    }
  };

  let columns = props.table.id.columns();
  html! {
      <section class="table-panel">
          <div class="table-header">
              <h2>{ props.table.id.title() }</h2>
              <input
                  class="search-input"
                  type="search"
                  placeholder="بحث..."
                  value={props.query.clone()}
                  oninput={on_input}
              />
              <select class="status-filter" onchange={on_select}>
                  <option value="" selected={selected.is_empty()}>{ "جميع الحالات" }</option>
                  {
                      for props.statuses.iter().map(|def| html! {
                          <option value={def.key.clone()} selected={selected == def.key}>
                              { &def.label }
                          </option>
                      })
                  }
              </select>
          </div>
          <div class="quick-filters">
              { quick(None, "الكل".to_string()) }
              {
                  for props.statuses.iter().map(|def| {
                      quick(Some(def.key.clone()), def.label.clone())
                  })
              }
          </div>
          <table class="data-table">
              <thead>
                  <tr>
                      { for columns.iter().map(|column| html! { <th>{ *column }</th> }) }
                  </tr>
              </thead>
              <tbody>
                  {
                      for props.table.visible_rows().map(|row| html! {
                          <tr class={classes!(row.row_class())}>
                              { row_cells(props.table.id, row) }
                          </tr>
                      })
                  }
              </tbody>
          </table>
          if props.table.visible_count() == 0 {
              <div class="empty-state">{ "لا توجد نتائج مطابقة" }</div>
          }
      </section>
  }
}

/// Cells in the column order of `id`.
fn row_cells(id: TableId, row: &RowView) -> Html {
  let name = html! { <td class="row-name">{ &row.name }</td> };
  let context = html! { <td>{ &row.context }</td> };
  let owner = html! { <td>{ &row.owner }</td> };
  let badge = html! {
      <td>
          <span class={classes!("badge", row.badge.class.clone())}>
              { &row.badge.label }
          </span>
      </td>
  };
  let progress = html! {
      <td>
          <div class="progress-bar">
              <div class="progress-fill" style={format!("width: {};", row.progress_width())}></div>
          </div>
      </td>
  };
  let due = html! {
      <td class="due-cell">
          {
              row
                  .due_label
                  .as_ref()
                  .map(ToString::to_string)
                  .unwrap_or_else(|| row.due_raw.clone())
          }
      </td>
  };

  match id {
    | TableId::DashboardTasks
    | TableId::Tasks => html! {
        <>
            <td>
                <div class="row-name">{ &row.name }</div>
                <div class="row-context">{ &row.context }</div>
            </td>
            { owner }{ badge }{ progress }{ due }
        </>
    },
    | TableId::Goals => html! {
        <>{ name }{ context }{ owner }{ progress }{ badge }</>
    },
    | TableId::Projects => html! {
        <>{ name }{ context }{ owner }{ progress }{ badge }{ due }</>
    }
  }
}
