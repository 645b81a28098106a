use anyhow::anyhow;
use serde::{
  Deserialize,
  Serialize
};

pub const ACTIVE: &str = "active";
pub const PROGRESS: &str = "progress";
pub const DONE: &str = "done";
pub const OVERDUE: &str = "overdue";
pub const BLOCKED: &str = "blocked";

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct StatusDef {
  pub key:       String,
  pub label:     String,
  pub color:     String,
  #[serde(rename = "class")]
  pub css_class: String
}

/// Ordered status definitions. Construction guarantees an `active`
/// entry, which is what unknown keys resolve to.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
#[serde(
  try_from = "Vec<StatusDef>",
  into = "Vec<StatusDef>"
)]
pub struct StatusTaxonomy {
  entries: Vec<StatusDef>,
  active:  StatusDef
}

impl TryFrom<Vec<StatusDef>>
  for StatusTaxonomy
{
  type Error = anyhow::Error;

  fn try_from(
    entries: Vec<StatusDef>
  ) -> Result<Self, Self::Error> {
    let active = entries
      .iter()
      .find(|def| def.key == ACTIVE)
      .cloned()
      .ok_or_else(|| {
        anyhow!(
          "status taxonomy must define \
           an `{ACTIVE}` status"
        )
      })?;

    for (idx, def) in
      entries.iter().enumerate()
    {
      if entries[..idx]
        .iter()
        .any(|prev| prev.key == def.key)
      {
        return Err(anyhow!(
          "duplicate status key `{}`",
          def.key
        ));
      }
    }

    Ok(Self {
      entries,
      active
    })
  }
}

impl From<StatusTaxonomy>
  for Vec<StatusDef>
{
  fn from(
    taxonomy: StatusTaxonomy
  ) -> Self {
    taxonomy.entries
  }
}

impl StatusTaxonomy {
  pub fn get(
    &self,
    key: &str
  ) -> Option<&StatusDef> {
    self
      .entries
      .iter()
      .find(|def| def.key == key)
  }

  pub fn contains(
    &self,
    key: &str
  ) -> bool {
    self.get(key).is_some()
  }

  /// Definition for `key`, or the `active` definition when the key is
  /// not part of the taxonomy.
  pub fn resolve(
    &self,
    key: &str
  ) -> &StatusDef {
    match self.get(key) {
      | Some(def) => def,
      | None => {
        tracing::trace!(
          key,
          "unknown status key; using \
           active definition"
        );
        &self.active
      }
    }
  }

  pub fn iter(
    &self
  ) -> impl Iterator<Item = &StatusDef>
  {
    self.entries.iter()
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Labels the deadline tracker treats as open work: the `active` and
  /// `progress` labels.
  pub fn open_labels(
    &self
  ) -> Vec<&str> {
    [ACTIVE, PROGRESS]
      .iter()
      .filter_map(|key| self.get(key))
      .map(|def| def.label.as_str())
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn def(
    key: &str,
    label: &str
  ) -> StatusDef {
    StatusDef {
      key:       key.to_string(),
      label:     label.to_string(),
      color:     "accent".to_string(),
      css_class: format!("badge-{key}")
    }
  }

  #[test]
  fn unknown_key_resolves_to_active() {
    let taxonomy =
      StatusTaxonomy::try_from(vec![
        def("active", "Active"),
        def("done", "Done"),
      ])
      .unwrap();

    let resolved =
      taxonomy.resolve("archived");
    assert_eq!(resolved.key, "active");
    assert_eq!(
      resolved.css_class,
      "badge-active"
    );
    assert_eq!(
      taxonomy.resolve("done").label,
      "Done"
    );
  }

  #[test]
  fn taxonomy_without_active_is_rejected()
  {
    let err =
      StatusTaxonomy::try_from(vec![
        def("done", "Done"),
      ])
      .unwrap_err();
    assert!(
      err.to_string().contains("active")
    );
  }

  #[test]
  fn duplicate_keys_are_rejected() {
    assert!(
      StatusTaxonomy::try_from(vec![
        def("active", "A"),
        def("active", "B"),
      ])
      .is_err()
    );
  }

  #[test]
  fn open_labels_list_active_before_progress()
  {
    let taxonomy =
      StatusTaxonomy::try_from(vec![
        def("progress", "Working"),
        def("active", "Active"),
      ])
      .unwrap();
    assert_eq!(
      taxonomy.open_labels(),
      vec!["Active", "Working"]
    );
  }
}
