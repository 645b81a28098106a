use chrono::{
  DateTime,
  Duration,
  Utc
};
use serde::Serialize;
use tracing::debug;

use crate::storage::{
  KeyValueStore,
  OVERDUE_NOTICE_KEY
};

pub const TOAST_TTL_MS: i64 = 3_500;
pub const OVERDUE_TOAST_TTL_MS: i64 = 5_000;
pub const OVERDUE_TOAST_TITLE: &str =
  "تنبيه: مهام متأخرة!";

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
  Success,
  Error,
  Warning,
  Info
}

impl ToastKind {
  pub fn css_class(self) -> &'static str {
    match self {
      | Self::Success => {
        "notification notification-success"
      }
      | Self::Error => {
        "notification notification-error"
      }
      | Self::Warning => {
        "notification notification-warning"
      }
      | Self::Info => {
        "notification notification-info"
      }
    }
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq, Serialize,
)]
pub struct Toast {
  pub id:         u64,
  pub kind:       ToastKind,
  pub title:      Option<String>,
  pub message:    String,
  pub expires_at: DateTime<Utc>
}

/// Message-only notification before it is queued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastDraft {
  pub kind:    ToastKind,
  pub title:   Option<String>,
  pub message: String,
  pub ttl_ms:  i64
}

impl ToastDraft {
  pub fn new(
    kind: ToastKind,
    message: impl Into<String>
  ) -> Self {
    Self {
      kind,
      title: None,
      message: message.into(),
      ttl_ms: TOAST_TTL_MS
    }
  }
}

/// On-screen toasts, oldest first.
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
  next_id: u64,
  toasts:  Vec<Toast>
}

impl ToastQueue {
  pub fn push(
    &mut self,
    draft: ToastDraft,
    now: DateTime<Utc>
  ) -> u64 {
    self.next_id += 1;
    let id = self.next_id;
    debug!(
      id,
      kind = ?draft.kind,
      message = %draft.message,
      "toast queued"
    );
    self.toasts.push(Toast {
      id,
      kind: draft.kind,
      title: draft.title,
      message: draft.message,
      expires_at: now
        + Duration::milliseconds(
          draft.ttl_ms
        )
    });
    id
  }

  pub fn dismiss(&mut self, id: u64) -> bool {
    let before = self.toasts.len();
    self.toasts.retain(|toast| toast.id != id);
    self.toasts.len() != before
  }

  /// Drops expired toasts; returns how many were removed.
  pub fn expire(
    &mut self,
    now: DateTime<Utc>
  ) -> usize {
    let before = self.toasts.len();
    self
      .toasts
      .retain(|toast| toast.expires_at > now);
    before - self.toasts.len()
  }

  pub fn toasts(&self) -> &[Toast] {
    &self.toasts
  }

  pub fn is_empty(&self) -> bool {
    self.toasts.is_empty()
  }
}

pub fn overdue_message(
  count: usize
) -> String {
  let noun = if count == 1 {
    "مهمة متأخرة"
  } else {
    "مهام متأخرة"
  };
  format!(
    "لديك {count} {noun} تحتاج إلى انتباه فوري"
  )
}

/// The overdue toast, at most once per browser session.
pub fn overdue_toast_once(
  session_store: &mut impl KeyValueStore,
  count: usize
) -> Option<ToastDraft> {
  if count == 0
    || session_store
      .get(OVERDUE_NOTICE_KEY)
      .is_some()
  {
    return None;
  }
  session_store
    .set(OVERDUE_NOTICE_KEY, "true");
  Some(ToastDraft {
    kind:    ToastKind::Warning,
    title:   Some(
      OVERDUE_TOAST_TITLE.to_string()
    ),
    message: overdue_message(count),
    ttl_ms:  OVERDUE_TOAST_TTL_MS
  })
}

pub fn refresh_summary(
  overdue: usize,
  clock: &str
) -> ToastDraft {
  if overdue > 0 {
    ToastDraft::new(
      ToastKind::Info,
      format!(
        "✅ تم تحديث البيانات في {clock} - ⚠️ {overdue} متأخرات"
      )
    )
  } else {
    ToastDraft::new(
      ToastKind::Success,
      format!(
        "✅ تم تحديث جميع البيانات بنجاح في {clock}"
      )
    )
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq, Serialize,
)]
pub struct InboxItem {
  pub sender:  String,
  pub message: String,
  pub time:    String,
  pub unread:  bool
}

/// The notification dropdown in the top bar.
#[derive(
  Debug, Clone, PartialEq, Eq, Serialize,
)]
pub struct Inbox {
  items: Vec<InboxItem>
}

impl Default for Inbox {
  fn default() -> Self {
    Self::builtin()
  }
}

impl Inbox {
  pub fn builtin() -> Self {
    let item =
      |sender: &str,
       message: &str,
       time: &str,
       unread: bool| InboxItem {
        sender: sender.to_string(),
        message: message.to_string(),
        time: time.to_string(),
        unread
      };
    Self {
      items: vec![
        item(
          "إدارة الجودة",
          "تم إغلاق 8 تظلمات جديدة في القسم.",
          "قبل 10 دقائق",
          true
        ),
        item(
          "إدارة المشاريع",
          "تم تحديث مؤشر الأداء للأسبوع الحالي.",
          "قبل ساعة",
          true
        ),
        item(
          "قسم المتابعة",
          "مطلوب مراجعة تقرير التظلمات الشهري.",
          "أمس",
          false
        ),
      ]
    }
  }

  pub fn from_items(
    items: Vec<InboxItem>
  ) -> Self {
    Self {
      items
    }
  }

  pub fn items(&self) -> &[InboxItem] {
    &self.items
  }

  pub fn unread_count(&self) -> usize {
    self
      .items
      .iter()
      .filter(|item| item.unread)
      .count()
  }

  /// Badge text; `None` hides the badge.
  pub fn unread_badge(
    &self
  ) -> Option<String> {
    match self.unread_count() {
      | 0 => None,
      | n @ 1..=9 => Some(n.to_string()),
      | _ => Some("9+".to_string())
    }
  }

  /// Badge on the notification button. Overdue badges on the page
  /// take over the count; otherwise the unread badge shows.
  pub fn badge(
    &self,
    overdue: usize
  ) -> Option<String> {
    if overdue > 0 {
      return Some(overdue.to_string());
    }
    self.unread_badge()
  }

  pub fn mark_all_read(&mut self) {
    for item in &mut self.items {
      item.unread = false;
    }
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;
  use crate::storage::MemoryStore;

  fn t0() -> DateTime<Utc> {
    Utc
      .with_ymd_and_hms(
        2026, 2, 24, 12, 0, 0
      )
      .unwrap()
  }

  #[test]
  fn queue_ids_increase_and_expire() {
    let mut queue = ToastQueue::default();
    let first = queue.push(
      ToastDraft::new(ToastKind::Info, "a"),
      t0()
    );
    let second = queue.push(
      ToastDraft::new(ToastKind::Error, "b"),
      t0() + Duration::seconds(2)
    );
    assert!(second > first);

    assert_eq!(
      queue.expire(
        t0() + Duration::milliseconds(3_500)
      ),
      1
    );
    assert_eq!(queue.toasts()[0].id, second);

    assert!(queue.dismiss(second));
    assert!(!queue.dismiss(second));
    assert!(queue.is_empty());
  }

  #[test]
  fn overdue_toast_fires_once_per_session() {
    let mut session = MemoryStore::default();

    let draft =
      overdue_toast_once(&mut session, 1)
        .unwrap();
    assert_eq!(draft.kind, ToastKind::Warning);
    assert_eq!(
      draft.title.as_deref(),
      Some(OVERDUE_TOAST_TITLE)
    );
    assert_eq!(
      draft.message,
      "لديك 1 مهمة متأخرة تحتاج إلى انتباه فوري"
    );
    assert_eq!(
      draft.ttl_ms,
      OVERDUE_TOAST_TTL_MS
    );

    assert_eq!(
      overdue_toast_once(&mut session, 3),
      None
    );
  }

  #[test]
  fn no_overdue_means_no_toast_or_flag() {
    let mut session = MemoryStore::default();
    assert_eq!(
      overdue_toast_once(&mut session, 0),
      None
    );
    assert!(session.is_empty());
    assert!(
      overdue_message(4).contains("مهام متأخرة")
    );
  }

  #[test]
  fn refresh_summary_mentions_overdue() {
    let draft = refresh_summary(2, "12:00");
    assert_eq!(draft.kind, ToastKind::Info);
    assert!(draft.message.contains("2 متأخرات"));

    let draft = refresh_summary(0, "12:00");
    assert_eq!(draft.kind, ToastKind::Success);
    assert!(draft.message.ends_with("12:00"));
  }

  #[test]
  fn unread_badge_caps_at_nine() {
    let inbox = Inbox::builtin();
    assert_eq!(
      inbox.unread_badge().as_deref(),
      Some("2")
    );

    let many = Inbox::from_items(
      (0..12)
        .map(|idx| InboxItem {
          sender:  format!("قسم {idx}"),
          message: String::new(),
          time:    String::new(),
          unread:  true
        })
        .collect()
    );
    assert_eq!(
      many.unread_badge().as_deref(),
      Some("9+")
    );

    let mut read = Inbox::builtin();
    read.mark_all_read();
    assert_eq!(read.unread_badge(), None);
  }

  #[test]
  fn overdue_count_takes_over_the_badge() {
    let mut inbox = Inbox::builtin();
    assert_eq!(inbox.badge(0).as_deref(), Some("2"));
    assert_eq!(inbox.badge(3).as_deref(), Some("3"));
    assert_eq!(inbox.badge(14).as_deref(), Some("14"));

    inbox.mark_all_read();
    assert_eq!(inbox.badge(0), None);
    assert_eq!(inbox.badge(1).as_deref(), Some("1"));
  }
}
