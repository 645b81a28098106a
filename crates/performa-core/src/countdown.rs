use chrono::{
  DateTime,
  Utc
};
use serde::Serialize;
use tracing::{
  debug,
  trace
};

/// Remaining time split into display units. Always floored, never
/// negative.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Serialize,
)]
pub struct CountdownParts {
  pub days:    u64,
  pub hours:   u64,
  pub minutes: u64,
  pub seconds: u64
}

impl CountdownParts {
  pub fn zero() -> Self {
    Self::default()
  }

  pub fn until(
    now: DateTime<Utc>,
    target: DateTime<Utc>
  ) -> Self {
    let total = (target - now)
      .num_seconds()
      .max(0)
      .unsigned_abs();
    Self {
      days:    total / 86_400,
      hours:   (total % 86_400) / 3_600,
      minutes: (total % 3_600) / 60,
      seconds: total % 60
    }
  }

  pub fn is_zero(&self) -> bool {
    *self == Self::zero()
  }

  /// Counter texts in display order: days, hours, minutes, seconds.
  pub fn padded(&self) -> [String; 4] {
    [
      self.days,
      self.hours,
      self.minutes,
      self.seconds
    ]
    .map(|value| format!("{value:02}"))
  }
}

/// Identifies one started countdown. Ticks carrying an older handle are
/// ignored.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
)]
pub struct CountdownHandle {
  generation: u64
}

impl CountdownHandle {
  pub fn generation(self) -> u64 {
    self.generation
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
)]
pub struct CountdownTick {
  pub parts:    CountdownParts,
  pub finished: bool
}

/// Holds at most one running countdown.
#[derive(Debug, Clone, Default)]
pub struct CountdownSlot {
  generation: u64,
  target:     Option<DateTime<Utc>>
}

impl CountdownSlot {
  /// Starts a countdown to `target`, superseding any running one.
  pub fn start(
    &mut self,
    target: DateTime<Utc>
  ) -> CountdownHandle {
    self.generation += 1;
    self.target = Some(target);
    debug!(
      generation = self.generation,
      target = %target,
      "countdown started"
    );
    CountdownHandle {
      generation: self.generation
    }
  }

  pub fn stop(&mut self) {
    if self.target.take().is_some() {
      debug!(
        generation = self.generation,
        "countdown stopped"
      );
    }
  }

  pub fn is_running(&self) -> bool {
    self.target.is_some()
  }

  pub fn target(
    &self
  ) -> Option<DateTime<Utc>> {
    self.target
  }

  pub fn current(
    &self
  ) -> Option<CountdownHandle> {
    self.target.map(|_| CountdownHandle {
      generation: self.generation
    })
  }

  /// Recomputes the remaining time. `None` when `handle` is stale or the
  /// slot is stopped; a finished tick also stops the slot.
  pub fn tick(
    &mut self,
    handle: CountdownHandle,
    now: DateTime<Utc>
  ) -> Option<CountdownTick> {
    if handle.generation != self.generation
    {
      trace!(
        stale = handle.generation,
        current = self.generation,
        "ignoring superseded countdown tick"
      );
      return None;
    }
    let target = self.target?;

    if now >= target {
      self.stop();
      return Some(CountdownTick {
        parts:    CountdownParts::zero(),
        finished: true
      });
    }

    Some(CountdownTick {
      parts:    CountdownParts::until(
        now, target
      ),
      finished: false
    })
  }
}
