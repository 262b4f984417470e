use serde::Serialize;

use crate::{entity::AccountStatus, prelude::*};

/// Lifecycle status derived from dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
  Pending,
  Active,
  /// Active but close to the end date. Only used for alerts.
  Expiring,
  Expired,
}

impl Status {
  /// The only place where a lifecycle status becomes a stored one.
  /// Storage has no `expired` value, a lapsed plan is stored as `inactive`.
  pub fn persisted(self) -> AccountStatus {
    match self {
      Self::Pending => AccountStatus::Pending,
      Self::Active | Self::Expiring => AccountStatus::Active,
      Self::Expired => AccountStatus::Inactive,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Derived {
  pub status: Status,
  pub is_expired: bool,
  /// Whole calendar days between today and the end date, negative once past.
  pub days_remaining: i64,
}

impl Derived {
  /// Alert classification: active accounts within `window_days` of their end
  /// date are reported as [`Status::Expiring`].
  pub fn alert(&self, window_days: u32) -> Status {
    match self.status {
      Status::Active if self.days_remaining <= i64::from(window_days) => {
        Status::Expiring
      }
      status => status,
    }
  }
}

pub fn derive(end_date: DateTime, stored: Option<AccountStatus>) -> Derived {
  derive_at(end_date, stored, Utc::now().naive_utc())
}

/// Pure status derivation relative to `now`.
///
/// Days are counted between UTC midnights so the result doesn't move with the
/// time of day. A `pending` stored status always wins.
pub fn derive_at(
  end_date: DateTime,
  stored: Option<AccountStatus>,
  now: DateTime,
) -> Derived {
  let days_remaining =
    end_date.date().signed_duration_since(now.date()).num_days();
  let is_expired = days_remaining < 0;

  let status = if stored == Some(AccountStatus::Pending) {
    Status::Pending
  } else if is_expired {
    Status::Expired
  } else {
    Status::Active
  };

  Derived { status, is_expired, days_remaining }
}
