use crate::{
  entity::AccountStatus,
  prelude::*,
  sv::{
    status::{self, Derived},
    store::{AccountRow, AccountStore},
    sync::Synchronizer,
  },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Drift {
  /// Stored as active but the plan has lapsed.
  Expire,
  /// Stored as lapsed but the end date moved forward out of band.
  Reactivate,
}

/// Whether the stored status of `row` disagrees with `derived`.
/// Pending accounts are left alone, the gate is lifted by activation only.
pub fn drift(row: &AccountRow, derived: &Derived) -> Option<Drift> {
  if row.status == AccountStatus::Pending {
    return None;
  }

  match (derived.is_expired, row.status.is_lapsed()) {
    (true, false) => Some(Drift::Expire),
    (false, true) => Some(Drift::Reactivate),
    _ => None,
  }
}

/// Reconciles stored against derived status for every account.
pub struct Sweep<'a, S: ?Sized> {
  store: &'a S,
}

impl<'a, S: AccountStore + ?Sized> Sweep<'a, S> {
  pub fn new(store: &'a S) -> Self {
    Self { store }
  }

  pub async fn run(&self) -> Result<u64> {
    self.run_at(Utc::now().naive_utc()).await
  }

  /// Returns how many accounts were changed. Accounts are processed one at a
  /// time and a failing account never stops the rest.
  pub async fn run_at(&self, now: DateTime) -> Result<u64> {
    let rows = self.store.expirable().await?;
    let sync = Synchronizer::new(self.store);
    let total = rows.len();

    let mut changed = 0;
    for row in rows {
      let derived = status::derive_at(row.end_date, Some(row.status), now);
      let Some(reason) = drift(&row, &derived) else {
        continue;
      };

      let synced = sync
        .synchronize_at(row.id, row.end_date, Some(row.status), now)
        .await;

      match synced {
        Ok(report) => {
          info!(
            "Sweep: {:?} {} {:?} ({:?} -> {:?})",
            row.kind, row.id, reason, row.status, report.written
          );
          changed += 1;
        }
        Err(err) => {
          error!("Sweep: failed to sync {:?} {}: {}", row.kind, row.id, err);
        }
      }
    }

    debug!("Sweep done: {changed}/{total} account(s) changed");
    Ok(changed)
  }
}
