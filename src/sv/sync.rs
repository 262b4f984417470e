use serde::Serialize;

use crate::{
  entity::AccountStatus,
  prelude::*,
  sv::{
    status::{self, Derived},
    store::{AccountStore, Table},
  },
};

/// Direct writes attempted before the canonical one, in order.
/// They exist for partially migrated schemas and may fail freely.
const FALLBACKS: [Table; 3] =
  [Table::Profiles, Table::Resellers, Table::Clients];

#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
  pub id: Uuid,
  pub derived: Derived,
  pub written: AccountStatus,
  /// Failures of the fallback writes, if any.
  pub diagnostics: Vec<String>,
}

pub struct Synchronizer<'a, S: ?Sized> {
  store: &'a S,
}

impl<'a, S: AccountStore + ?Sized> Synchronizer<'a, S> {
  pub fn new(store: &'a S) -> Self {
    Self { store }
  }

  pub async fn synchronize(
    &self,
    id: Uuid,
    end_date: DateTime,
    current: Option<AccountStatus>,
  ) -> Result<SyncReport> {
    self.synchronize_at(id, end_date, current, Utc::now().naive_utc()).await
  }

  /// Derives the status at `now` and writes it to every copy of the account.
  ///
  /// Only the canonical write decides the outcome.
  pub async fn synchronize_at(
    &self,
    id: Uuid,
    end_date: DateTime,
    current: Option<AccountStatus>,
    now: DateTime,
  ) -> Result<SyncReport> {
    let derived = status::derive_at(end_date, current, now);
    let written = derived.status.persisted();

    let mut diagnostics = Vec::new();
    for table in FALLBACKS {
      match self.store.patch_status(table, id, written).await {
        Ok(rows) => trace!("fallback {table} for {id}: {rows} row(s)"),
        Err(err) => {
          warn!("fallback {table} for {id} failed: {err}");
          diagnostics.push(format!("{table}: {err}"));
        }
      }
    }

    match self.store.set_status(id, written).await {
      Ok(true) => {}
      Ok(false) => {
        return Err(Error::Sync { id, signal: "false".into() });
      }
      Err(Error::RecordNotFound) => return Err(Error::RecordNotFound),
      Err(err) => return Err(Error::Sync { id, signal: err.to_string() }),
    }

    debug!(
      "Synchronized {id}: {:?} -> {:?} ({} days)",
      current, written, derived.days_remaining
    );

    Ok(SyncReport { id, derived, written, diagnostics })
  }
}
