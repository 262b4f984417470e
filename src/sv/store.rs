use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{entity::AccountStatus, prelude::*};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
  Reseller,
  Client,
}

/// Tables carrying a denormalized copy of the account status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
  Profiles,
  Resellers,
  Clients,
}

impl fmt::Display for Table {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Profiles => "profiles",
      Self::Resellers => "resellers",
      Self::Clients => "clients",
    })
  }
}

/// Projection used by the reconciliation sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountRow {
  pub id: Uuid,
  pub kind: AccountKind,
  pub end_date: DateTime,
  pub status: AccountStatus,
}

/// Storage for account status and dates.
#[async_trait]
pub trait AccountStore: Send + Sync {
  /// Canonical write: updates the profile and the role row as one unit.
  ///
  /// Returns the backend's success signal. Fails with
  /// [`Error::RecordNotFound`] when `id` resolves to no account.
  async fn set_status(&self, id: Uuid, status: AccountStatus) -> Result<bool>;

  /// Direct single-table write, only used as a best-effort fallback.
  /// Returns the number of rows touched.
  async fn patch_status(
    &self,
    table: Table,
    id: Uuid,
    status: AccountStatus,
  ) -> Result<u64>;

  /// Every account with a known end date.
  async fn expirable(&self) -> Result<Vec<AccountRow>>;
}
