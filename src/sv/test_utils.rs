//! Shared test utilities: database setup and in-memory collaborators

use std::{collections::HashSet, sync::Mutex};

use async_trait::async_trait;
use sea_orm::DbErr;

use crate::{
  entity::AccountStatus,
  prelude::*,
  sv::{
    catalog::PlanLookup,
    store::{AccountKind, AccountRow, AccountStore, Table},
  },
};

pub mod test_db {
  use sea_orm::{
    ConnectionTrait, Database, DatabaseConnection, DbBackend, Schema,
  };

  use crate::entity::*;

  /// Creates an in-memory SQLite database with all required tables
  pub async fn setup() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    let schema = Schema::new(DbBackend::Sqlite);

    let stmt = schema.create_table_from_entity(profile::Entity);
    db.execute(db.get_database_backend().build(&stmt)).await.unwrap();

    let stmt = schema.create_table_from_entity(plan::Entity);
    db.execute(db.get_database_backend().build(&stmt)).await.unwrap();

    let stmt = schema.create_table_from_entity(reseller::Entity);
    db.execute(db.get_database_backend().build(&stmt)).await.unwrap();

    let stmt = schema.create_table_from_entity(client::Entity);
    db.execute(db.get_database_backend().build(&stmt)).await.unwrap();

    db
  }
}

/// Lookup that always fails, as if the catalog were unreachable.
pub struct FailingLookup;

#[async_trait]
impl PlanLookup for FailingLookup {
  async fn months_for_plan(&self, _: &str) -> Result<Option<u32>> {
    Err(Error::Db(DbErr::Custom("connection refused".into())))
  }
}

pub struct StaticLookup(HashMap<String, u32>);

impl StaticLookup {
  pub fn new<const N: usize>(plans: [(&str, u32); N]) -> Self {
    Self(plans.into_iter().map(|(name, m)| (name.to_string(), m)).collect())
  }
}

#[async_trait]
impl PlanLookup for StaticLookup {
  async fn months_for_plan(&self, name: &str) -> Result<Option<u32>> {
    Ok(self.0.get(name).copied())
  }
}

type Write = (Option<Table>, Uuid, AccountStatus);

/// In-memory [`AccountStore`] with fault injection.
///
/// Canonical writes update the account map. Fallback writes are only
/// recorded, so tests always observe the canonical copy.
#[derive(Default)]
pub struct MemoryStore {
  accounts: Mutex<HashMap<Uuid, AccountRow>>,
  writes: Mutex<Vec<Write>>,
  failing: Mutex<HashSet<Uuid>>,
  rejected: Mutex<HashSet<Uuid>>,
  fail_patches: bool,
  fail_reads: bool,
}

impl MemoryStore {
  pub fn failing_patches(self) -> Self {
    Self { fail_patches: true, ..self }
  }

  pub fn failing_reads(self) -> Self {
    Self { fail_reads: true, ..self }
  }

  pub fn insert(
    &self,
    kind: AccountKind,
    end_date: DateTime,
    status: AccountStatus,
  ) -> Uuid {
    let id = Uuid::new_v4();
    let row = AccountRow { id, kind, end_date, status };
    self.accounts.lock().unwrap().insert(id, row);
    id
  }

  /// Canonical write for `id` fails with an error.
  pub fn fail_canonical(&self, id: Uuid) {
    self.failing.lock().unwrap().insert(id);
  }

  /// Canonical write for `id` returns a falsy signal.
  pub fn reject_canonical(&self, id: Uuid) {
    self.rejected.lock().unwrap().insert(id);
  }

  pub fn status(&self, id: Uuid) -> Option<AccountStatus> {
    self.accounts.lock().unwrap().get(&id).map(|row| row.status)
  }

  pub fn writes(&self) -> Vec<Write> {
    self.writes.lock().unwrap().clone()
  }
}

#[async_trait]
impl AccountStore for MemoryStore {
  async fn set_status(&self, id: Uuid, status: AccountStatus) -> Result<bool> {
    if self.failing.lock().unwrap().contains(&id) {
      return Err(Error::Db(DbErr::Custom("rpc timed out".into())));
    }
    if self.rejected.lock().unwrap().contains(&id) {
      return Ok(false);
    }

    let mut accounts = self.accounts.lock().unwrap();
    let row = accounts.get_mut(&id).ok_or(Error::RecordNotFound)?;
    row.status = status;
    self.writes.lock().unwrap().push((None, id, status));
    Ok(true)
  }

  async fn patch_status(
    &self,
    table: Table,
    id: Uuid,
    status: AccountStatus,
  ) -> Result<u64> {
    if self.fail_patches {
      return Err(Error::Db(DbErr::Custom(format!(
        "column {table}.status does not exist"
      ))));
    }
    self.writes.lock().unwrap().push((Some(table), id, status));
    Ok(1)
  }

  async fn expirable(&self) -> Result<Vec<AccountRow>> {
    if self.fail_reads {
      return Err(Error::Db(DbErr::Custom("permission denied".into())));
    }
    Ok(self.accounts.lock().unwrap().values().cloned().collect())
  }
}
