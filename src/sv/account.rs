use async_trait::async_trait;
use sea_orm::{DatabaseTransaction, sea_query::Expr};
use serde::Serialize;

use crate::{
  entity::{AccountStatus, Role, client, profile, reseller},
  prelude::*,
  sv::{
    self,
    catalog::{Catalog, PlanTable},
    status::{self, Status},
    store::{AccountKind, AccountRow, AccountStore, Table},
    sync::{SyncReport, Synchronizer},
  },
};

/// Reseller or client, whichever the id belongs to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subscription {
  pub id: Uuid,
  pub kind: AccountKind,
  pub plan_name: String,
  pub start_date: DateTime,
  pub end_date: Option<DateTime>,
  pub status: AccountStatus,
}

impl From<reseller::Model> for Subscription {
  fn from(model: reseller::Model) -> Self {
    Self {
      id: model.id,
      kind: AccountKind::Reseller,
      plan_name: model.plan_name,
      start_date: model.start_date,
      end_date: model.end_date,
      status: model.status,
    }
  }
}

impl From<client::Model> for Subscription {
  fn from(model: client::Model) -> Self {
    Self {
      id: model.id,
      kind: AccountKind::Client,
      plan_name: model.plan_name,
      start_date: model.start_date,
      end_date: model.end_date,
      status: model.status,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpiringAccount {
  #[serde(flatten)]
  pub account: AccountRow,
  pub days_remaining: i64,
}

pub struct Account<'a> {
  db: &'a DatabaseConnection,
  plans: &'a PlanTable,
}

impl<'a> Account<'a> {
  pub fn new(db: &'a DatabaseConnection, plans: &'a PlanTable) -> Self {
    Self { db, plans }
  }

  fn catalog(&self) -> Catalog<'a, sv::Plan<'a>> {
    Catalog::new(self.plans, sv::Plan::new(self.db, self.plans))
  }

  /// New resellers wait behind the pending gate until an admin activates them.
  pub async fn create_reseller(
    &self,
    email: &str,
    full_name: Option<String>,
    plan_name: &str,
    start: Option<DateTime>,
  ) -> Result<reseller::Model> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
      return Err(Error::InvalidArgs(format!("Invalid email `{email}`")));
    }

    let taken = profile::Entity::find()
      .filter(profile::Column::Email.eq(email))
      .one(self.db)
      .await?;
    if taken.is_some() {
      return Err(Error::EmailExists(email.to_string()));
    }

    let now = Utc::now().naive_utc();
    let start = start.unwrap_or(now);
    let end = self.catalog().end_date(plan_name, Some(start)).await;
    let id = Uuid::new_v4();

    let txn = self.db.begin().await?;

    profile::ActiveModel {
      id: Set(id),
      email: Set(email.to_string()),
      full_name: Set(full_name),
      role: Set(Role::Reseller),
      status: Set(AccountStatus::Pending),
      created_at: Set(now),
    }
    .insert(&txn)
    .await?;

    let reseller = reseller::ActiveModel {
      id: Set(id),
      plan_name: Set(plan_name.to_string()),
      start_date: Set(start),
      end_date: Set(Some(end)),
      status: Set(AccountStatus::Pending),
      created_at: Set(now),
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    info!("Reseller {id} created on `{plan_name}` until {end}");
    Ok(reseller)
  }

  pub async fn create_client(
    &self,
    reseller_id: Option<Uuid>,
    name: &str,
    phone: Option<String>,
    plan_name: &str,
    start: Option<DateTime>,
  ) -> Result<client::Model> {
    let name = name.trim();
    if name.is_empty() {
      return Err(Error::InvalidArgs("Client name is empty".into()));
    }

    if let Some(reseller_id) = reseller_id
      && reseller::Entity::find_by_id(reseller_id).one(self.db).await?.is_none()
    {
      return Err(Error::RecordNotFound);
    }

    let now = Utc::now().naive_utc();
    let start = start.unwrap_or(now);
    let end = self.catalog().end_date(plan_name, Some(start)).await;
    let status = status::derive_at(end, None, now).status.persisted();

    let client = client::ActiveModel {
      id: Set(Uuid::new_v4()),
      reseller_id: Set(reseller_id),
      name: Set(name.to_string()),
      phone: Set(phone),
      plan_name: Set(plan_name.to_string()),
      start_date: Set(start),
      end_date: Set(Some(end)),
      status: Set(status),
      created_at: Set(now),
    }
    .insert(self.db)
    .await?;

    Ok(client)
  }

  pub async fn by_id(&self, id: Uuid) -> Result<Option<Subscription>> {
    if let Some(reseller) = reseller::Entity::find_by_id(id).one(self.db).await?
    {
      return Ok(Some(reseller.into()));
    }
    let client = client::Entity::find_by_id(id).one(self.db).await?;
    Ok(client.map(Into::into))
  }

  pub async fn get(&self, id: Uuid) -> Result<Subscription> {
    self.by_id(id).await?.ok_or(Error::RecordNotFound)
  }

  /// Writes the status currently implied by the stored dates.
  pub async fn resync(&self, id: Uuid) -> Result<SyncReport> {
    let sub = self.get(id).await?;
    let end = sub.end_date.ok_or_else(no_end_date)?;
    Synchronizer::new(self).synchronize(id, end, Some(sub.status)).await
  }

  /// Lifts the pending gate.
  pub async fn activate(&self, id: Uuid) -> Result<SyncReport> {
    let sub = self.get(id).await?;
    let end = sub.end_date.ok_or_else(no_end_date)?;
    Synchronizer::new(self).synchronize(id, end, None).await
  }

  /// Starts a fresh period today, optionally switching plan.
  pub async fn renew(
    &self,
    id: Uuid,
    plan_name: Option<&str>,
  ) -> Result<SyncReport> {
    let sub = self.get(id).await?;
    let plan_name = plan_name.unwrap_or(&sub.plan_name);

    let start = Utc::now().naive_utc();
    let end = self.catalog().end_date(plan_name, Some(start)).await;

    self.write_period(&sub, plan_name, start, end).await?;
    info!("{:?} {id} renewed on `{plan_name}` until {end}", sub.kind);

    Synchronizer::new(self).synchronize(id, end, Some(sub.status)).await
  }

  /// Changes the plan of an account. The end date is recomputed from the
  /// existing start date only when the plan actually changes and no explicit
  /// `end_date` is given.
  pub async fn change_plan(
    &self,
    id: Uuid,
    plan_name: &str,
    end_date: Option<DateTime>,
  ) -> Result<SyncReport> {
    let sub = self.get(id).await?;

    let end = match (end_date, sub.end_date) {
      (Some(end), _) => end,
      (None, Some(end)) if sub.plan_name == plan_name => end,
      _ => self.catalog().end_date(plan_name, Some(sub.start_date)).await,
    };

    self.write_period(&sub, plan_name, sub.start_date, end).await?;
    Synchronizer::new(self).synchronize(id, end, Some(sub.status)).await
  }

  /// Active accounts within `window_days` of their end date.
  pub async fn expiring(
    &self,
    window_days: u32,
  ) -> Result<Vec<ExpiringAccount>> {
    let mut expiring: Vec<_> = self
      .expirable()
      .await?
      .into_iter()
      .filter_map(|account| {
        let derived = status::derive(account.end_date, Some(account.status));
        (derived.alert(window_days) == Status::Expiring).then_some(
          ExpiringAccount { account, days_remaining: derived.days_remaining },
        )
      })
      .collect();

    expiring.sort_by_key(|e| e.account.end_date);
    Ok(expiring)
  }

  async fn write_period(
    &self,
    sub: &Subscription,
    plan_name: &str,
    start: DateTime,
    end: DateTime,
  ) -> Result<()> {
    match sub.kind {
      AccountKind::Reseller => {
        reseller::Entity::update_many()
          .col_expr(reseller::Column::PlanName, Expr::value(plan_name))
          .col_expr(reseller::Column::StartDate, Expr::value(start))
          .col_expr(reseller::Column::EndDate, Expr::value(end))
          .filter(reseller::Column::Id.eq(sub.id))
          .exec(self.db)
          .await?;
      }
      AccountKind::Client => {
        client::Entity::update_many()
          .col_expr(client::Column::PlanName, Expr::value(plan_name))
          .col_expr(client::Column::StartDate, Expr::value(start))
          .col_expr(client::Column::EndDate, Expr::value(end))
          .filter(client::Column::Id.eq(sub.id))
          .exec(self.db)
          .await?;
      }
    }
    Ok(())
  }
}

fn no_end_date() -> Error {
  Error::InvalidArgs("Account has no end date".into())
}

async fn update_table(
  conn: &impl ConnectionTrait,
  table: Table,
  id: Uuid,
  status: AccountStatus,
) -> Result<u64> {
  let value = Expr::value(status.to_value());
  let res = match table {
    Table::Profiles => {
      profile::Entity::update_many()
        .col_expr(profile::Column::Status, value)
        .filter(profile::Column::Id.eq(id))
        .exec(conn)
        .await?
    }
    Table::Resellers => {
      reseller::Entity::update_many()
        .col_expr(reseller::Column::Status, value)
        .filter(reseller::Column::Id.eq(id))
        .exec(conn)
        .await?
    }
    Table::Clients => {
      client::Entity::update_many()
        .col_expr(client::Column::Status, value)
        .filter(client::Column::Id.eq(id))
        .exec(conn)
        .await?
    }
  };
  Ok(res.rows_affected)
}

async fn rollback(txn: DatabaseTransaction) -> Result<()> {
  txn.rollback().await?;
  Ok(())
}

#[async_trait]
impl AccountStore for Account<'_> {
  async fn set_status(&self, id: Uuid, status: AccountStatus) -> Result<bool> {
    let txn = self.db.begin().await?;

    let role_rows = update_table(&txn, Table::Resellers, id, status).await?
      + update_table(&txn, Table::Clients, id, status).await?;

    if role_rows == 0 {
      rollback(txn).await?;
      return Err(Error::RecordNotFound);
    }
    if role_rows > 1 {
      // the same id in both role tables, refuse to guess
      rollback(txn).await?;
      return Ok(false);
    }

    update_table(&txn, Table::Profiles, id, status).await?;
    txn.commit().await?;
    Ok(true)
  }

  async fn patch_status(
    &self,
    table: Table,
    id: Uuid,
    status: AccountStatus,
  ) -> Result<u64> {
    update_table(self.db, table, id, status).await
  }

  async fn expirable(&self) -> Result<Vec<AccountRow>> {
    let resellers = reseller::Entity::find()
      .filter(reseller::Column::EndDate.is_not_null())
      .all(self.db)
      .await?;
    let clients = client::Entity::find()
      .filter(client::Column::EndDate.is_not_null())
      .all(self.db)
      .await?;

    let rows = resellers
      .into_iter()
      .map(Subscription::from)
      .chain(clients.into_iter().map(Subscription::from))
      .filter_map(|sub| {
        Some(AccountRow {
          id: sub.id,
          kind: sub.kind,
          end_date: sub.end_date?,
          status: sub.status,
        })
      })
      .collect();

    Ok(rows)
  }
}
