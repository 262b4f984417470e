use async_trait::async_trait;

use crate::{
  entity::{client, plan, reseller},
  prelude::*,
  sv::catalog::{PlanDefinition, PlanLookup, PlanTable},
};

/// Longest custom plan an administrator may define.
pub const MAX_MONTHS: u32 = 120;

pub struct Plan<'a> {
  db: &'a DatabaseConnection,
  table: &'a PlanTable,
}

impl<'a> Plan<'a> {
  pub fn new(db: &'a DatabaseConnection, table: &'a PlanTable) -> Self {
    Self { db, table }
  }

  /// Built-in plans followed by custom ones. Every stored plan is custom.
  pub async fn all(&self) -> Result<Vec<PlanDefinition>> {
    let custom = plan::Entity::find()
      .order_by_asc(plan::Column::Months)
      .order_by_asc(plan::Column::Name)
      .all(self.db)
      .await?;

    let mut plans = self.table.definitions();
    plans.extend(custom.into_iter().map(|plan| PlanDefinition {
      months: u32::try_from(plan.months).unwrap_or(0),
      name: plan.name,
      is_custom: true,
    }));
    Ok(plans)
  }

  pub async fn create(&self, name: &str, months: u32) -> Result<plan::Model> {
    let name = name.trim();
    if name.is_empty() {
      return Err(Error::InvalidArgs("Plan name is empty".into()));
    }
    if months > MAX_MONTHS {
      return Err(Error::InvalidArgs(format!(
        "Plan can't last more than {MAX_MONTHS} months"
      )));
    }
    if self.table.contains(name)
      || plan::Entity::find_by_id(name).one(self.db).await?.is_some()
    {
      return Err(Error::PlanExists(name.to_string()));
    }

    let plan = plan::ActiveModel {
      name: Set(name.to_string()),
      months: Set(months as i32),
      created_at: Set(Utc::now().naive_utc()),
    };

    Ok(plan.insert(self.db).await?)
  }

  /// Number of resellers and clients subscribed to `name`.
  pub async fn usage(&self, name: &str) -> Result<u64> {
    let resellers = reseller::Entity::find()
      .filter(reseller::Column::PlanName.eq(name))
      .count(self.db)
      .await?;
    let clients = client::Entity::find()
      .filter(client::Column::PlanName.eq(name))
      .count(self.db)
      .await?;
    Ok(resellers + clients)
  }

  pub async fn delete(&self, name: &str) -> Result<()> {
    if self.table.contains(name) {
      return Err(Error::InvalidArgs(format!(
        "Built-in plan `{name}` can't be deleted"
      )));
    }

    let plan = plan::Entity::find_by_id(name)
      .one(self.db)
      .await?
      .ok_or_else(|| Error::PlanNotFound(name.to_string()))?;

    let in_use = self.usage(name).await?;
    if in_use > 0 {
      return Err(Error::PlanInUse(name.to_string(), in_use));
    }

    plan::Entity::delete_by_id(plan.name).exec(self.db).await?;
    Ok(())
  }
}

#[async_trait]
impl PlanLookup for Plan<'_> {
  async fn months_for_plan(&self, name: &str) -> Result<Option<u32>> {
    let plan = plan::Entity::find_by_id(name).one(self.db).await?;
    Ok(plan.and_then(|plan| u32::try_from(plan.months).ok()))
  }
}
