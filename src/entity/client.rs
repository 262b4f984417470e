use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::{AccountStatus, reseller};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "clients")]
pub struct Model {
  #[sea_orm(primary_key, auto_increment = false)]
  pub id: Uuid,
  pub reseller_id: Option<Uuid>,
  pub name: String,
  pub phone: Option<String>,
  pub plan_name: String,
  pub start_date: DateTime,
  pub end_date: Option<DateTime>,
  pub status: AccountStatus,
  pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "reseller::Entity",
    from = "Column::ResellerId",
    to = "reseller::Column::Id"
  )]
  Reseller,
}

impl Related<reseller::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Reseller.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
