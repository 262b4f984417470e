use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::{AccountStatus, client, profile};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "resellers")]
pub struct Model {
  #[sea_orm(primary_key, auto_increment = false)]
  pub id: Uuid,
  pub plan_name: String,
  pub start_date: DateTime,
  pub end_date: Option<DateTime>,
  pub status: AccountStatus,
  pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "profile::Entity",
    from = "Column::Id",
    to = "profile::Column::Id"
  )]
  Profile,
  #[sea_orm(has_many = "client::Entity")]
  Clients,
}

impl Related<profile::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Profile.def()
  }
}

impl Related<client::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Clients.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
