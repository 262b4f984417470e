use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::reseller;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum Role {
  #[sea_orm(string_value = "admin")]
  Admin,
  #[sea_orm(string_value = "reseller")]
  Reseller,
  #[sea_orm(string_value = "client")]
  #[default]
  Client,
}

/// Status as persisted in `profiles`, `resellers` and `clients`.
///
/// `Expired` only exists so legacy rows can still be read. It is a synonym of
/// `Inactive` and is never written back.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
  #[sea_orm(string_value = "pending")]
  #[default]
  Pending,
  #[sea_orm(string_value = "active")]
  Active,
  #[sea_orm(string_value = "inactive")]
  Inactive,
  #[sea_orm(string_value = "expired")]
  Expired,
}

impl AccountStatus {
  /// Whether the stored value already marks the plan as lapsed.
  pub fn is_lapsed(self) -> bool {
    matches!(self, Self::Inactive | Self::Expired)
  }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
  #[sea_orm(primary_key, auto_increment = false)]
  pub id: Uuid,
  #[sea_orm(unique)]
  pub email: String,
  pub full_name: Option<String>,
  pub role: Role,
  pub status: AccountStatus,
  pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(has_one = "reseller::Entity")]
  Reseller,
}

impl Related<reseller::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Reseller.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
