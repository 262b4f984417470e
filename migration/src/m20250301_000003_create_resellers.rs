use sea_orm_migration::prelude::*;

use super::m20250301_000001_create_profiles::Profiles;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    // Reseller id is the profile id, there is no separate user_id column
    manager
      .create_table(
        Table::create()
          .table(Resellers::Table)
          .if_not_exists()
          .col(ColumnDef::new(Resellers::Id).uuid().not_null().primary_key())
          .col(ColumnDef::new(Resellers::PlanName).string().not_null())
          .col(ColumnDef::new(Resellers::StartDate).date_time().not_null())
          .col(ColumnDef::new(Resellers::EndDate).date_time().null())
          .col(
            ColumnDef::new(Resellers::Status)
              .string()
              .not_null()
              .default("pending"),
          )
          .col(ColumnDef::new(Resellers::CreatedAt).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_resellers_profile")
              .from(Resellers::Table, Resellers::Id)
              .to(Profiles::Table, Profiles::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_resellers_end_date")
          .table(Resellers::Table)
          .col(Resellers::EndDate)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Resellers::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Resellers {
  Table,
  Id,
  PlanName,
  StartDate,
  EndDate,
  Status,
  CreatedAt,
}
