use sea_orm_migration::prelude::*;

use super::m20250301_000003_create_resellers::Resellers;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Clients::Table)
          .if_not_exists()
          .col(ColumnDef::new(Clients::Id).uuid().not_null().primary_key())
          .col(ColumnDef::new(Clients::ResellerId).uuid().null())
          .col(ColumnDef::new(Clients::Name).string().not_null())
          .col(ColumnDef::new(Clients::Phone).string().null())
          .col(ColumnDef::new(Clients::PlanName).string().not_null())
          .col(ColumnDef::new(Clients::StartDate).date_time().not_null())
          .col(ColumnDef::new(Clients::EndDate).date_time().null())
          .col(
            ColumnDef::new(Clients::Status)
              .string()
              .not_null()
              .default("active"),
          )
          .col(ColumnDef::new(Clients::CreatedAt).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_clients_reseller")
              .from(Clients::Table, Clients::ResellerId)
              .to(Resellers::Table, Resellers::Id)
              .on_delete(ForeignKeyAction::SetNull),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_clients_reseller")
          .table(Clients::Table)
          .col(Clients::ResellerId)
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_clients_end_date")
          .table(Clients::Table)
          .col(Clients::EndDate)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Clients::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Clients {
  Table,
  Id,
  ResellerId,
  Name,
  Phone,
  PlanName,
  StartDate,
  EndDate,
  Status,
  CreatedAt,
}
