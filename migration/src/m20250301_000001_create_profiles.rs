use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Profiles::Table)
          .if_not_exists()
          .col(ColumnDef::new(Profiles::Id).uuid().not_null().primary_key())
          .col(ColumnDef::new(Profiles::Email).string().not_null().unique_key())
          .col(ColumnDef::new(Profiles::FullName).string().null())
          .col(
            ColumnDef::new(Profiles::Role)
              .string()
              .not_null()
              .default("client"),
          )
          .col(
            ColumnDef::new(Profiles::Status)
              .string()
              .not_null()
              .default("pending"),
          )
          .col(ColumnDef::new(Profiles::CreatedAt).date_time().not_null())
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Profiles::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Profiles {
  Table,
  Id,
  Email,
  FullName,
  Role,
  Status,
  CreatedAt,
}
