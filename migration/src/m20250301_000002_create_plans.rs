use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    // Only custom plans live here, built-in ones are compiled in
    manager
      .create_table(
        Table::create()
          .table(Plans::Table)
          .if_not_exists()
          .col(ColumnDef::new(Plans::Name).string().not_null().primary_key())
          .col(ColumnDef::new(Plans::Months).integer().not_null())
          .col(ColumnDef::new(Plans::CreatedAt).date_time().not_null())
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Plans::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Plans {
  Table,
  Name,
  Months,
  CreatedAt,
}
