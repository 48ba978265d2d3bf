use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Exchange::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Exchange::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Exchange::FetchTimestamp)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Exchange::ItemName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Exchange::ItemId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Exchange::HighPrice)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Exchange::LowPrice)
                            .big_integer()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // The listing page sorts on item_name
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_exchange_item_name")
                    .table(Exchange::Table)
                    .col(Exchange::ItemName)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Exchange::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Exchange {
    Table,
    Id,
    FetchTimestamp,
    ItemName,
    ItemId,
    HighPrice,
    LowPrice,
}
