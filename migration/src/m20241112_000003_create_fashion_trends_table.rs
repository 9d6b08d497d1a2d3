use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 趋势数据为独立参考数据，不关联任何用户
        manager
            .create_table(
                Table::create()
                    .table(FashionTrends::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FashionTrends::TrendId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FashionTrends::Title).string_len(255).not_null())
                    .col(ColumnDef::new(FashionTrends::Description).text().null())
                    .col(ColumnDef::new(FashionTrends::Categories).text().null())
                    .col(ColumnDef::new(FashionTrends::ImageUrl).string_len(1024).null())
                    .col(
                        ColumnDef::new(FashionTrends::DateFetched)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(FashionTrends::SourceUrl).string_len(1024).null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FashionTrends::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum FashionTrends {
    Table,
    TrendId,
    Title,
    Description,
    Categories,
    ImageUrl,
    DateFetched,
    SourceUrl,
}
