use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EcommerceProducts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EcommerceProducts::ProductId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    // 批量导入的商品可以暂不归属任何用户
                    .col(ColumnDef::new(EcommerceProducts::UserId).integer().null())
                    .col(ColumnDef::new(EcommerceProducts::EbayItemId).string_len(255).null())
                    .col(
                        ColumnDef::new(EcommerceProducts::SuggestedItemType)
                            .string_len(255)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(EcommerceProducts::ProductName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(EcommerceProducts::Price).decimal_len(10, 2).null())
                    .col(
                        ColumnDef::new(EcommerceProducts::ProductUrl)
                            .string_len(1024)
                            .not_null(),
                    )
                    .col(ColumnDef::new(EcommerceProducts::ImageUrl).string_len(1024).null())
                    .col(
                        ColumnDef::new(EcommerceProducts::DateSuggested)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ecommerce_products_user_id")
                            .from(EcommerceProducts::Table, EcommerceProducts::UserId)
                            .to(Users::Table, Users::UserId)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_ecommerce_products_ebay_item_id")
                    .table(EcommerceProducts::Table)
                    .col(EcommerceProducts::EbayItemId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_ecommerce_products_user_id")
                    .table(EcommerceProducts::Table)
                    .col(EcommerceProducts::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EcommerceProducts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum EcommerceProducts {
    Table,
    ProductId,
    UserId,
    EbayItemId,
    SuggestedItemType,
    ProductName,
    Price,
    ProductUrl,
    ImageUrl,
    DateSuggested,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    UserId,
}
