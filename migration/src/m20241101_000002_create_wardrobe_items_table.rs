use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WardrobeItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WardrobeItems::ItemId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(WardrobeItems::UserId).integer().not_null())
                    .col(ColumnDef::new(WardrobeItems::ClothingType).string_len(255).null())
                    .col(ColumnDef::new(WardrobeItems::ForWeather).string_len(255).null())
                    .col(ColumnDef::new(WardrobeItems::Fabric).string_len(255).null())
                    .col(ColumnDef::new(WardrobeItems::Color).string_len(255).null())
                    .col(ColumnDef::new(WardrobeItems::Size).string_len(255).null())
                    .col(ColumnDef::new(WardrobeItems::Tags).json().null())
                    .col(ColumnDef::new(WardrobeItems::ImageUrl).string_len(1024).null())
                    .col(
                        ColumnDef::new(WardrobeItems::DateAdded)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_wardrobe_items_user_id")
                            .from(WardrobeItems::Table, WardrobeItems::UserId)
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
                    .name("idx_wardrobe_items_user_id")
                    .table(WardrobeItems::Table)
                    .col(WardrobeItems::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WardrobeItems::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum WardrobeItems {
    Table,
    ItemId,
    UserId,
    ClothingType,
    ForWeather,
    Fabric,
    Color,
    Size,
    Tags,
    ImageUrl,
    DateAdded,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    UserId,
}
