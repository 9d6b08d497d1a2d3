use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OutfitClothings::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(OutfitClothings::OutfitId).integer().not_null())
                    .col(ColumnDef::new(OutfitClothings::ItemId).integer().not_null())
                    // 同一件单品不能重复加入同一套搭配
                    .primary_key(
                        Index::create()
                            .name("pk_outfit_clothings")
                            .col(OutfitClothings::OutfitId)
                            .col(OutfitClothings::ItemId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_outfit_clothings_outfit_id")
                            .from(OutfitClothings::Table, OutfitClothings::OutfitId)
                            .to(Outfits::Table, Outfits::OutfitId)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_outfit_clothings_item_id")
                            .from(OutfitClothings::Table, OutfitClothings::ItemId)
                            .to(WardrobeItems::Table, WardrobeItems::ItemId)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 反向查询：某件单品出现在哪些搭配中
        manager
            .create_index(
                Index::create()
                    .name("idx_outfit_clothings_item_id")
                    .table(OutfitClothings::Table)
                    .col(OutfitClothings::ItemId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OutfitClothings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum OutfitClothings {
    Table,
    OutfitId,
    ItemId,
}

#[derive(DeriveIden)]
enum Outfits {
    Table,
    OutfitId,
}

#[derive(DeriveIden)]
enum WardrobeItems {
    Table,
    ItemId,
}
