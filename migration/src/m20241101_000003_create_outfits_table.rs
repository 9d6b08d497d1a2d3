use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Outfits::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Outfits::OutfitId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Outfits::UserId).integer().not_null())
                    .col(ColumnDef::new(Outfits::Occasion).string_len(255).null())
                    .col(ColumnDef::new(Outfits::ForWeather).string_len(255).null())
                    // 0.00 - 9.99
                    .col(ColumnDef::new(Outfits::TrendScore).decimal_len(3, 2).null())
                    .col(
                        ColumnDef::new(Outfits::DateSuggested)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_outfits_user_id")
                            .from(Outfits::Table, Outfits::UserId)
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
                    .name("idx_outfits_user_id")
                    .table(Outfits::Table)
                    .col(Outfits::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Outfits::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Outfits {
    Table,
    OutfitId,
    UserId,
    Occasion,
    ForWeather,
    TrendScore,
    DateSuggested,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    UserId,
}
