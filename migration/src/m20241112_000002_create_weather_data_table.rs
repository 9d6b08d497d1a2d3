use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WeatherData::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WeatherData::WeatherId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(WeatherData::UserId).integer().not_null())
                    .col(ColumnDef::new(WeatherData::Location).string_len(255).not_null())
                    .col(ColumnDef::new(WeatherData::Temperature).decimal_len(5, 2).null())
                    .col(ColumnDef::new(WeatherData::Precipitation).decimal_len(5, 2).null())
                    .col(ColumnDef::new(WeatherData::WindSpeed).decimal_len(5, 2).null())
                    .col(ColumnDef::new(WeatherData::Humidity).decimal_len(5, 2).null())
                    .col(
                        ColumnDef::new(WeatherData::DateFetched)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_weather_data_user_id")
                            .from(WeatherData::Table, WeatherData::UserId)
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
                    .name("idx_weather_data_user_id")
                    .table(WeatherData::Table)
                    .col(WeatherData::UserId)
                    .col(WeatherData::DateFetched)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WeatherData::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum WeatherData {
    Table,
    WeatherId,
    UserId,
    Location,
    Temperature,
    Precipitation,
    WindSpeed,
    Humidity,
    DateFetched,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    UserId,
}
