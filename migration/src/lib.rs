pub use sea_orm_migration::prelude::*;

mod m20241101_000001_create_users_table;
mod m20241101_000002_create_wardrobe_items_table;
mod m20241101_000003_create_outfits_table;
mod m20241112_000001_create_outfit_clothings_table;
mod m20241112_000002_create_weather_data_table;
mod m20241112_000003_create_fashion_trends_table;
mod m20241120_000001_create_ecommerce_products_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20241101_000001_create_users_table::Migration),
            Box::new(m20241101_000002_create_wardrobe_items_table::Migration),
            Box::new(m20241101_000003_create_outfits_table::Migration),
            Box::new(m20241112_000001_create_outfit_clothings_table::Migration),
            Box::new(m20241112_000002_create_weather_data_table::Migration),
            Box::new(m20241112_000003_create_fashion_trends_table::Migration),
            Box::new(m20241120_000001_create_ecommerce_products_table::Migration),
        ]
    }
}

/// 表名，按外键依赖顺序排列（父表在前）
pub const TABLES: [&str; 7] = [
    "users",
    "wardrobe_items",
    "outfits",
    "outfit_clothings",
    "weather_data",
    "fashion_trends",
    "ecommerce_products",
];
