//! 级联删除集成测试

use entity::{EcommerceProducts, FashionTrends, OutfitClothings, Outfits, Users, WardrobeItems, WeatherData};
use lazydrobe::services::{
    CreateUserRequest, NewFashionTrend, NewOutfit, NewProductSuggestion, NewWardrobeItem,
    NewWeatherObservation, OutfitsService, ProductsService, TrendsService, UsersService,
    WardrobeService, WeatherService,
};
use migration::{Migrator, MigratorTrait};
use pretty_assertions::assert_eq;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, EntityTrait, PaginatorTrait};

async fn setup_test_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);
    let db = Database::connect(options).await.expect("connect test db");
    Migrator::up(&db, None).await.expect("run migrations");
    db
}

/// 为用户建立一整套从属数据，返回 (user_id, 单品 ID 列表)
async fn seed_user(db: &DatabaseConnection, name: &str) -> (i32, Vec<i32>) {
    let user = UsersService::new(db)
        .with_password_cost(4)
        .create(&CreateUserRequest {
            username: name.to_string(),
            email: format!("{name}@example.com"),
            password: "secret123".to_string(),
            user_ip: None,
            location: Some("Seattle".to_string()),
            preferences: None,
        })
        .await
        .expect("create user");

    let wardrobe = WardrobeService::new(db);
    let mut item_ids = Vec::new();
    for clothing_type in ["Shirt", "Jeans", "Sneakers"] {
        let item = wardrobe
            .add_item(&NewWardrobeItem {
                user_id: user.user_id,
                clothing_type: Some(clothing_type.to_string()),
                ..Default::default()
            })
            .await
            .expect("add item");
        item_ids.push(item.item_id);
    }

    OutfitsService::new(db)
        .create(&NewOutfit {
            user_id: user.user_id,
            occasion: Some("Weekend".to_string()),
            item_ids: item_ids.clone(),
            ..Default::default()
        })
        .await
        .expect("create outfit");

    WeatherService::new(db)
        .record(&NewWeatherObservation {
            user_id: user.user_id,
            location: "Seattle".to_string(),
            ..Default::default()
        })
        .await
        .expect("record weather");

    ProductsService::new(db)
        .suggest(&NewProductSuggestion {
            user_id: Some(user.user_id),
            ebay_item_id: Some(format!("v1|{name}|0")),
            product_name: "Rain Jacket".to_string(),
            product_url: "https://www.ebay.com/itm/77".to_string(),
            ..Default::default()
        })
        .await
        .expect("suggest product");

    (user.user_id, item_ids)
}

#[tokio::test]
async fn deleting_user_removes_everything_they_own() {
    let db = setup_test_db().await;
    TrendsService::new(&db)
        .create(&NewFashionTrend {
            title: "Gorpcore".to_string(),
            ..Default::default()
        })
        .await
        .expect("create trend");

    let (doomed, _) = seed_user(&db, "doomed").await;
    let (survivor, _) = seed_user(&db, "survivor").await;

    UsersService::new(&db).delete(doomed).await.expect("delete user");

    assert_eq!(Users::find().count(&db).await.unwrap(), 1);
    assert_eq!(WardrobeItems::find().count(&db).await.unwrap(), 3);
    assert_eq!(Outfits::find().count(&db).await.unwrap(), 1);
    assert_eq!(OutfitClothings::find().count(&db).await.unwrap(), 3);
    assert_eq!(WeatherData::find().count(&db).await.unwrap(), 1);
    assert_eq!(EcommerceProducts::find().count(&db).await.unwrap(), 1);
    assert_eq!(FashionTrends::find().count(&db).await.unwrap(), 1);

    let remaining = WardrobeService::new(&db)
        .list_for_user(survivor, None)
        .await
        .unwrap();
    assert_eq!(remaining.len(), 3);
}

#[tokio::test]
async fn deleting_item_or_outfit_removes_pairings_only() {
    let db = setup_test_db().await;
    let (user_id, item_ids) = seed_user(&db, "jane").await;
    let outfits = OutfitsService::new(&db);
    let outfit_id = outfits.list_for_user(user_id).await.unwrap()[0].outfit.outfit_id;

    WardrobeService::new(&db)
        .delete_item(item_ids[0])
        .await
        .expect("delete item");
    let left: Vec<i32> = outfits
        .items_of(outfit_id)
        .await
        .unwrap()
        .into_iter()
        .map(|i| i.item_id)
        .collect();
    assert_eq!(left, item_ids[1..].to_vec());

    outfits.delete(outfit_id).await.expect("delete outfit");
    assert_eq!(OutfitClothings::find().count(&db).await.unwrap(), 0);
    assert_eq!(WardrobeItems::find().count(&db).await.unwrap(), 2);
    assert_eq!(Users::find().count(&db).await.unwrap(), 1);
}
