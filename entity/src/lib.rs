//! # Entity 模块
//!
//! 包含所有 Sea-ORM 实体定义

pub mod users;
pub mod wardrobe_items;
pub mod outfits;
pub mod outfit_clothings;
pub mod weather_data;
pub mod fashion_trends;
pub mod ecommerce_products;

pub use users::Entity as Users;
pub use wardrobe_items::Entity as WardrobeItems;
pub use outfits::Entity as Outfits;
pub use outfit_clothings::Entity as OutfitClothings;
pub use weather_data::Entity as WeatherData;
pub use fashion_trends::Entity as FashionTrends;
pub use ecommerce_products::Entity as EcommerceProducts;
