//! # 数据访问服务层
//!
//! 每张表对应一个 service，借用同一个 `DatabaseConnection`。
//! 约束冲突由数据库在写入时报告，经 [`crate::error::LazydrobeError`] 分类后原样返回。

pub mod outfits;
pub mod products;
pub mod shared;
pub mod trends;
pub mod users;
pub mod wardrobe;
pub mod weather;

pub use outfits::{NewOutfit, OutfitWithItems, OutfitsService};
pub use products::{ImportReport, NewProductSuggestion, ProductListing, ProductsService, load_listings};
pub use shared::{PaginationInfo, PaginationParams, build_page};
pub use trends::{NewFashionTrend, TrendsService, trend_categories};
pub use users::{CreateUserRequest, UpdateUserRequest, UsersService};
pub use wardrobe::{NewWardrobeItem, UpdateWardrobeItem, WardrobeService, item_tags};
pub use weather::{NewWeatherObservation, WeatherService};
