//! # 用户实体定义
//!
//! 用户基础信息表的 Sea-ORM 实体模型，其余按用户归属的表都引用它

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 用户实体
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub user_id: i32,
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    /// bcrypt 哈希，不保存明文
    #[serde(skip_serializing)]
    pub password: String,
    pub user_ip: Option<String>,
    pub location: Option<String>,
    #[sea_orm(column_type = "Json", nullable)]
    pub preferences: Option<Json>,
    pub date_joined: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::wardrobe_items::Entity")]
    WardrobeItems,
    #[sea_orm(has_many = "super::outfits::Entity")]
    Outfits,
    #[sea_orm(has_many = "super::weather_data::Entity")]
    WeatherData,
    #[sea_orm(has_many = "super::ecommerce_products::Entity")]
    EcommerceProducts,
}

impl Related<super::wardrobe_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WardrobeItems.def()
    }
}

impl Related<super::outfits::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Outfits.def()
    }
}

impl Related<super::weather_data::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WeatherData.def()
    }
}

impl Related<super::ecommerce_products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EcommerceProducts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
