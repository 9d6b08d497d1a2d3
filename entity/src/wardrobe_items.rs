//! # 衣橱单品实体定义

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 用户拥有的一件衣物
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "wardrobe_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub item_id: i32,
    pub user_id: i32,
    pub clothing_type: Option<String>,
    /// 适用季节/天气
    pub for_weather: Option<String>,
    pub fabric: Option<String>,
    pub color: Option<String>,
    pub size: Option<String>,
    /// 字符串数组
    #[sea_orm(column_type = "Json", nullable)]
    pub tags: Option<Json>,
    pub image_url: Option<String>,
    pub date_added: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::UserId",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::outfit_clothings::Entity")]
    OutfitClothings,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::outfit_clothings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OutfitClothings.def()
    }
}

// 通过中间表与 outfits 建立多对多关系
impl Related<super::outfits::Entity> for Entity {
    fn to() -> RelationDef {
        super::outfit_clothings::Relation::Outfit.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::outfit_clothings::Relation::WardrobeItem.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
