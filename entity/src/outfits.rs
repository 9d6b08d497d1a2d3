//! # 搭配实体定义
//!
//! 为用户推荐的一套衣物组合，具体单品见 `outfit_clothings` 中间表

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 搭配实体
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "outfits")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub outfit_id: i32,
    pub user_id: i32,
    pub occasion: Option<String>,
    pub for_weather: Option<String>,
    /// DECIMAL(3,2)，取值 0.00 - 9.99
    #[sea_orm(column_type = "Decimal(Some((3, 2)))", nullable)]
    pub trend_score: Option<Decimal>,
    pub date_suggested: DateTime,
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

impl Related<super::wardrobe_items::Entity> for Entity {
    fn to() -> RelationDef {
        super::outfit_clothings::Relation::WardrobeItem.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::outfit_clothings::Relation::Outfit.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
