//! # 搭配-单品关联实体定义
//!
//! outfits 与 wardrobe_items 的多对多中间表，复合主键 (outfit_id, item_id)

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "outfit_clothings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub outfit_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub item_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::outfits::Entity",
        from = "Column::OutfitId",
        to = "super::outfits::Column::OutfitId",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Outfit,
    #[sea_orm(
        belongs_to = "super::wardrobe_items::Entity",
        from = "Column::ItemId",
        to = "super::wardrobe_items::Column::ItemId",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    WardrobeItem,
}

impl Related<super::outfits::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Outfit.def()
    }
}

impl Related<super::wardrobe_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WardrobeItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
