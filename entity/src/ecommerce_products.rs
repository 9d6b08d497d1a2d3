//! # 电商推荐商品实体定义

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 推荐给用户的可购买商品
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "ecommerce_products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub product_id: i32,
    /// 批量导入的商品可能尚未分配给用户
    pub user_id: Option<i32>,
    #[sea_orm(unique)]
    pub ebay_item_id: Option<String>,
    pub suggested_item_type: Option<String>,
    pub product_name: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub price: Option<Decimal>,
    pub product_url: String,
    pub image_url: Option<String>,
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
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
