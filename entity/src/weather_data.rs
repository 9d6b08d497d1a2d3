//! # 天气数据实体定义

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 某用户所在地点的一次天气快照
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "weather_data")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub weather_id: i32,
    pub user_id: i32,
    pub location: String,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))", nullable)]
    pub temperature: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))", nullable)]
    pub precipitation: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))", nullable)]
    pub wind_speed: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))", nullable)]
    pub humidity: Option<Decimal>,
    pub date_fetched: DateTime,
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
