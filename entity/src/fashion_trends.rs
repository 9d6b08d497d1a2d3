//! # 时尚趋势实体定义
//!
//! 独立的参考数据，不归属任何用户

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "fashion_trends")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub trend_id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    /// 逗号分隔的分类列表
    #[sea_orm(column_type = "Text", nullable)]
    pub categories: Option<String>,
    pub image_url: Option<String>,
    pub date_fetched: DateTime,
    pub source_url: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
