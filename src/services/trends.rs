//! # 时尚趋势服务
//!
//! 趋势是全局参考数据，不归属用户，删除用户不会影响它。

use chrono::{NaiveDateTime, Utc};
use entity::{fashion_trends, fashion_trends::Entity as FashionTrends};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use serde::Deserialize;

use crate::{
    error::{Context, LazydrobeError, Result},
    linfo,
    logging::{LogComponent, LogStage},
    types::{TrendId, join_categories, parse_categories},
};

use super::shared::{TEXT_MAX_LEN, optional_text, optional_url, required_text};

/// 新增趋势
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewFashionTrend {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    pub image_url: Option<String>,
    pub source_url: Option<String>,
    pub fetched_at: Option<NaiveDateTime>,
}

/// 趋势的分类列表
#[must_use]
pub fn trend_categories(trend: &fashion_trends::Model) -> Vec<String> {
    trend
        .categories
        .as_deref()
        .map(parse_categories)
        .unwrap_or_default()
}

/// 时尚趋势服务
pub struct TrendsService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TrendsService<'a> {
    #[must_use]
    pub const fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, trend: &NewFashionTrend) -> Result<fashion_trends::Model> {
        let model = fashion_trends::ActiveModel {
            title: Set(required_text("title", &trend.title, TEXT_MAX_LEN)?),
            description: Set(optional_text("description", trend.description.as_deref(), usize::MAX)?),
            categories: Set(join_categories(&trend.categories)),
            image_url: Set(optional_url("image_url", trend.image_url.as_deref())?),
            date_fetched: Set(trend.fetched_at.unwrap_or_else(|| Utc::now().naive_utc())),
            source_url: Set(optional_url("source_url", trend.source_url.as_deref())?),
            ..Default::default()
        };

        let created = model.insert(self.db).await.context("保存时尚趋势失败")?;
        linfo!(
            "system",
            LogStage::Write,
            LogComponent::Trends,
            "create_trend",
            &format!("趋势已保存: trend_id={} title={}", created.trend_id, created.title)
        );
        Ok(created)
    }

    pub async fn get(&self, trend_id: TrendId) -> Result<fashion_trends::Model> {
        FashionTrends::find_by_id(trend_id)
            .one(self.db)
            .await
            .context("查询时尚趋势失败")?
            .ok_or_else(|| LazydrobeError::not_found("fashion_trends", trend_id))
    }

    /// 最新的趋势在前；指定分类时只返回包含该分类的趋势（不区分大小写）
    pub async fn list(&self, category: Option<&str>, limit: u64) -> Result<Vec<fashion_trends::Model>> {
        let category = category.map(str::trim).filter(|c| !c.is_empty());

        let query = FashionTrends::find()
            .order_by_desc(fashion_trends::Column::DateFetched)
            .order_by_desc(fashion_trends::Column::TrendId);

        let Some(cat) = category else {
            return query
                .limit(limit)
                .all(self.db)
                .await
                .context("查询时尚趋势列表失败");
        };

        // LIKE 只做粗筛，"street" 也会命中 "streetwear"
        let rows = query
            .filter(fashion_trends::Column::Categories.contains(cat))
            .all(self.db)
            .await
            .context("查询时尚趋势列表失败")?;

        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(rows
            .into_iter()
            .filter(|trend| {
                trend_categories(trend)
                    .iter()
                    .any(|c| c.eq_ignore_ascii_case(cat))
            })
            .take(limit)
            .collect())
    }

    pub async fn delete(&self, trend_id: TrendId) -> Result<()> {
        let result = FashionTrends::delete_by_id(trend_id)
            .exec(self.db)
            .await
            .with_context(|| format!("删除时尚趋势失败: {trend_id}"))?;
        if result.rows_affected == 0 {
            return Err(LazydrobeError::not_found("fashion_trends", trend_id));
        }
        Ok(())
    }

    /// 删除早于 `cutoff` 抓取的趋势
    pub async fn purge_before(&self, cutoff: NaiveDateTime) -> Result<u64> {
        let result = FashionTrends::delete_many()
            .filter(fashion_trends::Column::DateFetched.lt(cutoff))
            .exec(self.db)
            .await
            .context("清理过期时尚趋势失败")?;
        Ok(result.rows_affected)
    }

    /// 最近抓取的 `limit` 条标题
    pub async fn recent_titles(&self, limit: u64) -> Result<Vec<String>> {
        FashionTrends::find()
            .select_only()
            .column(fashion_trends::Column::Title)
            .order_by_desc(fashion_trends::Column::DateFetched)
            .limit(limit)
            .into_tuple::<String>()
            .all(self.db)
            .await
            .context("查询趋势标题失败")
    }
}
