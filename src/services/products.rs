//! # 商品推荐服务
//!
//! 单条推荐写入，以及 eBay 抓取结果的批量导入。
//! `ebay_item_id` 唯一：批量导入时已存在或批内重复的条目会被跳过并计数。

use std::collections::HashSet;
use std::path::Path;

use chrono::{NaiveDateTime, Utc};
use entity::{ecommerce_products, ecommerce_products::Entity as EcommerceProducts};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Context, LazydrobeError, Result},
    linfo, lwarn,
    logging::{LogComponent, LogStage},
    types::{DecimalSpec, ProductId, UserId},
};

use super::shared::{TEXT_MAX_LEN, optional_text, optional_url, required_text, required_url};

/// 单条商品推荐
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewProductSuggestion {
    pub user_id: Option<UserId>,
    pub ebay_item_id: Option<String>,
    pub suggested_item_type: Option<String>,
    pub product_name: String,
    pub price: Option<Decimal>,
    pub product_url: String,
    pub image_url: Option<String>,
}

/// 抓取脚本输出的一条商品
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProductListing {
    pub ebay_item_id: Option<String>,
    pub product_name: Option<String>,
    pub suggested_item_type: Option<String>,
    pub price: Option<Decimal>,
    /// 仅用于日志，不入库
    pub currency: Option<String>,
    pub product_url: Option<String>,
    pub image_url: Option<String>,
    pub date_suggested: Option<NaiveDateTime>,
    pub user_id: Option<UserId>,
}

/// 批量导入结果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub inserted: usize,
    /// 库中已存在或批内重复
    pub duplicates: usize,
    /// 缺少必填字段或价格越界
    pub invalid: usize,
}

impl ImportReport {
    #[must_use]
    pub const fn total(&self) -> usize {
        self.inserted + self.duplicates + self.invalid
    }
}

/// 从 JSON 文件读取商品列表
pub fn load_listings(path: &Path) -> Result<Vec<ProductListing>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("读取商品文件失败: {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("解析商品文件失败: {}", path.display()))
}

fn normalize_product(mut row: ecommerce_products::Model) -> ecommerce_products::Model {
    row.price = DecimalSpec::PRICE.normalize_opt(row.price);
    row
}

/// 把一条抓取结果转换为 (eBay 编号, 待入库行)，缺少必填字段时返回校验错误
fn listing_to_active_model(
    listing: &ProductListing,
    default_user: Option<UserId>,
    now: NaiveDateTime,
) -> Result<(String, ecommerce_products::ActiveModel)> {
    let ebay_item_id = required_text(
        "ebay_item_id",
        listing.ebay_item_id.as_deref().unwrap_or_default(),
        TEXT_MAX_LEN,
    )?;
    let model = ecommerce_products::ActiveModel {
        user_id: Set(listing.user_id.or(default_user)),
        ebay_item_id: Set(Some(ebay_item_id.clone())),
        suggested_item_type: Set(optional_text(
            "suggested_item_type",
            listing.suggested_item_type.as_deref(),
            TEXT_MAX_LEN,
        )?),
        product_name: Set(required_text(
            "product_name",
            listing.product_name.as_deref().unwrap_or_default(),
            TEXT_MAX_LEN,
        )?),
        price: Set(DecimalSpec::PRICE.check_opt("price", listing.price)?),
        product_url: Set(required_url(
            "product_url",
            listing.product_url.as_deref().unwrap_or_default(),
        )?),
        image_url: Set(optional_url("image_url", listing.image_url.as_deref())?),
        date_suggested: Set(listing.date_suggested.unwrap_or(now)),
        ..Default::default()
    };
    Ok((ebay_item_id, model))
}

/// 商品推荐服务
pub struct ProductsService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ProductsService<'a> {
    #[must_use]
    pub const fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// 写入一条推荐；重复的 `ebay_item_id` 返回唯一约束冲突
    pub async fn suggest(&self, product: &NewProductSuggestion) -> Result<ecommerce_products::Model> {
        let model = ecommerce_products::ActiveModel {
            user_id: Set(product.user_id),
            ebay_item_id: Set(optional_text("ebay_item_id", product.ebay_item_id.as_deref(), TEXT_MAX_LEN)?),
            suggested_item_type: Set(optional_text(
                "suggested_item_type",
                product.suggested_item_type.as_deref(),
                TEXT_MAX_LEN,
            )?),
            product_name: Set(required_text("product_name", &product.product_name, TEXT_MAX_LEN)?),
            price: Set(DecimalSpec::PRICE.check_opt("price", product.price)?),
            product_url: Set(required_url("product_url", &product.product_url)?),
            image_url: Set(optional_url("image_url", product.image_url.as_deref())?),
            date_suggested: Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        let saved = model.insert(self.db).await.context("保存商品推荐失败")?;
        Ok(normalize_product(saved))
    }

    pub async fn get(&self, product_id: ProductId) -> Result<ecommerce_products::Model> {
        EcommerceProducts::find_by_id(product_id)
            .one(self.db)
            .await
            .context("查询商品失败")?
            .map(normalize_product)
            .ok_or_else(|| LazydrobeError::not_found("ecommerce_products", product_id))
    }

    /// 按 eBay 商品编号查找
    pub async fn find_by_ebay_id(&self, ebay_item_id: &str) -> Result<Option<ecommerce_products::Model>> {
        let row = EcommerceProducts::find()
            .filter(ecommerce_products::Column::EbayItemId.eq(ebay_item_id))
            .one(self.db)
            .await
            .context("按 eBay 编号查询商品失败")?;
        Ok(row.map(normalize_product))
    }

    /// 推荐给某用户的商品，新的在前
    pub async fn list_for_user(&self, user_id: UserId, limit: u64) -> Result<Vec<ecommerce_products::Model>> {
        let rows = EcommerceProducts::find()
            .filter(ecommerce_products::Column::UserId.eq(user_id))
            .order_by_desc(ecommerce_products::Column::DateSuggested)
            .order_by_desc(ecommerce_products::Column::ProductId)
            .limit(limit)
            .all(self.db)
            .await
            .with_context(|| format!("查询用户商品推荐失败: user_id={user_id}"))?;
        Ok(rows.into_iter().map(normalize_product).collect())
    }

    /// 尚未分配给任何用户的商品
    pub async fn list_unassigned(&self, limit: u64) -> Result<Vec<ecommerce_products::Model>> {
        let rows = EcommerceProducts::find()
            .filter(ecommerce_products::Column::UserId.is_null())
            .order_by_asc(ecommerce_products::Column::ProductId)
            .limit(limit)
            .all(self.db)
            .await
            .context("查询未分配商品失败")?;
        Ok(rows.into_iter().map(normalize_product).collect())
    }

    pub async fn delete(&self, product_id: ProductId) -> Result<()> {
        let result = EcommerceProducts::delete_by_id(product_id)
            .exec(self.db)
            .await
            .with_context(|| format!("删除商品失败: {product_id}"))?;
        if result.rows_affected == 0 {
            return Err(LazydrobeError::not_found("ecommerce_products", product_id));
        }
        Ok(())
    }

    /// 在一个事务内批量导入抓取结果
    ///
    /// 无效条目和重复条目不会中断导入；数据库错误（例如不存在的用户）会回滚整个批次
    pub async fn import_listings(
        &self,
        listings: &[ProductListing],
        default_user: Option<UserId>,
    ) -> Result<ImportReport> {
        let mut report = ImportReport::default();
        let now = Utc::now().naive_utc();

        let mut candidates = Vec::with_capacity(listings.len());
        for (index, listing) in listings.iter().enumerate() {
            match listing_to_active_model(listing, default_user, now) {
                Ok(candidate) => candidates.push(candidate),
                Err(err) => {
                    report.invalid += 1;
                    lwarn!(
                        "system",
                        LogStage::Import,
                        LogComponent::Products,
                        "skip_invalid",
                        &format!("跳过第 {index} 条商品: {err}")
                    );
                }
            }
        }

        let txn = self.db.begin().await.context("开启事务失败")?;

        let ids: Vec<String> = candidates.iter().map(|(id, _)| id.clone()).collect();
        let existing: HashSet<String> = if ids.is_empty() {
            HashSet::new()
        } else {
            EcommerceProducts::find()
                .select_only()
                .column(ecommerce_products::Column::EbayItemId)
                .filter(ecommerce_products::Column::EbayItemId.is_in(ids))
                .into_tuple::<Option<String>>()
                .all(&txn)
                .await
                .context("查询已存在商品失败")?
                .into_iter()
                .flatten()
                .collect()
        };

        let mut seen = HashSet::new();
        let mut fresh = Vec::with_capacity(candidates.len());
        for (key, model) in candidates {
            if existing.contains(&key) || !seen.insert(key) {
                report.duplicates += 1;
            } else {
                fresh.push(model);
            }
        }

        report.inserted = fresh.len();
        if !fresh.is_empty() {
            EcommerceProducts::insert_many(fresh)
                .exec_without_returning(&txn)
                .await
                .context("批量写入商品失败")?;
        }
        txn.commit().await.context("提交事务失败")?;

        linfo!(
            "system",
            LogStage::Import,
            LogComponent::Products,
            "import_listings",
            &format!(
                "商品导入完成: inserted={} duplicates={} invalid={}",
                report.inserted, report.duplicates, report.invalid
            )
        );
        Ok(report)
    }
}
