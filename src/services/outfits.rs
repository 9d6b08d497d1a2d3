//! # 搭配服务
//!
//! 搭配与其单品的关联通过 `outfit_clothings` 维护：
//! 同一单品在一套搭配中只能出现一次，且必须属于搭配所属的用户。

use chrono::Utc;
use entity::{
    OutfitClothings, Outfits, WardrobeItems, outfit_clothings, outfits, wardrobe_items,
};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, JoinType,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Context, LazydrobeError, Result},
    linfo,
    logging::{LogComponent, LogStage},
    types::{DecimalSpec, ItemId, OutfitId, UserId},
};

use super::shared::{TEXT_MAX_LEN, optional_text};

/// 新建搭配
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewOutfit {
    pub user_id: UserId,
    pub occasion: Option<String>,
    pub for_weather: Option<String>,
    pub trend_score: Option<Decimal>,
    /// 组成搭配的单品，重复出现会触发唯一约束冲突
    #[serde(default)]
    pub item_ids: Vec<ItemId>,
}

/// 搭配及其单品
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutfitWithItems {
    pub outfit: outfits::Model,
    pub items: Vec<wardrobe_items::Model>,
}

fn normalize_outfit(mut outfit: outfits::Model) -> outfits::Model {
    outfit.trend_score = DecimalSpec::TREND_SCORE.normalize_opt(outfit.trend_score);
    outfit
}

/// 单品存在时必须属于该用户；不存在的单品留给外键约束报告
async fn ensure_items_owned<C: ConnectionTrait>(
    conn: &C,
    user_id: UserId,
    item_ids: &[ItemId],
) -> Result<()> {
    if item_ids.is_empty() {
        return Ok(());
    }
    let foreign: Vec<wardrobe_items::Model> = WardrobeItems::find()
        .filter(wardrobe_items::Column::ItemId.is_in(item_ids.iter().copied()))
        .filter(wardrobe_items::Column::UserId.ne(user_id))
        .all(conn)
        .await
        .context("校验单品归属失败")?;

    if let Some(item) = foreign.first() {
        return Err(LazydrobeError::validation(
            format!(
                "单品 {} 属于用户 {}，不能加入用户 {} 的搭配",
                item.item_id, item.user_id, user_id
            ),
            Some("item_ids"),
        ));
    }
    Ok(())
}

async fn load_items<C: ConnectionTrait>(
    conn: &C,
    outfit_id: OutfitId,
) -> Result<Vec<wardrobe_items::Model>> {
    WardrobeItems::find()
        .join(JoinType::InnerJoin, wardrobe_items::Relation::OutfitClothings.def())
        .filter(outfit_clothings::Column::OutfitId.eq(outfit_id))
        .order_by_asc(wardrobe_items::Column::ItemId)
        .all(conn)
        .await
        .with_context(|| format!("查询搭配单品失败: outfit_id={outfit_id}"))
}

/// 搭配服务
pub struct OutfitsService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> OutfitsService<'a> {
    #[must_use]
    pub const fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// 在一个事务内创建搭配及其单品关联，任一步失败则整体回滚
    pub async fn create(&self, request: &NewOutfit) -> Result<OutfitWithItems> {
        let trend_score = DecimalSpec::TREND_SCORE.check_opt("trend_score", request.trend_score)?;
        let occasion = optional_text("occasion", request.occasion.as_deref(), TEXT_MAX_LEN)?;
        let for_weather = optional_text("for_weather", request.for_weather.as_deref(), TEXT_MAX_LEN)?;

        let txn = self.db.begin().await.context("开启事务失败")?;

        ensure_items_owned(&txn, request.user_id, &request.item_ids).await?;

        let outfit = outfits::ActiveModel {
            user_id: Set(request.user_id),
            occasion: Set(occasion),
            for_weather: Set(for_weather),
            trend_score: Set(trend_score),
            date_suggested: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .with_context(|| format!("创建搭配失败: user_id={}", request.user_id))?;

        if !request.item_ids.is_empty() {
            let links = request.item_ids.iter().map(|&item_id| outfit_clothings::ActiveModel {
                outfit_id: Set(outfit.outfit_id),
                item_id: Set(item_id),
            });
            OutfitClothings::insert_many(links)
                .exec_without_returning(&txn)
                .await
                .with_context(|| format!("关联搭配单品失败: outfit_id={}", outfit.outfit_id))?;
        }

        let items = load_items(&txn, outfit.outfit_id).await?;
        txn.commit().await.context("提交事务失败")?;

        linfo!(
            "system",
            LogStage::Write,
            LogComponent::Outfits,
            "create_outfit",
            &format!(
                "搭配已创建: outfit_id={} user_id={} items={}",
                outfit.outfit_id,
                outfit.user_id,
                items.len()
            )
        );

        Ok(OutfitWithItems {
            outfit: normalize_outfit(outfit),
            items,
        })
    }

    pub async fn get(&self, outfit_id: OutfitId) -> Result<outfits::Model> {
        Outfits::find_by_id(outfit_id)
            .one(self.db)
            .await
            .context("查询搭配失败")?
            .map(normalize_outfit)
            .ok_or_else(|| LazydrobeError::not_found("outfits", outfit_id))
    }

    /// 搭配及其单品
    pub async fn get_with_items(&self, outfit_id: OutfitId) -> Result<OutfitWithItems> {
        let outfit = self.get(outfit_id).await?;
        let items = load_items(self.db, outfit_id).await?;
        Ok(OutfitWithItems { outfit, items })
    }

    /// 把单品加入搭配；重复加入返回唯一约束冲突
    pub async fn attach_item(&self, outfit_id: OutfitId, item_id: ItemId) -> Result<()> {
        let outfit = self.get(outfit_id).await.context("关联单品前查询搭配失败")?;
        ensure_items_owned(self.db, outfit.user_id, &[item_id]).await?;

        let link = outfit_clothings::ActiveModel {
            outfit_id: Set(outfit_id),
            item_id: Set(item_id),
        };
        OutfitClothings::insert(link)
            .exec_without_returning(self.db)
            .await
            .with_context(|| format!("关联搭配单品失败: outfit_id={outfit_id} item_id={item_id}"))?;
        Ok(())
    }

    /// 从搭配中移除单品
    pub async fn detach_item(&self, outfit_id: OutfitId, item_id: ItemId) -> Result<()> {
        let result = OutfitClothings::delete_by_id((outfit_id, item_id))
            .exec(self.db)
            .await
            .context("移除搭配单品失败")?;
        if result.rows_affected == 0 {
            if !self.exists(outfit_id).await? {
                return Err(LazydrobeError::not_found("outfits", outfit_id));
            }
            return Err(LazydrobeError::not_found(
                "outfit_clothings",
                format!("({outfit_id}, {item_id})"),
            ));
        }
        Ok(())
    }

    /// 搭配中的单品，按单品 ID 升序
    pub async fn items_of(&self, outfit_id: OutfitId) -> Result<Vec<wardrobe_items::Model>> {
        load_items(self.db, outfit_id).await
    }

    /// 包含某单品的全部搭配
    pub async fn outfits_containing(&self, item_id: ItemId) -> Result<Vec<outfits::Model>> {
        let rows = Outfits::find()
            .join(JoinType::InnerJoin, outfits::Relation::OutfitClothings.def())
            .filter(outfit_clothings::Column::ItemId.eq(item_id))
            .order_by_asc(outfits::Column::OutfitId)
            .all(self.db)
            .await
            .with_context(|| format!("查询包含单品的搭配失败: item_id={item_id}"))?;
        Ok(rows.into_iter().map(normalize_outfit).collect())
    }

    /// 用户的全部搭配，新的在前
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<OutfitWithItems>> {
        let outfits = Outfits::find()
            .filter(outfits::Column::UserId.eq(user_id))
            .order_by_desc(outfits::Column::DateSuggested)
            .order_by_desc(outfits::Column::OutfitId)
            .all(self.db)
            .await
            .with_context(|| format!("查询用户搭配失败: user_id={user_id}"))?;

        let mut result = Vec::with_capacity(outfits.len());
        for outfit in outfits {
            let items = load_items(self.db, outfit.outfit_id).await?;
            result.push(OutfitWithItems {
                outfit: normalize_outfit(outfit),
                items,
            });
        }
        Ok(result)
    }

    /// 删除搭配，关联行随之删除，单品本身保留
    pub async fn delete(&self, outfit_id: OutfitId) -> Result<()> {
        let result = Outfits::delete_by_id(outfit_id)
            .exec(self.db)
            .await
            .with_context(|| format!("删除搭配失败: {outfit_id}"))?;
        if result.rows_affected == 0 {
            return Err(LazydrobeError::not_found("outfits", outfit_id));
        }
        Ok(())
    }

    async fn exists(&self, outfit_id: OutfitId) -> Result<bool> {
        Ok(Outfits::find_by_id(outfit_id)
            .one(self.db)
            .await
            .context("查询搭配失败")?
            .is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::testing::{
        UserFixture, WardrobeItemFixture, create_test_db, insert_user, insert_wardrobe_item,
        outfit_active_model,
    };
    use pretty_assertions::assert_eq;
    use sea_orm::PaginatorTrait;

    async fn seed(db: &DatabaseConnection) -> (UserId, ItemId, ItemId) {
        let user_id = insert_user(db, UserFixture::new()).await.unwrap();
        let shirt = insert_wardrobe_item(db, WardrobeItemFixture::new(user_id))
            .await
            .unwrap();
        let jeans = insert_wardrobe_item(db, WardrobeItemFixture::new(user_id).clothing_type("Jeans"))
            .await
            .unwrap();
        (user_id, shirt, jeans)
    }

    #[tokio::test]
    async fn test_create_with_items_and_trend_score() {
        let db = create_test_db().await.unwrap();
        let (user_id, shirt, jeans) = seed(&db).await;
        let service = OutfitsService::new(&db);

        let created = service
            .create(&NewOutfit {
                user_id,
                occasion: Some("Casual".to_string()),
                trend_score: Some(Decimal::new(45, 1)),
                item_ids: vec![jeans, shirt],
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(created.items.iter().map(|i| i.item_id).collect::<Vec<_>>(), vec![shirt, jeans]);
        assert_eq!(created.outfit.trend_score.map(|d| d.to_string()), Some("4.50".to_string()));

        let loaded = service.get(created.outfit.outfit_id).await.unwrap();
        assert_eq!(loaded.trend_score, Some(Decimal::new(450, 2)));
    }

    #[tokio::test]
    async fn test_create_rolls_back_on_duplicate_item() {
        let db = create_test_db().await.unwrap();
        let (user_id, shirt, _) = seed(&db).await;

        let err = OutfitsService::new(&db)
            .create(&NewOutfit {
                user_id,
                item_ids: vec![shirt, shirt],
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UniqueViolation);
        assert_eq!(Outfits::find().count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_trend_score_out_of_range() {
        let db = create_test_db().await.unwrap();
        let (user_id, _, _) = seed(&db).await;
        let err = OutfitsService::new(&db)
            .create(&NewOutfit {
                user_id,
                trend_score: Some(Decimal::new(1000, 2)),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_items_must_belong_to_owner() {
        let db = create_test_db().await.unwrap();
        let (user_id, shirt, _) = seed(&db).await;
        let other = insert_user(&db, UserFixture::new().username("bob").email("bob@x.com"))
            .await
            .unwrap();
        let service = OutfitsService::new(&db);

        let err = service
            .create(&NewOutfit {
                user_id: other,
                item_ids: vec![shirt],
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let outfit = service
            .create(&NewOutfit {
                user_id,
                ..Default::default()
            })
            .await
            .unwrap();
        let err = service.attach_item(outfit.outfit.outfit_id, 999).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ForeignKeyViolation);
    }

    #[tokio::test]
    async fn test_attach_detach_and_reverse_lookup() {
        let db = create_test_db().await.unwrap();
        let (user_id, shirt, jeans) = seed(&db).await;
        let service = OutfitsService::new(&db);

        let a = service
            .create(&NewOutfit {
                user_id,
                item_ids: vec![shirt],
                ..Default::default()
            })
            .await
            .unwrap()
            .outfit
            .outfit_id;
        let b = service
            .create(&NewOutfit {
                user_id,
                item_ids: vec![shirt, jeans],
                ..Default::default()
            })
            .await
            .unwrap()
            .outfit
            .outfit_id;

        let err = service.attach_item(a, shirt).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UniqueViolation);

        service.attach_item(a, jeans).await.unwrap();
        assert_eq!(service.items_of(a).await.unwrap().len(), 2);

        let containing: Vec<OutfitId> = service
            .outfits_containing(jeans)
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.outfit_id)
            .collect();
        assert_eq!(containing, vec![a, b]);

        service.detach_item(a, jeans).await.unwrap();
        let err = service.detach_item(a, jeans).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        let err = service.detach_item(999, jeans).await.unwrap_err();
        assert_eq!(err.to_string(), "记录未找到: outfits 999");

        let listed = service.list_for_user(user_id).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].outfit.outfit_id, b);
        assert_eq!(listed[0].items.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_outfit_keeps_items() {
        let db = create_test_db().await.unwrap();
        let (user_id, shirt, _) = seed(&db).await;
        let service = OutfitsService::new(&db);
        let outfit = service
            .create(&NewOutfit {
                user_id,
                item_ids: vec![shirt],
                ..Default::default()
            })
            .await
            .unwrap();

        service.delete(outfit.outfit.outfit_id).await.unwrap();
        assert_eq!(OutfitClothings::find().count(&db).await.unwrap(), 0);
        assert_eq!(WardrobeItems::find().count(&db).await.unwrap(), 2);
        assert!(service.outfits_containing(shirt).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_rounds_stored_trend_score() {
        let db = create_test_db().await.unwrap();
        let user_id = insert_user(&db, UserFixture::new()).await.unwrap();
        let inserted = Outfits::insert(outfit_active_model(user_id, Some(Decimal::new(4125, 3))))
            .exec(&db)
            .await
            .unwrap();

        let outfit = OutfitsService::new(&db).get(inserted.last_insert_id).await.unwrap();
        assert_eq!(outfit.trend_score.map(|d| d.to_string()), Some("4.13".to_string()));
    }

    #[tokio::test]
    async fn test_attach_to_missing_outfit_keeps_not_found() {
        let db = create_test_db().await.unwrap();
        let (_, shirt, _) = seed(&db).await;

        let err = OutfitsService::new(&db).attach_item(404, shirt).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().starts_with("关联单品前查询搭配失败"));
    }
}
