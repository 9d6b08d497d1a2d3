//! # 衣橱服务
//!
//! 用户单品的增删改查。标签以 JSON 数组存储。

use chrono::Utc;
use entity::{wardrobe_items, wardrobe_items::Entity as WardrobeItems};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use serde::Deserialize;

use crate::{
    error::{Context, LazydrobeError, Result},
    ldebug, linfo,
    logging::{LogComponent, LogStage},
    types::{ItemId, UserId, tags_from_json, tags_to_json},
};

use super::shared::{TEXT_MAX_LEN, optional_text, optional_url};

/// 新增单品
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewWardrobeItem {
    pub user_id: UserId,
    pub clothing_type: Option<String>,
    pub for_weather: Option<String>,
    pub fabric: Option<String>,
    pub color: Option<String>,
    pub size: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub image_url: Option<String>,
}

/// 更新单品，`None` 表示保持原值
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateWardrobeItem {
    pub clothing_type: Option<String>,
    pub for_weather: Option<String>,
    pub fabric: Option<String>,
    pub color: Option<String>,
    pub size: Option<String>,
    pub tags: Option<Vec<String>>,
    pub image_url: Option<String>,
}

/// 读取单品标签
#[must_use]
pub fn item_tags(item: &wardrobe_items::Model) -> Vec<String> {
    tags_from_json(item.tags.as_ref())
}

fn clean_tags(tags: &[String]) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags.iter().map(|t| t.trim()).filter(|t| !t.is_empty()) {
        if !cleaned.iter().any(|c| c == tag) {
            cleaned.push(tag.to_string());
        }
    }
    cleaned
}

/// 衣橱服务
pub struct WardrobeService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> WardrobeService<'a> {
    #[must_use]
    pub const fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// 添加单品；用户不存在时返回外键约束冲突
    pub async fn add_item(&self, item: &NewWardrobeItem) -> Result<wardrobe_items::Model> {
        let model = wardrobe_items::ActiveModel {
            user_id: Set(item.user_id),
            clothing_type: Set(optional_text("clothing_type", item.clothing_type.as_deref(), TEXT_MAX_LEN)?),
            for_weather: Set(optional_text("for_weather", item.for_weather.as_deref(), TEXT_MAX_LEN)?),
            fabric: Set(optional_text("fabric", item.fabric.as_deref(), TEXT_MAX_LEN)?),
            color: Set(optional_text("color", item.color.as_deref(), TEXT_MAX_LEN)?),
            size: Set(optional_text("size", item.size.as_deref(), TEXT_MAX_LEN)?),
            tags: Set(tags_to_json(&clean_tags(&item.tags))),
            image_url: Set(optional_url("image_url", item.image_url.as_deref())?),
            date_added: Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        let created = model
            .insert(self.db)
            .await
            .with_context(|| format!("添加单品失败: user_id={}", item.user_id))?;

        linfo!(
            "system",
            LogStage::Write,
            LogComponent::Wardrobe,
            "add_item",
            &format!("单品已添加: item_id={} user_id={}", created.item_id, created.user_id)
        );
        Ok(created)
    }

    pub async fn get_item(&self, item_id: ItemId) -> Result<wardrobe_items::Model> {
        WardrobeItems::find_by_id(item_id)
            .one(self.db)
            .await
            .context("查询单品失败")?
            .ok_or_else(|| LazydrobeError::not_found("wardrobe_items", item_id))
    }

    /// 列出用户的全部单品，可按适用天气过滤
    pub async fn list_for_user(
        &self,
        user_id: UserId,
        for_weather: Option<&str>,
    ) -> Result<Vec<wardrobe_items::Model>> {
        let mut query = WardrobeItems::find().filter(wardrobe_items::Column::UserId.eq(user_id));
        if let Some(weather) = for_weather {
            query = query.filter(wardrobe_items::Column::ForWeather.eq(weather));
        }
        let items = query
            .order_by_asc(wardrobe_items::Column::ItemId)
            .all(self.db)
            .await
            .with_context(|| format!("查询用户单品失败: user_id={user_id}"))?;

        ldebug!(
            "system",
            LogStage::Read,
            LogComponent::Wardrobe,
            "list_items",
            &format!("user_id={user_id} 共 {} 件单品", items.len())
        );
        Ok(items)
    }

    pub async fn update_item(
        &self,
        item_id: ItemId,
        update: &UpdateWardrobeItem,
    ) -> Result<wardrobe_items::Model> {
        let mut active = self.get_item(item_id).await?.into_active_model();

        if let Some(v) = &update.clothing_type {
            active.clothing_type = Set(optional_text("clothing_type", Some(v), TEXT_MAX_LEN)?);
        }
        if let Some(v) = &update.for_weather {
            active.for_weather = Set(optional_text("for_weather", Some(v), TEXT_MAX_LEN)?);
        }
        if let Some(v) = &update.fabric {
            active.fabric = Set(optional_text("fabric", Some(v), TEXT_MAX_LEN)?);
        }
        if let Some(v) = &update.color {
            active.color = Set(optional_text("color", Some(v), TEXT_MAX_LEN)?);
        }
        if let Some(v) = &update.size {
            active.size = Set(optional_text("size", Some(v), TEXT_MAX_LEN)?);
        }
        if let Some(tags) = &update.tags {
            active.tags = Set(tags_to_json(&clean_tags(tags)));
        }
        if let Some(v) = &update.image_url {
            active.image_url = Set(optional_url("image_url", Some(v))?);
        }

        active
            .update(self.db)
            .await
            .with_context(|| format!("更新单品失败: {item_id}"))
    }

    /// 删除单品，相关搭配中的关联随之删除
    pub async fn delete_item(&self, item_id: ItemId) -> Result<()> {
        let result = WardrobeItems::delete_by_id(item_id)
            .exec(self.db)
            .await
            .with_context(|| format!("删除单品失败: {item_id}"))?;
        if result.rows_affected == 0 {
            return Err(LazydrobeError::not_found("wardrobe_items", item_id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::testing::{
        UserFixture, WardrobeItemFixture, create_test_db, insert_user, insert_wardrobe_item,
    };
    use pretty_assertions::assert_eq;

    fn shirt(user_id: UserId) -> NewWardrobeItem {
        NewWardrobeItem {
            user_id,
            clothing_type: Some("Shirt".to_string()),
            for_weather: Some("Summer".to_string()),
            color: Some("Blue".to_string()),
            tags: vec![" cotton ".to_string(), "casual".to_string(), "cotton".to_string(), String::new()],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_add_and_read_back_tags() {
        let db = create_test_db().await.unwrap();
        let user_id = insert_user(&db, UserFixture::new()).await.unwrap();
        let service = WardrobeService::new(&db);

        let item = service.add_item(&shirt(user_id)).await.unwrap();
        let loaded = service.get_item(item.item_id).await.unwrap();
        assert_eq!(item_tags(&loaded), vec!["cotton".to_string(), "casual".to_string()]);
        assert_eq!(loaded.clothing_type.as_deref(), Some("Shirt"));
    }

    #[tokio::test]
    async fn test_add_for_missing_user_is_foreign_key_violation() {
        let db = create_test_db().await.unwrap();
        let err = WardrobeService::new(&db).add_item(&shirt(404)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ForeignKeyViolation);
    }

    #[tokio::test]
    async fn test_invalid_image_url_rejected() {
        let db = create_test_db().await.unwrap();
        let user_id = insert_user(&db, UserFixture::new()).await.unwrap();
        let mut item = shirt(user_id);
        item.image_url = Some("not a url".to_string());
        let err = WardrobeService::new(&db).add_item(&item).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_list_update_delete() {
        let db = create_test_db().await.unwrap();
        let user_id = insert_user(&db, UserFixture::new()).await.unwrap();
        let service = WardrobeService::new(&db);

        let first = service.add_item(&shirt(user_id)).await.unwrap();
        let mut coat = shirt(user_id);
        coat.clothing_type = Some("Coat".to_string());
        coat.for_weather = Some("Winter".to_string());
        service.add_item(&coat).await.unwrap();

        assert_eq!(service.list_for_user(user_id, None).await.unwrap().len(), 2);
        let winter = service.list_for_user(user_id, Some("Winter")).await.unwrap();
        assert_eq!(winter.len(), 1);
        assert_eq!(winter[0].clothing_type.as_deref(), Some("Coat"));

        let updated = service
            .update_item(
                first.item_id,
                &UpdateWardrobeItem {
                    color: Some("Red".to_string()),
                    tags: Some(vec!["linen".to_string()]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.color.as_deref(), Some("Red"));
        assert_eq!(item_tags(&updated), vec!["linen".to_string()]);

        service.delete_item(first.item_id).await.unwrap();
        let err = service.delete_item(first.item_id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_get_item_reads_fixture_row() {
        let db = create_test_db().await.unwrap();
        let user_id = insert_user(&db, UserFixture::new().location(None)).await.unwrap();
        let item_id = insert_wardrobe_item(&db, WardrobeItemFixture::new(user_id).color("Olive"))
            .await
            .unwrap();

        let item = WardrobeService::new(&db).get_item(item_id).await.unwrap();
        assert_eq!(item.user_id, user_id);
        assert_eq!(item.color.as_deref(), Some("Olive"));
        assert_eq!(item.tags, tags_to_json(&["cotton".to_string(), "casual".to_string()]));
    }
}
