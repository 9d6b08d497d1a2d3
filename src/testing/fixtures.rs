//! # 测试数据 Fixtures
//!
//! 提供测试用的数据结构和预设数据

use chrono::NaiveDateTime;
use entity::{ecommerce_products, fashion_trends, outfits, users, wardrobe_items, weather_data};
use rust_decimal::Decimal;
use sea_orm::Set;
use serde_json::json;

use crate::types::tags_to_json;

fn now() -> NaiveDateTime {
    chrono::Utc::now().naive_utc()
}

/// 用户测试数据构建器
pub struct UserFixture {
    pub username: String,
    pub email: String,
    pub password: String,
    pub location: Option<String>,
    pub preferences: Option<serde_json::Value>,
}

impl Default for UserFixture {
    fn default() -> Self {
        Self {
            username: "test_user".to_string(),
            email: "test@example.com".to_string(),
            // 预先计算好的哈希，避免测试里反复跑 bcrypt
            password: "$2b$04$abcdefghijklmnopqrstuu7Ijn1tTvxyHu0h0a4xLtCH1Ubs3bY6.".to_string(),
            location: Some("New York".to_string()),
            preferences: Some(json!(["casual", "minimal"])),
        }
    }
}

impl UserFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn username(mut self, username: &str) -> Self {
        self.username = username.to_string();
        self
    }

    pub fn email(mut self, email: &str) -> Self {
        self.email = email.to_string();
        self
    }

    pub fn location(mut self, location: Option<&str>) -> Self {
        self.location = location.map(str::to_string);
        self
    }

    /// 转换为 Sea-ORM ActiveModel
    pub fn to_active_model(self) -> users::ActiveModel {
        users::ActiveModel {
            username: Set(self.username),
            email: Set(self.email),
            password: Set(self.password),
            user_ip: Set(Some("127.0.0.1".to_string())),
            location: Set(self.location),
            preferences: Set(self.preferences),
            date_joined: Set(now()),
            ..Default::default()
        }
    }
}

/// 衣橱单品测试数据构建器
pub struct WardrobeItemFixture {
    pub user_id: i32,
    pub clothing_type: String,
    pub for_weather: String,
    pub color: String,
    pub tags: Vec<String>,
}

impl WardrobeItemFixture {
    pub fn new(user_id: i32) -> Self {
        Self {
            user_id,
            clothing_type: "Shirt".to_string(),
            for_weather: "Summer".to_string(),
            color: "Blue".to_string(),
            tags: vec!["cotton".to_string(), "casual".to_string()],
        }
    }

    pub fn clothing_type(mut self, clothing_type: &str) -> Self {
        self.clothing_type = clothing_type.to_string();
        self
    }

    pub fn color(mut self, color: &str) -> Self {
        self.color = color.to_string();
        self
    }

    pub fn to_active_model(self) -> wardrobe_items::ActiveModel {
        wardrobe_items::ActiveModel {
            user_id: Set(self.user_id),
            clothing_type: Set(Some(self.clothing_type)),
            for_weather: Set(Some(self.for_weather)),
            fabric: Set(Some("Cotton".to_string())),
            color: Set(Some(self.color)),
            size: Set(Some("M".to_string())),
            tags: Set(tags_to_json(&self.tags)),
            image_url: Set(None),
            date_added: Set(now()),
            ..Default::default()
        }
    }
}

/// 搭配 ActiveModel
pub fn outfit_active_model(user_id: i32, trend_score: Option<Decimal>) -> outfits::ActiveModel {
    outfits::ActiveModel {
        user_id: Set(user_id),
        occasion: Set(Some("Casual".to_string())),
        for_weather: Set(Some("Summer".to_string())),
        trend_score: Set(trend_score),
        date_suggested: Set(now()),
        ..Default::default()
    }
}

/// 天气快照 ActiveModel
pub fn weather_active_model(user_id: i32, location: &str) -> weather_data::ActiveModel {
    weather_data::ActiveModel {
        user_id: Set(user_id),
        location: Set(location.to_string()),
        temperature: Set(Some(Decimal::new(2150, 2))),
        precipitation: Set(Some(Decimal::new(0, 2))),
        wind_speed: Set(Some(Decimal::new(340, 2))),
        humidity: Set(Some(Decimal::new(6500, 2))),
        date_fetched: Set(now()),
        ..Default::default()
    }
}

/// 时尚趋势 ActiveModel
pub fn trend_active_model(title: &str, categories: Option<&str>) -> fashion_trends::ActiveModel {
    fashion_trends::ActiveModel {
        title: Set(title.to_string()),
        description: Set(Some(format!("{title} is everywhere this season"))),
        categories: Set(categories.map(str::to_string)),
        image_url: Set(None),
        date_fetched: Set(now()),
        source_url: Set(Some("https://www.vogue.com/fashion/trends".to_string())),
        ..Default::default()
    }
}

/// 商品推荐 ActiveModel
pub fn product_active_model(
    user_id: Option<i32>,
    ebay_item_id: Option<&str>,
) -> ecommerce_products::ActiveModel {
    ecommerce_products::ActiveModel {
        user_id: Set(user_id),
        ebay_item_id: Set(ebay_item_id.map(str::to_string)),
        suggested_item_type: Set(Some("Shirt".to_string())),
        product_name: Set("Linen Shirt".to_string()),
        price: Set(Some(Decimal::new(2999, 2))),
        product_url: Set("https://www.ebay.com/itm/1".to_string()),
        image_url: Set(None),
        date_suggested: Set(now()),
        ..Default::default()
    }
}

/// eBay 抓取结果样例，含一条重复和一条缺少必填字段的记录
pub fn sample_listings_json() -> serde_json::Value {
    json!([
        {
            "ebay_item_id": "v1|1001|0",
            "product_name": "Vintage Denim Jacket",
            "suggested_item_type": "Jacket",
            "price": 45.5,
            "currency": "USD",
            "product_url": "https://www.ebay.com/itm/1001",
            "image_url": "https://i.ebayimg.com/1001.jpg"
        },
        {
            "ebay_item_id": "v1|1002|0",
            "product_name": "Wool Scarf",
            "suggested_item_type": "Accessory",
            "price": "12.00",
            "currency": "USD",
            "product_url": "https://www.ebay.com/itm/1002"
        },
        {
            "ebay_item_id": "v1|1001|0",
            "product_name": "Vintage Denim Jacket (relist)",
            "price": 44.0,
            "product_url": "https://www.ebay.com/itm/1001"
        },
        {
            "ebay_item_id": "v1|1003|0",
            "product_name": "",
            "price": 9.99,
            "product_url": "https://www.ebay.com/itm/1003"
        }
    ])
}
