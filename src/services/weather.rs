//! # 天气服务
//!
//! 按用户保存天气快照。各项读数为 DECIMAL(5,2)，写入前校验范围，读出后统一两位小数。

use chrono::{NaiveDateTime, Utc};
use entity::{weather_data, weather_data::Entity as WeatherData};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use serde::Deserialize;

use crate::{
    error::{Context, LazydrobeError, Result},
    ldebug,
    logging::{LogComponent, LogStage},
    types::{DecimalSpec, UserId, WeatherId},
};

use super::shared::{TEXT_MAX_LEN, required_text};

/// 一次天气观测
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewWeatherObservation {
    pub user_id: UserId,
    pub location: String,
    /// 摄氏度，可为负
    pub temperature: Option<Decimal>,
    pub precipitation: Option<Decimal>,
    pub wind_speed: Option<Decimal>,
    /// 百分比
    pub humidity: Option<Decimal>,
    /// 缺省为当前时间
    pub fetched_at: Option<NaiveDateTime>,
}

fn normalize_weather(mut row: weather_data::Model) -> weather_data::Model {
    row.temperature = DecimalSpec::TEMPERATURE.normalize_opt(row.temperature);
    row.precipitation = DecimalSpec::WEATHER_MEASURE.normalize_opt(row.precipitation);
    row.wind_speed = DecimalSpec::WEATHER_MEASURE.normalize_opt(row.wind_speed);
    row.humidity = DecimalSpec::WEATHER_MEASURE.normalize_opt(row.humidity);
    row
}

/// 天气服务
pub struct WeatherService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> WeatherService<'a> {
    #[must_use]
    pub const fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// 记录天气快照；地点为必填
    pub async fn record(&self, observation: &NewWeatherObservation) -> Result<weather_data::Model> {
        let model = weather_data::ActiveModel {
            user_id: Set(observation.user_id),
            location: Set(required_text("location", &observation.location, TEXT_MAX_LEN)?),
            temperature: Set(DecimalSpec::TEMPERATURE.check_opt("temperature", observation.temperature)?),
            precipitation: Set(DecimalSpec::WEATHER_MEASURE.check_opt("precipitation", observation.precipitation)?),
            wind_speed: Set(DecimalSpec::WEATHER_MEASURE.check_opt("wind_speed", observation.wind_speed)?),
            humidity: Set(DecimalSpec::WEATHER_MEASURE.check_opt("humidity", observation.humidity)?),
            date_fetched: Set(observation.fetched_at.unwrap_or_else(|| Utc::now().naive_utc())),
            ..Default::default()
        };

        let saved = model
            .insert(self.db)
            .await
            .with_context(|| format!("保存天气数据失败: user_id={}", observation.user_id))?;

        ldebug!(
            "system",
            LogStage::Write,
            LogComponent::Weather,
            "record_weather",
            &format!("weather_id={} location={}", saved.weather_id, saved.location)
        );
        Ok(normalize_weather(saved))
    }

    pub async fn get(&self, weather_id: WeatherId) -> Result<weather_data::Model> {
        WeatherData::find_by_id(weather_id)
            .one(self.db)
            .await
            .context("查询天气数据失败")?
            .map(normalize_weather)
            .ok_or_else(|| LazydrobeError::not_found("weather_data", weather_id))
    }

    /// 用户最近一次天气快照
    pub async fn latest_for_user(&self, user_id: UserId) -> Result<Option<weather_data::Model>> {
        let row = WeatherData::find()
            .filter(weather_data::Column::UserId.eq(user_id))
            .order_by_desc(weather_data::Column::DateFetched)
            .order_by_desc(weather_data::Column::WeatherId)
            .one(self.db)
            .await
            .with_context(|| format!("查询最新天气失败: user_id={user_id}"))?;
        Ok(row.map(normalize_weather))
    }

    /// 用户的天气历史，新的在前
    pub async fn list_for_user(&self, user_id: UserId, limit: u64) -> Result<Vec<weather_data::Model>> {
        let rows = WeatherData::find()
            .filter(weather_data::Column::UserId.eq(user_id))
            .order_by_desc(weather_data::Column::DateFetched)
            .order_by_desc(weather_data::Column::WeatherId)
            .limit(limit)
            .all(self.db)
            .await
            .with_context(|| format!("查询天气历史失败: user_id={user_id}"))?;
        Ok(rows.into_iter().map(normalize_weather).collect())
    }

    pub async fn delete(&self, weather_id: WeatherId) -> Result<()> {
        let result = WeatherData::delete_by_id(weather_id)
            .exec(self.db)
            .await
            .with_context(|| format!("删除天气数据失败: {weather_id}"))?;
        if result.rows_affected == 0 {
            return Err(LazydrobeError::not_found("weather_data", weather_id));
        }
        Ok(())
    }

    /// 清理早于 `cutoff` 的快照，返回删除行数
    pub async fn purge_before(&self, cutoff: NaiveDateTime) -> Result<u64> {
        let result = WeatherData::delete_many()
            .filter(weather_data::Column::DateFetched.lt(cutoff))
            .exec(self.db)
            .await
            .context("清理历史天气数据失败")?;
        Ok(result.rows_affected)
    }
}
