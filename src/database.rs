//! # 数据库模块
//!
//! 数据库连接和迁移管理

use entity::{
    EcommerceProducts, FashionTrends, OutfitClothings, Outfits, Users, WardrobeItems, WeatherData,
};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait};
use sea_orm_migration::MigratorTrait;
use serde::Serialize;

use crate::config::DatabaseConfig;
use crate::error::{Context, Result};
use crate::{lerror, linfo, lwarn, logging::{LogComponent, LogStage}};

/// 初始化数据库连接
///
/// SQLite 连接由 sqlx 默认开启 `foreign_keys`，级联删除依赖于此
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection> {
    let url = config.connection_url()?;
    linfo!(
        "system",
        LogStage::Startup,
        LogComponent::Database,
        "connect",
        &format!("正在连接数据库: {}", url.chars().take(50).collect::<String>())
    );

    let mut options = ConnectOptions::new(url);
    options
        .max_connections(config.max_connections)
        .connect_timeout(config.connect_timeout())
        .sqlx_logging(config.sqlx_logging);

    let db = Database::connect(options)
        .await
        .context("数据库连接失败")?;

    linfo!(
        "system",
        LogStage::Startup,
        LogComponent::Database,
        "connected",
        "数据库连接成功"
    );
    Ok(db)
}

/// 运行全部待执行的数据库迁移
pub async fn run_migrations(db: &DatabaseConnection) -> Result<()> {
    linfo!(
        "system",
        LogStage::Migration,
        LogComponent::Database,
        "migrate_up",
        "开始运行数据库迁移..."
    );

    match ::migration::Migrator::up(db, None).await {
        Ok(()) => {
            linfo!(
                "system",
                LogStage::Migration,
                LogComponent::Database,
                "migrate_up_done",
                "数据库迁移完成"
            );
            Ok(())
        }
        Err(e) => {
            lerror!(
                "system",
                LogStage::Migration,
                LogComponent::Database,
                "migrate_up_failed",
                &format!("数据库迁移失败: {e}")
            );
            Err(e).context("数据库迁移失败")
        }
    }
}

/// 回滚迁移；`steps` 为 `None` 时回滚全部
pub async fn rollback_migrations(db: &DatabaseConnection, steps: Option<u32>) -> Result<()> {
    lwarn!(
        "system",
        LogStage::Migration,
        LogComponent::Database,
        "migrate_down",
        &format!(
            "回滚数据库迁移: {}",
            steps.map_or_else(|| "全部".to_string(), |n| n.to_string())
        )
    );
    ::migration::Migrator::down(db, steps)
        .await
        .context("数据库迁移回滚失败")
}

/// 删除所有表后重新执行全部迁移
pub async fn fresh_migrations(db: &DatabaseConnection) -> Result<()> {
    lwarn!(
        "system",
        LogStage::Migration,
        LogComponent::Database,
        "migrate_fresh",
        "删除全部表并重新迁移"
    );
    ::migration::Migrator::fresh(db)
        .await
        .context("重建数据库失败")
}

/// 迁移状态
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MigrationStatus {
    pub applied: Vec<String>,
    pub pending: Vec<String>,
}

impl MigrationStatus {
    #[must_use]
    pub fn is_up_to_date(&self) -> bool {
        self.pending.is_empty()
    }
}

/// 检查数据库迁移状态
pub async fn check_database_status(db: &DatabaseConnection) -> Result<MigrationStatus> {
    let applied = ::migration::Migrator::get_applied_migrations(db)
        .await
        .context("查询已应用迁移失败")?;
    let pending = ::migration::Migrator::get_pending_migrations(db)
        .await
        .context("查询待应用迁移失败")?;

    let status = MigrationStatus {
        applied: applied.iter().map(|m| m.name().to_string()).collect(),
        pending: pending.iter().map(|m| m.name().to_string()).collect(),
    };

    if status.is_up_to_date() {
        linfo!(
            "system",
            LogStage::Migration,
            LogComponent::Database,
            "status",
            "所有迁移都已应用"
        );
    } else {
        lwarn!(
            "system",
            LogStage::Migration,
            LogComponent::Database,
            "status",
            &format!("有 {} 个待应用的迁移", status.pending.len())
        );
    }

    Ok(status)
}

/// 各表行数
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct TableCounts {
    pub users: u64,
    pub wardrobe_items: u64,
    pub outfits: u64,
    pub outfit_clothings: u64,
    pub weather_data: u64,
    pub fashion_trends: u64,
    pub ecommerce_products: u64,
}

impl TableCounts {
    /// 按迁移顺序输出 (表名, 行数)
    #[must_use]
    pub fn rows(&self) -> [(&'static str, u64); 7] {
        [
            ("users", self.users),
            ("wardrobe_items", self.wardrobe_items),
            ("outfits", self.outfits),
            ("outfit_clothings", self.outfit_clothings),
            ("weather_data", self.weather_data),
            ("fashion_trends", self.fashion_trends),
            ("ecommerce_products", self.ecommerce_products),
        ]
    }
}

/// 统计各表行数
pub async fn table_counts(db: &DatabaseConnection) -> Result<TableCounts> {
    let counts: std::result::Result<TableCounts, DbErr> = async {
        Ok(TableCounts {
            users: Users::find().count(db).await?,
            wardrobe_items: WardrobeItems::find().count(db).await?,
            outfits: Outfits::find().count(db).await?,
            outfit_clothings: OutfitClothings::find().count(db).await?,
            weather_data: WeatherData::find().count(db).await?,
            fashion_trends: FashionTrends::find().count(db).await?,
            ecommerce_products: EcommerceProducts::find().count(db).await?,
        })
    }
    .await;

    counts.context("统计表行数失败")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_migrate_status_and_rollback() {
        let db = init_database(&DatabaseConfig::in_memory()).await.unwrap();

        let status = check_database_status(&db).await.unwrap();
        assert_eq!(status.applied.len(), 0);
        assert_eq!(status.pending.len(), migration::TABLES.len());

        run_migrations(&db).await.unwrap();
        let status = check_database_status(&db).await.unwrap();
        assert!(status.is_up_to_date());
        assert_eq!(
            status.applied.first().map(String::as_str),
            Some("m20241101_000001_create_users_table")
        );

        rollback_migrations(&db, Some(1)).await.unwrap();
        let status = check_database_status(&db).await.unwrap();
        assert_eq!(
            status.pending,
            vec!["m20241120_000001_create_ecommerce_products_table".to_string()]
        );

        fresh_migrations(&db).await.unwrap();
        assert!(check_database_status(&db).await.unwrap().is_up_to_date());
    }

    #[tokio::test]
    async fn test_table_counts_on_empty_schema() {
        let db = crate::testing::create_test_db().await.unwrap();
        let counts = table_counts(&db).await.unwrap();
        assert_eq!(counts, TableCounts::default());
        assert_eq!(counts.rows()[0], ("users", 0));
    }

    #[tokio::test]
    async fn test_fresh_recreates_tables_on_file_database() {
        let (db, temp_dir) = crate::testing::create_temp_db().await.unwrap();
        crate::testing::insert_user(&db, crate::testing::UserFixture::new())
            .await
            .unwrap();
        assert_eq!(table_counts(&db).await.unwrap().users, 1);

        fresh_migrations(&db).await.unwrap();

        let status = check_database_status(&db).await.unwrap();
        assert!(status.is_up_to_date());
        assert_eq!(status.applied.len(), migration::TABLES.len());
        assert_eq!(table_counts(&db).await.unwrap(), TableCounts::default());
        assert!(temp_dir.path().join("test.db").exists());
    }
}
