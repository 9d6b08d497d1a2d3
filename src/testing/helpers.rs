//! # 测试辅助函数
//!
//! 提供通用的测试工具和辅助函数

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, EntityTrait};
use sea_orm_migration::MigratorTrait;
use std::sync::Once;
use tempfile::TempDir;
use tracing::Level;

use crate::testing::fixtures::{UserFixture, WardrobeItemFixture};

static INIT: Once = Once::new();

/// 初始化测试环境
pub fn init_test_env() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// 创建内存数据库连接并运行全部迁移
///
/// 内存库只能有一个连接，事务内必须只使用事务句柄
pub async fn create_test_db() -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);
    let db = Database::connect(options).await?;

    migration::Migrator::up(&db, None).await?;

    Ok(db)
}

/// 创建临时数据库文件
pub async fn create_temp_db() -> Result<(DatabaseConnection, TempDir), DbErr> {
    let temp_dir = tempfile::tempdir()
        .map_err(|e| DbErr::Custom(format!("创建临时目录失败: {e}")))?;

    let db_path = temp_dir.path().join("test.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let db = Database::connect(&db_url).await?;
    migration::Migrator::up(&db, None).await?;

    Ok((db, temp_dir))
}

/// 插入测试用户并返回 ID
pub async fn insert_user(db: &DatabaseConnection, fixture: UserFixture) -> Result<i32, DbErr> {
    let result = entity::Users::insert(fixture.to_active_model())
        .exec(db)
        .await?;
    Ok(result.last_insert_id)
}

/// 插入测试单品并返回 ID
pub async fn insert_wardrobe_item(
    db: &DatabaseConnection,
    fixture: WardrobeItemFixture,
) -> Result<i32, DbErr> {
    let result = entity::WardrobeItems::insert(fixture.to_active_model())
        .exec(db)
        .await?;
    Ok(result.last_insert_id)
}

/// 断言错误分类
#[macro_export]
macro_rules! assert_error_kind {
    ($result:expr, $kind:expr) => {
        match $result {
            Err(err) => assert_eq!(err.kind(), $kind, "unexpected error: {err}"),
            Ok(val) => panic!("Expected error, got Ok: {:?}", val),
        }
    };
}

/// 断言包含文本
#[macro_export]
macro_rules! assert_contains {
    ($text:expr, $substring:expr) => {
        assert!(
            $text.contains($substring),
            "Text '{}' does not contain '{}'",
            $text,
            $substring
        );
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, LazydrobeError};
    use sea_orm::{ConnectionTrait, PaginatorTrait};

    #[tokio::test]
    async fn test_create_test_db() {
        init_test_env();
        let db = create_test_db().await.unwrap();
        assert_eq!(db.get_database_backend(), sea_orm::DatabaseBackend::Sqlite);
        assert_eq!(entity::Users::find().count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_temp_db() {
        let (db, temp_dir) = create_temp_db().await.unwrap();
        let user_id = insert_user(&db, UserFixture::new()).await.unwrap();
        assert!(user_id > 0);
        assert!(temp_dir.path().join("test.db").exists());
    }

    #[tokio::test]
    async fn test_insert_helpers() {
        let db = create_test_db().await.unwrap();
        let user_id = insert_user(&db, UserFixture::new()).await.unwrap();
        let item_id = insert_wardrobe_item(&db, WardrobeItemFixture::new(user_id))
            .await
            .unwrap();
        assert!(item_id > 0);
    }

    #[test]
    fn test_assert_macros() {
        assert_contains!("hello world", "world");

        let result: crate::error::Result<()> = Err(LazydrobeError::not_found("users", 1));
        assert_error_kind!(result, ErrorKind::NotFound);
    }
}
