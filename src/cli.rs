//! 命令行参数定义与命令执行

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sea_orm::DatabaseConnection;

use crate::database;
use crate::error::Result;
use crate::services::{ProductsService, load_listings};
use crate::types::UserId;

#[derive(Parser, Debug)]
#[command(author, version, about = "LazYdrobe 数据库管理工具", long_about = None)]
pub struct Cli {
    /// 配置文件路径，缺省读取 LAZYDROBE_CONFIG_PATH 或 config/config.{RUST_ENV}.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// 覆盖配置中的日志级别
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// 数据库迁移
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
    /// 从 JSON 文件导入 eBay 商品
    ImportProducts {
        #[arg(short, long)]
        file: PathBuf,
        /// 导入的商品分配给该用户
        #[arg(long)]
        user_id: Option<UserId>,
    },
    /// 输出各表行数
    Stats,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    /// 应用全部待执行迁移
    Up,
    /// 回滚迁移，缺省回滚一步
    Down {
        #[arg(long, default_value_t = 1)]
        steps: u32,
        /// 回滚全部迁移
        #[arg(long, conflicts_with = "steps")]
        all: bool,
    },
    /// 查看迁移状态
    Status,
    /// 删除全部表并重新迁移
    Fresh,
}

/// 在已连接的数据库上执行子命令，结果写入 `out`
pub async fn execute<W: Write>(command: Command, db: &DatabaseConnection, out: &mut W) -> Result<()> {
    match command {
        Command::Migrate { action } => match action {
            MigrateAction::Up => database::run_migrations(db).await?,
            MigrateAction::Down { steps, all } => {
                database::rollback_migrations(db, (!all).then_some(steps)).await?;
            }
            MigrateAction::Status => {
                let status = database::check_database_status(db).await?;
                for name in &status.applied {
                    writeln!(out, "[applied] {name}")?;
                }
                for name in &status.pending {
                    writeln!(out, "[pending] {name}")?;
                }
            }
            MigrateAction::Fresh => database::fresh_migrations(db).await?,
        },
        Command::ImportProducts { file, user_id } => {
            database::run_migrations(db).await?;
            let listings = load_listings(&file)?;
            let report = ProductsService::new(db)
                .import_listings(&listings, user_id)
                .await?;
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        }
        Command::Stats => {
            database::run_migrations(db).await?;
            let counts = database::table_counts(db).await?;
            for (table, rows) in counts.rows() {
                writeln!(out, "{table:<20} {rows}")?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::testing::sample_listings_json;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    async fn run_to_string(command: Command, db: &DatabaseConnection) -> String {
        let mut out = Vec::new();
        execute(command, db, &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_migrate_down() {
        let cli = Cli::parse_from(["lazydrobe", "migrate", "down", "--steps", "2"]);
        assert!(matches!(
            cli.command,
            Command::Migrate {
                action: MigrateAction::Down { steps: 2, all: false }
            }
        ));

        let cli = Cli::parse_from(["lazydrobe", "migrate", "down", "--all"]);
        assert!(matches!(
            cli.command,
            Command::Migrate {
                action: MigrateAction::Down { all: true, .. }
            }
        ));
    }

    #[test]
    fn test_parse_import_with_globals() {
        let cli = Cli::parse_from([
            "lazydrobe",
            "import-products",
            "--file",
            "listings.json",
            "--user-id",
            "7",
            "--log-level",
            "debug",
        ]);
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        match cli.command {
            Command::ImportProducts { file, user_id } => {
                assert_eq!(file, PathBuf::from("listings.json"));
                assert_eq!(user_id, Some(7));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_execute_migrate_status_up_and_down() {
        let db = database::init_database(&DatabaseConfig::in_memory()).await.unwrap();

        let before = run_to_string(Command::Migrate { action: MigrateAction::Status }, &db).await;
        assert_eq!(before.lines().count(), migration::TABLES.len());
        assert!(before.lines().all(|line| line.starts_with("[pending] ")));

        run_to_string(Command::Migrate { action: MigrateAction::Up }, &db).await;
        let after = run_to_string(Command::Migrate { action: MigrateAction::Status }, &db).await;
        assert!(after.lines().all(|line| line.starts_with("[applied] ")));

        run_to_string(
            Command::Migrate { action: MigrateAction::Down { steps: 1, all: false } },
            &db,
        )
        .await;
        let after_down = run_to_string(Command::Migrate { action: MigrateAction::Status }, &db).await;
        assert_eq!(
            after_down.lines().last(),
            Some("[pending] m20241120_000001_create_ecommerce_products_table")
        );
    }

    #[tokio::test]
    async fn test_execute_import_then_stats() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("listings.json");
        std::fs::write(&file, sample_listings_json().to_string()).unwrap();
        let db = database::init_database(&DatabaseConfig::in_memory()).await.unwrap();

        let report = run_to_string(Command::ImportProducts { file, user_id: None }, &db).await;
        let report: serde_json::Value = serde_json::from_str(&report).unwrap();
        assert_eq!(report["inserted"], 2);

        let stats = run_to_string(Command::Stats, &db).await;
        let lines: Vec<&str> = stats.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0].split_whitespace().collect::<Vec<_>>(), vec!["users", "0"]);
        assert_eq!(
            lines[6].split_whitespace().collect::<Vec<_>>(),
            vec!["ecommerce_products", "2"]
        );
    }

    #[tokio::test]
    async fn test_execute_import_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let db = database::init_database(&DatabaseConfig::in_memory()).await.unwrap();
        let mut out = Vec::new();

        let err = execute(
            Command::ImportProducts { file: dir.path().join("absent.json"), user_id: None },
            &db,
            &mut out,
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Io);
        assert!(out.is_empty());
    }
}
