//! # LazYdrobe 数据库管理程序
//!
//! 迁移管理、商品导入和数据统计

use clap::Parser;
use lazydrobe::{
    cli::{self, Cli},
    config, database, lerror, linfo,
    logging::{self, LogComponent, LogStage},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = config::load_config(cli.config.as_deref())?;

    logging::init_logging(Some(
        cli.log_level.as_deref().unwrap_or(&config.logging.level),
    ));

    if let Err(e) = run(cli, &config).await {
        lerror!(
            "system",
            LogStage::Shutdown,
            LogComponent::Main,
            "command_failed",
            &format!("命令执行失败: {e:#}")
        );
        return Err(e);
    }
    Ok(())
}

async fn run(args: Cli, config: &lazydrobe::AppConfig) -> anyhow::Result<()> {
    let db = database::init_database(&config.database).await?;

    cli::execute(args.command, &db, &mut std::io::stdout()).await?;

    linfo!(
        "system",
        LogStage::Shutdown,
        LogComponent::Main,
        "command_done",
        "命令执行完成"
    );
    db.close().await?;
    Ok(())
}
