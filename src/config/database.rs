//! # 数据库配置

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{LazydrobeError, Result};
use crate::{linfo, logging::{LogComponent, LogStage}};

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// 数据库URL
    pub url: String,
    /// 最大连接数
    pub max_connections: u32,
    /// 连接超时时间（秒）
    pub connect_timeout: u64,
    /// 是否输出 SQLx 查询日志
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://./data/lazydrobe.db".to_string(),
            max_connections: 10,
            connect_timeout: 30,
            sqlx_logging: false,
        }
    }
}

impl DatabaseConfig {
    /// 内存数据库配置，测试用
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout)
    }

    /// 检查是否为内存数据库
    #[must_use]
    pub fn is_memory_database(&self) -> bool {
        self.url.contains(":memory:")
    }

    /// 检查是否为SQLite数据库
    #[must_use]
    pub fn is_sqlite(&self) -> bool {
        self.url.starts_with("sqlite:")
    }

    /// SQLite 文件路径（去掉 scheme 与查询参数）
    #[must_use]
    pub fn sqlite_file_path(&self) -> Option<&Path> {
        if !self.is_sqlite() || self.is_memory_database() {
            return None;
        }
        let rest = self
            .url
            .strip_prefix("sqlite://")
            .or_else(|| self.url.strip_prefix("sqlite:"))?;
        let path = rest.split('?').next().unwrap_or(rest);
        (!path.is_empty()).then(|| Path::new(path))
    }

    /// 确保数据库文件所在目录存在（仅对SQLite文件数据库）
    pub fn ensure_database_path(&self) -> Result<()> {
        let Some(db_path) = self.sqlite_file_path() else {
            return Ok(());
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    LazydrobeError::config_with_source(
                        format!("无法创建数据库目录: {}", parent.display()),
                        e,
                    )
                })?;
                linfo!(
                    "system",
                    LogStage::Startup,
                    LogComponent::Database,
                    "create_db_dir",
                    &format!("创建数据库目录: {}", parent.display())
                );
            }
        }

        Ok(())
    }

    /// 获取准备好的数据库连接字符串
    ///
    /// 文件数据库附加 `mode=rwc`，首次连接时自动创建文件
    pub fn connection_url(&self) -> Result<String> {
        self.ensure_database_path()?;
        if self.sqlite_file_path().is_some() && !self.url.contains("mode=") {
            let separator = if self.url.contains('?') { '&' } else { '?' };
            return Ok(format!("{}{separator}mode=rwc", self.url));
        }
        Ok(self.url.clone())
    }
}
