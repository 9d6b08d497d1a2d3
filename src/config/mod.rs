//! # 配置管理模块
//!
//! 处理应用配置加载、环境变量覆盖和校验

mod app_config;
mod database;

pub use app_config::{AppConfig, LoggingConfig};
pub use database::DatabaseConfig;

use std::env;
use std::path::{Path, PathBuf};

use crate::error::{LazydrobeError, Result};
use crate::{config_error, ldebug, linfo, logging::{LogComponent, LogStage}};

/// 指定配置文件路径的环境变量
pub const CONFIG_PATH_ENV: &str = "LAZYDROBE_CONFIG_PATH";
/// 覆盖数据库 URL 的环境变量
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";
/// 覆盖日志级别的环境变量
pub const LOG_LEVEL_ENV: &str = "LAZYDROBE_LOG_LEVEL";

/// 解析配置文件路径：显式参数 > `LAZYDROBE_CONFIG_PATH` > `config/config.{RUST_ENV}.toml`
#[must_use]
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Ok(path) = env::var(CONFIG_PATH_ENV) {
        return PathBuf::from(path);
    }
    let env = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
    PathBuf::from(format!("config/config.{env}.toml"))
}

/// 加载配置
///
/// 文件不存在时使用默认配置；随后应用环境变量覆盖并校验
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig> {
    let config_file = resolve_config_path(explicit);

    let mut config = if config_file.exists() {
        linfo!(
            "system",
            LogStage::Startup,
            LogComponent::Config,
            "load_config",
            &format!("加载配置文件: {}", config_file.display())
        );
        load_config_file(&config_file)?
    } else {
        ldebug!(
            "system",
            LogStage::Startup,
            LogComponent::Config,
            "default_config",
            &format!("配置文件不存在，使用默认配置: {}", config_file.display())
        );
        AppConfig::default()
    };

    apply_env_overrides(&mut config);
    config
        .validate()
        .map_err(|reason| config_error!("配置校验失败: {}", reason))?;

    Ok(config)
}

fn load_config_file(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        LazydrobeError::config_with_source(format!("读取配置文件失败: {}", path.display()), e)
    })?;
    Ok(toml::from_str(&content)?)
}

/// 应用环境变量覆盖
pub fn apply_env_overrides(config: &mut AppConfig) {
    if let Ok(url) = env::var(DATABASE_URL_ENV) {
        if !url.trim().is_empty() {
            config.database.url = url;
        }
    }
    if let Ok(level) = env::var(LOG_LEVEL_ENV) {
        if !level.trim().is_empty() {
            config.logging.level = level;
        }
    }
}

#[cfg(test)]
#[allow(unsafe_code)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serial_test::serial;
    use std::io::Write;

    fn clear_env() {
        unsafe {
            env::remove_var(CONFIG_PATH_ENV);
            env::remove_var(DATABASE_URL_ENV);
            env::remove_var(LOG_LEVEL_ENV);
        }
    }

    #[test]
    #[serial]
    fn test_missing_file_falls_back_to_defaults() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.database.url, DatabaseConfig::default().url);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    #[serial]
    fn test_file_values_and_env_overrides() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.test.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
[database]
url = "sqlite://./data/from_file.db"
max_connections = 4
connect_timeout = 5
sqlx_logging = true

[logging]
level = "warn"
"#
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.database.url, "sqlite://./data/from_file.db");
        assert_eq!(config.database.max_connections, 4);
        assert!(config.database.sqlx_logging);
        assert_eq!(config.logging.level, "warn");

        unsafe {
            env::set_var(DATABASE_URL_ENV, "sqlite::memory:");
            env::set_var(LOG_LEVEL_ENV, "debug");
        }
        let config = load_config(Some(&path)).unwrap();
        clear_env();
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    #[serial]
    fn test_invalid_values_rejected() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(
            &path,
            "[database]\nurl = \"sqlite::memory:\"\nmax_connections = 0\n",
        )
        .unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Config);
        assert!(err.to_string().contains("配置校验失败: Database max_connections"));
    }

    #[test]
    #[serial]
    fn test_resolve_path_prefers_env() {
        clear_env();
        unsafe {
            env::set_var(CONFIG_PATH_ENV, "/tmp/lazydrobe.toml");
        }
        let path = resolve_config_path(None);
        clear_env();
        assert_eq!(path, PathBuf::from("/tmp/lazydrobe.toml"));
    }
}
