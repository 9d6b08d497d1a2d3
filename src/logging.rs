//! # 日志配置模块
//!
//! 基于 `tracing` 的日志初始化，以及带阶段/组件标签的结构化日志宏

use std::env;
use std::fmt;
use tracing_subscriber::{EnvFilter, fmt as tracing_fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// 日志所处的处理阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogStage {
    Startup,
    Migration,
    Read,
    Write,
    Import,
    Shutdown,
}

impl LogStage {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Startup => "startup",
            Self::Migration => "migration",
            Self::Read => "read",
            Self::Write => "write",
            Self::Import => "import",
            Self::Shutdown => "shutdown",
        }
    }
}

impl fmt::Display for LogStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 产生日志的组件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogComponent {
    Main,
    Config,
    Database,
    Users,
    Wardrobe,
    Outfits,
    Weather,
    Trends,
    Products,
}

impl LogComponent {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Config => "config",
            Self::Database => "database",
            Self::Users => "users",
            Self::Wardrobe => "wardrobe",
            Self::Outfits => "outfits",
            Self::Weather => "weather",
            Self::Trends => "trends",
            Self::Products => "products",
        }
    }
}

impl fmt::Display for LogComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 结构化 info 日志
///
/// `linfo!(request_id, LogStage, LogComponent, operation, message)`
#[macro_export]
macro_rules! linfo {
    ($request_id:expr, $stage:expr, $component:expr, $operation:expr, $message:expr $(,)?) => {
        tracing::info!(
            request_id = %$request_id,
            stage = %$stage,
            component = %$component,
            operation = $operation,
            "{}",
            $message
        )
    };
}

/// 结构化 debug 日志
#[macro_export]
macro_rules! ldebug {
    ($request_id:expr, $stage:expr, $component:expr, $operation:expr, $message:expr $(,)?) => {
        tracing::debug!(
            request_id = %$request_id,
            stage = %$stage,
            component = %$component,
            operation = $operation,
            "{}",
            $message
        )
    };
}

/// 结构化 warn 日志
#[macro_export]
macro_rules! lwarn {
    ($request_id:expr, $stage:expr, $component:expr, $operation:expr, $message:expr $(,)?) => {
        tracing::warn!(
            request_id = %$request_id,
            stage = %$stage,
            component = %$component,
            operation = $operation,
            "{}",
            $message
        )
    };
}

/// 结构化 error 日志
#[macro_export]
macro_rules! lerror {
    ($request_id:expr, $stage:expr, $component:expr, $operation:expr, $message:expr $(,)?) => {
        tracing::error!(
            request_id = %$request_id,
            stage = %$stage,
            component = %$component,
            operation = $operation,
            "{}",
            $message
        )
    };
}

/// 构造默认的过滤规则：默认关闭 SQLx 的逐条查询日志
#[must_use]
pub fn default_filter(level: &str) -> String {
    format!("{level},lazydrobe=debug,sqlx::query=off,sea_orm::query=warn,sqlx=warn")
}

/// 初始化日志系统
///
/// `RUST_LOG` 存在时优先使用，否则使用 `log_level`（默认 info）
pub fn init_logging(log_level: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let log_filter = env::var("RUST_LOG").unwrap_or_else(|_| default_filter(level));

    let initialized = tracing_subscriber::registry()
        .with(EnvFilter::try_new(&log_filter).unwrap_or_else(|_| EnvFilter::new(default_filter("info"))))
        .with(
            tracing_fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init()
        .is_ok();

    if initialized && log_filter.contains("sqlx::query=info") {
        tracing::info!("🔍 SQLx database query logging enabled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_silences_queries() {
        let filter = default_filter("warn");
        assert!(filter.starts_with("warn,"));
        assert!(filter.contains("sqlx::query=off"));
        assert!(EnvFilter::try_new(&filter).is_ok());
    }

    #[test]
    fn test_labels() {
        assert_eq!(LogStage::Import.to_string(), "import");
        assert_eq!(LogComponent::Outfits.to_string(), "outfits");
    }

    #[test]
    fn test_init_is_idempotent() {
        init_logging(Some("debug"));
        init_logging(None);
        linfo!("test", LogStage::Startup, LogComponent::Main, "init", "logging ready");
    }
}
