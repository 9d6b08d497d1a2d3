//! # 错误类型定义

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use super::ErrorCategory;

/// 存储层主要错误类型
#[derive(Debug, Error)]
pub enum LazydrobeError {
    /// 配置相关错误
    #[error("配置错误: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// 其他数据库错误（连接、迁移、查询）
    #[error("数据库错误: {message}")]
    Database {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// 唯一约束冲突：重复邮箱、重复的搭配单品对、重复的商品编号
    #[error("唯一约束冲突: {message}")]
    UniqueViolation {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// 外键约束冲突：引用了不存在的父记录
    #[error("外键约束冲突: {message}")]
    ForeignKeyViolation {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// 非空约束冲突：缺少必填字段
    #[error("非空约束冲突: {message}")]
    NotNullViolation {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// 记录不存在
    #[error("记录未找到: {entity} {id}")]
    NotFound { entity: &'static str, id: String },

    /// 输入校验失败
    #[error("校验失败: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// IO相关错误
    #[error("IO错误: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// 序列化/反序列化错误
    #[error("序列化错误: {message}")]
    Serialization {
        message: String,
        #[source]
        source: anyhow::Error,
    },

    /// 附带上下文的错误
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<LazydrobeError>,
    },
}

/// 去掉上下文包装后的错误分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Config,
    Database,
    UniqueViolation,
    ForeignKeyViolation,
    NotNullViolation,
    NotFound,
    Validation,
    Io,
    Serialization,
}

impl LazydrobeError {
    /// 沿 `Context` 链找到根错误的分类
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config { .. } => ErrorKind::Config,
            Self::Database { .. } => ErrorKind::Database,
            Self::UniqueViolation { .. } => ErrorKind::UniqueViolation,
            Self::ForeignKeyViolation { .. } => ErrorKind::ForeignKeyViolation,
            Self::NotNullViolation { .. } => ErrorKind::NotNullViolation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Io { .. } => ErrorKind::Io,
            Self::Serialization { .. } => ErrorKind::Serialization,
            Self::Context { source, .. } => source.kind(),
        }
    }

    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self.kind() {
            ErrorKind::UniqueViolation
            | ErrorKind::ForeignKeyViolation
            | ErrorKind::NotNullViolation
            | ErrorKind::NotFound
            | ErrorKind::Validation => ErrorCategory::Client,
            ErrorKind::Config
            | ErrorKind::Database
            | ErrorKind::Io
            | ErrorKind::Serialization => ErrorCategory::Server,
        }
    }

    /// 是否为任意一种约束冲突
    #[must_use]
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::UniqueViolation
                | ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
        )
    }

    /// 创建配置错误
    pub fn config<T: Into<String>>(message: T) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// 创建带源错误的配置错误
    pub fn config_with_source<T: Into<String>, E: Into<anyhow::Error>>(
        message: T,
        source: E,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// 创建数据库错误
    pub fn database<T: Into<String>>(message: T) -> Self {
        Self::Database {
            message: message.into(),
            source: None,
        }
    }

    /// 创建带源错误的数据库错误
    pub fn database_with_source<T: Into<String>, E: Into<anyhow::Error>>(
        message: T,
        source: E,
    ) -> Self {
        Self::Database {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn unique_violation<T: Into<String>>(message: T) -> Self {
        Self::UniqueViolation {
            message: message.into(),
            source: None,
        }
    }

    pub fn foreign_key_violation<T: Into<String>>(message: T) -> Self {
        Self::ForeignKeyViolation {
            message: message.into(),
            source: None,
        }
    }

    pub fn not_found<I: ToString>(entity: &'static str, id: I) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// 创建校验错误
    pub fn validation<T: Into<String>>(message: T, field: Option<&str>) -> Self {
        Self::Validation {
            message: message.into(),
            field: field.map(str::to_string),
        }
    }
}

impl From<std::io::Error> for LazydrobeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: "文件操作失败".to_string(),
            source: err,
        }
    }
}

impl From<toml::de::Error> for LazydrobeError {
    fn from(err: toml::de::Error) -> Self {
        Self::config_with_source("TOML解析失败", err)
    }
}

impl From<serde_json::Error> for LazydrobeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON处理失败".to_string(),
            source: err.into(),
        }
    }
}

// SQLite 的部分约束冲突（NOT NULL、复合主键）不一定映射到 SqlErr，退回到错误文本判断
const SQLITE_UNIQUE_MARKER: &str = "UNIQUE constraint failed";
const SQLITE_FOREIGN_KEY_MARKER: &str = "FOREIGN KEY constraint failed";
const SQLITE_NOT_NULL_MARKER: &str = "NOT NULL constraint failed";

impl From<DbErr> for LazydrobeError {
    fn from(err: DbErr) -> Self {
        let text = err.to_string();
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => Self::UniqueViolation {
                message: detail,
                source: Some(err.into()),
            },
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => Self::ForeignKeyViolation {
                message: detail,
                source: Some(err.into()),
            },
            _ if text.contains(SQLITE_UNIQUE_MARKER) => Self::UniqueViolation {
                message: text,
                source: Some(err.into()),
            },
            _ if text.contains(SQLITE_FOREIGN_KEY_MARKER) => Self::ForeignKeyViolation {
                message: text,
                source: Some(err.into()),
            },
            _ if text.contains(SQLITE_NOT_NULL_MARKER) => Self::NotNullViolation {
                message: text,
                source: Some(err.into()),
            },
            _ => Self::database_with_source("数据库操作失败", err),
        }
    }
}

impl From<sea_orm::TransactionError<Self>> for LazydrobeError {
    fn from(err: sea_orm::TransactionError<Self>) -> Self {
        match err {
            sea_orm::TransactionError::Connection(db_err) => db_err.into(),
            sea_orm::TransactionError::Transaction(inner) => inner,
        }
    }
}
