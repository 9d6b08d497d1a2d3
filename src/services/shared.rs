//! # 服务层共享工具
//!
//! 分页与通用字段校验

use serde::Serialize;

use crate::ensure_valid;
use crate::error::{LazydrobeError, Result};

/// 分页参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationParams {
    /// 当前页码（>= 1）
    pub page: u64,
    /// 每页条数（>= 1）
    pub limit: u64,
}

impl PaginationParams {
    pub const DEFAULT_LIMIT: u64 = 10;
    pub const MAX_LIMIT: u64 = 100;

    /// 根据可选参数创建分页配置，并应用默认值与上限。
    #[must_use]
    pub fn new(page: Option<u64>, limit: Option<u64>, default_limit: u64, max_limit: u64) -> Self {
        let page = page.unwrap_or(1).max(1);
        let limit = limit.unwrap_or(default_limit).clamp(1, max_limit);
        Self { page, limit }
    }

    /// 跳过的行数，超大页码饱和到 `u64::MAX`
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self::new(None, None, Self::DEFAULT_LIMIT, Self::MAX_LIMIT)
    }
}

/// 标准分页信息
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct PaginationInfo {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub pages: u64,
}

/// 根据总数和分页参数计算分页信息。
#[must_use]
pub const fn build_page(total: u64, params: PaginationParams) -> PaginationInfo {
    let pages = if total == 0 {
        0
    } else {
        total.div_ceil(params.limit)
    };
    PaginationInfo {
        page: params.page,
        limit: params.limit,
        total,
        pages,
    }
}

/// 必填文本：去空白后非空且不超过列宽
pub fn required_text(field: &str, value: &str, max_len: usize) -> Result<String> {
    let trimmed = value.trim();
    ensure_valid!(!trimmed.is_empty(), field, "{} 不能为空", field);
    ensure_valid!(
        trimmed.chars().count() <= max_len,
        field,
        "{} 长度不能超过 {} 个字符",
        field,
        max_len
    );
    Ok(trimmed.to_string())
}

/// 可选文本：空白视为未填写
pub fn optional_text(field: &str, value: Option<&str>, max_len: usize) -> Result<Option<String>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => required_text(field, v, max_len).map(Some),
        None => Ok(None),
    }
}

/// 可选 URL：必须是 http/https 绝对地址
pub fn optional_url(field: &str, value: Option<&str>) -> Result<Option<String>> {
    match optional_text(field, value, URL_MAX_LEN)? {
        Some(raw) => required_url(field, &raw).map(Some),
        None => Ok(None),
    }
}

pub fn required_url(field: &str, value: &str) -> Result<String> {
    let raw = required_text(field, value, URL_MAX_LEN)?;
    let parsed = url::Url::parse(&raw)
        .map_err(|e| LazydrobeError::validation(format!("{field} 不是有效的 URL: {e}"), Some(field)))?;
    ensure_valid!(
        matches!(parsed.scheme(), "http" | "https"),
        field,
        "{} 仅支持 http/https: {}",
        field,
        raw
    );
    Ok(raw)
}

/// VARCHAR(255) 列
pub const TEXT_MAX_LEN: usize = 255;
/// URL 列
pub const URL_MAX_LEN: usize = 1024;
