//! # LazYdrobe 存储层
//!
//! 衣橱与搭配推荐应用的关系型数据层：用户、衣橱单品、搭配及其单品关联、
//! 天气快照、时尚趋势和电商商品推荐。

pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod services;
pub mod testing;
pub mod types;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{LazydrobeError, Result};
