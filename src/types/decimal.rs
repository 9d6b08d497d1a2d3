//! 定点小数列的精度与标度
//!
//! SQLite 内部以浮点保存 DECIMAL，读写两端都按列声明的标度规整

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{LazydrobeError, Result};

/// `DECIMAL(precision, scale)` 列的描述
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalSpec {
    pub precision: u32,
    pub scale: u32,
    pub allow_negative: bool,
}

impl DecimalSpec {
    /// outfits.trend_score DECIMAL(3,2)，0.00 - 9.99
    pub const TREND_SCORE: Self = Self::new(3, 2, false);
    /// ecommerce_products.price DECIMAL(10,2)
    pub const PRICE: Self = Self::new(10, 2, false);
    /// weather_data.temperature DECIMAL(5,2)
    pub const TEMPERATURE: Self = Self::new(5, 2, true);
    /// weather_data 中的降水、风速、湿度 DECIMAL(5,2)
    pub const WEATHER_MEASURE: Self = Self::new(5, 2, false);

    #[must_use]
    pub const fn new(precision: u32, scale: u32, allow_negative: bool) -> Self {
        Self {
            precision,
            scale,
            allow_negative,
        }
    }

    /// 可表示的最大绝对值，如 DECIMAL(3,2) 为 9.99
    #[must_use]
    pub fn max_abs(self) -> Decimal {
        let digits = 10_i64.pow(self.precision) - 1;
        Decimal::new(digits, self.scale)
    }

    /// 四舍五入（远离零）到声明的标度，并固定显示标度（4.5 -> 4.50）
    #[must_use]
    pub fn normalize(self, value: Decimal) -> Decimal {
        let mut rounded =
            value.round_dp_with_strategy(self.scale, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(self.scale);
        rounded
    }

    /// 写入前校验：规整后超出范围或出现不允许的负数则拒绝
    pub fn check(self, field: &str, value: Decimal) -> Result<Decimal> {
        let normalized = self.normalize(value);
        if !self.allow_negative && normalized.is_sign_negative() && !normalized.is_zero() {
            return Err(LazydrobeError::validation(
                format!("{field} 不能为负数: {value}"),
                Some(field),
            ));
        }
        if normalized.abs() > self.max_abs() {
            return Err(LazydrobeError::validation(
                format!(
                    "{field} 超出 DECIMAL({}, {}) 范围: {value}",
                    self.precision, self.scale
                ),
                Some(field),
            ));
        }
        Ok(normalized)
    }

    pub fn check_opt(self, field: &str, value: Option<Decimal>) -> Result<Option<Decimal>> {
        value.map(|v| self.check(field, v)).transpose()
    }

    #[must_use]
    pub fn normalize_opt(self, value: Option<Decimal>) -> Option<Decimal> {
        value.map(|v| self.normalize(v))
    }
}
