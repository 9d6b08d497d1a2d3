//! # 错误处理宏

/// 快速创建配置错误的宏
#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::error::LazydrobeError::config($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::LazydrobeError::config(format!($fmt, $($arg)*))
    };
}

/// 确保条件成立，否则返回校验错误
#[macro_export]
macro_rules! ensure_valid {
    ($cond:expr, $field:expr, $msg:expr) => {
        if !($cond) {
            return Err($crate::error::LazydrobeError::validation($msg, Some($field)));
        }
    };
    ($cond:expr, $field:expr, $fmt:expr, $($arg:tt)*) => {
        if !($cond) {
            return Err($crate::error::LazydrobeError::validation(
                format!($fmt, $($arg)*),
                Some($field),
            ));
        }
    };
}
