//! 配置/入参校验宏
//!
//! 失败时直接 `return Err(anyhow!(..))`，调用方需要返回 `anyhow::Result`。

/// 条件为假时返回格式化的错误
#[macro_export]
macro_rules! ensure_that {
    ($cond:expr, $($arg:tt)+) => {
        if !($cond) {
            return Err(::anyhow::anyhow!($($arg)+));
        }
    };
}

/// 字符串 (去掉首尾空白后) 不能为空
#[macro_export]
macro_rules! ensure_not_blank {
    ($text:expr, $($arg:tt)+) => {
        if $text.trim().is_empty() {
            return Err(::anyhow::anyhow!($($arg)+));
        }
    };
}

/// 数值在 [min, max] 范围内
#[macro_export]
macro_rules! ensure_range {
    ($val:expr, $min:expr, $max:expr, $($arg:tt)+) => {
        if $val < $min || $val > $max {
            return Err(::anyhow::anyhow!($($arg)+));
        }
    };
}
