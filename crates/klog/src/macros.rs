//! 日志宏
//!
//! 级别检查在格式化之前进行，被过滤的日志不会求值格式化参数。

/// 以指定级别记录日志
#[macro_export]
macro_rules! klog {
    ($level:expr, $($arg:tt)*) => {{
        let level = $level;
        if $crate::is_level_enabled(level) {
            $crate::log_impl(level, format_args!($($arg)*));
        }
    }};
}

/// Emergency 级别
#[macro_export]
macro_rules! pr_emerg {
    ($($arg:tt)*) => { $crate::klog!($crate::LogLevel::Emergency, $($arg)*) };
}

/// Alert 级别
#[macro_export]
macro_rules! pr_alert {
    ($($arg:tt)*) => { $crate::klog!($crate::LogLevel::Alert, $($arg)*) };
}

/// Critical 级别
#[macro_export]
macro_rules! pr_crit {
    ($($arg:tt)*) => { $crate::klog!($crate::LogLevel::Critical, $($arg)*) };
}

/// Error 级别
#[macro_export]
macro_rules! pr_err {
    ($($arg:tt)*) => { $crate::klog!($crate::LogLevel::Error, $($arg)*) };
}

/// Warning 级别
#[macro_export]
macro_rules! pr_warn {
    ($($arg:tt)*) => { $crate::klog!($crate::LogLevel::Warning, $($arg)*) };
}

/// Notice 级别
#[macro_export]
macro_rules! pr_notice {
    ($($arg:tt)*) => { $crate::klog!($crate::LogLevel::Notice, $($arg)*) };
}

/// Info 级别
#[macro_export]
macro_rules! pr_info {
    ($($arg:tt)*) => { $crate::klog!($crate::LogLevel::Info, $($arg)*) };
}

/// Debug 级别
#[macro_export]
macro_rules! pr_debug {
    ($($arg:tt)*) => { $crate::klog!($crate::LogLevel::Debug, $($arg)*) };
}
