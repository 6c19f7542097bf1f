//! `log` 门面桥接
//!
//! 各库 crate 通过 `log::info!` 等宏记录日志，这里把它们转发到全局环形缓冲区，
//! 目标（通常是模块路径）作为消息前缀保留。

use crate::level::LogLevel;

/// 实现 [`log::Log`] 的转发器
pub struct KlogLogger;

/// 全局转发器实例
pub static LOGGER: KlogLogger = KlogLogger;

impl log::Log for KlogLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        crate::is_level_enabled(LogLevel::from(metadata.level()))
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        crate::log_impl(
            LogLevel::from(record.level()),
            format_args!("{}: {}", record.target(), record.args()),
        );
    }

    fn flush(&self) {}
}

/// 把 [`LOGGER`] 安装为 `log` 门面的后端
///
/// 只能成功一次；之后的调用返回 [`log::SetLoggerError`]。
pub fn init_log_facade(max_level: log::LevelFilter) -> Result<(), log::SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(max_level);
    Ok(())
}
