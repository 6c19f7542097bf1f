//! 日志系统配置常量

use crate::level::LogLevel;

/// 环形缓冲区可容纳的条目数
pub const GLOBAL_LOG_BUFFER_SIZE: usize = 32;

/// 单条日志消息的最大字节数，超出部分被截断
pub const MAX_LOG_MESSAGE_LENGTH: usize = 128;

/// 默认全局级别：低于此级别的日志不进入缓冲区
pub const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

/// 默认控制台级别：达到此级别的日志立即写到串口
pub const DEFAULT_CONSOLE_LEVEL: LogLevel = LogLevel::Info;
