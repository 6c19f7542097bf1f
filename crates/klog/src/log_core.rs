//! 日志系统核心实现
//!
//! 所有日志状态集中在 [`LogCore`] 中：全局实例服务于宏和 `log` 门面，
//! 测试则可以各自创建本地实例，互不干扰。

use core::fmt::{self, Write};
use core::sync::atomic::{AtomicU8, Ordering};

use crate::LogOutput;
use crate::buffer::GlobalLogBuffer;
use crate::config::{DEFAULT_CONSOLE_LEVEL, DEFAULT_LOG_LEVEL};
use crate::entry::{LogEntry, format_log_entry};
use crate::level::LogLevel;

/// 核心日志系统
///
/// 所有方法只使用原子操作，可以在线程与中断上下文之间共享。
pub struct LogCore {
    buffer: GlobalLogBuffer,
    /// 低于此级别的日志被丢弃
    global_level: AtomicU8,
    /// 达到此级别的日志立即写到控制台
    console_level: AtomicU8,
}

impl LogCore {
    /// 使用默认级别创建，可用于 `static`
    pub const fn new() -> Self {
        Self::with_levels(DEFAULT_LOG_LEVEL, DEFAULT_CONSOLE_LEVEL)
    }

    /// 使用指定级别创建
    pub const fn with_levels(global_level: LogLevel, console_level: LogLevel) -> Self {
        Self {
            buffer: GlobalLogBuffer::new(),
            global_level: AtomicU8::new(global_level as u8),
            console_level: AtomicU8::new(console_level as u8),
        }
    }

    /// 记录一条日志
    ///
    /// 1. 按全局级别过滤
    /// 2. 从已注册的 [`LogContextProvider`](crate::LogContextProvider) 取核号、线程号、时间戳
    /// 3. 在栈上构造条目并写入环形缓冲区
    /// 4. 达到控制台级别时直接写到已注册的 [`LogOutput`]
    pub fn log(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        if !self.is_level_enabled(level) {
            return;
        }

        let (core_id, thread_id, timestamp) = match crate::get_context_provider() {
            Some(provider) => (provider.core_id(), provider.thread_id(), provider.timestamp()),
            None => (0, 0, 0),
        };

        let entry = LogEntry::from_args(level, core_id, thread_id, timestamp, args);
        self.buffer.write(&entry);

        if self.is_console_level(level) {
            if let Some(output) = crate::get_log_output() {
                print_entry(output, &entry);
            }
        }
    }

    /// 读取并移除最早的一条日志
    pub fn read(&self) -> Option<LogEntry> {
        self.buffer.read()
    }

    /// 按序号读取，不移动读指针
    pub fn peek(&self, index: usize) -> Option<LogEntry> {
        self.buffer.peek(index)
    }

    /// 读指针
    pub fn reader_index(&self) -> usize {
        self.buffer.reader_index()
    }

    /// 写指针
    pub fn writer_index(&self) -> usize {
        self.buffer.writer_index()
    }

    /// 未读条目数
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// 是否没有未读条目
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// 未读日志格式化后的总字节数
    pub fn unread_bytes(&self) -> usize {
        self.buffer.unread_bytes()
    }

    /// 因溢出丢弃的条目数
    pub fn dropped_count(&self) -> usize {
        self.buffer.dropped_count()
    }

    /// 设置全局级别
    pub fn set_global_level(&self, level: LogLevel) {
        self.global_level.store(level as u8, Ordering::Release);
    }

    /// 全局级别
    pub fn global_level(&self) -> LogLevel {
        LogLevel::from_u8(self.global_level.load(Ordering::Acquire))
    }

    /// 设置控制台级别
    pub fn set_console_level(&self, level: LogLevel) {
        self.console_level.store(level as u8, Ordering::Release);
    }

    /// 控制台级别
    pub fn console_level(&self) -> LogLevel {
        LogLevel::from_u8(self.console_level.load(Ordering::Acquire))
    }

    /// 该级别的日志是否会被记录
    #[inline(always)]
    pub fn is_level_enabled(&self, level: LogLevel) -> bool {
        level as u8 <= self.global_level.load(Ordering::Acquire)
    }

    #[inline(always)]
    fn is_console_level(&self, level: LogLevel) -> bool {
        level as u8 <= self.console_level.load(Ordering::Acquire)
    }
}

impl Default for LogCore {
    fn default() -> Self {
        Self::new()
    }
}

struct OutputWriter<'a>(&'a dyn LogOutput);

impl Write for OutputWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.write_str(s);
        Ok(())
    }
}

/// 不经缓冲区直接输出一条日志，早期启动与 fail-stop 路径也可用
pub(crate) fn print_entry(output: &dyn LogOutput, entry: &LogEntry) {
    let mut writer = OutputWriter(output);
    let _ = format_log_entry(&mut writer, entry);
    output.write_str("\n");
}
