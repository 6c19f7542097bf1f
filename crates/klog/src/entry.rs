//! 日志条目与格式化

use core::fmt::{self, Write};

use crate::config::MAX_LOG_MESSAGE_LENGTH;
use crate::level::LogLevel;

/// 一条日志记录
///
/// 定长、可复制，消息按 UTF-8 字符边界截断到 [`MAX_LOG_MESSAGE_LENGTH`] 字节。
#[derive(Clone, Copy)]
pub struct LogEntry {
    level: LogLevel,
    core_id: usize,
    thread_id: u32,
    timestamp: usize,
    len: usize,
    message: [u8; MAX_LOG_MESSAGE_LENGTH],
}

impl LogEntry {
    /// 空条目，用于初始化缓冲区槽位
    pub const EMPTY: LogEntry = LogEntry {
        level: LogLevel::Debug,
        core_id: 0,
        thread_id: 0,
        timestamp: 0,
        len: 0,
        message: [0; MAX_LOG_MESSAGE_LENGTH],
    };

    /// 在栈上格式化出一条日志
    pub fn from_args(
        level: LogLevel,
        core_id: usize,
        thread_id: u32,
        timestamp: usize,
        args: fmt::Arguments<'_>,
    ) -> Self {
        let mut entry = LogEntry {
            level,
            core_id,
            thread_id,
            timestamp,
            ..LogEntry::EMPTY
        };
        let mut writer = MessageWriter {
            buf: &mut entry.message,
            len: 0,
        };
        // MessageWriter 从不返回错误，截断是静默的
        let _ = writer.write_fmt(args);
        entry.len = writer.len;
        entry
    }

    /// 级别
    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// 记录日志的核
    pub fn core_id(&self) -> usize {
        self.core_id
    }

    /// 记录日志的线程（0 表示不在线程上下文）
    pub fn thread_id(&self) -> u32 {
        self.thread_id
    }

    /// 时间戳
    pub fn timestamp(&self) -> usize {
        self.timestamp
    }

    /// 消息文本
    pub fn message(&self) -> &str {
        core::str::from_utf8(&self.message[..self.len]).unwrap_or("")
    }

    /// 格式化后的字节数，与 [`format_log_entry`] 的输出长度一致
    pub fn formatted_len(&self) -> usize {
        let mut counter = ByteCounter(0);
        let _ = format_log_entry(&mut counter, self);
        counter.0
    }
}

impl fmt::Debug for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogEntry")
            .field("level", &self.level)
            .field("core_id", &self.core_id)
            .field("thread_id", &self.thread_id)
            .field("timestamp", &self.timestamp)
            .field("message", &self.message())
            .finish()
    }
}

struct MessageWriter<'a> {
    buf: &'a mut [u8; MAX_LOG_MESSAGE_LENGTH],
    len: usize,
}

impl Write for MessageWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = MAX_LOG_MESSAGE_LENGTH - self.len;
        let mut take = s.len().min(room);
        while !s.is_char_boundary(take) {
            take -= 1;
        }
        self.buf[self.len..self.len + take].copy_from_slice(&s.as_bytes()[..take]);
        self.len += take;
        Ok(())
    }
}

struct ByteCounter(usize);

impl Write for ByteCounter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0 += s.len();
        Ok(())
    }
}

/// 把日志条目格式化到任意 [`fmt::Write`]，不分配内存
///
/// 控制台输出和字节计数都经过这一个函数，所以二者永远一致。
///
/// ```text
/// <color>[LEVEL] [   timestamp] [C<core>/T<tid>] message<reset>
/// ```
pub fn format_log_entry<W: Write + ?Sized>(out: &mut W, entry: &LogEntry) -> fmt::Result {
    write!(
        out,
        "{}{} [{:12}] [C{}/T{:3}] {}{}",
        entry.level().color_code(),
        entry.level().as_str(),
        entry.timestamp(),
        entry.core_id(),
        entry.thread_id(),
        entry.message(),
        entry.level().reset_color_code()
    )
}
