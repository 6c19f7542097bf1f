//! 固件日志子系统
//!
//! 裸机环境下的**无锁环形缓冲区**日志，接口风格与 Linux 内核的 `pr_*` 系列一致。
//!
//! # 组件
//!
//! - [`buffer`] - 无锁环形缓冲区
//! - [`config`] - 配置常量（缓冲区大小、消息长度、默认级别）
//! - [`log_core`] - 核心实现 [`LogCore`]
//! - [`entry`] - 日志条目与格式化
//! - [`level`] - 日志级别（Emergency 到 Debug）
//! - [`macros`] - `pr_info!`、`pr_err!` 等宏
//! - [`facade`] - `log` 门面的后端
//!
//! # 双输出
//!
//! 1. 达到控制台级别的日志立即写到已注册的 [`LogOutput`]（串口）。
//! 2. 达到全局级别的日志写入环形缓冲区，供事后读取。
//!
//! 整个子系统不分配内存；缓冲区满时丢弃新日志并计数。
//!
//! # 架构解耦
//!
//! - [`LogContextProvider`]：核号、线程号、时间戳
//! - [`LogOutput`]：字节流输出
//!
//! 平台在启动时注册二者；未注册时上下文取 0，控制台输出被跳过。

#![no_std]

#[cfg(test)]
extern crate std;

pub mod buffer;
pub mod config;
pub mod entry;
pub mod facade;
pub mod level;
pub mod log_core;
pub mod macros;

pub use config::{
    DEFAULT_CONSOLE_LEVEL, DEFAULT_LOG_LEVEL, GLOBAL_LOG_BUFFER_SIZE, MAX_LOG_MESSAGE_LENGTH,
};
pub use entry::{LogEntry, format_log_entry};
pub use facade::{KlogLogger, init_log_facade};
pub use level::LogLevel;
pub use log_core::LogCore;

use core::sync::atomic::{AtomicPtr, Ordering};

/// 日志上下文提供者
pub trait LogContextProvider: Send + Sync {
    /// 当前核编号（0 为安全核）
    fn core_id(&self) -> usize;
    /// 当前线程编号，不在线程上下文时为 0
    fn thread_id(&self) -> u32;
    /// 当前时间戳
    fn timestamp(&self) -> usize;
}

/// 日志输出
pub trait LogOutput: Send + Sync {
    /// 输出字符串
    fn write_str(&self, s: &str);
}

/// trait object 胖指针的两半
struct DynPtr {
    data: AtomicPtr<()>,
    vtable: AtomicPtr<()>,
}

impl DynPtr {
    const fn new() -> Self {
        Self {
            data: AtomicPtr::new(core::ptr::null_mut()),
            vtable: AtomicPtr::new(core::ptr::null_mut()),
        }
    }

    fn store(&self, (data, vtable): (*mut (), *mut ())) {
        self.vtable.store(vtable, Ordering::Release);
        self.data.store(data, Ordering::Release);
    }

    fn load(&self) -> Option<(*mut (), *mut ())> {
        let data = self.data.load(Ordering::Acquire);
        let vtable = self.vtable.load(Ordering::Acquire);
        if data.is_null() || vtable.is_null() {
            None
        } else {
            Some((data, vtable))
        }
    }
}

static CONTEXT_PROVIDER: DynPtr = DynPtr::new();
static LOG_OUTPUT: DynPtr = DynPtr::new();

/// 注册日志上下文提供者
///
/// # Safety
///
/// 必须在单线程环境下、任何日志调用之前调用，且只能调用一次
pub unsafe fn register_context_provider(provider: &'static dyn LogContextProvider) {
    let ptr: *const dyn LogContextProvider = provider;
    // SAFETY: fat pointer 的布局是 (data, vtable)
    CONTEXT_PROVIDER.store(unsafe { core::mem::transmute::<_, (*mut (), *mut ())>(ptr) });
}

/// 注册日志输出
///
/// # Safety
///
/// 必须在单线程环境下、任何日志调用之前调用，且只能调用一次
pub unsafe fn register_log_output(output: &'static dyn LogOutput) {
    let ptr: *const dyn LogOutput = output;
    // SAFETY: 同上
    LOG_OUTPUT.store(unsafe { core::mem::transmute::<_, (*mut (), *mut ())>(ptr) });
}

pub(crate) fn get_context_provider() -> Option<&'static dyn LogContextProvider> {
    let parts = CONTEXT_PROVIDER.load()?;
    // SAFETY: 指针由 register_context_provider 设置
    Some(unsafe {
        core::mem::transmute::<(*mut (), *mut ()), &'static dyn LogContextProvider>(parts)
    })
}

pub(crate) fn get_log_output() -> Option<&'static dyn LogOutput> {
    let parts = LOG_OUTPUT.load()?;
    // SAFETY: 指针由 register_log_output 设置
    Some(unsafe { core::mem::transmute::<(*mut (), *mut ()), &'static dyn LogOutput>(parts) })
}

static GLOBAL_LOG: LogCore = LogCore::new();

/// 宏的实现入口
#[doc(hidden)]
pub fn log_impl(level: LogLevel, args: core::fmt::Arguments<'_>) {
    GLOBAL_LOG.log(level, args);
}

/// 该级别是否启用（宏的早期过滤）
#[doc(hidden)]
pub fn is_level_enabled(level: LogLevel) -> bool {
    GLOBAL_LOG.is_level_enabled(level)
}

/// 读取下一条日志
pub fn read_log() -> Option<LogEntry> {
    GLOBAL_LOG.read()
}

/// 按序号读取，不移动读指针
pub fn peek_log(index: usize) -> Option<LogEntry> {
    GLOBAL_LOG.peek(index)
}

/// 读指针
pub fn log_reader_index() -> usize {
    GLOBAL_LOG.reader_index()
}

/// 写指针
pub fn log_writer_index() -> usize {
    GLOBAL_LOG.writer_index()
}

/// 未读日志条数
pub fn log_len() -> usize {
    GLOBAL_LOG.len()
}

/// 未读日志的字节数（格式化后）
pub fn log_unread_bytes() -> usize {
    GLOBAL_LOG.unread_bytes()
}

/// 已丢弃的日志条数
pub fn log_dropped_count() -> usize {
    GLOBAL_LOG.dropped_count()
}

/// 设置全局级别
pub fn set_global_level(level: LogLevel) {
    GLOBAL_LOG.set_global_level(level);
}

/// 当前全局级别
pub fn get_global_level() -> LogLevel {
    GLOBAL_LOG.global_level()
}

/// 设置控制台级别
pub fn set_console_level(level: LogLevel) {
    GLOBAL_LOG.set_console_level(level);
}

/// 当前控制台级别
pub fn get_console_level() -> LogLevel {
    GLOBAL_LOG.console_level()
}

/// 绕过缓冲区，直接把一条消息写到控制台
///
/// 供 fail-stop 路径使用：即将停机时缓冲区已无人读取。
pub fn emergency_print(args: core::fmt::Arguments<'_>) {
    if let Some(output) = get_log_output() {
        let (core_id, thread_id, timestamp) = match get_context_provider() {
            Some(p) => (p.core_id(), p.thread_id(), p.timestamp()),
            None => (0, 0, 0),
        };
        let entry = LogEntry::from_args(LogLevel::Emergency, core_id, thread_id, timestamp, args);
        log_core::print_entry(output, &entry);
    }
}

#[cfg(test)]
mod tests;
