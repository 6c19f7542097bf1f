//! 标准输出串口
//!
//! 诊断文本（日志控制台输出）最终经由这里注册的 [`Usart`] 发出。

use core::fmt;

use sync::RwLock;

use crate::config::DEFAULT_UART_BAUDRATE;

/// 串口工作模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsartMode {
    /// 异步 UART
    Asynchronous,
}

/// 驱动错误
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverError {
    /// 未指明的错误
    Generic,
    /// 驱动忙
    Busy,
    /// 超时
    Timeout,
    /// 不支持的操作
    Unsupported,
    /// 参数错误
    Parameter,
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DriverError::Generic => "generic driver error",
            DriverError::Busy => "driver busy",
            DriverError::Timeout => "driver timeout",
            DriverError::Unsupported => "operation not supported",
            DriverError::Parameter => "bad parameter",
        };
        f.write_str(s)
    }
}

/// 串口驱动
pub trait Usart: Send + Sync {
    /// 上电并初始化
    fn initialize(&self) -> Result<(), DriverError>;
    /// 设置工作模式和波特率
    fn configure(&self, mode: UsartMode, baudrate: u32) -> Result<(), DriverError>;
    /// 发送字节
    fn send(&self, data: &[u8]) -> Result<(), DriverError>;
}

static STDIO: RwLock<Option<&'static dyn Usart>> = sync::const_rwlock(None);

/// 当前的标准输出串口
pub fn stdio() -> Option<&'static dyn Usart> {
    *STDIO.read()
}

/// 初始化标准输出串口并把它设为输出目标
///
/// 驱动报告的错误只记录，不中止启动：没有串口时系统照常运行，只是没有诊断输出。
pub fn stdio_init(usart: &'static dyn Usart) {
    if let Err(e) = usart.initialize() {
        log::warn!("stdio: initialize failed: {}", e);
    }
    if let Err(e) = usart.configure(UsartMode::Asynchronous, DEFAULT_UART_BAUDRATE) {
        log::warn!("stdio: configure failed: {}", e);
    }
    *STDIO.write() = Some(usart);
}

/// 写到标准输出串口，未初始化时丢弃
pub struct Stdout;

impl fmt::Write for Stdout {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        match stdio() {
            Some(usart) => usart.send(s.as_bytes()).map_err(|_| fmt::Error),
            None => Ok(()),
        }
    }
}
