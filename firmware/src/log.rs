//! 日志接入
//!
//! 把核号、RTOS 线程号和节拍数提供给 `klog`，把控制台输出接到标准输出串口，
//! 并让各库 crate 的 `log` 宏记录进同一个缓冲区。

use core::fmt::Write;

use klog::{LogContextProvider, LogOutput};
use sync::RwLock;

use crate::ns::rtos::Rtos;
use crate::ns::stdio::Stdout;

static KERNEL: RwLock<Option<&'static dyn Rtos>> = sync::const_rwlock(None);

/// 设置提供线程号和时间戳的 RTOS 内核
pub fn set_kernel(rtos: &'static dyn Rtos) {
    *KERNEL.write() = Some(rtos);
}

fn kernel() -> Option<&'static dyn Rtos> {
    *KERNEL.read()
}

pub(crate) struct FirmwareLogContext;

impl LogContextProvider for FirmwareLogContext {
    fn core_id(&self) -> usize {
        sync::core_id()
    }

    fn thread_id(&self) -> u32 {
        kernel()
            .and_then(|k| k.current_thread())
            .map_or(0, |id| id.0)
    }

    fn timestamp(&self) -> usize {
        kernel().map_or(0, |k| k.tick_count())
    }
}

struct UartOutput;

impl LogOutput for UartOutput {
    fn write_str(&self, s: &str) {
        let _ = Stdout.write_str(s);
    }
}

static LOG_CONTEXT: FirmwareLogContext = FirmwareLogContext;
static LOG_OUTPUT: UartOutput = UartOutput;

/// 初始化日志
///
/// # Safety
///
/// 必须在单线程环境下、任何日志调用之前调用，且只能调用一次
pub unsafe fn init(max_level: ::log::LevelFilter) {
    // SAFETY: 由调用者保证
    unsafe {
        klog::register_context_provider(&LOG_CONTEXT);
        klog::register_log_output(&LOG_OUTPUT);
    }
    if klog::init_log_facade(max_level).is_err() {
        klog::pr_warn!("log: facade already installed");
    }
}

